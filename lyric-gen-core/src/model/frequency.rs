use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use log::debug;
use rand::prelude::IteratorRandom;

use super::tokenizer::NGram;

/// Below this many n-grams, counting stays on the calling thread.
const PARALLEL_THRESHOLD: usize = 16_384;

/// Number of chunks per CPU when counting in parallel.
const CHUNKS_PER_CPU: usize = 4;

/// Occurrence counts of every n-gram of a single order.
///
/// A table is filled once, while the model is built, and only read
/// afterward.
///
/// ## Invariants
/// - Every key has exactly `order` words
/// - Every stored count is strictly positive
/// - `total` is the sum of all counts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
	/// Number of words in each n-gram.
	order: usize,
	/// Occurrences indexed by n-gram.
	/// Example: { ["a", "b"] => 2, ["b", "a"] => 1 }
	counts: HashMap<NGram, usize>,
	/// Number of n-grams counted, duplicates included.
	total: usize,
}

impl FrequencyTable {
	fn new(order: usize) -> Self {
		Self {
			order,
			counts: HashMap::new(),
			total: 0,
		}
	}

	/// Counts a list of n-grams of the given order.
	///
	/// Large lists are split into chunks counted on worker threads, then
	/// the partial tables are merged. Addition commutes, so the result is
	/// the same as a sequential count.
	pub(crate) fn from_ngrams(order: usize, ngrams: &[NGram]) -> Self {
		if ngrams.len() < PARALLEL_THRESHOLD {
			return Self::count_sequential(order, ngrams);
		}
		let chunks = num_cpus::get() * CHUNKS_PER_CPU;
		Self::count_in_chunks(order, ngrams, ngrams.len().div_ceil(chunks))
	}

	/// The order-0 table: a single global bucket, the empty n-gram, seen
	/// once per corpus word.
	pub(crate) fn global_bucket(word_count: usize) -> Self {
		let mut table = Self::new(0);
		if word_count > 0 {
			table.counts.insert(Vec::new(), word_count);
			table.total = word_count;
		}
		table
	}

	fn count_sequential(order: usize, ngrams: &[NGram]) -> Self {
		let mut table = Self::new(order);
		for ngram in ngrams {
			table.add(ngram);
		}
		table
	}

	fn count_in_chunks(order: usize, ngrams: &[NGram], chunk_size: usize) -> Self {
		let chunk_size = chunk_size.max(1);
		let (tx, rx) = mpsc::channel();

		thread::scope(|scope| {
			for chunk in ngrams.chunks(chunk_size) {
				let tx = tx.clone();
				scope.spawn(move || {
					tx.send(Self::count_sequential(order, chunk)).expect("Failed to send from thread");
				});
			}
		});
		drop(tx);

		let mut table = Self::new(order);
		let mut partials = 0;
		for partial in rx.iter() {
			table.merge(partial);
			partials += 1;
		}
		debug!("merged {partials} partial tables of order {order} ({} distinct n-grams)", table.counts.len());
		table
	}

	/// Records one occurrence of `ngram`.
	fn add(&mut self, ngram: &[String]) {
		debug_assert_eq!(ngram.len(), self.order);
		match self.counts.get_mut(ngram) {
			Some(count) => *count += 1,
			None => {
				self.counts.insert(ngram.to_vec(), 1);
			}
		}
		self.total += 1;
	}

	/// Sums the counts of another table of the same order into this one.
	fn merge(&mut self, other: Self) {
		debug_assert_eq!(self.order, other.order);
		for (ngram, count) in other.counts {
			*self.counts.entry(ngram).or_insert(0) += count;
		}
		self.total += other.total;
	}

	/// Occurrences of `ngram`, 0 if it was never seen.
	pub fn count(&self, ngram: &[String]) -> usize {
		self.counts.get(ngram).copied().unwrap_or(0)
	}

	/// Number of words in each n-gram of the table.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct n-grams.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Number of n-grams counted, duplicates included.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Picks a uniformly random n-gram of the table.
	///
	/// Returns `None` if the table is empty.
	pub fn random_ngram(&self) -> Option<&NGram> {
		self.counts.keys().choose(&mut rand::rng())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::tokenizer::Tokenizer;

	fn gram(words: &[&str]) -> NGram {
		words.iter().map(|w| w.to_string()).collect()
	}

	#[test]
	fn counts_repeated_ngrams() {
		let grams = Tokenizer::generate("a b a c a b", 2).unwrap();
		let table = FrequencyTable::from_ngrams(2, &grams);

		assert_eq!(table.order(), 2);
		assert_eq!(table.count(&gram(&["a", "b"])), 2);
		assert_eq!(table.count(&gram(&["c", "a"])), 1);
		assert_eq!(table.count(&gram(&["b", "c"])), 0);
		assert_eq!(table.len(), 4);
		assert_eq!(table.total(), 5);
	}

	#[test]
	fn unknown_ngram_counts_zero() {
		let table = FrequencyTable::from_ngrams(3, &[]);
		assert!(table.is_empty());
		assert_eq!(table.count(&gram(&["never", "seen", "this"])), 0);
		assert!(table.random_ngram().is_none());
	}

	#[test]
	fn chunked_count_matches_sequential() {
		let text = "we are never ever ever getting back together we are never ever getting back";
		let grams = Tokenizer::generate(text, 2).unwrap();
		let sequential = FrequencyTable::count_sequential(2, &grams);

		for chunk_size in [1, 2, 3, 7, grams.len(), grams.len() + 10] {
			assert_eq!(FrequencyTable::count_in_chunks(2, &grams, chunk_size), sequential);
		}
	}

	#[test]
	fn global_bucket_counts_every_word() {
		let table = FrequencyTable::global_bucket(6);
		assert_eq!(table.order(), 0);
		assert_eq!(table.count(&[]), 6);
		assert_eq!(table.len(), 1);

		assert!(FrequencyTable::global_bucket(0).is_empty());
	}

	#[test]
	fn random_ngram_comes_from_the_table() {
		let grams = Tokenizer::generate("shake it off shake it off", 2).unwrap();
		let table = FrequencyTable::from_ngrams(2, &grams);
		let picked = table.random_ngram().unwrap();
		assert!(table.count(picked) > 0);
	}
}
