use log::{info, warn};

use super::frequency::FrequencyTable;
use super::tokenizer::{NGram, Tokenizer};
use super::vocabulary::Vocabulary;
use crate::error::ModelError;

/// Token returned when no word of the vocabulary can follow a context.
pub const UNKNOWN_TOKEN: &str = "<unk>";

/// Word-level n-gram model built from a normalized corpus.
///
/// The model stores how often each n-gram and each (n-1)-gram occurs and
/// estimates `P(word | context)` as the ratio of the two counts, without
/// smoothing. Generation is greedy: the most probable word is always
/// picked.
///
/// # Responsibilities
/// - Count the n-grams and the (n-1)-gram contexts of a corpus
/// - Answer conditional probability queries
/// - Predict the next word of a context and generate word sequences
///
/// # Invariants
/// - `n` is always >= 1
/// - `ngrams` has order `n`, `contexts` has order `n - 1`
/// - The model is never modified once built
///
/// # Order 1
/// With `n == 1` the context is empty. The context table then holds a
/// single bucket, the empty n-gram, counted once per corpus word, which
/// makes `P(word | ())` the relative frequency of `word` in the corpus.
#[derive(Clone, Debug)]
pub struct NGramModel {
	/// The order of the model (number of words in an n-gram)
	n: usize,

	/// Counts of the n-grams of the corpus
	ngrams: FrequencyTable,

	/// Counts of the (n-1)-grams of the corpus, used as denominators
	contexts: FrequencyTable,

	/// Candidate words for prediction
	vocabulary: Vocabulary,
}

impl NGramModel {
	/// Builds a model of order `n` from a normalized corpus.
	///
	/// # Errors
	/// Returns `ModelError::InvalidArgument` if `n == 0`.
	pub fn new(corpus: &str, vocabulary: Vocabulary, n: usize) -> Result<Self, ModelError> {
		if n == 0 {
			return Err(ModelError::invalid("n must be a positive integer"));
		}
		if vocabulary.is_empty() {
			warn!("building a {n}-gram model with an empty vocabulary, every prediction will fall back to the default token");
		}

		let ngrams = FrequencyTable::from_ngrams(n, &Tokenizer::generate(corpus, n)?);
		let contexts = if n > 1 {
			FrequencyTable::from_ngrams(n - 1, &Tokenizer::generate(corpus, n - 1)?)
		} else {
			FrequencyTable::global_bucket(corpus.split_whitespace().count())
		};

		info!(
			"built {n}-gram model: {} distinct n-grams, {} distinct contexts, {} words in vocabulary",
			ngrams.len(),
			contexts.len(),
			vocabulary.len()
		);

		Ok(Self { n, ngrams, contexts, vocabulary })
	}

	/// Returns the order of the model.
	pub fn order(&self) -> usize {
		self.n
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	/// Counts of the n-grams of order `n`.
	pub fn ngrams(&self) -> &FrequencyTable {
		&self.ngrams
	}

	/// Counts of the contexts, of order `n - 1`.
	pub fn contexts(&self) -> &FrequencyTable {
		&self.contexts
	}

	/// Probability of `a` following the context `b`.
	///
	/// Computed as `count(b ++ a) / count(b)`. A context that never occurs
	/// has a probability of 0.0 for every word.
	pub fn probability(&self, a: &[String], b: &[String]) -> f64 {
		let b_frequency = self.contexts.count(b);
		if b_frequency == 0 {
			return 0.0;
		}

		let joined: NGram = b.iter().chain(a).cloned().collect();
		self.ngrams.count(&joined) as f64 / b_frequency as f64
	}

	/// Probability of a single `word` following `context`.
	pub fn word_probability<S: AsRef<str>>(&self, word: &str, context: &[S]) -> f64 {
		self.probability(&[word.to_owned()], &to_ngram(context))
	}

	/// Predicts the most probable word following `context`.
	///
	/// The vocabulary is scanned in lexicographic order and a candidate only
	/// replaces the current best when its probability is strictly greater,
	/// so among equally probable words the first in that order wins.
	/// Returns `default` if no word has a probability above 0.0.
	pub fn predict_next_word<S: AsRef<str>>(&self, context: &[S], default: &str) -> String {
		let mut key = to_ngram(context);

		let context_frequency = self.contexts.count(&key);
		if context_frequency == 0 {
			return default.to_owned();
		}

		let mut max_probability = 0.0;
		let mut best_word: Option<&str> = None;

		key.push(String::new());
		for word in self.vocabulary.iter() {
			if let Some(last) = key.last_mut() {
				last.clear();
				last.push_str(word);
			}
			let probability = self.ngrams.count(&key) as f64 / context_frequency as f64;
			if probability > max_probability {
				max_probability = probability;
				best_word = Some(word);
			}
		}

		best_word.unwrap_or(default).to_owned()
	}

	/// Generates `count` words after `context`, falling back to
	/// [`UNKNOWN_TOKEN`] when a context has no known continuation.
	///
	/// See [`NGramModel::generate_words_or`].
	pub fn generate_words<S: AsRef<str>>(&self, context: &[S], count: usize) -> Vec<String> {
		self.generate_words_or(context, count, UNKNOWN_TOKEN)
	}

	/// Generates `count` words after `context`.
	///
	/// Each new word is predicted from the last `n - 1` words of the
	/// sequence so far (all of them if the sequence is shorter), then
	/// appended. The returned sequence starts with `context` unchanged and
	/// holds `context.len() + count` words.
	pub fn generate_words_or<S: AsRef<str>>(&self, context: &[S], count: usize, default: &str) -> Vec<String> {
		let mut generated_words = to_ngram(context);
		generated_words.reserve(count);
		let slide = self.n - 1;

		for _ in 0..count {
			let start = generated_words.len().saturating_sub(slide);
			let next_word = self.predict_next_word(&generated_words[start..], default);
			generated_words.push(next_word);
		}

		generated_words
	}
}

fn to_ngram<S: AsRef<str>>(words: &[S]) -> NGram {
	words.iter().map(|word| word.as_ref().to_owned()).collect()
}
