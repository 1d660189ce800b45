use crate::error::ModelError;

/// An ordered, fixed-length sequence of words.
///
/// Two n-grams are equal only if every position matches.
pub type NGram = Vec<String>;

/// Splits normalized text into overlapping word windows.
pub struct Tokenizer;

impl Tokenizer {
	/// Returns every contiguous n-gram of `text`, in corpus order.
	///
	/// The text is split on whitespace, then a window of width `n` slides
	/// over the words one position at a time. Consecutive windows share
	/// `n - 1` words. A text holding fewer than `n` words yields no n-gram.
	///
	/// # Errors
	/// Returns `ModelError::InvalidArgument` if `n == 0`.
	pub fn generate(text: &str, n: usize) -> Result<Vec<NGram>, ModelError> {
		if n == 0 {
			return Err(ModelError::invalid("n must be a positive integer"));
		}

		let words: Vec<&str> = text.split_whitespace().collect();
		Ok(Self::windows(&words, n))
	}

	/// Sliding windows over already split words. `n` must be >= 1.
	pub(crate) fn windows(words: &[&str], n: usize) -> Vec<NGram> {
		words
			.windows(n)
			.map(|window| window.iter().map(|word| (*word).to_owned()).collect())
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn gram(words: &[&str]) -> NGram {
		words.iter().map(|w| w.to_string()).collect()
	}

	#[test]
	fn rejects_order_zero() {
		assert!(matches!(Tokenizer::generate("a b c", 0), Err(ModelError::InvalidArgument(_))));
	}

	#[test]
	fn bigrams_in_corpus_order() {
		let grams = Tokenizer::generate("a b a c a b", 2).unwrap();
		assert_eq!(grams, vec![
			gram(&["a", "b"]),
			gram(&["b", "a"]),
			gram(&["a", "c"]),
			gram(&["c", "a"]),
			gram(&["a", "b"]),
		]);
	}

	#[test]
	fn short_text_has_no_ngram() {
		assert!(Tokenizer::generate("one two", 3).unwrap().is_empty());
		assert!(Tokenizer::generate("", 1).unwrap().is_empty());
		assert!(Tokenizer::generate("   ", 2).unwrap().is_empty());
	}

	#[test]
	fn exact_length_gives_one_window() {
		assert_eq!(Tokenizer::generate("x y z", 3).unwrap(), vec![gram(&["x", "y", "z"])]);
	}

	#[test]
	fn unigrams_are_the_words() {
		let grams = Tokenizer::generate("love story  love", 1).unwrap();
		assert_eq!(grams, vec![gram(&["love"]), gram(&["story"]), gram(&["love"])]);
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(64))]

		#[test]
		fn window_count_matches_word_count(words in proptest::collection::vec("[a-z0-9]{1,6}", 0..40), n in 1usize..6) {
			let text = words.join(" ");
			let grams = Tokenizer::generate(&text, n).unwrap();
			prop_assert_eq!(grams.len(), (words.len() + 1).saturating_sub(n));
		}

		#[test]
		fn windows_match_source_and_overlap(words in proptest::collection::vec("[a-z]{1,4}", 0..30), n in 1usize..5) {
			let text = words.join(" ");
			let grams = Tokenizer::generate(&text, n).unwrap();
			for (i, g) in grams.iter().enumerate() {
				prop_assert_eq!(g.len(), n);
				prop_assert_eq!(g.as_slice(), &words[i..i + n]);
			}
			for pair in grams.windows(2) {
				prop_assert_eq!(&pair[0][1..], &pair[1][..n - 1]);
			}
		}
	}
}
