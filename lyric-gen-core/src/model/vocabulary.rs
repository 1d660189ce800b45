use std::collections::BTreeSet;

/// The distinct words a model may predict.
///
/// Words are kept sorted, so every scan over the vocabulary visits them in
/// lexicographic order. Ties in prediction are broken by that order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vocabulary {
	words: BTreeSet<String>,
}

impl Vocabulary {
	/// Collects the distinct whitespace-separated words of a corpus.
	pub fn from_corpus(corpus: &str) -> Self {
		corpus.split_whitespace().collect()
	}

	pub fn contains(&self, word: &str) -> bool {
		self.words.contains(word)
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Iterates over the words in lexicographic order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.words.iter().map(String::as_str)
	}
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self {
			words: iter.into_iter().map(Into::into).collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn distinct_and_sorted() {
		let vocabulary = Vocabulary::from_corpus("you belong with me you belong");
		assert_eq!(vocabulary.len(), 4);
		assert_eq!(vocabulary.iter().collect::<Vec<_>>(), vec!["belong", "me", "with", "you"]);
		assert!(vocabulary.contains("me"));
		assert!(!vocabulary.contains("them"));
	}

	#[test]
	fn collects_from_any_strings() {
		let vocabulary: Vocabulary = vec!["b".to_string(), "a".to_string(), "b".to_string()].into_iter().collect();
		assert_eq!(vocabulary.iter().collect::<Vec<_>>(), vec!["a", "b"]);
		assert!(Vocabulary::default().is_empty());
	}
}
