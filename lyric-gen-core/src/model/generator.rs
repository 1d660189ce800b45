use std::path::Path;

use log::{debug, info};

use crate::corpus::{corpus_name, load_lyrics, preprocess_corpus, split_seed};
use crate::error::ModelError;
use crate::model::ngram_model::NGramModel;
use crate::model::prediction_input::{PredictionInput, StartSeed};
use crate::model::vocabulary::Vocabulary;

/// High-level generator wrapping a built `NGramModel`.
///
/// # Responsibilities
/// - Build a model from raw text or lyric files (normalization included)
/// - Resolve the start seed of a request into a context
/// - Generate word sequences for a `PredictionInput`
#[derive(Clone, Debug)]
pub struct Generator {
	model: NGramModel,
	corpus_names: Vec<String>,
}

impl Generator {
	/// Wraps an already built model.
	pub fn new(model: NGramModel) -> Self {
		Self { model, corpus_names: Vec::new() }
	}

	/// Normalizes raw text and builds a model of order `n` whose
	/// vocabulary is every word of the text.
	///
	/// # Errors
	/// Returns an error if `n == 0`.
	pub fn from_corpus(raw_corpus: &str, n: usize) -> Result<Self, ModelError> {
		let corpus = preprocess_corpus(raw_corpus);
		let vocabulary = Vocabulary::from_corpus(&corpus);
		Ok(Self::new(NGramModel::new(&corpus, vocabulary, n)?))
	}

	/// Loads lyric files, concatenates them in the given order and builds a
	/// model of order `n`.
	///
	/// # Errors
	/// - Returns an error if no file is given or if `n == 0`.
	/// - Returns an error if a file cannot be read or parsed.
	pub fn from_lyrics_files<P: AsRef<Path>>(paths: &[P], n: usize) -> Result<Self, ModelError> {
		if paths.is_empty() {
			return Err(ModelError::invalid("at least one lyrics file is required"));
		}

		let mut raw_corpus = String::new();
		let mut corpus_names = Vec::with_capacity(paths.len());
		for path in paths {
			raw_corpus.push_str(&load_lyrics(path)?);
			raw_corpus.push(' ');
			corpus_names.push(corpus_name(path)?);
		}
		info!("building {n}-gram model from {}", corpus_names.join(", "));

		let mut generator = Self::from_corpus(&raw_corpus, n)?;
		generator.corpus_names = corpus_names;
		Ok(generator)
	}

	/// Model order matching a seed text: one more than its word count.
	pub fn order_for_seed(seed: &str) -> usize {
		split_seed(seed).len() + 1
	}

	pub fn model(&self) -> &NGramModel {
		&self.model
	}

	/// Names of the lyric files the model was built from.
	pub fn corpus_names(&self) -> &[String] {
		&self.corpus_names
	}

	/// Resolves a start seed into the context generation begins with.
	///
	/// # Errors
	/// - Returns an error if a custom seed holds no word once normalized.
	/// - Returns an error for an empty seed on a model of order > 1, whose
	///   contexts are never empty.
	/// - Returns `ModelError::EmptyModel` for a random seed on an empty model.
	pub fn seed_context(&self, start_seed: &StartSeed) -> Result<Vec<String>, ModelError> {
		match start_seed {
			StartSeed::False if self.model.order() > 1 => Err(ModelError::invalid(format!(
				"a {}-gram model needs a seed of {} words",
				self.model.order(),
				self.model.order() - 1
			))),
			StartSeed::False => Ok(Vec::new()),
			StartSeed::Custom(text) => {
				let context = split_seed(text);
				if context.is_empty() {
					return Err(ModelError::invalid("custom seed holds no word"));
				}
				Ok(context)
			}
			StartSeed::Random => self.model.contexts().random_ngram().cloned().ok_or(ModelError::EmptyModel),
		}
	}

	/// Predicts the word following a seed text.
	pub fn predict(&self, context: &str, default: &str) -> String {
		self.model.predict_next_word(&split_seed(context), default)
	}

	/// Probability of `word` following a seed text.
	pub fn probability(&self, word: &str, context: &str) -> f64 {
		self.model.word_probability(&preprocess_corpus(word), &split_seed(context))
	}

	/// Generates words for a request.
	///
	/// Returns the seed context followed by `input.count` generated words.
	pub fn generate(&self, input: &PredictionInput) -> Result<Vec<String>, ModelError> {
		let context = self.seed_context(&input.start_seed)?;
		debug!("generating {} words after {:?}", input.count, context);
		Ok(self.model.generate_words_or(&context, input.count, input.default_token()))
	}

	/// Same as [`Generator::generate`], joined with spaces.
	pub fn generate_text(&self, input: &PredictionInput) -> Result<String, ModelError> {
		Ok(self.generate(input)?.join(" "))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::ngram_model::UNKNOWN_TOKEN;

	const RAW: &str = "We are never, ever, ever getting back together. We are never ever ever getting back together!";

	#[test]
	fn builds_from_raw_text() {
		let generator = Generator::from_corpus(RAW, 3).unwrap();
		assert_eq!(generator.model().order(), 3);
		assert!(generator.model().vocabulary().contains("together"));
		assert!(!generator.model().vocabulary().contains("We"));
		assert!(generator.corpus_names().is_empty());
	}

	#[test]
	fn order_follows_seed_length() {
		assert_eq!(Generator::order_for_seed("And you come away with a"), 7);
		assert_eq!(Generator::order_for_seed("  "), 1);
	}

	#[test]
	fn generates_from_custom_seed() {
		let generator = Generator::from_corpus(RAW, 2).unwrap();
		let input = PredictionInput::with_seed("Getting", 3);
		assert_eq!(generator.generate_text(&input).unwrap(), "getting back together we");
	}

	#[test]
	fn unknown_seed_uses_default_token() {
		let generator = Generator::from_corpus(RAW, 2).unwrap();
		let mut input = PredictionInput::with_seed("Love Story", 2);
		input.set_default_token("_").unwrap();
		assert_eq!(generator.generate(&input).unwrap(), vec!["love", "story", "_", "_"]);
	}

	#[test]
	fn rejects_empty_custom_seed() {
		let generator = Generator::from_corpus(RAW, 2).unwrap();
		let input = PredictionInput::with_seed("?!", 2);
		assert!(matches!(generator.generate(&input), Err(ModelError::InvalidArgument(_))));
	}

	#[test]
	fn random_seed_is_a_known_context() {
		let generator = Generator::from_corpus(RAW, 3).unwrap();
		let mut input = PredictionInput::default();
		input.count = 1;
		let words = generator.generate(&input).unwrap();
		assert_eq!(words.len(), 3);
		assert!(generator.model().contexts().count(&words[..2]) > 0);
		assert_ne!(words[2], UNKNOWN_TOKEN);

		let empty = Generator::from_corpus("", 3).unwrap();
		assert!(matches!(empty.generate(&input), Err(ModelError::EmptyModel)));
	}

	#[test]
	fn no_seed_on_order_one() {
		let generator = Generator::from_corpus(RAW, 1).unwrap();
		let mut input = PredictionInput::default();
		input.start_seed = StartSeed::False;
		input.count = 2;
		assert_eq!(generator.generate_text(&input).unwrap(), "ever ever");
	}

	#[test]
	fn no_seed_is_rejected_above_order_one() {
		let generator = Generator::from_corpus(RAW, 3).unwrap();
		let mut input = PredictionInput::default();
		input.start_seed = StartSeed::False;
		assert!(matches!(generator.generate(&input), Err(ModelError::InvalidArgument(_))));
	}

	#[test]
	fn default_input_never_degrades_to_unknown() {
		// Every context of this corpus has a continuation
		let generator = Generator::from_corpus("Shake it off, shake it off, shake it", 3).unwrap();
		let words = generator.generate(&PredictionInput::default()).unwrap();
		assert_eq!(words.len(), 2 + 15);
		assert!(generator.model().contexts().count(&words[..2]) > 0);
		assert!(words.iter().all(|w| w != UNKNOWN_TOKEN));
	}

	#[test]
	fn predicts_and_scores_seed_text() {
		let generator = Generator::from_corpus(RAW, 2).unwrap();
		assert_eq!(generator.predict("We", UNKNOWN_TOKEN), "are");
		assert_eq!(generator.probability("Are", "we"), 1.0);
		assert_eq!(generator.probability("ever", "Never,"), 1.0);
		assert_eq!(generator.probability("back", "ever"), 0.0);
	}

	#[test]
	fn loads_lyrics_files_in_order() {
		let dir = tempfile::tempdir().unwrap();
		let first = dir.path().join("speak_now.json");
		let second = dir.path().join("lover.json");
		std::fs::write(&first, r#"[{"Songs": [{"Lyrics": [{"Text": "Long live"}]}]}]"#).unwrap();
		std::fs::write(&second, r#"[{"Songs": [{"Lyrics": [{"Text": "Lover, live"}]}]}]"#).unwrap();

		let generator = Generator::from_lyrics_files(&[&first, &second], 2).unwrap();
		assert_eq!(generator.corpus_names(), ["speak_now", "lover"]);
		// the files are joined, so the last word of one precedes the first of the next
		assert_eq!(generator.model().word_probability("lover", &["live"]), 1.0 / 2.0);

		let none: [&Path; 0] = [];
		assert!(Generator::from_lyrics_files(&none, 2).is_err());
		assert!(Generator::from_lyrics_files(&[dir.path().join("missing.json")], 2).is_err());
	}
}
