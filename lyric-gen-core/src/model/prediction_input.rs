use crate::error::ModelError;
use super::ngram_model::UNKNOWN_TOKEN;

/// Number of words generated when nothing else is requested.
pub const DEFAULT_COUNT: usize = 15;

/// Strategy used to select the context a generation starts from.
///
/// # Variants
/// - `Random`: a random context observed in the corpus (default).
/// - `Custom(String)`: seed text, normalized and split into words.
/// - `False`: no seed; generation starts from an empty context. Only an
///   order-1 model knows the empty context.
#[derive(Clone, Debug, PartialEq)]
pub enum StartSeed {
	Random,
	Custom(String),
	False,
}

/// Parameters of a generation request.
///
/// # Invariants
/// - `default_token` is a single non-empty word (no whitespace), so that
///   joining the generated words with spaces keeps one entry per word
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionInput {
	/// Number of words to generate after the seed.
	pub count: usize,

	/// Context the generation starts from.
	pub start_seed: StartSeed,

	/// Word emitted when no continuation is known.
	default_token: String,
}

impl Default for PredictionInput {
	fn default() -> Self {
		Self {
			count: DEFAULT_COUNT,
			start_seed: StartSeed::Random,
			default_token: UNKNOWN_TOKEN.to_owned(),
		}
	}
}

impl PredictionInput {
	/// Creates an input generating `count` words after a custom seed.
	pub fn with_seed(seed: &str, count: usize) -> Self {
		Self {
			count,
			start_seed: StartSeed::Custom(seed.to_owned()),
			..Self::default()
		}
	}

	/// Returns the fallback word.
	pub fn default_token(&self) -> &str {
		&self.default_token
	}

	/// Sets the fallback word.
	///
	/// # Errors
	/// Returns an error if `token` is empty or contains whitespace.
	pub fn set_default_token(&mut self, token: &str) -> Result<(), ModelError> {
		if token.is_empty() || token.chars().any(char::is_whitespace) {
			return Err(ModelError::invalid(format!("default token must be a single word, got {token:?}")));
		}
		self.default_token = token.to_owned();
		Ok(())
	}
}
