/// Errors raised while building a model or preparing a generation.
///
/// Lookups on a built model never fail: an unknown n-gram counts as zero
/// and an unpredictable context falls back to the caller's default token.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
	/// An argument is outside its valid domain (ex. an n-gram order of 0).
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// A random seed was requested from a model without any context.
	#[error("the model has no context to draw a seed from")]
	EmptyModel,

	/// Reading a corpus file failed.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// A lyrics file is not valid JSON or does not have the expected shape.
	#[error("malformed lyrics file: {0}")]
	Json(#[from] serde_json::Error),
}

impl ModelError {
	pub(crate) fn invalid(message: impl Into<String>) -> Self {
		Self::InvalidArgument(message.into())
	}
}
