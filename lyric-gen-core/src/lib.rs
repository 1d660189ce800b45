//! Word-level n-gram language model for lyric generation.
//!
//! This crate provides:
//! - Corpus normalization and lyric JSON loading
//! - Fixed-order word n-gram counting
//! - Unsmoothed conditional probabilities `P(word | context)`
//! - Deterministic greedy generation from a seed context
//!
//! A built model is never modified, so it can be shared between threads
//! without locking.

/// N-gram models and generation logic.
pub mod model;

/// Corpus normalization and lyric file loading.
pub mod corpus;

/// Error type shared by the crate.
pub mod error;

/// I/O utilities (path helpers, directory listing).
///
/// Not exposed
pub(crate) mod io;

pub use error::ModelError;
pub use model::generator::Generator;
pub use model::ngram_model::{NGramModel, UNKNOWN_TOKEN};
pub use model::prediction_input::{PredictionInput, StartSeed};
pub use model::tokenizer::{NGram, Tokenizer};
pub use model::vocabulary::Vocabulary;
