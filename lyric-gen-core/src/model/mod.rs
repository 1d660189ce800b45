//! Word-level n-gram models and generation.
//!
//! This module provides:
//! - Sliding-window tokenization (`Tokenizer`)
//! - Read-only n-gram counts (`FrequencyTable`)
//! - The candidate words of a model (`Vocabulary`)
//! - Conditional probabilities and greedy generation (`NGramModel`)
//! - Generation requests (`PredictionInput`) and a high-level `Generator`

/// Splits normalized text into overlapping fixed-width word windows.
pub mod tokenizer;

/// Occurrence counts of the n-grams of one order.
///
/// Built once, possibly on several threads, then only read.
pub mod frequency;

/// Sorted set of candidate words.
pub mod vocabulary;

/// Fixed-order word model (`n >= 1`).
///
/// Handles counting, `P(word | context)` estimation,
/// next-word prediction and greedy sequence generation.
pub mod ngram_model;

/// Generation parameters: word count, start seed and fallback word.
pub mod prediction_input;

/// High-level interface building a model from lyrics and resolving seeds.
pub mod generator;
