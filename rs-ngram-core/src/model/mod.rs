//! Word n-gram model and greedy generation.
//!
//! - Frequency tables over overlapping windows (`FrequencyTable`)
//! - Sorted vocabulary interning tokens in a fixed candidate order (`Vocabulary`)
//! - Add-one smoothed scoring (`FrequencyModel`)
//! - Greedy arg-max extension of a prefix (`SequenceGenerator`)
//! - Most frequent prefixes (`suggester`)
//! - A facade caching frequency tables per order over one corpus (`LanguageModel`)

/// N-gram counting over a token sequence.
///
/// Produces interned tuple → count tables, keeping first-seen order for ties.
pub mod frequency_table;

/// Distinct corpus tokens in lexicographic order, doubling as the token interner.
pub mod vocabulary;

/// Order-n and order-(n-1) counts plus the vocabulary.
///
/// Computes the smoothed score of a next word given its context.
pub mod frequency_model;

/// Greedy, deterministic sequence generation.
pub mod generator;

/// Most frequent (n-1)-grams rendered as prefix suggestions.
pub mod suggester;

/// Validated generation parameters and start seed strategy.
pub mod generation_input;

/// High-level facade over a corpus with a bounded per-order table cache.
pub mod language_model;
