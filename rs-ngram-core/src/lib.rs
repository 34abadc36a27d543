//! Word-level n-gram language model.
//!
//! This crate provides:
//! - Corpus loading and tokenization, with a binary token cache
//! - N-gram frequency tables and an add-one smoothed model
//! - Deterministic greedy text generation from an (n-1)-word prefix
//! - Suggestion of the most frequent prefixes
//!
//! The two core operations are also available as free functions over a
//! plain token slice: [`generate`] and [`suggest_prefixes`].

/// N-gram tables, scoring and generation.
pub mod model;

/// Corpus (immutable token sequence) and tokenizer.
pub mod corpus;

/// Error type shared by the whole crate.
pub mod error;

/// File helpers for corpus loading.
///
/// Not exposed
pub(crate) mod io;

pub use corpus::{tokenize, Corpus};
pub use error::ModelError;
pub use model::generation_input::{GenerationInput, StartSeed, MAX_LENGTH, MAX_ORDER};
pub use model::generator::generate;
pub use model::language_model::LanguageModel;
pub use model::suggester::{suggest_prefixes, MAX_SUGGESTIONS};
