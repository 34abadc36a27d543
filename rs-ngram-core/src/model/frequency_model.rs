use std::sync::Arc;

use log::debug;

use super::frequency_table::FrequencyTable;
use super::vocabulary::{TokenId, Vocabulary};
use crate::error::ModelError;

/// Word n-gram model with add-one (Laplace) smoothing.
///
/// Holds the order-`n` counts, the order-`n-1` context counts and the
/// vocabulary of the token sequence it was built from. Tables are shared
/// behind `Arc`s so that several models (and the prefix suggester) can reuse
/// the same counts.
///
/// # Responsibilities
/// - Count full n-grams and their contexts
/// - Score a candidate next token given an `n-1` token context
///
/// # Invariants
/// - `n` is always >= 2
/// - `full.order() == n` and `context.order() == n - 1`
/// - Both tables are interned in `vocabulary`
#[derive(Clone, Debug)]
pub struct FrequencyModel {
	vocabulary: Arc<Vocabulary>,
	full: Arc<FrequencyTable>,
	context: Arc<FrequencyTable>,
}

impl FrequencyModel {
	/// Builds the model of order `n` over `tokens`.
	///
	/// # Errors
	/// Returns `InvalidOrder` if `n < 2`.
	pub fn new(tokens: &[String], n: usize) -> Result<Self, ModelError> {
		if n < 2 {
			return Err(ModelError::InvalidOrder(n));
		}
		let vocabulary = Arc::new(Vocabulary::new(tokens));
		let ids = vocabulary.encode_corpus(tokens);
		let full = FrequencyTable::count_ids(&ids, n, Arc::clone(&vocabulary))?;
		let context = FrequencyTable::count_ids(&ids, n - 1, Arc::clone(&vocabulary))?;
		Self::from_tables(Arc::new(full), Arc::new(context))
	}

	/// Assembles a model from tables counted over the same sequence.
	///
	/// # Errors
	/// Returns `InvalidOrder` if the orders are not `n` and `n - 1` with
	/// `n >= 2`, or if the tables do not share one vocabulary.
	pub fn from_tables(full: Arc<FrequencyTable>, context: Arc<FrequencyTable>) -> Result<Self, ModelError> {
		let n = full.order();
		if n < 2 || context.order() + 1 != n || !Arc::ptr_eq(full.vocabulary(), context.vocabulary()) {
			return Err(ModelError::InvalidOrder(n));
		}
		let vocabulary = Arc::clone(full.vocabulary());
		debug!(
			"Built {}-gram model: {} n-grams, {} contexts, V = {}",
			n,
			full.len(),
			context.len(),
			vocabulary.len()
		);
		Ok(Self { vocabulary, full, context })
	}

	/// Order of the model.
	pub fn n(&self) -> usize {
		self.full.order()
	}

	/// Order-`n` counts.
	pub fn full_table(&self) -> &FrequencyTable {
		&self.full
	}

	/// Order-`n-1` counts.
	pub fn context_table(&self) -> &FrequencyTable {
		&self.context
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	/// Score of every candidate after a context the corpus never contains.
	pub fn unseen_score(&self) -> f64 {
		match self.vocabulary.len() {
			0 => 0.0,
			v => 1.0 / v as f64,
		}
	}

	/// Smoothed score of an interned n-gram: the context ids followed by the
	/// candidate id.
	///
	/// An empty `key` scores 0.
	pub fn score_ids(&self, key: &[TokenId]) -> f64 {
		let Some((_, context)) = key.split_last() else {
			return 0.0;
		};
		let count_context = self.context.get_ids(context);
		if count_context == 0 {
			return self.unseen_score();
		}
		let count_full = self.full.get_ids(key);
		(count_full + 1) as f64 / (count_context + self.vocabulary.len()) as f64
	}

	/// Smoothed score of `candidate` following `context`.
	///
	/// - Context seen `c > 0` times: `(count(context + candidate) + 1) / (c + V)`
	/// - Context never seen: `1 / V`
	///
	/// The result lies in `(0, 1]` whenever `V >= 1`. An empty vocabulary
	/// scores everything `0.0`, which no candidate can improve on.
	pub fn score_next_token(&self, context: &[String], candidate: &str) -> f64 {
		let Some(mut key) = self.vocabulary.encode(context) else {
			return self.unseen_score();
		};
		match self.vocabulary.id(candidate) {
			Some(id) => {
				key.push(id);
				self.score_ids(&key)
			}
			None => {
				// Never part of an n-gram, only the context count matters
				let count_context = self.context.get_ids(&key);
				if count_context == 0 {
					return self.unseen_score();
				}
				1.0 / (count_context + self.vocabulary.len()) as f64
			}
		}
	}
}
