use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Arc;

use log::debug;

use super::frequency_model::FrequencyModel;
use super::frequency_table::FrequencyTable;
use super::generation_input::{GenerationInput, MAX_ORDER};
use super::generator::SequenceGenerator;
use super::suggester::top_prefixes;
use super::vocabulary::{TokenId, Vocabulary};
use crate::corpus::Corpus;
use crate::error::ModelError;

/// Number of frequency tables kept alive at once.
pub const MAX_CACHED_TABLES: usize = 8;

/// High-level entry point over one corpus.
///
/// # Responsibilities
/// - Own the (immutable, shared) corpus, interned once into token ids
/// - Count frequency tables on demand and keep the most recent ones
/// - Resolve start seeds, generate sequences and suggest prefixes
///
/// Tables are cached per order `k` and shared between models: the order-`n`
/// model reuses the order-`n-1` table of the suggestions for `n`, and so on.
/// Cached tables are identical to freshly counted ones since the corpus never
/// changes. At most `MAX_CACHED_TABLES` are kept, oldest evicted first.
#[derive(Debug)]
pub struct LanguageModel {
	corpus: Arc<Corpus>,
	vocabulary: Arc<Vocabulary>,
	ids: Vec<TokenId>,
	tables: HashMap<usize, Arc<FrequencyTable>>,
	insertion: VecDeque<usize>,
}

impl LanguageModel {
	/// Loads the corpus at `filepath` (see `Corpus::new`).
	pub fn new<P: AsRef<Path>>(filepath: P) -> Result<Self, ModelError> {
		Ok(Self::from_corpus(Arc::new(Corpus::new(filepath)?)))
	}

	/// Wraps an already loaded corpus.
	pub fn from_corpus(corpus: Arc<Corpus>) -> Self {
		let vocabulary = Arc::new(Vocabulary::new(corpus.tokens()));
		let ids = vocabulary.encode_corpus(corpus.tokens());
		debug!("Interned '{}': {} tokens, V = {}", corpus.name(), ids.len(), vocabulary.len());
		Self {
			corpus,
			vocabulary,
			ids,
			tables: HashMap::new(),
			insertion: VecDeque::new(),
		}
	}

	pub fn corpus(&self) -> &Arc<Corpus> {
		&self.corpus
	}

	/// Orders of the tables cached so far, ascending.
	#[cfg(test)]
	pub(crate) fn cached_orders(&self) -> Vec<usize> {
		let mut orders: Vec<usize> = self.tables.keys().copied().collect();
		orders.sort_unstable();
		orders
	}

	/// Returns the table of order `k`, counting it on first use.
	fn table(&mut self, k: usize) -> Result<Arc<FrequencyTable>, ModelError> {
		if let Some(table) = self.tables.get(&k) {
			debug!("Reusing {k}-gram table for '{}'", self.corpus.name());
			return Ok(Arc::clone(table));
		}

		let table = Arc::new(FrequencyTable::count_ids(&self.ids, k, Arc::clone(&self.vocabulary))?);
		if self.insertion.len() >= MAX_CACHED_TABLES {
			if let Some(oldest) = self.insertion.pop_front() {
				debug!("Evicting {oldest}-gram table for '{}'", self.corpus.name());
				self.tables.remove(&oldest);
			}
		}
		self.tables.insert(k, Arc::clone(&table));
		self.insertion.push_back(k);
		Ok(table)
	}

	/// Returns the model of order `n`, built from cached tables.
	///
	/// # Errors
	/// Returns `InvalidOrder` if `n` is outside `2..=MAX_ORDER`.
	pub fn frequency_model(&mut self, n: usize) -> Result<FrequencyModel, ModelError> {
		if !(2..=MAX_ORDER).contains(&n) {
			return Err(ModelError::InvalidOrder(n));
		}
		let context = self.table(n - 1)?;
		let full = self.table(n)?;
		FrequencyModel::from_tables(full, context)
	}

	/// Generates a sequence for `input`.
	///
	/// # Behavior
	/// - A custom seed must hold exactly `n-1` words.
	/// - A random seed is drawn from the corpus windows of size `n-1`.
	/// - When `length <= n` the seed is returned truncated and no table is counted.
	///
	/// # Errors
	/// - `InvalidPrefixLength` for a custom seed of the wrong size
	/// - `NoSeedAvailable` if a random seed is asked for a too short corpus
	pub fn generate(&mut self, input: &GenerationInput) -> Result<String, ModelError> {
		let n = input.n();
		let length = input.length();
		let prefix = match input.custom_words()? {
			Some(words) => words,
			None => self.random_prefix(n)?.split(' ').map(str::to_owned).collect(),
		};

		if length <= n {
			return Ok(prefix[..length.min(prefix.len())].join(" "));
		}

		let model = self.frequency_model(n)?;
		SequenceGenerator::new(&model).generate(&prefix, length)
	}

	/// The most frequent `n-1` word prefixes, at most ten.
	///
	/// Only the order-`n-1` table is counted. Empty for `n < 2`.
	///
	/// # Errors
	/// Returns `InvalidOrder` if `n > MAX_ORDER`.
	pub fn suggest_prefixes(&mut self, n: usize) -> Result<Vec<String>, ModelError> {
		if n < 2 {
			return Ok(Vec::new());
		}
		if n > MAX_ORDER {
			return Err(ModelError::InvalidOrder(n));
		}
		Ok(top_prefixes(&*self.table(n - 1)?))
	}

	/// A random `n-1` word window of the corpus.
	pub fn random_prefix(&self, n: usize) -> Result<String, ModelError> {
		self.corpus.random_prefix(n)
	}
}
