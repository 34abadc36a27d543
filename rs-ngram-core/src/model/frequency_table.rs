use std::collections::HashMap;
use std::sync::Arc;

use super::vocabulary::{TokenId, Vocabulary};
use crate::error::ModelError;

/// Count of one n-gram and the window where it first occurred.
#[derive(Clone, Copy, Debug)]
struct Occurrence {
	first_seen: usize,
	count: usize,
}

/// Occurrence counts of every k-gram of a token sequence.
///
/// Keys are interned through the shared `Vocabulary`, so a window costs `k`
/// ids instead of `k` strings. The position of the first window producing a
/// key is kept as well, which gives rankings a deterministic tie-break.
///
/// # Invariants
/// - Every key has exactly `order` ids, all valid in `vocabulary`
/// - Every stored count is >= 1
#[derive(Clone, Debug)]
pub struct FrequencyTable {
	order: usize,
	vocabulary: Arc<Vocabulary>,
	counts: HashMap<Box<[TokenId]>, Occurrence>,
}

impl FrequencyTable {
	/// Counts every window of `k` consecutive tokens (stride 1, overlapping).
	///
	/// Builds its own vocabulary. A sequence shorter than `k` yields an
	/// empty table.
	///
	/// # Errors
	/// Returns `InvalidOrder` if `k == 0`.
	pub fn count(tokens: &[String], k: usize) -> Result<Self, ModelError> {
		let vocabulary = Arc::new(Vocabulary::new(tokens));
		let ids = vocabulary.encode_corpus(tokens);
		Self::count_ids(&ids, k, vocabulary)
	}

	/// Same as `count`, over a sequence already encoded with `vocabulary`.
	///
	/// # Errors
	/// Returns `InvalidOrder` if `k == 0`.
	pub fn count_ids(ids: &[TokenId], k: usize, vocabulary: Arc<Vocabulary>) -> Result<Self, ModelError> {
		if k == 0 {
			return Err(ModelError::InvalidOrder(k));
		}

		let mut counts: HashMap<Box<[TokenId]>, Occurrence> = HashMap::new();
		for (position, window) in ids.windows(k).enumerate() {
			match counts.get_mut(window) {
				Some(occurrence) => occurrence.count += 1,
				None => {
					counts.insert(window.into(), Occurrence { first_seen: position, count: 1 });
				}
			}
		}
		Ok(Self { order: k, vocabulary, counts })
	}

	/// Order `k` of the counted n-grams.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Vocabulary the keys are interned in.
	pub fn vocabulary(&self) -> &Arc<Vocabulary> {
		&self.vocabulary
	}

	/// Count of `ngram`, 0 if it never occurs.
	pub fn get(&self, ngram: &[String]) -> usize {
		self.vocabulary.encode(ngram).map_or(0, |ids| self.get_ids(&ids))
	}

	/// Count of an interned n-gram, 0 if it never occurs.
	pub fn get_ids(&self, ids: &[TokenId]) -> usize {
		self.counts.get(ids).map_or(0, |occurrence| occurrence.count)
	}

	/// Number of distinct n-grams.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// `(ngram, count)` in first-seen order.
	pub fn iter(&self) -> impl Iterator<Item = (Vec<&str>, usize)> {
		let mut entries: Vec<(&[TokenId], Occurrence)> = self.counts.iter().map(|(ids, o)| (&ids[..], *o)).collect();
		entries.sort_unstable_by_key(|(_, o)| o.first_seen);
		entries.into_iter().map(|(ids, o)| (self.words(ids), o.count))
	}

	/// The `limit` most frequent n-grams, by descending count.
	///
	/// Equal counts keep first-seen order.
	pub fn most_common(&self, limit: usize) -> Vec<(Vec<&str>, usize)> {
		let mut ranked: Vec<(&[TokenId], Occurrence)> = self.counts.iter().map(|(ids, o)| (&ids[..], *o)).collect();
		ranked.sort_unstable_by(|a, b| b.1.count.cmp(&a.1.count).then(a.1.first_seen.cmp(&b.1.first_seen)));
		ranked.truncate(limit);
		ranked.into_iter().map(|(ids, o)| (self.words(ids), o.count)).collect()
	}

	fn words(&self, ids: &[TokenId]) -> Vec<&str> {
		ids.iter().map(|&id| self.vocabulary.word(id)).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(text: &str) -> Vec<String> {
		text.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn test_count_trigrams() {
		let t = tokens("the cat sat on the mat the cat ran");
		let table = FrequencyTable::count(&t, 3).unwrap();

		assert_eq!(table.order(), 3);
		assert_eq!(table.len(), 7);
		for gram in ["the cat sat", "cat sat on", "sat on the", "on the mat", "the mat the", "mat the cat", "the cat ran"] {
			assert_eq!(table.get(&tokens(gram)), 1, "{gram}");
		}
		assert_eq!(table.get(&tokens("cat the mat")), 0);
		assert_eq!(table.get(&tokens("the dog sat")), 0);
	}

	#[test]
	fn test_count_bigrams_overlapping() {
		let t = tokens("the cat sat on the mat the cat ran");
		let table = FrequencyTable::count(&t, 2).unwrap();
		assert_eq!(table.get(&tokens("the cat")), 2);
		assert_eq!(table.get(&tokens("cat sat")), 1);

		let t = tokens("a a a a");
		let table = FrequencyTable::count(&t, 2).unwrap();
		assert_eq!(table.get(&tokens("a a")), 3);
		assert_eq!(table.len(), 1);
	}

	#[test]
	fn test_count_total_windows() {
		let t = tokens("a b c a b c d");
		for k in 1..=t.len() {
			let table = FrequencyTable::count(&t, k).unwrap();
			let total: usize = table.iter().map(|(_, count)| count).sum();
			assert_eq!(total, t.len() - k + 1);
		}
	}

	#[test]
	fn test_shared_vocabulary() {
		let t = tokens("b a b a c");
		let vocabulary = Arc::new(Vocabulary::new(&t));
		let ids = vocabulary.encode_corpus(&t);
		let table = FrequencyTable::count_ids(&ids, 2, Arc::clone(&vocabulary)).unwrap();

		assert!(Arc::ptr_eq(table.vocabulary(), &vocabulary));
		// "b a" is ids [1, 0]
		assert_eq!(table.get_ids(&[1, 0]), 2);
		assert_eq!(table.get(&tokens("b a")), 2);
	}

	#[test]
	fn test_order_larger_than_sequence() {
		let t = tokens("only two");
		assert!(FrequencyTable::count(&t, 3).unwrap().is_empty());
		assert!(FrequencyTable::count(&[], 1).unwrap().is_empty());
	}

	#[test]
	fn test_order_zero_is_rejected() {
		let t = tokens("a b");
		assert!(matches!(FrequencyTable::count(&t, 0), Err(ModelError::InvalidOrder(0))));
	}

	#[test]
	fn test_iter_in_first_seen_order() {
		let t = tokens("b a c a b d");
		let table = FrequencyTable::count(&t, 1).unwrap();
		let entries: Vec<(String, usize)> = table.iter().map(|(gram, count)| (gram.join(" "), count)).collect();
		assert_eq!(
			entries,
			vec![("b".to_owned(), 2), ("a".to_owned(), 2), ("c".to_owned(), 1), ("d".to_owned(), 1)]
		);
	}

	#[test]
	fn test_most_common_ties_keep_first_seen_order() {
		let t = tokens("b a c a b d");
		let table = FrequencyTable::count(&t, 1).unwrap();
		let ranked: Vec<(String, usize)> = table
			.most_common(3)
			.into_iter()
			.map(|(gram, count)| (gram.join(" "), count))
			.collect();
		assert_eq!(ranked, vec![("b".to_owned(), 2), ("a".to_owned(), 2), ("c".to_owned(), 1)]);
	}
}
