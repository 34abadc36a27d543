use log::warn;

use super::frequency_model::FrequencyModel;
use super::generation_input::MAX_LENGTH;
use super::vocabulary::TokenId;
use crate::error::ModelError;

/// Greedy, deterministic sequence extension over a `FrequencyModel`.
///
/// At every step the last `n-1` words are used as context and the whole
/// vocabulary is scanned in lexicographic order. The first candidate with the
/// strictly highest smoothed score is appended.
///
/// # Termination
/// - The sequence reaches the requested length, or
/// - no candidate scores above 0 (only possible with an empty vocabulary),
///   in which case the sequence built so far is returned.
#[derive(Clone, Copy, Debug)]
pub struct SequenceGenerator<'a> {
	model: &'a FrequencyModel,
}

impl<'a> SequenceGenerator<'a> {
	pub fn new(model: &'a FrequencyModel) -> Self {
		Self { model }
	}

	/// Best next word after `context`, with its score.
	///
	/// The context is interned once, then one key slot is reused for every
	/// candidate id. Returns `None` if no word scores strictly above 0.
	pub fn next_token(&self, context: &[String]) -> Option<(&'a str, f64)> {
		let model = self.model;
		let vocabulary = model.vocabulary();
		let Some(mut key) = vocabulary.encode(context) else {
			// Unknown word in the context: uniform scores, the first word wins
			let score = model.unseen_score();
			return vocabulary.iter().next().filter(|_| score > 0.0).map(|word| (word, score));
		};

		key.push(0);
		let last = key.len() - 1;
		let mut max_score = 0.0;
		let mut best = None;
		for id in 0..vocabulary.len() as TokenId {
			key[last] = id;
			let score = model.score_ids(&key);
			if score > max_score {
				max_score = score;
				best = Some(id);
			}
		}

		best.map(|id| (vocabulary.word(id), max_score))
	}

	/// Extends `prefix` (exactly `n-1` words) to `length` words.
	///
	/// If `length <= n` no lookup is done: the first `length` words of the
	/// prefix are returned, which may be fewer than `n-1`.
	///
	/// # Errors
	/// - `InvalidPrefixLength` if the prefix does not hold `n-1` words
	/// - `LengthTooLarge` if `length > MAX_LENGTH`
	pub fn extend(&self, prefix: &[String], length: usize) -> Result<Vec<String>, ModelError> {
		let n = self.model.n();
		check_prefix(prefix, n)?;
		check_length(length)?;
		if length <= n {
			return Ok(truncated(prefix, length));
		}

		let mut sentence = prefix.to_vec();
		while sentence.len() < length {
			let context = &sentence[sentence.len() - (n - 1)..];
			match self.next_token(context) {
				Some((word, _)) => sentence.push(word.to_owned()),
				None => {
					warn!("Empty vocabulary, generation stopped at {} words", sentence.len());
					break;
				}
			}
		}
		Ok(sentence)
	}

	/// Same as `extend`, joined with single spaces.
	pub fn generate(&self, prefix: &[String], length: usize) -> Result<String, ModelError> {
		Ok(self.extend(prefix, length)?.join(" "))
	}
}

/// Generates `length` words from `tokens`, starting from `context`.
///
/// Builds the order-`n` model only when generation actually has to happen:
/// for `length <= n` the context is returned truncated, without counting.
///
/// # Errors
/// - `InvalidOrder` if `n < 2`
/// - `InvalidPrefixLength` if `context` does not hold `n-1` words
/// - `LengthTooLarge` if `length > MAX_LENGTH`
pub fn generate(tokens: &[String], n: usize, context: &[String], length: usize) -> Result<String, ModelError> {
	if n < 2 {
		return Err(ModelError::InvalidOrder(n));
	}
	check_prefix(context, n)?;
	check_length(length)?;
	if length <= n {
		return Ok(truncated(context, length).join(" "));
	}

	let model = FrequencyModel::new(tokens, n)?;
	SequenceGenerator::new(&model).generate(context, length)
}

fn check_prefix(prefix: &[String], n: usize) -> Result<(), ModelError> {
	if prefix.len() != n - 1 {
		return Err(ModelError::InvalidPrefixLength { expected: n - 1, got: prefix.len() });
	}
	Ok(())
}

fn check_length(length: usize) -> Result<(), ModelError> {
	if length > MAX_LENGTH {
		return Err(ModelError::LengthTooLarge { max: MAX_LENGTH, got: length });
	}
	Ok(())
}

fn truncated(prefix: &[String], length: usize) -> Vec<String> {
	prefix[..length.min(prefix.len())].to_vec()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(text: &str) -> Vec<String> {
		text.split_whitespace().map(str::to_owned).collect()
	}

	fn corpus() -> Vec<String> {
		tokens("the cat sat on the mat the cat ran")
	}

	#[test]
	fn test_tie_goes_to_first_word_in_lexicographic_order() {
		let model = FrequencyModel::new(&corpus(), 3).unwrap();
		let generator = SequenceGenerator::new(&model);

		// "ran" and "sat" both score (1 + 1) / (2 + 6), "ran" comes first
		assert_eq!(generator.next_token(&tokens("the cat")), Some(("ran", 0.25)));
	}

	#[test]
	fn test_generate_scenario() {
		// the cat -> ran (tie broken lexicographically)
		// cat ran -> every word at 1/7, "cat" first
		// ran cat -> unseen context, every word at 1/6, "cat" first
		let result = generate(&corpus(), 3, &tokens("the cat"), 5).unwrap();
		assert_eq!(result, "the cat ran cat cat");
	}

	#[test]
	fn test_generate_follows_most_frequent_continuation() {
		let t = tokens("a b a b a b a c");
		let result = generate(&t, 2, &tokens("a"), 6).unwrap();
		assert_eq!(result, "a b a b a b");
	}

	#[test]
	fn test_generate_is_idempotent() {
		let t = tokens("in the beginning was the word and the word was with god and the word was god");
		let first = generate(&t, 3, &tokens("the word"), 20).unwrap();
		let second = generate(&t, 3, &tokens("the word"), 20).unwrap();
		assert_eq!(first, second);
		assert_eq!(first.split(' ').count(), 20);
	}

	#[test]
	fn test_short_circuit_returns_prefix() {
		assert_eq!(generate(&corpus(), 3, &tokens("the cat"), 2).unwrap(), "the cat");
		assert_eq!(generate(&corpus(), 3, &tokens("the cat"), 3).unwrap(), "the cat");
		assert_eq!(generate(&corpus(), 3, &tokens("the cat"), 1).unwrap(), "the");
		assert_eq!(generate(&corpus(), 3, &tokens("the cat"), 0).unwrap(), "");
	}

	#[test]
	fn test_short_circuit_does_not_need_a_corpus() {
		// Words absent from the corpus are returned untouched
		assert_eq!(generate(&[], 4, &tokens("x y z"), 4).unwrap(), "x y z");
	}

	#[test]
	fn test_unknown_prefix_still_reaches_length() {
		let result = generate(&corpus(), 3, &tokens("dog barks"), 6).unwrap();
		assert_eq!(result.split(' ').count(), 6);
		assert!(result.starts_with("dog barks "));
	}

	#[test]
	fn test_empty_vocabulary_returns_prefix() {
		let result = generate(&[], 2, &tokens("alone"), 5).unwrap();
		assert_eq!(result, "alone");

		let model = FrequencyModel::new(&[], 3).unwrap();
		assert_eq!(SequenceGenerator::new(&model).next_token(&tokens("a b")), None);
	}

	#[test]
	fn test_huge_length_is_rejected() {
		let result = generate(&corpus(), 2, &tokens("the"), usize::MAX);
		assert!(matches!(result, Err(ModelError::LengthTooLarge { max: MAX_LENGTH, got: usize::MAX })));

		let model = FrequencyModel::new(&corpus(), 2).unwrap();
		let result = SequenceGenerator::new(&model).extend(&tokens("the"), MAX_LENGTH + 1);
		assert!(matches!(result, Err(ModelError::LengthTooLarge { .. })));
	}

	#[test]
	fn test_maximum_length_is_reached() {
		let result = generate(&corpus(), 2, &tokens("the"), MAX_LENGTH).unwrap();
		assert_eq!(result.split(' ').count(), MAX_LENGTH);
	}

	#[test]
	fn test_next_token_with_unknown_context_word() {
		let model = FrequencyModel::new(&corpus(), 3).unwrap();
		let generator = SequenceGenerator::new(&model);
		assert_eq!(generator.next_token(&tokens("dog cat")), Some(("cat", 1.0 / 6.0)));
	}

	#[test]
	fn test_invalid_prefix_length() {
		let result = generate(&corpus(), 3, &tokens("the"), 5);
		assert!(matches!(result, Err(ModelError::InvalidPrefixLength { expected: 2, got: 1 })));

		let model = FrequencyModel::new(&corpus(), 2).unwrap();
		let result = SequenceGenerator::new(&model).extend(&tokens("the cat"), 5);
		assert!(matches!(result, Err(ModelError::InvalidPrefixLength { expected: 1, got: 2 })));
	}

	#[test]
	fn test_invalid_order() {
		assert!(matches!(generate(&corpus(), 1, &[], 5), Err(ModelError::InvalidOrder(1))));
	}
}
