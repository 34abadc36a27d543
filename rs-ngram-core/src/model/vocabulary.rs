/// Index of a word in its `Vocabulary`.
pub type TokenId = u32;

/// Distinct tokens of a corpus, in lexicographic order.
///
/// Doubles as the token interner: a word's id is its rank, so iterating ids
/// in ascending order is iterating words in lexicographic order. That fixed
/// order is what makes greedy generation reproducible: when two candidates
/// score the same, the one enumerated first wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vocabulary {
	words: Vec<String>,
}

impl Vocabulary {
	/// Collects the distinct tokens of `tokens`.
	pub fn new(tokens: &[String]) -> Self {
		let mut words = tokens.to_vec();
		words.sort_unstable();
		words.dedup();
		Self { words }
	}

	/// Vocabulary size `V`.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Id of `word`, `None` if the corpus never contains it.
	pub fn id(&self, word: &str) -> Option<TokenId> {
		self.words
			.binary_search_by(|w| w.as_str().cmp(word))
			.ok()
			.map(|index| index as TokenId)
	}

	/// Word of a valid id.
	pub fn word(&self, id: TokenId) -> &str {
		&self.words[id as usize]
	}

	/// Ids of `words`, `None` as soon as one word is unknown.
	pub fn encode(&self, words: &[String]) -> Option<Vec<TokenId>> {
		words.iter().map(|w| self.id(w)).collect()
	}

	/// Ids of a token sequence this vocabulary was built from.
	///
	/// Unknown tokens are skipped, which cannot happen for the source sequence.
	pub fn encode_corpus(&self, tokens: &[String]) -> Vec<TokenId> {
		tokens.iter().filter_map(|t| self.id(t)).collect()
	}

	/// Words in lexicographic order, i.e. by ascending id.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.words.iter().map(String::as_str)
	}
}
