use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, info};
use rand::prelude::IteratorRandom;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::io::{build_output_path, get_filename, read_file};

/// Splits raw text into normalized word tokens.
///
/// - Lowercases everything
/// - Replaces every character that is neither a word character
///   (alphanumeric or `_`) nor whitespace with a space
/// - Splits on whitespace, so no token is ever empty
pub fn tokenize(text: &str) -> Vec<String> {
	let cleaned: String = text
		.chars()
		.flat_map(|c| c.to_lowercase())
		.map(|c| if c.is_alphanumeric() || c == '_' || c.is_whitespace() { c } else { ' ' })
		.collect();

	cleaned.split_whitespace().map(str::to_owned).collect()
}

/// Immutable, ordered sequence of word tokens the model learns from.
///
/// A corpus is loaded once per process and then shared by reference
/// (typically behind an `Arc`). Nothing mutates it after construction.
///
/// # Invariants
/// - No token is empty
/// - Tokens are lowercase and free of punctuation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Corpus {
	name: String,
	tokens: Vec<String>,
}

impl Corpus {
	/// Builds a corpus from tokens already normalized by the caller.
	///
	/// Empty tokens are dropped to keep the invariant.
	pub fn from_tokens(name: &str, tokens: Vec<String>) -> Self {
		let tokens = tokens.into_iter().filter(|t| !t.is_empty()).collect();
		Self { name: name.to_owned(), tokens }
	}

	/// Builds a corpus by tokenizing in-memory text.
	pub fn from_text(name: &str, text: &str) -> Self {
		Self { name: name.to_owned(), tokens: tokenize(text) }
	}

	/// Loads a corpus from a text file.
	///
	/// - If `<stem>.bin` exists next to the file, the token sequence is decoded
	///   from it with `postcard`.
	/// - Otherwise the file is tokenized in parallel and the cache is written.
	///
	/// Only the token sequence is cached. Frequency tables are always
	/// rebuilt from it.
	pub fn new<P: AsRef<Path>>(filepath: P) -> Result<Self, ModelError> {
		let binary_data_path = build_output_path(&filepath, "bin")?;
		let corpus: Self = if binary_data_path.exists() {
			debug!("Loading corpus cache {}", binary_data_path.display());
			let bytes = std::fs::read(&binary_data_path)?;
			postcard::from_bytes(&bytes)?
		} else {
			Self::read_text_file(&filepath, &binary_data_path)?
		};
		info!("Corpus '{}' loaded: {} tokens", corpus.name, corpus.len());
		Ok(corpus)
	}

	/// Tokenizes a text file in parallel and writes the binary cache.
	///
	/// # Behavior
	/// - Splits lines into chunks (CPU cores * factor).
	/// - Each thread tokenizes one chunk and sends it back tagged with its index.
	/// - Chunks are reassembled in file order, so the token sequence is the
	///   same as a sequential pass.
	fn read_text_file<PF, PB>(filename: PF, binary_data_path: PB) -> Result<Self, ModelError>
	where
		PF: AsRef<Path>,
		PB: AsRef<Path>,
	{
		let name = get_filename(&filename)?;
		let lines = read_file(&filename)?;
		let chunks = num_cpus::get() * 8;
		let chunk_size = lines.len().div_ceil(chunks).max(1);

		let (tx, rx) = mpsc::channel();
		for (index, chunk) in lines.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();

			thread::spawn(move || {
				let tokens: Vec<String> = chunk.iter().flat_map(|line| tokenize(line)).collect();
				// Only fails once the receiver is gone
				let _ = tx.send((index, tokens));
			});
		}
		drop(tx);

		let mut parts: Vec<(usize, Vec<String>)> = rx.iter().collect();
		parts.sort_by_key(|(index, _)| *index);
		let tokens = parts.into_iter().flat_map(|(_, tokens)| tokens).collect();

		let corpus = Self { name, tokens };
		let bytes = postcard::to_stdvec(&corpus)?;
		std::fs::write(&binary_data_path, bytes)?;
		debug!("Corpus cache written to {}", binary_data_path.as_ref().display());

		Ok(corpus)
	}

	/// Name of the corpus (file stem for corpora loaded from disk).
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Ordered token sequence.
	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Picks a random observed (n-1)-gram, usable as a generation prefix.
	///
	/// Every window position is equally likely, so frequent contexts come up
	/// more often.
	///
	/// # Errors
	/// - `InvalidOrder` if `n < 2`
	/// - `NoSeedAvailable` if the corpus is shorter than `n - 1` tokens
	pub fn random_prefix(&self, n: usize) -> Result<String, ModelError> {
		if n < 2 {
			return Err(ModelError::InvalidOrder(n));
		}
		self.tokens
			.windows(n - 1)
			.choose(&mut rand::rng())
			.map(|window| window.join(" "))
			.ok_or(ModelError::NoSeedAvailable(n - 1))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;
	use tempfile::tempdir;

	#[test]
	fn test_tokenize_strips_punctuation_and_lowercases() {
		let tokens = tokenize("Of Man's first disobedience, and the fruit\nOf that Forbidden Tree!");
		assert_eq!(
			tokens,
			vec!["of", "man", "s", "first", "disobedience", "and", "the", "fruit", "of", "that", "forbidden", "tree"]
		);
	}

	#[test]
	fn test_tokenize_keeps_digits_and_underscores() {
		assert_eq!(tokenize("book_1 -- 1667"), vec!["book_1", "1667"]);
		assert!(tokenize("  ,;:!  ").is_empty());
	}

	#[test]
	fn test_from_tokens_drops_empty() {
		let corpus = Corpus::from_tokens("t", vec!["a".into(), "".into(), "b".into()]);
		assert_eq!(corpus.tokens(), ["a", "b"]);
	}

	#[test]
	fn test_new_preserves_order_and_writes_cache() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("poem.txt");
		let text: String = (0..500).map(|i| format!("Line {i}, word{i}.\n")).collect();
		fs::write(&path, &text).unwrap();

		let corpus = Corpus::new(&path).unwrap();
		assert_eq!(corpus.name(), "poem");
		assert_eq!(corpus.tokens(), tokenize(&text).as_slice());
		assert!(dir.path().join("poem.bin").exists());

		// Second load goes through the cache and yields the same corpus
		let cached = Corpus::new(&path).unwrap();
		assert_eq!(cached, corpus);
	}

	#[test]
	fn test_new_missing_file() {
		let dir = tempdir().unwrap();
		let result = Corpus::new(dir.path().join("missing.txt"));
		assert!(matches!(result, Err(ModelError::Io(_))));
	}

	#[test]
	fn test_random_prefix() {
		let corpus = Corpus::from_text("t", "the cat sat on the mat");
		let prefix = corpus.random_prefix(3).unwrap();
		assert_eq!(prefix.split(' ').count(), 2);
		assert!(corpus.tokens().join(" ").contains(&prefix));

		assert!(matches!(corpus.random_prefix(1), Err(ModelError::InvalidOrder(1))));
		assert!(matches!(
			Corpus::from_text("t", "one").random_prefix(3),
			Err(ModelError::NoSeedAvailable(2))
		));
	}
}
