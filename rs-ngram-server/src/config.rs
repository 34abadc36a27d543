use std::path::PathBuf;

use clap::Parser;

/// Server configuration, from the command line or the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "rs-ngram-server", version, about = "Serve a word n-gram text generator over HTTP")]
pub struct Config {
	/// Corpus text file (a `.bin` token cache is written next to it)
	#[arg(long, env = "NGRAM_CORPUS", default_value = "./data/paradise.txt")]
	pub corpus: PathBuf,

	/// Address to bind
	#[arg(long, env = "NGRAM_HOST", default_value = "127.0.0.1")]
	pub host: String,

	/// Port to bind
	#[arg(long, env = "NGRAM_PORT", default_value_t = 5000)]
	pub port: u16,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = Config::parse_from(["rs-ngram-server"]);
		assert_eq!(config.port, 5000);
		assert_eq!(config.host, "127.0.0.1");
	}

	#[test]
	fn test_overrides() {
		let config = Config::parse_from(["rs-ngram-server", "--corpus", "milton.txt", "--port", "8080"]);
		assert_eq!(config.corpus, PathBuf::from("milton.txt"));
		assert_eq!(config.port, 8080);
	}
}
