use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, LevelFilter};

use rs_ngram_core::{GenerationInput, LanguageModel, StartSeed};

/// Generate text from a word n-gram model built over a corpus file.
#[derive(Parser, Debug)]
#[command(name = "rs-ngram-cli", version)]
struct Cli {
    /// Corpus text file (a `.bin` token cache is written next to it)
    #[arg(long, env = "NGRAM_CORPUS", default_value = "./data/paradise.txt")]
    corpus: PathBuf,

    /// More logs (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Fewer logs (-q warn, -qq error)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extend a prefix of n-1 words to the requested length
    Generate {
        /// Order of the model (2 to 10)
        #[arg(short)]
        n: usize,

        /// Starting words, exactly n-1 of them. A random corpus window is used if omitted
        #[arg(short, long)]
        prefix: Option<String>,

        /// Total number of words, prefix included
        #[arg(short, long)]
        length: usize,
    },
    /// List the ten most frequent prefixes of n-1 words
    Prefixes {
        /// Order of the model
        #[arg(short)]
        n: usize,
    },
}

fn init_logging(verbose: u8, quiet: u8) {
    let level = match (quiet, verbose) {
        (0, 0) => LevelFilter::Info,
        (0, 1) => LevelFilter::Debug,
        (0, _) => LevelFilter::Trace,
        (1, _) => LevelFilter::Warn,
        _ => LevelFilter::Error,
    };

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.filter_level(level);
    let _ = builder.try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let mut model = LanguageModel::new(&cli.corpus)
        .with_context(|| format!("unable to load corpus {}", cli.corpus.display()))?;

    match cli.command {
        Commands::Generate { n, prefix, length } => {
            let start_seed = StartSeed::from_prefix(prefix.as_deref());
            // Validation errors are for the user, not a crash
            let result = GenerationInput::new(n, start_seed, length).and_then(|input| model.generate(&input));
            match result {
                Ok(sentence) => println!("{sentence}"),
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    std::process::exit(2);
                }
            }
        }
        Commands::Prefixes { n } => match model.suggest_prefixes(n) {
            Ok(prefixes) => {
                info!("{} prefixes for n = {}", prefixes.len(), n);
                for prefix in prefixes {
                    println!("{prefix}");
                }
            }
            Err(e) => {
                eprintln!("{}", e.user_message());
                std::process::exit(2);
            }
        },
    }

    Ok(())
}
