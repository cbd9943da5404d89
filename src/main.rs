//! Lanai - command-line entrypoint.
//!
//! Loads a word list into a trie and runs a single query against it.

use clap::{Parser, Subcommand};
use lanai_lib::config::{self, ConfigLoader, LanaiConfig, LogConfig};
use lanai_lib::data_structures::lanai_trie::{
    BulkInsertOptions, LanaiTrie, DEFAULT_MAX_DISTANCE,
};
use lanai_lib::error::{
    report_error, set_error_reporter, ErrorContext, LanaiError, LanaiResult, TracingErrorReporter,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::info;

/// Command line arguments for Lanai.
#[derive(Parser, Debug)]
#[clap(name = "lanai", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Word list to load, one word per line
    #[clap(short, long, value_parser)]
    words: Option<PathBuf>,

    /// Print results as JSON
    #[clap(long)]
    json: bool,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether a word is stored
    Lookup {
        /// The word to look up
        word: String,
    },

    /// List stored words starting with a prefix
    Complete {
        /// The prefix to complete
        prefix: String,
    },

    /// List stored words within an edit distance of a word
    Fuzzy {
        /// The word to match
        word: String,

        /// Maximum number of edits
        #[clap(short, long, default_value_t = DEFAULT_MAX_DISTANCE)]
        max_distance: usize,
    },

    /// List stored words matching a pattern where '.' is any character
    Wildcard {
        /// The pattern to match
        pattern: String,
    },

    /// Print word count
    Stats,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> LanaiResult<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_line_number(log.source_location)
        .with_file(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| LanaiError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Query output, printed either as plain lines or as JSON.
#[derive(Serialize)]
#[serde(untagged)]
enum Output {
    Found(bool),
    Words(Vec<String>),
    Count(usize),
}

fn print_output(output: Output, json: bool) -> LanaiResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match output {
        Output::Found(found) => println!("{found}"),
        Output::Count(count) => println!("{count}"),
        Output::Words(mut words) => {
            words.sort();
            for word in words {
                println!("{word}");
            }
        }
    }
    Ok(())
}

async fn load_trie(path: Option<&Path>, config: &LanaiConfig) -> LanaiResult<LanaiTrie> {
    let mut trie = LanaiTrie::new();
    let Some(path) = path else {
        return Ok(trie);
    };

    let contents = tokio::fs::read_to_string(path).await?;
    let words: Vec<String> = contents.lines().map(|line| line.trim().to_string()).collect();

    let options = BulkInsertOptions::from_config(&config.bulk).with_progress(
        |processed: usize, total: usize, percentage: f64| {
            tracing::debug!(processed, total, "loaded {percentage:.1}%");
        },
    );
    let summary = trie.insert_batch(words, &options).await?;

    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        delegated_chunks = summary.delegated_chunks,
        fallback_chunks = summary.fallback_chunks,
        "Word list loaded from {:?}",
        path
    );
    Ok(trie)
}

fn gen_config(output: &Path) -> LanaiResult<()> {
    info!("Generating default configuration");

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(&LanaiConfig::default())
        .map_err(|e| LanaiError::Custom(format!("Failed to serialize config: {e}")))?;
    std::fs::write(output, toml)?;

    info!("Default configuration written to {:?}", output);
    Ok(())
}

async fn run(args: Args, config: LanaiConfig) -> LanaiResult<()> {
    let trie = match &args.command {
        Command::GenConfig { output } => return gen_config(output),
        _ => load_trie(args.words.as_deref(), &config).await?,
    };

    let output = match args.command {
        Command::Lookup { word } => Output::Found(trie.search(&word)),
        Command::Complete { prefix } => Output::Words(trie.autocomplete(&prefix)),
        Command::Fuzzy { word, max_distance } => {
            Output::Words(trie.fuzzy_search(&word, max_distance))
        }
        Command::Wildcard { pattern } => Output::Words(trie.wildcard_search(&pattern)),
        Command::Stats | Command::GenConfig { .. } => Output::Count(trie.count_words()),
    };

    print_output(output, args.json)
}

/// Main entry point for the application.
#[tokio::main]
async fn main() {
    let args = <Args as clap::Parser>::parse();

    let config = match ConfigLoader::new(args.config.as_deref(), config::ENV_PREFIX).load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.log) {
        eprintln!("{e}");
        process::exit(1);
    }
    set_error_reporter(Arc::new(TracingErrorReporter));
    config::init_global_config(config.clone());

    if let Err(e) = run(args, config).await {
        report_error(&ErrorContext::new(e, "cli"));
        process::exit(1);
    }
}
