#![forbid(unsafe_code)]

//! Folia CLI
//!
//! Command-line front-end for searching an OCR corpus.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use folia_cli::commands;
use folia_search::SearchOptions;

/// Folia - page search over scanned-document corpora
#[derive(Parser, Debug)]
#[command(name = "folia")]
#[command(about = "Search the pages of an OCR corpus", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a ranked or boolean query against a corpus
    Search {
        /// Path to the corpus JSON file
        corpus: PathBuf,
        /// Query string; quotes, AND/OR/NOT, and -term negation switch to
        /// boolean matching
        query: String,
        /// Maximum results
        #[arg(short, long, default_value_t = 8)]
        limit: usize,
        /// Skip snippet extraction
        #[arg(long)]
        no_snippets: bool,
        /// Snippet window in characters
        #[arg(long, default_value_t = 180)]
        snippet_length: usize,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how a query classifies and parses
    Parse {
        /// Query string
        query: String,
        /// Print the parsed query as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest a corrected query from the corpus vocabulary
    Suggest {
        /// Path to the corpus JSON file
        corpus: PathBuf,
        /// Query string
        query: String,
    },
    /// Complete the last word of a partial query
    Complete {
        /// Path to the corpus JSON file
        corpus: PathBuf,
        /// Partial query
        partial: String,
        /// Maximum suggestions
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
    /// Show corpus and index statistics
    Stats {
        /// Path to the corpus JSON file
        corpus: PathBuf,
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    match args.command {
        Command::Search {
            corpus,
            query,
            limit,
            no_snippets,
            snippet_length,
            json,
        } => {
            let options = SearchOptions {
                limit,
                include_snippets: !no_snippets,
                snippet_length,
            };
            commands::search(&corpus, &query, &options, json).await?;
        }
        Command::Parse { query, json } => {
            commands::parse(&query, json)?;
        }
        Command::Suggest { corpus, query } => {
            commands::suggest(&corpus, &query).await?;
        }
        Command::Complete {
            corpus,
            partial,
            limit,
        } => {
            commands::complete(&corpus, &partial, limit).await?;
        }
        Command::Stats { corpus, json } => {
            commands::stats(&corpus, json).await?;
        }
    }
    Ok(())
}
