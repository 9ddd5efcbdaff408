// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scribe - drafts Discord replies from conversation context and reference cards.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod hints;
mod serve;
mod show_config;
mod shutdown;
mod split;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scribe_config::ScribeConfig;

/// Scribe - drafts Discord replies for approval.
#[derive(Parser, Debug)]
#[command(name = "scribe", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Discord bot (default).
    Serve,
    /// Rank reference cards against a query.
    Hints {
        /// Query words.
        #[arg(required = true)]
        query: Vec<String>,
        /// Number of cards to show (defaults to hints.top_k).
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Show the chunks a text file would be posted as.
    Split {
        /// Maximum chunk size in characters (defaults to chunking.max_chunk_chars).
        #[arg(long)]
        max: Option<usize>,
        /// Text file to split.
        file: PathBuf,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn load_config(path: Option<&PathBuf>) -> ScribeConfig {
    let loaded = match path {
        Some(path) => scribe_config::load_and_validate_path(path),
        None => scribe_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            scribe_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Hints { query, top_k } => hints::run_hints(&config, &query.join(" "), top_k).await,
        Commands::Split { max, file } => split::run_split(&config, &file, max).await,
        Commands::Config => show_config::run_config(&config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
