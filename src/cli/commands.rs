//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paginated feed and list navigator client
#[derive(Parser, Debug)]
#[command(name = "pagesync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pager configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scroll through the feed until it is exhausted
    Feed {
        /// Stop after this many pages
        #[arg(long)]
        pages: Option<usize>,
    },

    /// Step through the list navigator
    Browse {
        /// Number of forward steps
        #[arg(long, default_value = "1")]
        next: usize,

        /// Number of backward steps, taken after the forward ones
        #[arg(long, default_value = "0")]
        previous: usize,
    },

    /// Validate the pager configuration
    Validate,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
