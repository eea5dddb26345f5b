//! CLI module
//!
//! Command-line interface for driving a paginated view.
//!
//! # Commands
//!
//! - `feed` - Scroll forward until the feed is exhausted
//! - `browse` - Step forward and back through a list navigator
//! - `validate` - Check a pager configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
