// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # pagesync
//!
//! Client-side pagination core for an infinite-scroll feed and a page
//! navigator over the same kind of JSON API.
//!
//! ## Features
//!
//! - **Two fetch strategies**: fetch-all-then-chunk, or follow server cursor links
//! - **Two merge modes**: append pages (scroll) or replace the visible page (jump)
//! - **One load at a time**: concurrent advances are answered, never queued
//! - **Scroll trigger**: near-bottom detection with debounce, fed by a watch channel
//! - **YAML configuration**: endpoint, strategy, credentials and HTTP settings
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagesync::{load_config, Direction, PaginationController, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = load_config("feed.yaml")?;
//!     let controller = PaginationController::from_config(&config)?;
//!
//!     let state = controller.initialize().await?;
//!     println!("{} items", state.items.len());
//!
//!     let state = controller.advance(Direction::Forward).await?;
//!     println!("{} items, exhausted: {}", state.items.len(), state.exhausted);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                   PaginationController                     │
//! │   initialize()   advance(dir)   state()   retry()  detach()│
//! └────────────────────────────────────────────────────────────┘
//!          │                    │                    │
//! ┌────────┴───────┐  ┌─────────┴────────┐  ┌────────┴────────┐
//! │   PageStore    │  │  FetchStrategy   │  │  ScrollTrigger  │
//! ├────────────────┤  ├──────────────────┤  ├─────────────────┤
//! │ reduce()       │  │ Chunking         │  │ threshold       │
//! │ append/replace │  │ Cursor           │  │ debounce        │
//! └────────────────┘  └──────────────────┘  └─────────────────┘
//!                              │
//!                  ┌───────────┴───────────┐
//!                  │ HttpGet + Credentials │
//!                  └───────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Credential providers
pub mod auth;

/// HTTP client with rate limiting
pub mod http;

/// Response decoders
pub mod decode;

/// Page store and fetch strategies
pub mod pagination;

/// Pagination controller
pub mod controller;

/// Scroll trigger and listener
pub mod scroll;

/// Pager configuration
pub mod config;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_config, load_config_from_str, PagerConfig, StrategyConfig};
pub use controller::{ControllerOptions, PaginationController};
pub use pagination::{PaginationState, Status};
pub use scroll::{listen, ScrollMetrics, ScrollSubscription, ScrollTrigger};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
