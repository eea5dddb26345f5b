//! Configuration module
//!
//! Declarative description of one paginated view, loaded from YAML.
//!
//! # Overview
//!
//! The config module provides:
//! - `PagerConfig` - endpoint, strategy, merge mode and credentials
//! - `StrategyConfig` - chunking (fetch all, slice locally) or cursor
//! - `HttpSettings` - timeout, user agent and rate limit for the client
//! - YAML loading with validation
//!
//! # Example
//!
//! ```yaml
//! endpoint: https://forum.example.com/api/feed/
//! strategy:
//!   type: chunking
//!   page_size: 5
//! auth:
//!   type: token
//!   auth_token: "Token 9944b09199c62bcf"
//!   csrf_token: "Fj2n1x"
//! ```

mod parser;
mod types;

pub use parser::{load_config, load_config_from_str, validate_config};
pub use types::{HttpSettings, PagerConfig, StrategyConfig};
