//! Error types for pagesync
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::types::Direction;
use thiserror::Error;

/// The main error type for pagesync
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid or incomplete pager configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong
        message: String,
    },

    /// The configuration file is not valid YAML
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Fetch Errors (transport)
    // ============================================================================
    /// Transport-level request failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Status code returned by the server
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The request or the whole load exceeded its deadline
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Deadline that elapsed, in milliseconds
        timeout_ms: u64,
    },

    /// A configured or server-provided URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Parse Errors (response shape)
    // ============================================================================
    /// The response body is not JSON
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The response is JSON but lacks the expected fields
    #[error("Malformed response: {message}")]
    Parse {
        /// What was missing or mistyped
        message: String,
    },

    /// A JSONPath record path failed to compile
    #[error("JSONPath error: {message}")]
    JsonPath {
        /// Compiler message
        message: String,
    },

    // ============================================================================
    // Pagination Precondition Errors
    // ============================================================================
    /// A chunk index past the last local page was requested
    #[error("Page {index} is out of range ({total} pages)")]
    OutOfRange {
        /// Requested zero-based page index
        index: usize,
        /// Number of pages available
        total: usize,
    },

    /// A cursor link was followed where the server gave none
    #[error("No {direction} page to follow")]
    NoSuchPage {
        /// Direction of the missing link
        direction: Direction,
    },

    /// Another load was already in flight
    #[error("A page load is already in flight")]
    ConcurrentLoadRejected,

    /// The direction is not allowed in the current view mode
    #[error("Cannot move {direction} in {mode} mode")]
    UnsupportedDirection {
        /// Requested direction
        direction: Direction,
        /// View mode name
        mode: &'static str,
    },

    // ============================================================================
    // Controller Lifecycle Errors
    // ============================================================================
    /// `advance` or `retry` was called before `initialize`
    #[error("Controller has not been initialized")]
    NotInitialized,

    /// `initialize` was called twice
    #[error("Controller is already initialized")]
    AlreadyInitialized,

    /// The view detached; later results are discarded
    #[error("Controller has been detached from its view")]
    Detached,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// Reading a configuration file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Error wrapped with caller-supplied context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a JSONPath error
    pub fn json_path(message: impl Into<String>) -> Self {
        Self::JsonPath {
            message: message.into(),
        }
    }

    /// Network or transport failure (including deadlines)
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::HttpStatus { .. } | Error::Timeout { .. } | Error::InvalidUrl(_)
        )
    }

    /// The response arrived but did not have the expected shape
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::JsonParse(_) | Error::Parse { .. } | Error::JsonPath { .. }
        )
    }

    /// A strategy was asked for a page the controller should never request.
    ///
    /// These indicate a bug in the caller, not a transient condition.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, Error::OutOfRange { .. } | Error::NoSuchPage { .. })
    }
}

/// Result type alias for pagesync
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
