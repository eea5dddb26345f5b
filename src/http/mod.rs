//! HTTP module
//!
//! The pagination core consumes a single capability from the network:
//! `HttpGet::get_json(url, headers)`. `HttpClient` is the reqwest-backed
//! implementation.
//!
//! # Features
//!
//! - **Per-request headers**: credentials are forwarded as an opaque map
//! - **Rate Limiting**: optional token bucket rate limiter using governor
//! - **Deadlines**: request timeout surfaced as `Error::Timeout`
//!
//! No retries are performed here; a failed fetch is reported to the caller.

mod client;
mod rate_limit;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::HttpGet;
