//! Scroll module
//!
//! Turns viewport measurements into forward advances for an infinite feed.
//!
//! # Overview
//!
//! - `ScrollTrigger`: decides when the viewport is close enough to the end of
//!   the content, and emits at most one `AdvanceIntent` until it is resolved
//! - `listen`: a background task fed by a `tokio::sync::watch` channel of
//!   `ScrollMetrics` that calls `PaginationController::advance(Forward)`
//!
//! Dropping the returned `ScrollSubscription` stops the task.

mod listener;
mod trigger;

pub use listener::{listen, listen_with, ScrollSubscription};
pub use trigger::{AdvanceIntent, ScrollMetrics, ScrollTrigger, DEFAULT_THRESHOLD_PX};
