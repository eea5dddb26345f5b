//! Controller types
//!
//! Options for a pagination controller.

use crate::types::{Direction, ViewMode};
use std::time::Duration;

/// Configuration for a pagination controller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Merge mode; `None` uses the strategy's default
    pub mode: Option<ViewMode>,
    /// Deadline applied to each strategy call
    pub deadline: Option<Duration>,
}

impl ControllerOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the merge mode
    #[must_use]
    pub fn mode(mut self, mode: ViewMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the per-call deadline
    #[must_use]
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// The operation to repeat on `retry`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailedOp {
    /// The initial load
    First,
    /// A page transition
    Advance(Direction),
}
