//! Near-bottom detection with debounce

use crate::types::Direction;
use serde::{Deserialize, Serialize};

/// Distance from the bottom, in pixels, at which the next page is requested
pub const DEFAULT_THRESHOLD_PX: f64 = 500.0;

/// Viewport measurements
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    /// Offset of the viewport from the top of the content
    pub scroll_top: f64,
    /// Height of the viewport
    pub client_height: f64,
    /// Height of the whole content
    pub scroll_height: f64,
}

impl ScrollMetrics {
    /// Create metrics
    pub fn new(scroll_top: f64, client_height: f64, scroll_height: f64) -> Self {
        Self {
            scroll_top,
            client_height,
            scroll_height,
        }
    }

    /// Pixels left below the viewport
    pub fn distance_to_bottom(&self) -> f64 {
        self.scroll_height - (self.scroll_top + self.client_height)
    }
}

/// Request to move one page forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceIntent {
    /// Always `Forward`
    pub direction: Direction,
    /// Page index that was active when the intent was emitted
    pub from_page_index: usize,
}

/// Emits an `AdvanceIntent` when the viewport nears the bottom
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    threshold_px: f64,
    pending: Option<usize>,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollTrigger {
    /// Create a trigger with the default threshold
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD_PX)
    }

    /// Create a trigger with a custom threshold
    pub fn with_threshold(threshold_px: f64) -> Self {
        Self {
            threshold_px: threshold_px.max(0.0),
            pending: None,
        }
    }

    /// Threshold in pixels
    pub fn threshold_px(&self) -> f64 {
        self.threshold_px
    }

    /// Check if an emitted intent is still unresolved
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Feed one measurement
    ///
    /// Returns an intent when `scroll_top + client_height + threshold >=
    /// scroll_height` and no earlier intent is outstanding.
    pub fn observe(
        &mut self,
        metrics: &ScrollMetrics,
        active_page_index: usize,
    ) -> Option<AdvanceIntent> {
        if self.pending.is_some() {
            return None;
        }
        if metrics.scroll_top + metrics.client_height + self.threshold_px < metrics.scroll_height {
            return None;
        }

        self.pending = Some(active_page_index);
        Some(AdvanceIntent {
            direction: Direction::Forward,
            from_page_index: active_page_index,
        })
    }

    /// Mark the intent emitted for `page_index` as handled (success or error)
    pub fn resolve(&mut self, page_index: usize) {
        if self.pending == Some(page_index) {
            self.pending = None;
        }
    }
}
