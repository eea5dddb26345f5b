//! Pagination types
//!
//! Defines the state shared by every fetch strategy and the values the
//! strategies hand back to the store.

use crate::types::{Direction, Item, ViewMode};
use serde::Serialize;

/// One ordered batch of items from a single fetch or local slice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Zero-based page index
    pub index: usize,
    /// Items in server/chunk order
    pub items: Vec<Item>,
}

impl Page {
    /// Create a page
    pub fn new(index: usize, items: Vec<Item>) -> Self {
        Self { index, items }
    }

    /// Number of items on the page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Pointer to the neighbouring pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cursor {
    /// Nothing loaded yet
    #[default]
    None,
    /// Links supplied by the server
    Server {
        /// URL of the following page
        next: Option<String>,
        /// URL of the preceding page
        previous: Option<String>,
    },
    /// Position within locally chunked pages
    Local {
        /// Zero-based index of the active page
        page_index: usize,
        /// Number of precomputed pages
        total_pages: usize,
    },
}

/// Load lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A load is in flight
    Loading,
    /// The last load succeeded
    Ready,
    /// The last load failed; terminal until retried
    Error,
}

/// The load currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingLoad {
    /// The initial load
    First,
    /// A page transition
    Page {
        /// Direction of travel
        direction: Direction,
        /// Target page index
        index: usize,
    },
}

/// Everything a strategy learned from one load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPage {
    /// The page itself
    pub page: Page,
    /// Neighbour pointers after this load
    pub cursor: Cursor,
    /// Total number of pages
    pub total_pages: usize,
    /// Total number of items, when known
    pub count: Option<u64>,
    /// Page numbers for a navigator to render
    pub page_numbers: Vec<u32>,
}

/// Snapshot of a paginated view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationState {
    /// How pages are merged into `items`
    pub mode: ViewMode,
    /// Items currently visible
    pub items: Vec<Item>,
    /// Neighbour pointers
    pub cursor: Cursor,
    /// Last page index successfully merged
    pub active_page_index: usize,
    /// Total pages, once known
    pub total_pages: Option<usize>,
    /// No further forward pages exist (never reverts)
    pub exhausted: bool,
    /// Load lifecycle
    pub status: Status,
    /// Load in flight, if any
    pub pending: Option<PendingLoad>,
    /// Reason for the last failure
    pub last_error: Option<String>,
    /// Page numbers for a navigator to render
    pub page_numbers: Vec<u32>,
    /// Total number of items, when known
    pub count: Option<u64>,
}

impl PaginationState {
    /// Create an empty, idle state
    pub fn new(mode: ViewMode) -> Self {
        Self {
            mode,
            items: Vec::new(),
            cursor: Cursor::None,
            active_page_index: 0,
            total_pages: None,
            exhausted: false,
            status: Status::Idle,
            pending: None,
            last_error: None,
            page_numbers: Vec::new(),
            count: None,
        }
    }

    /// Check if a load is in flight
    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    /// Check if the active page is the last known page
    pub fn is_last_page(&self) -> bool {
        self.total_pages
            .is_some_and(|total| self.active_page_index + 1 >= total)
    }

    /// 1-based number of the active page, for display
    pub fn page_number(&self) -> usize {
        self.active_page_index + 1
    }

    /// Check if a forward transition is possible from here
    pub fn has_next(&self) -> bool {
        if self.exhausted || self.is_last_page() {
            return false;
        }
        match &self.cursor {
            Cursor::None => false,
            Cursor::Server { next, .. } => next.is_some(),
            Cursor::Local { .. } => true,
        }
    }

    /// Check if a backward transition is possible from here
    pub fn has_previous(&self) -> bool {
        if self.mode != ViewMode::Jump || self.active_page_index == 0 {
            return false;
        }
        match &self.cursor {
            Cursor::None => false,
            Cursor::Server { previous, .. } => previous.is_some(),
            Cursor::Local { .. } => true,
        }
    }

    /// Target page index for a transition, if one is possible
    pub fn target_index(&self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Forward if self.has_next() => Some(self.active_page_index + 1),
            Direction::Backward if self.has_previous() => Some(self.active_page_index - 1),
            _ => None,
        }
    }
}

/// What a strategy needs to load the next page
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// Direction of travel
    pub direction: Direction,
    /// Target page index
    pub index: usize,
    /// Page index the view is currently on
    pub active_page_index: usize,
    /// Total pages, when known
    pub total_pages: Option<usize>,
    /// Neighbour pointers at request time
    pub cursor: Cursor,
}

impl PageRequest {
    /// Build a request from the current state
    pub fn from_state(state: &PaginationState, direction: Direction, index: usize) -> Self {
        Self {
            direction,
            index,
            active_page_index: state.active_page_index,
            total_pages: state.total_pages,
            cursor: state.cursor.clone(),
        }
    }
}
