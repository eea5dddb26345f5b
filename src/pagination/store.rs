//! Page store
//!
//! Owns a `PaginationState` and changes it only through `reduce`, a pure
//! function of the current state and one event. A rejected event leaves the
//! stored state untouched.

use super::types::{LoadedPage, PaginationState, PendingLoad, Status};
use crate::error::{Error, Result};
use crate::types::{Direction, Item, ViewMode};
use std::collections::HashSet;
use tracing::{debug, warn};

/// A state transition request
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// A load is about to start
    BeginLoad(PendingLoad),
    /// The initial load finished
    FirstLoaded(LoadedPage),
    /// A page transition finished
    Advanced {
        /// Direction of travel
        direction: Direction,
        /// Page index that was requested
        target: usize,
        /// What the strategy returned
        loaded: LoadedPage,
    },
    /// The load in flight failed
    Failed {
        /// Human-readable reason
        reason: String,
    },
    /// The load in flight was discarded without a result
    Abandoned,
}

/// Compute the state that follows `event`
pub fn reduce(state: &PaginationState, event: StoreEvent) -> Result<PaginationState> {
    match event {
        StoreEvent::BeginLoad(target) => begin_load(state, target),
        StoreEvent::FirstLoaded(loaded) => first_loaded(state, loaded),
        StoreEvent::Advanced {
            direction,
            target,
            loaded,
        } => advanced(state, direction, target, loaded),
        StoreEvent::Failed { reason } => Ok(failed(state, reason)),
        StoreEvent::Abandoned => Ok(abandoned(state)),
    }
}

fn begin_load(state: &PaginationState, target: PendingLoad) -> Result<PaginationState> {
    if state.pending.is_some() {
        return Err(Error::ConcurrentLoadRejected);
    }
    if let PendingLoad::Page {
        direction: Direction::Backward,
        ..
    } = target
    {
        if state.mode == ViewMode::Scroll {
            return Err(Error::UnsupportedDirection {
                direction: Direction::Backward,
                mode: state.mode.as_str(),
            });
        }
    }

    let mut next = state.clone();
    next.status = Status::Loading;
    next.pending = Some(target);
    Ok(next)
}

fn first_loaded(state: &PaginationState, loaded: LoadedPage) -> Result<PaginationState> {
    if state.pending != Some(PendingLoad::First) {
        return Err(Error::ConcurrentLoadRejected);
    }

    let total = loaded.total_pages;
    let mut next = state.clone();
    next.items = loaded.page.items;
    next.active_page_index = clamp_index(loaded.page.index, total);
    next.total_pages = Some(total);
    next.cursor = loaded.cursor;
    next.count = loaded.count;
    next.page_numbers = loaded.page_numbers;
    next.exhausted = state.exhausted || total <= 1;
    next.status = Status::Ready;
    next.pending = None;
    next.last_error = None;
    Ok(next)
}

fn advanced(
    state: &PaginationState,
    direction: Direction,
    target: usize,
    loaded: LoadedPage,
) -> Result<PaginationState> {
    let expected = PendingLoad::Page {
        direction,
        index: target,
    };
    if state.pending != Some(expected) {
        // A second commit for a page that was already merged, or one nobody asked for
        return Err(Error::ConcurrentLoadRejected);
    }
    if direction == Direction::Backward && state.mode == ViewMode::Scroll {
        return Err(Error::UnsupportedDirection {
            direction,
            mode: state.mode.as_str(),
        });
    }

    let total = loaded.total_pages;
    let mut next = state.clone();

    match (direction, state.mode) {
        (Direction::Forward, ViewMode::Scroll) => {
            append_unique(&mut next.items, loaded.page.items);
        }
        _ => next.items = loaded.page.items,
    }

    next.active_page_index = clamp_index(loaded.page.index, total);
    next.total_pages = Some(total);
    next.cursor = loaded.cursor;
    next.count = loaded.count.or(state.count);
    if !loaded.page_numbers.is_empty() {
        next.page_numbers = loaded.page_numbers;
    }
    if direction == Direction::Forward && state.mode == ViewMode::Scroll {
        next.exhausted = state.exhausted || next.active_page_index + 1 >= total;
    }
    next.status = Status::Ready;
    next.pending = None;
    next.last_error = None;
    Ok(next)
}

fn failed(state: &PaginationState, reason: String) -> PaginationState {
    let mut next = state.clone();
    next.status = Status::Error;
    next.pending = None;
    next.last_error = Some(reason);
    next
}

fn abandoned(state: &PaginationState) -> PaginationState {
    let mut next = state.clone();
    next.pending = None;
    if next.status == Status::Loading {
        next.status = if state.total_pages.is_some() {
            Status::Ready
        } else {
            Status::Idle
        };
    }
    next
}

/// Keep the active index inside `[0, total)` once a total is known
fn clamp_index(index: usize, total: usize) -> usize {
    index.min(total.saturating_sub(1))
}

/// Append `incoming`, skipping ids already visible
fn append_unique(items: &mut Vec<Item>, incoming: Vec<Item>) {
    let mut seen: HashSet<String> = items.iter().map(|item| item.id.clone()).collect();
    for item in incoming {
        if seen.insert(item.id.clone()) {
            items.push(item);
        } else {
            warn!("Dropping duplicate item '{}' from appended page", item.id);
        }
    }
}

/// Holder of a `PaginationState`
#[derive(Debug, Clone)]
pub struct PageStore {
    state: PaginationState,
}

impl PageStore {
    /// Create a store with an empty, idle state
    pub fn new(mode: ViewMode) -> Self {
        Self {
            state: PaginationState::new(mode),
        }
    }

    /// Current state
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Consume the store, returning its state
    pub fn into_state(self) -> PaginationState {
        self.state
    }

    /// Apply an event; on rejection the state is left as it was
    pub fn apply(&mut self, event: StoreEvent) -> Result<&PaginationState> {
        self.state = reduce(&self.state, event)?;
        Ok(&self.state)
    }

    /// Mark a load as in flight
    pub fn begin_load(&mut self, target: PendingLoad) -> Result<&PaginationState> {
        debug!("Begin load {:?}", target);
        self.apply(StoreEvent::BeginLoad(target))
    }

    /// Merge the initial load
    pub fn commit_first_load(&mut self, loaded: LoadedPage) -> Result<&PaginationState> {
        self.apply(StoreEvent::FirstLoaded(loaded))
    }

    /// Merge a page transition
    pub fn commit_advance(
        &mut self,
        direction: Direction,
        target: usize,
        loaded: LoadedPage,
    ) -> Result<&PaginationState> {
        self.apply(StoreEvent::Advanced {
            direction,
            target,
            loaded,
        })
    }

    /// Record a failed load; items and cursor are kept
    pub fn mark_error(&mut self, reason: impl Into<String>) -> &PaginationState {
        self.state = failed(&self.state, reason.into());
        &self.state
    }

    /// Drop the load in flight without merging anything
    pub fn reset_status(&mut self) -> &PaginationState {
        self.state = abandoned(&self.state);
        &self.state
    }
}
