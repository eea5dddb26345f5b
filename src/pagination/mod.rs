//! Pagination module
//!
//! Supports: fetch-all-then-chunk (feed) and server cursor links (navigator)
//!
//! # Overview
//!
//! The pagination module provides the strategy-agnostic `PageStore`, whose
//! state only changes through the pure `reduce` function, and the two
//! `FetchStrategy` implementations that feed it.

mod store;
mod strategies;
mod types;

pub use store::{reduce, PageStore, StoreEvent};
pub use strategies::{
    chunk_items, ChunkingFetchStrategy, CursorFetchStrategy, FetchStrategy, DEFAULT_ID_FIELD,
    DEFAULT_PAGE_SIZE, DEFAULT_RECORD_PATH,
};
pub use types::{
    Cursor, LoadedPage, Page, PageRequest, PaginationState, PendingLoad, Status,
};

#[cfg(test)]
mod tests;
