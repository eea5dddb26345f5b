//! Tests for pagination module

use super::*;
use crate::auth::{AuthConfig, CredentialProvider};
use crate::error::Error;
use crate::http::HttpGet;
use crate::testing::{feed_items, server_page, RecordingHttp};
use crate::types::{Direction, Item, ViewMode};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use test_case::test_case;

const FEED_URL: &str = "http://api.test/api/feed/";
const TOPICS_URL: &str = "http://api.test/api/topics/";

fn item(id: u64) -> Item {
    Item {
        id: id.to_string(),
        data: json!({ "id": id }),
    }
}

fn items(ids: impl IntoIterator<Item = u64>) -> Vec<Item> {
    ids.into_iter().map(item).collect()
}

fn local_page(index: usize, ids: impl IntoIterator<Item = u64>, total: usize) -> LoadedPage {
    LoadedPage {
        page: Page::new(index, items(ids)),
        cursor: Cursor::Local {
            page_index: index,
            total_pages: total,
        },
        total_pages: total,
        count: None,
        page_numbers: Vec::new(),
    }
}

fn ready_store(mode: ViewMode, total: usize) -> PageStore {
    let mut store = PageStore::new(mode);
    store.begin_load(PendingLoad::First).unwrap();
    store.commit_first_load(local_page(0, 1..=5, total)).unwrap();
    store
}

fn forward(index: usize) -> PendingLoad {
    PendingLoad::Page {
        direction: Direction::Forward,
        index,
    }
}

fn credentials() -> Arc<dyn CredentialProvider> {
    Arc::new(AuthConfig::token("Token feed", Some("csrf".to_string())))
}

// ============================================================================
// Chunking
// ============================================================================

#[test_case(13, &[5, 5, 3] ; "uneven tail")]
#[test_case(10, &[5, 5] ; "exact multiple")]
#[test_case(4, &[4] ; "single short page")]
#[test_case(1, &[1] ; "single item")]
#[test_case(0, &[] ; "empty collection")]
fn test_chunk_items_page_lengths(n: u64, expected: &[usize]) {
    let pages = chunk_items(items(1..=n), DEFAULT_PAGE_SIZE);
    let lengths: Vec<usize> = pages.iter().map(Page::len).collect();
    assert_eq!(lengths, expected);
    assert_eq!(pages.len(), (n as usize).div_ceil(5));
}

#[test]
fn test_chunk_items_preserves_order() {
    let original = items(1..=23);
    let pages = chunk_items(original.clone(), 5);

    for (i, page) in pages.iter().enumerate() {
        assert_eq!(page.index, i);
    }

    let rejoined: Vec<Item> = pages.into_iter().flat_map(|p| p.items).collect();
    assert_eq!(rejoined, original);
}

// ============================================================================
// PageStore
// ============================================================================

#[test]
fn test_new_state_is_idle() {
    let store = PageStore::new(ViewMode::Scroll);
    let state = store.state();
    assert_eq!(state.status, Status::Idle);
    assert!(state.items.is_empty());
    assert_eq!(state.cursor, Cursor::None);
    assert_eq!(state.total_pages, None);
    assert!(!state.exhausted);
    assert!(!state.has_next());
}

#[test]
fn test_first_load_sets_totals() {
    let store = ready_store(ViewMode::Scroll, 3);
    let state = store.state();

    assert_eq!(state.status, Status::Ready);
    assert_eq!(state.items.len(), 5);
    assert_eq!(state.active_page_index, 0);
    assert_eq!(state.total_pages, Some(3));
    assert!(!state.exhausted);
    assert!(state.pending.is_none());
    assert!(state.has_next());
}

#[test]
fn test_single_page_first_load_is_exhausted() {
    let store = ready_store(ViewMode::Scroll, 1);
    assert!(store.state().exhausted);
    assert!(!store.state().has_next());
}

#[test]
fn test_begin_load_rejects_second_load() {
    let mut store = ready_store(ViewMode::Scroll, 3);
    store.begin_load(forward(1)).unwrap();

    let before = store.state().clone();
    let err = store.begin_load(forward(1)).unwrap_err();
    assert!(matches!(err, Error::ConcurrentLoadRejected));
    assert_eq!(store.state(), &before);
}

#[test]
fn test_scroll_advance_appends_until_exhausted() {
    let mut store = ready_store(ViewMode::Scroll, 3);

    store.begin_load(forward(1)).unwrap();
    store
        .commit_advance(Direction::Forward, 1, local_page(1, 6..=10, 3))
        .unwrap();
    assert_eq!(store.state().items, items(1..=10));
    assert_eq!(store.state().active_page_index, 1);
    assert!(!store.state().exhausted);

    store.begin_load(forward(2)).unwrap();
    store
        .commit_advance(Direction::Forward, 2, local_page(2, 11..=13, 3))
        .unwrap();
    let state = store.state();
    assert_eq!(state.items, items(1..=13));
    assert_eq!(state.active_page_index, 2);
    assert!(state.exhausted);
    assert!(!state.has_next());
    assert_eq!(state.status, Status::Ready);
}

#[test]
fn test_duplicate_commit_is_rejected() {
    let mut store = ready_store(ViewMode::Scroll, 3);
    store.begin_load(forward(1)).unwrap();
    store
        .commit_advance(Direction::Forward, 1, local_page(1, 6..=10, 3))
        .unwrap();

    let before = store.state().clone();
    let err = store
        .commit_advance(Direction::Forward, 1, local_page(1, 6..=10, 3))
        .unwrap_err();
    assert!(matches!(err, Error::ConcurrentLoadRejected));
    assert_eq!(store.state(), &before);
    assert_eq!(store.state().items.len(), 10);
}

#[test]
fn test_commit_for_other_target_is_rejected() {
    let mut store = ready_store(ViewMode::Scroll, 3);
    store.begin_load(forward(1)).unwrap();

    let err = store
        .commit_advance(Direction::Forward, 2, local_page(2, 11..=13, 3))
        .unwrap_err();
    assert!(matches!(err, Error::ConcurrentLoadRejected));
    assert_eq!(store.state().pending, Some(forward(1)));
}

#[test]
fn test_append_skips_known_ids() {
    let mut store = ready_store(ViewMode::Scroll, 3);
    store.begin_load(forward(1)).unwrap();
    store
        .commit_advance(Direction::Forward, 1, local_page(1, [5, 6, 7], 3))
        .unwrap();

    let ids: Vec<&str> = store.state().items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7"]);
}

#[test]
fn test_jump_mode_replaces_and_goes_back() {
    let mut store = ready_store(ViewMode::Jump, 3);

    store.begin_load(forward(1)).unwrap();
    store
        .commit_advance(Direction::Forward, 1, local_page(1, 6..=10, 3))
        .unwrap();
    assert_eq!(store.state().items, items(6..=10));
    assert!(store.state().has_previous());

    store
        .begin_load(PendingLoad::Page {
            direction: Direction::Backward,
            index: 0,
        })
        .unwrap();
    store
        .commit_advance(Direction::Backward, 0, local_page(0, 1..=5, 3))
        .unwrap();
    assert_eq!(store.state().items, items(1..=5));
    assert_eq!(store.state().active_page_index, 0);
    assert!(!store.state().has_previous());
}

#[test]
fn test_jump_mode_last_page_is_not_exhaustion() {
    let mut store = ready_store(ViewMode::Jump, 2);
    store.begin_load(forward(1)).unwrap();
    store
        .commit_advance(Direction::Forward, 1, local_page(1, 6..=7, 2))
        .unwrap();

    let state = store.state();
    assert!(state.is_last_page());
    assert!(!state.exhausted);
    assert!(!state.has_next());
    assert!(state.has_previous());
}

#[test]
fn test_backward_rejected_in_scroll_mode() {
    let mut store = ready_store(ViewMode::Scroll, 3);
    let err = store
        .begin_load(PendingLoad::Page {
            direction: Direction::Backward,
            index: 0,
        })
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedDirection { .. }));
    assert_eq!(store.state().status, Status::Ready);
}

#[test]
fn test_mark_error_keeps_items() {
    let mut store = ready_store(ViewMode::Scroll, 3);
    store.begin_load(forward(1)).unwrap();
    store.mark_error("HTTP 500");

    let state = store.state();
    assert_eq!(state.status, Status::Error);
    assert_eq!(state.items, items(1..=5));
    assert_eq!(state.active_page_index, 0);
    assert_eq!(state.last_error.as_deref(), Some("HTTP 500"));
    assert!(state.pending.is_none());
}

#[test]
fn test_reset_status_after_discarded_load() {
    let mut store = PageStore::new(ViewMode::Scroll);
    store.begin_load(PendingLoad::First).unwrap();
    assert_eq!(store.reset_status().status, Status::Idle);

    let mut store = ready_store(ViewMode::Scroll, 3);
    store.begin_load(forward(1)).unwrap();
    let state = store.reset_status();
    assert_eq!(state.status, Status::Ready);
    assert!(state.pending.is_none());
}

#[test]
fn test_reduce_is_pure() {
    let store = ready_store(ViewMode::Scroll, 3);
    let state = store.state().clone();

    let a = reduce(&state, StoreEvent::BeginLoad(forward(1))).unwrap();
    let b = reduce(&state, StoreEvent::BeginLoad(forward(1))).unwrap();
    assert_eq!(a, b);
    assert_eq!(state.status, Status::Ready);
}

// ============================================================================
// ChunkingFetchStrategy
// ============================================================================

#[tokio::test]
async fn test_chunking_load_first_single_request() {
    let http = Arc::new(RecordingHttp::new().route(FEED_URL, feed_items(13)));
    let strategy = ChunkingFetchStrategy::new(http.clone(), credentials(), FEED_URL);

    let loaded = strategy.load_first().await.unwrap();
    assert_eq!(loaded.total_pages, 3);
    assert_eq!(loaded.page.index, 0);
    assert_eq!(loaded.page.len(), 5);
    assert_eq!(loaded.count, Some(13));
    assert_eq!(loaded.page_numbers, vec![1, 2, 3]);

    let headers = http.last_headers().unwrap();
    assert_eq!(headers.get("Authorization"), Some(&"Token feed".to_string()));
    assert_eq!(headers.get("X-CSRFToken"), Some(&"csrf".to_string()));

    let request = PageRequest {
        direction: Direction::Forward,
        index: 2,
        active_page_index: 1,
        total_pages: Some(3),
        cursor: loaded.cursor.clone(),
    };
    let last = strategy.load_page(&request).await.unwrap();
    assert_eq!(last.page.len(), 3);
    assert_eq!(
        last.cursor,
        Cursor::Local {
            page_index: 2,
            total_pages: 3
        }
    );

    assert_eq!(http.call_count(), 1);
    assert_eq!(strategy.pages().await.len(), 3);
}

#[tokio::test]
async fn test_chunking_load_page_out_of_range() {
    let http = Arc::new(RecordingHttp::new().route(FEED_URL, feed_items(7)));
    let strategy = ChunkingFetchStrategy::new(http.clone(), credentials(), FEED_URL);
    strategy.load_first().await.unwrap();

    let request = PageRequest {
        direction: Direction::Forward,
        index: 2,
        active_page_index: 1,
        total_pages: Some(2),
        cursor: Cursor::None,
    };
    let err = strategy.load_page(&request).await.unwrap_err();
    assert!(matches!(err, Error::OutOfRange { index: 2, total: 2 }));
    assert_eq!(http.call_count(), 1);
}

#[tokio::test]
async fn test_chunking_custom_record_path_and_page_size() {
    let body = json!({"feed": [{"pk": "a"}, {"pk": "b"}, {"pk": "c"}]});
    let http = Arc::new(RecordingHttp::new().route(FEED_URL, body));
    let strategy = ChunkingFetchStrategy::new(http, credentials(), FEED_URL)
        .with_record_path("feed")
        .with_id_field("pk")
        .with_page_size(2);

    assert_eq!(strategy.page_size(), 2);
    let loaded = strategy.load_first().await.unwrap();
    assert_eq!(loaded.total_pages, 2);
    assert_eq!(loaded.page.items[1].id, "b");
}

#[tokio::test]
async fn test_chunking_zero_page_size_is_config_error() {
    let http = Arc::new(RecordingHttp::new().route(FEED_URL, feed_items(3)));
    let strategy = ChunkingFetchStrategy::new(http.clone(), credentials(), FEED_URL).with_page_size(0);

    let err = strategy.load_first().await.unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert_eq!(http.call_count(), 0);
}

#[tokio::test]
async fn test_chunking_malformed_response() {
    let http = Arc::new(RecordingHttp::new().route(FEED_URL, json!({"feed": []})));
    let strategy = ChunkingFetchStrategy::new(http, credentials(), FEED_URL);

    let err = strategy.load_first().await.unwrap_err();
    assert!(err.is_parse_error());
}

#[tokio::test]
async fn test_chunking_fetch_error() {
    let http = Arc::new(RecordingHttp::new());
    http.fail(FEED_URL, 502);
    let strategy = ChunkingFetchStrategy::new(http, credentials(), FEED_URL);

    let err = strategy.load_first().await.unwrap_err();
    assert!(err.is_fetch_error());
}

// ============================================================================
// CursorFetchStrategy
// ============================================================================

fn server_request(direction: Direction, state: &LoadedPage) -> PageRequest {
    let active = state.page.index;
    let index = match direction {
        Direction::Forward => active + 1,
        Direction::Backward => active.saturating_sub(1),
    };
    PageRequest {
        direction,
        index,
        active_page_index: active,
        total_pages: Some(state.total_pages),
        cursor: state.cursor.clone(),
    }
}

#[tokio::test]
async fn test_cursor_follows_next_link() {
    let page2_url = "http://api.test/api/topics/?page=2";
    let http = Arc::new(
        RecordingHttp::new()
            .route(TOPICS_URL, server_page(1, &[1, 2, 3, 4, 5], Some(page2_url), None, 3))
            .route(
                page2_url,
                server_page(2, &[6, 7, 8, 9, 10], Some("http://api.test/api/topics/?page=3"), Some(TOPICS_URL), 3),
            ),
    );
    let strategy = CursorFetchStrategy::new(http.clone(), credentials(), TOPICS_URL).unwrap();
    assert_eq!(strategy.endpoint().as_str(), TOPICS_URL);

    let first = strategy.load_first().await.unwrap();
    assert_eq!(first.page.index, 0);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.page_numbers, vec![1, 2, 3]);

    let second = strategy
        .load_page(&server_request(Direction::Forward, &first))
        .await
        .unwrap();
    assert_eq!(second.page.index, 1);
    assert_eq!(second.page.items[0].id, "6");
    assert_eq!(http.calls(), vec![TOPICS_URL.to_string(), page2_url.to_string()]);
}

#[tokio::test]
async fn test_cursor_resolves_relative_links() {
    let http = Arc::new(
        RecordingHttp::new()
            .route(TOPICS_URL, server_page(1, &[1], Some("?page=2"), None, 2))
            .route("http://api.test/api/topics/?page=2", server_page(2, &[2], None, Some("?page=1"), 2)),
    );
    let strategy = CursorFetchStrategy::new(http.clone(), credentials(), TOPICS_URL).unwrap();

    let first = strategy.load_first().await.unwrap();
    let second = strategy
        .load_page(&server_request(Direction::Forward, &first))
        .await
        .unwrap();
    assert_eq!(second.page.index, 1);
    assert_eq!(
        http.calls().last().map(String::as_str),
        Some("http://api.test/api/topics/?page=2")
    );
}

#[tokio::test]
async fn test_cursor_backward_at_first_page() {
    let http = Arc::new(
        RecordingHttp::new().route(TOPICS_URL, server_page(1, &[1, 2], Some("?page=2"), None, 2)),
    );
    let strategy = CursorFetchStrategy::new(http.clone(), credentials(), TOPICS_URL).unwrap();
    let first = strategy.load_first().await.unwrap();

    let err = strategy
        .load_page(&server_request(Direction::Backward, &first))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::NoSuchPage {
            direction: Direction::Backward
        }
    ));
    assert_eq!(http.call_count(), 1);
}

#[tokio::test]
async fn test_cursor_forward_past_last_page_rejected_before_network() {
    // The server still sends a next link, but page 2 of 2 is the last page
    let http = Arc::new(RecordingHttp::new().route(
        TOPICS_URL,
        server_page(2, &[6], Some("?page=3"), Some("?page=1"), 2),
    ));
    let strategy = CursorFetchStrategy::new(http.clone(), credentials(), TOPICS_URL).unwrap();
    let current = strategy.load_first().await.unwrap();
    assert_eq!(current.page.index, 1);

    let err = strategy
        .load_page(&server_request(Direction::Forward, &current))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::OutOfRange { index: 2, total: 2 }));
    assert_eq!(http.call_count(), 1);
}

#[tokio::test]
async fn test_cursor_null_next_link() {
    let http = Arc::new(RecordingHttp::new().route(TOPICS_URL, server_page(1, &[1], None, None, 3)));
    let strategy = CursorFetchStrategy::new(http.clone(), credentials(), TOPICS_URL).unwrap();
    let first = strategy.load_first().await.unwrap();

    let err = strategy
        .load_page(&server_request(Direction::Forward, &first))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::NoSuchPage {
            direction: Direction::Forward
        }
    ));
    assert_eq!(http.call_count(), 1);
}

#[tokio::test]
async fn test_cursor_clamps_page_active() {
    let body = json!({
        "data": [{"id": 1}],
        "next": null,
        "previous": null,
        "count": 1,
        "page_active": 0,
        "num_pages": [1]
    });
    let http = Arc::new(RecordingHttp::new().route(TOPICS_URL, body));
    let strategy = CursorFetchStrategy::new(http, credentials(), TOPICS_URL).unwrap();

    let first = strategy.load_first().await.unwrap();
    assert_eq!(first.page.index, 0);
    assert_eq!(first.total_pages, 1);
}

#[test]
fn test_cursor_invalid_endpoint() {
    let http: Arc<dyn HttpGet> = Arc::new(RecordingHttp::new());
    let result = CursorFetchStrategy::new(http, credentials(), "not a url");
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}
