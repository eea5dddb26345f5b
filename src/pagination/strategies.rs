//! Fetch strategy implementations
//!
//! Each strategy handles one pagination pattern:
//! - `ChunkingFetchStrategy`: one request for the whole collection, sliced locally
//! - `CursorFetchStrategy`: one request per page, following server links

use super::types::{Cursor, LoadedPage, Page, PageRequest};
use crate::auth::CredentialProvider;
use crate::decode::{JsonDecoder, RecordDecoder, ServerPage};
use crate::error::{Error, Result};
use crate::http::HttpGet;
use crate::types::{Direction, Item, JsonValue, ViewMode};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

/// Default number of items per locally computed page
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Default path to the record array of a full-collection response
pub const DEFAULT_RECORD_PATH: &str = "items";

/// Default identity field of an item
pub const DEFAULT_ID_FIELD: &str = "id";

/// Core trait for pagination strategies
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// View mode this strategy is normally paired with
    fn default_mode(&self) -> ViewMode;

    /// Load the first page
    async fn load_first(&self) -> Result<LoadedPage>;

    /// Load the page described by `request`
    async fn load_page(&self, request: &PageRequest) -> Result<LoadedPage>;
}

/// Endpoint plus the collaborators needed to call it
#[derive(Clone)]
struct Source {
    http: Arc<dyn HttpGet>,
    credentials: Arc<dyn CredentialProvider>,
}

impl Source {
    async fn fetch(&self, url: &str) -> Result<JsonValue> {
        debug!("Fetching {}", url);
        let headers = self.credentials.headers();
        self.http.get_json(url, &headers).await
    }
}

/// Split `items` into pages of `page_size`; the last page may be shorter
pub fn chunk_items(items: Vec<Item>, page_size: usize) -> Vec<Page> {
    let page_size = page_size.max(1);
    let mut pages = Vec::with_capacity(items.len().div_ceil(page_size));
    let mut iter = items.into_iter().peekable();
    while iter.peek().is_some() {
        let chunk: Vec<Item> = iter.by_ref().take(page_size).collect();
        pages.push(Page::new(pages.len(), chunk));
    }
    pages
}

fn page_numbers(total: usize) -> Vec<u32> {
    (1..=total).map(|n| n as u32).collect()
}

// ============================================================================
// Chunking Strategy
// ============================================================================

#[derive(Debug, Default)]
struct Chunks {
    pages: Vec<Page>,
    item_count: u64,
}

/// Fetch-all, chunk-locally pagination (infinite feed)
///
/// `load_first` performs the only network request; every later page is a
/// slice of that response. Only safe for bounded collections, since the whole
/// result set has to fit in one response.
pub struct ChunkingFetchStrategy {
    source: Source,
    endpoint: String,
    decoder: JsonDecoder,
    page_size: usize,
    id_field: String,
    chunks: RwLock<Chunks>,
}

impl ChunkingFetchStrategy {
    /// Create a chunking strategy for `endpoint`
    pub fn new(
        http: Arc<dyn HttpGet>,
        credentials: Arc<dyn CredentialProvider>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            source: Source { http, credentials },
            endpoint: endpoint.into(),
            decoder: JsonDecoder::with_path(DEFAULT_RECORD_PATH),
            page_size: DEFAULT_PAGE_SIZE,
            id_field: DEFAULT_ID_FIELD.to_string(),
            chunks: RwLock::new(Chunks::default()),
        }
    }

    /// Set the number of items per page
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the path to the record array in the response
    #[must_use]
    pub fn with_record_path(mut self, path: impl Into<String>) -> Self {
        self.decoder = JsonDecoder::with_path(path);
        self
    }

    /// Set the identity field of an item
    #[must_use]
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// Items per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Precomputed pages (empty until the first load)
    pub async fn pages(&self) -> Vec<Page> {
        self.chunks.read().await.pages.clone()
    }
}

#[async_trait]
impl FetchStrategy for ChunkingFetchStrategy {
    fn name(&self) -> &'static str {
        "chunking"
    }

    fn default_mode(&self) -> ViewMode {
        ViewMode::Scroll
    }

    async fn load_first(&self) -> Result<LoadedPage> {
        if self.page_size == 0 {
            return Err(Error::config("page_size must be at least 1"));
        }

        let body = self.source.fetch(&self.endpoint).await?;
        let records = self.decoder.decode(&body)?;
        let items = Item::from_values(records, &self.id_field)?;
        let item_count = items.len() as u64;
        let pages = chunk_items(items, self.page_size);
        let total = pages.len();

        debug!(
            "Chunked {} items into {} pages of {}",
            item_count, total, self.page_size
        );

        let first = pages.first().cloned().unwrap_or_else(|| Page::new(0, Vec::new()));
        *self.chunks.write().await = Chunks { pages, item_count };

        Ok(LoadedPage {
            page: first,
            cursor: Cursor::Local {
                page_index: 0,
                total_pages: total,
            },
            total_pages: total,
            count: Some(item_count),
            page_numbers: page_numbers(total),
        })
    }

    async fn load_page(&self, request: &PageRequest) -> Result<LoadedPage> {
        let chunks = self.chunks.read().await;
        let total = chunks.pages.len();
        let page = chunks
            .pages
            .get(request.index)
            .cloned()
            .ok_or(Error::OutOfRange {
                index: request.index,
                total,
            })?;

        Ok(LoadedPage {
            page,
            cursor: Cursor::Local {
                page_index: request.index,
                total_pages: total,
            },
            total_pages: total,
            count: Some(chunks.item_count),
            page_numbers: page_numbers(total),
        })
    }
}

// ============================================================================
// Cursor Strategy
// ============================================================================

/// Server-link pagination (page navigator)
///
/// Every transition follows the `next` or `previous` URL of the last response.
/// Relative links are resolved against the base endpoint.
pub struct CursorFetchStrategy {
    source: Source,
    endpoint: Url,
    id_field: String,
}

impl CursorFetchStrategy {
    /// Create a cursor strategy whose first page lives at `endpoint`
    pub fn new(
        http: Arc<dyn HttpGet>,
        credentials: Arc<dyn CredentialProvider>,
        endpoint: &str,
    ) -> Result<Self> {
        Ok(Self {
            source: Source { http, credentials },
            endpoint: Url::parse(endpoint)?,
            id_field: DEFAULT_ID_FIELD.to_string(),
        })
    }

    /// Set the identity field of an item
    #[must_use]
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// Base endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn fetch_page(&self, url: &str) -> Result<LoadedPage> {
        let body = self.source.fetch(url).await?;
        let server = ServerPage::from_json(&body)?;

        let total = server.total_pages();
        let page_active = (server.page_active as usize).clamp(1, total.max(1));
        let items = Item::from_values(server.data, &self.id_field)?;

        Ok(LoadedPage {
            page: Page::new(page_active - 1, items),
            cursor: Cursor::Server {
                next: server.next,
                previous: server.previous,
            },
            total_pages: total,
            count: server.count,
            page_numbers: server.num_pages,
        })
    }
}

#[async_trait]
impl FetchStrategy for CursorFetchStrategy {
    fn name(&self) -> &'static str {
        "cursor"
    }

    fn default_mode(&self) -> ViewMode {
        ViewMode::Jump
    }

    async fn load_first(&self) -> Result<LoadedPage> {
        self.fetch_page(self.endpoint.as_str()).await
    }

    async fn load_page(&self, request: &PageRequest) -> Result<LoadedPage> {
        let (next, previous) = match &request.cursor {
            Cursor::Server { next, previous } => (next.as_deref(), previous.as_deref()),
            _ => (None, None),
        };

        let link = match request.direction {
            Direction::Backward => {
                if request.active_page_index == 0 {
                    return Err(Error::NoSuchPage {
                        direction: Direction::Backward,
                    });
                }
                previous
            }
            Direction::Forward => {
                // Already on the last page: reject before touching the network
                if let Some(total) = request.total_pages {
                    if request.active_page_index + 1 >= total {
                        return Err(Error::OutOfRange {
                            index: request.active_page_index + 1,
                            total,
                        });
                    }
                }
                next
            }
        };

        let link = link.ok_or(Error::NoSuchPage {
            direction: request.direction,
        })?;
        let url = self.endpoint.join(link)?;
        self.fetch_page(url.as_str()).await
    }
}
