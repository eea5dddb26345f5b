//! Pagination controller module
//!
//! The public entry point of the crate.
//!
//! # Overview
//!
//! `PaginationController` orchestrates a `PageStore` and one `FetchStrategy`:
//! - `initialize()` loads the first page (exactly once)
//! - `advance(direction)` loads the next/previous page, or returns the
//!   current state untouched when there is nothing to do
//! - `retry()` repeats the operation that left the state in `Error`
//! - `detach()` discards any result still in flight
//!
//! At most one load is in flight at a time. A call that arrives while a load
//! is running is answered with the current state instead of being queued.
//! Dropping a call's future mid-fetch abandons its load, so the next call
//! fetches again.

mod types;

pub use types::ControllerOptions;

use crate::auth::CredentialProvider;
use crate::config::{PagerConfig, StrategyConfig};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpGet};
use crate::pagination::{
    ChunkingFetchStrategy, CursorFetchStrategy, FetchStrategy, PageRequest, PageStore,
    PaginationState, PendingLoad, Status,
};
use crate::types::{Direction, ViewMode};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use types::FailedOp;

struct Inner {
    store: PageStore,
    initialized: bool,
    failed: Option<FailedOp>,
}

/// Orchestrates loading and merging pages for one view
pub struct PaginationController {
    strategy: Arc<dyn FetchStrategy>,
    inner: Mutex<Inner>,
    deadline: Option<Duration>,
    attached: AtomicBool,
}

impl PaginationController {
    /// Create a controller using the strategy's default mode
    pub fn new(strategy: Arc<dyn FetchStrategy>) -> Self {
        Self::with_options(strategy, ControllerOptions::default())
    }

    /// Create a controller with explicit options
    pub fn with_options(strategy: Arc<dyn FetchStrategy>, options: ControllerOptions) -> Self {
        let mode = options.mode.unwrap_or_else(|| strategy.default_mode());
        Self {
            strategy,
            inner: Mutex::new(Inner {
                store: PageStore::new(mode),
                initialized: false,
                failed: None,
            }),
            deadline: options.deadline,
            attached: AtomicBool::new(true),
        }
    }

    /// Build a controller, its HTTP client and credentials from configuration
    pub fn from_config(config: &PagerConfig) -> Result<Self> {
        let http = Arc::new(HttpClient::with_config(config.http_client_config())?);
        let credentials = Arc::new(config.auth.clone());
        Self::from_config_with(config, http, credentials)
    }

    /// Build a controller from configuration using the given collaborators
    pub fn from_config_with(
        config: &PagerConfig,
        http: Arc<dyn HttpGet>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        config.validate()?;

        let strategy: Arc<dyn FetchStrategy> = match &config.strategy {
            StrategyConfig::Chunking {
                page_size,
                record_path,
            } => Arc::new(
                ChunkingFetchStrategy::new(http, credentials, config.endpoint.clone())
                    .with_page_size(*page_size)
                    .with_record_path(record_path.clone())
                    .with_id_field(config.id_field.clone()),
            ),
            StrategyConfig::Cursor => Arc::new(
                CursorFetchStrategy::new(http, credentials, &config.endpoint)?
                    .with_id_field(config.id_field.clone()),
            ),
        };

        Ok(Self::with_options(strategy, config.controller_options()))
    }

    /// Snapshot of the current state
    pub fn state(&self) -> PaginationState {
        self.lock().store.state().clone()
    }

    /// Merge mode of this controller
    pub fn mode(&self) -> ViewMode {
        self.lock().store.state().mode
    }

    /// Name of the fetch strategy
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Check if the owning view is still attached
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    /// Tear down: results still in flight are discarded on arrival
    pub fn detach(&self) {
        if self.attached.swap(false, Ordering::AcqRel) {
            debug!("Pagination controller detached");
        }
    }

    /// Load the first page; must be called exactly once
    pub async fn initialize(&self) -> Result<PaginationState> {
        self.ensure_attached()?;
        {
            let mut inner = self.lock();
            if inner.initialized {
                return Err(Error::AlreadyInitialized);
            }
            inner.store.begin_load(PendingLoad::First)?;
            inner.initialized = true;
        }

        info!("Initializing {} pagination", self.strategy.name());
        self.run_first_load().await
    }

    /// Move one page in `direction`
    ///
    /// Returns the current state without any network activity when a load is
    /// already in flight, when there is no page in that direction, or when
    /// the state is `Error` (use [`retry`](Self::retry)).
    pub async fn advance(&self, direction: Direction) -> Result<PaginationState> {
        self.ensure_attached()?;
        self.advance_from(direction, false).await
    }

    /// Repeat the operation that failed; no-op unless the state is `Error`
    pub async fn retry(&self) -> Result<PaginationState> {
        self.ensure_attached()?;

        let op = {
            let mut inner = self.lock();
            let state = inner.store.state();
            if state.status != Status::Error {
                return Ok(state.clone());
            }
            let Some(op) = inner.failed else {
                return Ok(state.clone());
            };
            if op == FailedOp::First {
                inner.store.begin_load(PendingLoad::First)?;
            }
            op
        };

        info!("Retrying {:?}", op);
        match op {
            FailedOp::First => self.run_first_load().await,
            FailedOp::Advance(direction) => self.advance_from(direction, true).await,
        }
    }

    async fn run_first_load(&self) -> Result<PaginationState> {
        let guard = PendingGuard::new(self, true);
        let result = self.with_deadline(self.strategy.load_first()).await;
        guard.disarm();

        let mut inner = self.lock();
        if !self.is_attached() {
            debug!("Discarding first page: view detached");
            inner.store.reset_status();
            return Err(Error::Detached);
        }

        match result {
            Ok(loaded) => match inner.store.commit_first_load(loaded).cloned() {
                Ok(state) => {
                    inner.failed = None;
                    info!(
                        "Loaded first page: {} items, {} pages",
                        state.items.len(),
                        state.total_pages.unwrap_or(0)
                    );
                    Ok(state)
                }
                Err(e) => {
                    inner.store.reset_status();
                    Err(e)
                }
            },
            Err(e) => Err(Self::fail(&mut inner, FailedOp::First, e)),
        }
    }

    async fn advance_from(&self, direction: Direction, retrying: bool) -> Result<PaginationState> {
        let request = {
            let mut inner = self.lock();
            if !inner.initialized {
                return Err(Error::NotInitialized);
            }

            let state = inner.store.state();
            if direction == Direction::Backward && state.mode == ViewMode::Scroll {
                return Err(Error::UnsupportedDirection {
                    direction,
                    mode: state.mode.as_str(),
                });
            }

            match state.status {
                Status::Loading => {
                    debug!("Advance {} ignored: a load is already in flight", direction);
                    return Ok(state.clone());
                }
                Status::Error if !retrying => {
                    debug!("Advance {} ignored: last load failed", direction);
                    return Ok(state.clone());
                }
                Status::Idle => return Err(Error::NotInitialized),
                _ => {}
            }

            let Some(index) = state.target_index(direction) else {
                debug!(
                    "Advance {} ignored: no page available from page {}",
                    direction,
                    state.page_number()
                );
                return Ok(state.clone());
            };

            let request = PageRequest::from_state(state, direction, index);
            inner
                .store
                .begin_load(PendingLoad::Page { direction, index })?;
            request
        };

        let guard = PendingGuard::new(self, false);
        let result = self
            .with_deadline(self.strategy.load_page(&request))
            .await;
        guard.disarm();

        let mut inner = self.lock();
        if !self.is_attached() {
            debug!("Discarding page {}: view detached", request.index + 1);
            inner.store.reset_status();
            return Err(Error::Detached);
        }

        match result {
            Ok(loaded) => match inner
                .store
                .commit_advance(direction, request.index, loaded)
                .cloned()
            {
                Ok(state) => {
                    inner.failed = None;
                    debug!(
                        "Moved {} to page {}: {} items visible{}",
                        direction,
                        state.page_number(),
                        state.items.len(),
                        if state.exhausted { " (exhausted)" } else { "" }
                    );
                    Ok(state)
                }
                Err(e) => {
                    inner.store.reset_status();
                    Err(e)
                }
            },
            Err(e) => Err(Self::fail(&mut inner, FailedOp::Advance(direction), e)),
        }
    }

    fn fail(inner: &mut Inner, op: FailedOp, e: Error) -> Error {
        if e.is_precondition_violation() {
            error!("Pagination invariant violated during {:?}: {}", op, e);
        } else {
            warn!("{:?} failed: {}", op, e);
        }
        inner.store.mark_error(e.to_string());
        inner.failed = Some(op);
        e
    }

    async fn with_deadline<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, fut)
                .await
                .map_err(|_| Error::Timeout {
                    timeout_ms: deadline.as_millis() as u64,
                })?,
            None => fut.await,
        }
    }

    fn ensure_attached(&self) -> Result<()> {
        if self.is_attached() {
            Ok(())
        } else {
            Err(Error::Detached)
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Abandons the pending load if the future driving it is dropped mid-fetch.
///
/// Must be disarmed before the controller lock is taken to commit.
struct PendingGuard<'a> {
    controller: &'a PaginationController,
    first: bool,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn new(controller: &'a PaginationController, first: bool) -> Self {
        Self {
            controller,
            first,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.controller.lock();
        debug!("Load dropped before completion, abandoning pending page");
        inner.store.reset_status();
        // A first load that never committed may be started again
        if self.first && inner.store.state().total_pages.is_none() {
            inner.initialized = false;
        }
    }
}

impl std::fmt::Debug for PaginationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationController")
            .field("strategy", &self.strategy.name())
            .field("deadline", &self.deadline)
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}
