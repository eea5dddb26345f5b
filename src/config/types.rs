//! Configuration types

use crate::auth::AuthConfig;
use crate::controller::ControllerOptions;
use crate::error::Result;
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pagination::{DEFAULT_ID_FIELD, DEFAULT_PAGE_SIZE, DEFAULT_RECORD_PATH};
use crate::scroll::{ScrollTrigger, DEFAULT_THRESHOLD_PX};
use crate::types::{StringMap, ViewMode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Pager Config
// ============================================================================

/// Complete description of one paginated view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PagerConfig {
    /// Absolute URL of the collection (chunking) or first page (cursor)
    pub endpoint: String,
    /// How pages are obtained
    #[serde(default)]
    pub strategy: StrategyConfig,
    /// Merge mode; defaults to the strategy's natural mode
    #[serde(default)]
    pub mode: Option<ViewMode>,
    /// Field holding an item's identity
    #[serde(default = "default_id_field")]
    pub id_field: String,
    /// Near-bottom distance that triggers the next page
    #[serde(default = "default_threshold_px")]
    pub threshold_px: f64,
    /// Deadline for each page load, in milliseconds
    #[serde(default)]
    pub deadline_ms: Option<u64>,
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,
    /// Credentials sent with each request
    #[serde(default)]
    pub auth: AuthConfig,
}

fn default_id_field() -> String {
    DEFAULT_ID_FIELD.to_string()
}

fn default_threshold_px() -> f64 {
    DEFAULT_THRESHOLD_PX
}

impl PagerConfig {
    /// Create a config with defaults for everything but endpoint and strategy
    pub fn new(endpoint: impl Into<String>, strategy: StrategyConfig) -> Self {
        Self {
            endpoint: endpoint.into(),
            strategy,
            mode: None,
            id_field: default_id_field(),
            threshold_px: default_threshold_px(),
            deadline_ms: None,
            http: HttpSettings::default(),
            auth: AuthConfig::None,
        }
    }

    /// Check the config for values that cannot work
    pub fn validate(&self) -> Result<()> {
        super::parser::validate_config(self)
    }

    /// Merge mode after applying the strategy default
    pub fn effective_mode(&self) -> ViewMode {
        self.mode.unwrap_or_else(|| self.strategy.default_mode())
    }

    /// Settings for the HTTP client
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_secs));

        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        if let Some(limit) = &self.http.rate_limit {
            builder = builder.rate_limit(limit.clone());
        }
        for (key, value) in &self.http.headers {
            builder = builder.header(key.clone(), value.clone());
        }

        builder.build()
    }

    /// Options for the pagination controller
    pub fn controller_options(&self) -> ControllerOptions {
        let mut options = ControllerOptions::new().mode(self.effective_mode());
        if let Some(ms) = self.deadline_ms {
            options = options.deadline(Duration::from_millis(ms));
        }
        options
    }

    /// Scroll trigger with the configured threshold
    pub fn scroll_trigger(&self) -> ScrollTrigger {
        ScrollTrigger::with_threshold(self.threshold_px)
    }
}

// ============================================================================
// Strategy Config
// ============================================================================

/// How pages are obtained from the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Fetch the whole collection once and slice it locally
    Chunking {
        /// Items per page
        #[serde(default = "default_page_size")]
        page_size: usize,
        /// Path to the record array in the response
        #[serde(default = "default_record_path")]
        record_path: String,
    },
    /// Follow the server's `next` / `previous` links
    Cursor,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_record_path() -> String {
    DEFAULT_RECORD_PATH.to_string()
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self::Chunking {
            page_size: default_page_size(),
            record_path: default_record_path(),
        }
    }
}

impl StrategyConfig {
    /// Strategy name, as used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chunking { .. } => "chunking",
            Self::Cursor => "cursor",
        }
    }

    /// Mode the strategy is normally paired with
    pub fn default_mode(&self) -> ViewMode {
        match self {
            Self::Chunking { .. } => ViewMode::Scroll,
            Self::Cursor => ViewMode::Jump,
        }
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Client-side rate limit
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: None,
            rate_limit: None,
            headers: StringMap::new(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
