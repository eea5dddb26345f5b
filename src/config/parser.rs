//! YAML parser for pager configuration
//!
//! Parses and validates pager YAML files.

use super::types::{PagerConfig, StrategyConfig};
use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::debug;
use url::Url;

/// Load a pager configuration from a YAML file
///
/// # Examples
///
/// ```ignore
/// let config = load_config("./feed.yaml")?;
/// let controller = PaginationController::from_config(&config)?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PagerConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::config(format!("Config file '{}' not found", path.display()))
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    debug!("Loaded config from {}", path.display());
    load_config_from_str(&content)
}

/// Load a pager configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<PagerConfig> {
    let config: PagerConfig = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate a pager configuration
pub fn validate_config(config: &PagerConfig) -> Result<()> {
    if config.endpoint.trim().is_empty() {
        return Err(Error::config("endpoint cannot be empty"));
    }
    Url::parse(&config.endpoint).map_err(|e| {
        Error::config(format!(
            "endpoint '{}' is not an absolute URL: {}",
            config.endpoint, e
        ))
    })?;

    if config.id_field.is_empty() {
        return Err(Error::config("id_field cannot be empty"));
    }

    if let StrategyConfig::Chunking {
        page_size,
        record_path,
    } = &config.strategy
    {
        if *page_size == 0 {
            return Err(Error::config("page_size must be at least 1"));
        }
        if record_path.is_empty() {
            return Err(Error::config("record_path cannot be empty"));
        }
    }

    if !config.threshold_px.is_finite() || config.threshold_px < 0.0 {
        return Err(Error::config(format!(
            "threshold_px must be a non-negative number, got {}",
            config.threshold_px
        )));
    }

    if config.deadline_ms == Some(0) {
        return Err(Error::config("deadline_ms must be greater than 0"));
    }

    validate_http(config)?;
    validate_auth(&config.auth)
}

fn validate_http(config: &PagerConfig) -> Result<()> {
    if config.http.timeout_secs == 0 {
        return Err(Error::config("http.timeout_secs must be greater than 0"));
    }

    if let Some(limit) = &config.http.rate_limit {
        if limit.requests_per_second == 0 {
            return Err(Error::config(
                "http.rate_limit.requests_per_second must be greater than 0",
            ));
        }
    }

    Ok(())
}

fn validate_auth(auth: &AuthConfig) -> Result<()> {
    match auth {
        AuthConfig::Token { auth_token, .. } if auth_token.is_empty() => {
            Err(Error::config("auth.auth_token cannot be empty"))
        }
        AuthConfig::CustomHeaders { headers } if headers.keys().any(String::is_empty) => {
            Err(Error::config("auth.headers cannot contain an empty header name"))
        }
        _ => Ok(()),
    }
}
