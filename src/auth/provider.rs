//! Credential provider seam
//!
//! The pagination core only ever asks for headers; it never inspects them.

use super::types::AuthConfig;
use crate::types::StringMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Supplies the headers attached to every page request
pub trait CredentialProvider: Send + Sync {
    /// Headers for the next request
    fn headers(&self) -> StringMap;
}

impl CredentialProvider for AuthConfig {
    fn headers(&self) -> StringMap {
        self.to_headers()
    }
}

impl<F> CredentialProvider for F
where
    F: Fn() -> StringMap + Send + Sync,
{
    fn headers(&self) -> StringMap {
        self()
    }
}

/// Credentials that can be swapped while a controller is alive
///
/// Cloning shares the underlying config, so an owner can rotate the token
/// after login/refresh and every controller picks it up on its next request.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    config: Arc<RwLock<AuthConfig>>,
}

impl StaticCredentials {
    /// Create a provider from a config
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Replace the credentials used for subsequent requests
    pub fn replace(&self, config: AuthConfig) {
        debug!("Credentials replaced");
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    /// Snapshot of the current config
    pub fn current(&self) -> AuthConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CredentialProvider for StaticCredentials {
    fn headers(&self) -> StringMap {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .to_headers()
    }
}
