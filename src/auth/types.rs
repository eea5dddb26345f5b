//! Credential configuration types

use crate::types::StringMap;
use serde::{Deserialize, Serialize};

/// Default header carrying the session token
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Default header carrying the CSRF token
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Credential configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No credentials are sent
    #[default]
    None,

    /// Session token plus CSRF token, as the topic/feed backend expects
    Token {
        /// Value of the `Authorization` header (sent verbatim, no prefix)
        auth_token: String,
        /// Value of the `X-CSRFToken` header
        #[serde(default)]
        csrf_token: Option<String>,
    },

    /// Arbitrary headers forwarded as-is
    CustomHeaders {
        /// Headers to add to each request
        headers: StringMap,
    },
}

impl AuthConfig {
    /// Create a token config
    pub fn token(auth_token: impl Into<String>, csrf_token: Option<String>) -> Self {
        Self::Token {
            auth_token: auth_token.into(),
            csrf_token,
        }
    }

    /// Render the header map for one request
    pub fn to_headers(&self) -> StringMap {
        let mut headers = StringMap::new();
        match self {
            AuthConfig::None => {}
            AuthConfig::Token {
                auth_token,
                csrf_token,
            } => {
                headers.insert(AUTHORIZATION_HEADER.to_string(), auth_token.clone());
                if let Some(csrf) = csrf_token {
                    headers.insert(CSRF_HEADER.to_string(), csrf.clone());
                }
            }
            AuthConfig::CustomHeaders { headers: custom } => {
                headers.extend(custom.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        headers
    }
}
