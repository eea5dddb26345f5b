//! Credentials module
//!
//! Supports: auth token + CSRF token, custom headers, none
//!
//! The core never reads or stores session state itself. A `CredentialProvider`
//! is asked for an opaque header map on every request, so token lifetime is
//! owned by whoever implements the provider.

mod provider;
mod types;

pub use provider::{CredentialProvider, StaticCredentials};
pub use types::AuthConfig;
