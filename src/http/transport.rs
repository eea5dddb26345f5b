//! Network capability consumed by the fetch strategies

use crate::error::Result;
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use std::sync::Arc;

/// Fetches a JSON document
#[async_trait]
pub trait HttpGet: Send + Sync {
    /// GET `url` with `headers` and decode the body as JSON
    async fn get_json(&self, url: &str, headers: &StringMap) -> Result<JsonValue>;
}

#[async_trait]
impl<T: HttpGet + ?Sized> HttpGet for Arc<T> {
    async fn get_json(&self, url: &str, headers: &StringMap) -> Result<JsonValue> {
        (**self).get_json(url, headers).await
    }
}
