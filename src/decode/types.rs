//! Decoder types and traits

use crate::error::{Error, Result};
use crate::types::{JsonValue, OptionStringExt};
use serde::{Deserialize, Deserializer};

/// Trait for pulling the record list out of a response body
pub trait RecordDecoder: Send + Sync {
    /// Decode the response body into a list of records
    fn decode(&self, body: &JsonValue) -> Result<Vec<JsonValue>>;
}

/// One page as returned by a server-paginated list endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerPage {
    /// Records on this page
    pub data: Vec<JsonValue>,
    /// Link to the following page
    #[serde(default)]
    pub next: Option<String>,
    /// Link to the preceding page
    #[serde(default)]
    pub previous: Option<String>,
    /// Total number of records across all pages
    #[serde(default)]
    pub count: Option<u64>,
    /// 1-based number of this page
    #[serde(deserialize_with = "number_or_string")]
    pub page_active: u32,
    /// Literal list of page numbers for rendering
    #[serde(default)]
    pub num_pages: Vec<u32>,
}

impl ServerPage {
    /// Decode and normalize a server page
    pub fn from_json(body: &JsonValue) -> Result<Self> {
        let mut page: ServerPage = serde_json::from_value(body.clone())
            .map_err(|e| Error::parse(format!("Unexpected page response: {e}")))?;
        page.next = page.next.take().none_if_empty();
        page.previous = page.previous.take().none_if_empty();
        Ok(page)
    }

    /// Number of pages the server reports
    pub fn total_pages(&self) -> usize {
        self.num_pages.len().max(self.page_active as usize)
    }
}

/// Some backends serialize the active page number as a string
fn number_or_string<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
