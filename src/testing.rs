//! In-memory transport shared by unit tests

use crate::error::{Error, Result};
use crate::http::HttpGet;
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Serves canned JSON per URL and records every request
#[derive(Default)]
pub(crate) struct RecordingHttp {
    routes: Mutex<HashMap<String, JsonValue>>,
    failures: Mutex<HashMap<String, u16>>,
    calls: Mutex<Vec<(String, StringMap)>>,
    gate: Option<Arc<Notify>>,
}

impl RecordingHttp {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Hold every request until the gate is notified
    pub(crate) fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub(crate) fn route(self, url: &str, body: JsonValue) -> Self {
        self.set_route(url, body);
        self
    }

    pub(crate) fn set_route(&self, url: &str, body: JsonValue) {
        self.routes.lock().unwrap().insert(url.to_string(), body);
    }

    pub(crate) fn fail(&self, url: &str, status: u16) {
        self.failures.lock().unwrap().insert(url.to_string(), status);
    }

    pub(crate) fn clear_failure(&self, url: &str) {
        self.failures.lock().unwrap().remove(url);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn last_headers(&self) -> Option<StringMap> {
        self.calls.lock().unwrap().last().map(|(_, h)| h.clone())
    }
}

#[async_trait]
impl HttpGet for RecordingHttp {
    async fn get_json(&self, url: &str, headers: &StringMap) -> Result<JsonValue> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), headers.clone()));

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if let Some(status) = self.failures.lock().unwrap().get(url) {
            return Err(Error::http_status(*status, "injected failure"));
        }

        self.routes
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| Error::http_status(404, format!("no route for {url}")))
    }
}

/// `n` feed items with ids `1..=n`
pub(crate) fn feed_items(n: usize) -> JsonValue {
    let items: Vec<JsonValue> = (1..=n)
        .map(|i| serde_json::json!({"id": i, "title": format!("Topic {i}")}))
        .collect();
    serde_json::json!({ "items": items })
}

/// A server page in the list navigator's response shape
pub(crate) fn server_page(
    page_active: u32,
    ids: &[u64],
    next: Option<&str>,
    previous: Option<&str>,
    total_pages: u32,
) -> JsonValue {
    let data: Vec<JsonValue> = ids.iter().map(|id| serde_json::json!({"id": id})).collect();
    serde_json::json!({
        "data": data,
        "next": next,
        "previous": previous,
        "count": total_pages * 5,
        "page_active": page_active,
        "num_pages": (1..=total_pages).collect::<Vec<u32>>(),
    })
}
