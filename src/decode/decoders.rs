//! Record extraction
//!
//! Simple dot paths (`feed`, `results.items`, `data[0]`) are walked directly;
//! wildcard paths go through jsonpath-rust.

use super::types::RecordDecoder;
use crate::error::{Error, Result};
use crate::types::JsonValue;

/// JSON decoder with optional record path extraction
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    /// Path to the record array
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Create a decoder that treats the whole body as the record array
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// The configured record path, if any
    pub fn record_path(&self) -> Option<&str> {
        self.record_path.as_deref()
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &JsonValue) -> Result<Vec<JsonValue>> {
        match &self.record_path {
            Some(path) => extract_records(body, path),
            None => match body {
                JsonValue::Array(arr) => Ok(arr.clone()),
                other => Err(Error::parse(format!(
                    "Expected a JSON array, got {}",
                    type_name(other)
                ))),
            },
        }
    }
}

/// Extract the record array found at `path`
///
/// A missing path or a non-array target is a malformed response.
pub fn extract_records(value: &JsonValue, path: &str) -> Result<Vec<JsonValue>> {
    if path.contains('*') && !path.contains("[-") {
        return extract_with_jsonpath(value, path);
    }

    match extract_simple_path(value, path) {
        Some(JsonValue::Array(arr)) => Ok(arr),
        Some(other) => Err(Error::parse(format!(
            "Expected an array at '{path}', got {}",
            type_name(&other)
        ))),
        None => Err(Error::parse(format!("Response has no '{path}' field"))),
    }
}

fn extract_simple_path(value: &JsonValue, path: &str) -> Option<JsonValue> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.') {
        if let Some(bracket_pos) = part.find('[') {
            let name = &part[..bracket_pos];
            let index_str = part[bracket_pos + 1..].trim_end_matches(']');

            if !name.is_empty() {
                current = current.get(name)?;
            }

            let index: i64 = index_str.parse().ok()?;
            let JsonValue::Array(arr) = current else {
                return None;
            };
            let idx = if index < 0 {
                arr.len().checked_sub(index.unsigned_abs() as usize)?
            } else {
                index as usize
            };
            current = arr.get(idx)?;
        } else {
            current = current.get(part)?;
        }
    }

    Some(current.clone())
}

fn extract_with_jsonpath(value: &JsonValue, path: &str) -> Result<Vec<JsonValue>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path)
        .map_err(|e| Error::json_path(format!("Invalid JSONPath '{path}': {e}")))?;

    match jp.find(value) {
        JsonValue::Array(arr) => Ok(arr),
        JsonValue::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
