//! Common types used throughout pagesync
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Direction
// ============================================================================

/// Direction of a page transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards higher page indices
    Forward,
    /// Towards page zero
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("forward"),
            Direction::Backward => f.write_str("backward"),
        }
    }
}

// ============================================================================
// View Mode
// ============================================================================

/// How loaded pages are merged into the visible item list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Append each forward page (infinite scroll)
    #[default]
    Scroll,
    /// Replace the visible items with the target page (page navigator)
    Jump,
}

impl ViewMode {
    /// Name used in error messages and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Scroll => "scroll",
            ViewMode::Jump => "jump",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Item
// ============================================================================

/// A single feed or list entry
///
/// The payload is opaque; only the identity is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Identity, as the string form of the payload's id field
    pub id: String,
    /// The full record as returned by the server
    pub data: JsonValue,
}

impl Item {
    /// Build an item from a raw record, reading its identity from `id_field`
    pub fn from_value(data: JsonValue, id_field: &str) -> Result<Self> {
        let id = match data.get(id_field) {
            Some(JsonValue::String(s)) if !s.is_empty() => s.clone(),
            Some(JsonValue::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(Error::parse(format!(
                    "Item field '{id_field}' must be a string or number, got {other}"
                )))
            }
            None => {
                return Err(Error::parse(format!(
                    "Item is missing identity field '{id_field}'"
                )))
            }
        };
        Ok(Self { id, data })
    }

    /// Convert a list of raw records into items
    pub fn from_values(values: Vec<JsonValue>, id_field: &str) -> Result<Vec<Self>> {
        values
            .into_iter()
            .map(|v| Self::from_value(v, id_field))
            .collect()
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}
