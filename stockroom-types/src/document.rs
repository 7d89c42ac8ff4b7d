//! The record shape exchanged with a remote document collection.
//!
//! Fields are an opaque name -> value mapping. Stockroom only ever writes
//! strings plus a single integer, so those are the only value kinds kept.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field map of a stored document.
pub type Fields = BTreeMap<String, FieldValue>;

/// A single field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    String(String),
}

impl FieldValue {
    /// Returns the string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            FieldValue::Integer(_) => None,
        }
    }

    /// Returns the integer payload, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            FieldValue::String(_) => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

/// A document as listed from the remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Backend-assigned document id. Kept raw; validated when mapped to an item.
    pub id: String,
    /// Stored fields.
    #[serde(default)]
    pub fields: Fields,
}

impl Document {
    /// Creates a document from an id and a field map.
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Returns a string field, or `""` when it is missing or not a string.
    pub fn string_field(&self, name: &str) -> &str {
        self.fields
            .get(name)
            .and_then(FieldValue::as_str)
            .unwrap_or_default()
    }

    /// Returns an integer field, if present.
    pub fn integer_field(&self, name: &str) -> Option<i64> {
        self.fields.get(name).and_then(FieldValue::as_integer)
    }
}
