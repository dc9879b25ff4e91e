//! External parameter data.
//!
//! A [`DataSource`] hands the builder values by key, typically decoded request
//! input. The builder only ever reads from it; keys that are already bound on
//! the builder are never re-read.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Supplies parameter values by key.
pub trait DataSource {
    /// Whether the key exists at all (even with a NULL value).
    fn is_key_defined(&self, key: &str) -> bool;

    /// Whether the key's value is a list rather than a single scalar.
    fn is_key_list(&self, key: &str) -> bool;

    /// Scalar value for the key; `None` means absent or NULL.
    fn value_for(&self, key: &str) -> Option<String>;

    /// List value for the key; `None` when absent or not a list.
    fn values_for(&self, key: &str) -> Option<Vec<String>>;
}

/// A value stored in an in-memory data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceValue {
    Null,
    Scalar(String),
    List(Vec<String>),
}

impl From<&str> for SourceValue {
    fn from(s: &str) -> Self {
        SourceValue::Scalar(s.to_string())
    }
}

impl From<String> for SourceValue {
    fn from(s: String) -> Self {
        SourceValue::Scalar(s)
    }
}

impl<T: Into<String>> From<Vec<T>> for SourceValue {
    fn from(values: Vec<T>) -> Self {
        SourceValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<SourceValue>> From<Option<T>> for SourceValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SourceValue::Null, Into::into)
    }
}

impl DataSource for HashMap<String, SourceValue> {
    fn is_key_defined(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn is_key_list(&self, key: &str) -> bool {
        matches!(self.get(key), Some(SourceValue::List(_)))
    }

    fn value_for(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            SourceValue::Scalar(s) => Some(s.clone()),
            SourceValue::Null | SourceValue::List(_) => None,
        }
    }

    fn values_for(&self, key: &str) -> Option<Vec<String>> {
        match self.get(key)? {
            SourceValue::List(values) => Some(values.clone()),
            SourceValue::Null | SourceValue::Scalar(_) => None,
        }
    }
}

/// Text of a JSON scalar as it should be bound; strings are taken verbatim.
fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// A decoded JSON object: arrays are list-valued, `null` is the absent value.
impl DataSource for Map<String, Value> {
    fn is_key_defined(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn is_key_list(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Value::Array(_)))
    }

    fn value_for(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::Array(_) => None,
            other => json_text(other),
        }
    }

    fn values_for(&self, key: &str) -> Option<Vec<String>> {
        match self.get(key)? {
            Value::Array(items) => Some(items.iter().filter_map(json_text).collect()),
            _ => None,
        }
    }
}
