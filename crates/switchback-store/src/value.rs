//! Values held by the key/value store

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A whole persisted value. Stores never patch part of a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoreValue {
    Text(String),
    TextSet(BTreeSet<String>),
    Timestamps(BTreeMap<String, i64>),
}

impl StoreValue {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreValue::Text(_) => "string",
            StoreValue::TextSet(_) => "string set",
            StoreValue::Timestamps(_) => "timestamp map",
        }
    }
}

impl From<String> for StoreValue {
    fn from(value: String) -> Self {
        StoreValue::Text(value)
    }
}

impl From<&str> for StoreValue {
    fn from(value: &str) -> Self {
        StoreValue::Text(value.to_string())
    }
}

impl From<BTreeSet<String>> for StoreValue {
    fn from(value: BTreeSet<String>) -> Self {
        StoreValue::TextSet(value)
    }
}

impl From<BTreeMap<String, i64>> for StoreValue {
    fn from(value: BTreeMap<String, i64>) -> Self {
        StoreValue::Timestamps(value)
    }
}
