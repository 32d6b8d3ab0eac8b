//! Key/value store contract and its implementations
//!
//! Every value is read and written whole. Readers always receive owned
//! copies, so callers mutate a local value and `put` it back.

use crate::error::{Result, StoreError};
use crate::io::atomic_write;
use crate::value::StoreValue;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// String-keyed persisted values with whole-value get/put semantics
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<StoreValue>>;

    fn put(&mut self, key: &str, value: StoreValue) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;

    fn get_text(&self, key: &str) -> Result<Option<String>> {
        match self.get(key)? {
            None => Ok(None),
            Some(StoreValue::Text(text)) => Ok(Some(text)),
            Some(other) => Err(mismatch(key, "string", &other)),
        }
    }

    fn get_set(&self, key: &str) -> Result<Option<BTreeSet<String>>> {
        match self.get(key)? {
            None => Ok(None),
            Some(StoreValue::TextSet(set)) => Ok(Some(set)),
            Some(other) => Err(mismatch(key, "string set", &other)),
        }
    }

    fn get_timestamps(&self, key: &str) -> Result<Option<BTreeMap<String, i64>>> {
        match self.get(key)? {
            None => Ok(None),
            // An empty JSON array and an empty object both mean "no entries"
            Some(StoreValue::TextSet(set)) if set.is_empty() => Ok(Some(BTreeMap::new())),
            Some(StoreValue::Timestamps(map)) => Ok(Some(map)),
            Some(other) => Err(mismatch(key, "timestamp map", &other)),
        }
    }
}

fn mismatch(key: &str, expected: &'static str, found: &StoreValue) -> StoreError {
    StoreError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}

/// Volatile store, used by tests and as a scratch backend
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, StoreValue>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `put` calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<StoreValue>> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: StoreValue) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store persisted as one JSON document, rewritten atomically on each mutation
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, StoreValue>,
}

impl JsonFileStore {
    /// Open the document at `path`. A missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self> {
        let values = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|source| StoreError::Json {
                    path: path.to_path_buf(),
                    source,
                })?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    fn persist(&self, values: &BTreeMap<String, StoreValue>) -> Result<()> {
        let json = serde_json::to_string_pretty(values).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        atomic_write(&self.path, json.as_bytes()).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<StoreValue>> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: StoreValue) -> Result<()> {
        let mut next = self.values.clone();
        next.insert(key.to_string(), value);
        self.persist(&next)?;
        self.values = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if !self.values.contains_key(key) {
            return Ok(());
        }
        let mut next = self.values.clone();
        next.remove(key);
        self.persist(&next)?;
        self.values = next;
        Ok(())
    }
}
