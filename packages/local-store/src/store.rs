//! The local store and its in-memory implementation.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Result, StoreError};

/// A persisted key-value snapshot.
pub type Snapshot = BTreeMap<String, String>;

/// Read a snapshot from its JSON form: an object whose values are strings.
///
/// `null` is read as an empty snapshot, which is what a host with nothing
/// persisted sends.
pub fn parse_snapshot(value: Value) -> Result<Snapshot> {
    let object = match value {
        Value::Null => return Ok(Snapshot::new()),
        Value::Object(object) => object,
        other => {
            return Err(StoreError::InvalidSnapshot(format!(
                "expected an object, got {}",
                other
            )))
        }
    };

    object
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => Ok((key, s)),
            other => Err(StoreError::InvalidSnapshot(format!(
                "value of '{}' is not a string: {}",
                key, other
            ))),
        })
        .collect()
}

/// A flat string-to-string store local to one frame.
///
/// Writes are local and cannot fail.
pub trait LocalStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);

    /// Remove a key, returning its previous value.
    fn remove(&mut self, key: &str) -> Option<String>;

    fn clear(&mut self);

    /// All keys, in order.
    fn keys(&self) -> Vec<String>;

    fn len(&self) -> usize {
        self.keys().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A [`LocalStore`] held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryStore {
    entries: Snapshot,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial entries.
    pub fn with_data(entries: Snapshot) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &Snapshot {
        &self.entries
    }
}

impl LocalStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
