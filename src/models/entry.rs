//! Editable key/value rows for headers and query parameters.

use serde::{Deserialize, Serialize};

/// One editable row of a header or query parameter list.
///
/// The `id` is synthetic and stable for the lifetime of the row so that
/// edits can address it even while `key` is still empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValueEntry {
    pub id: String,
    pub key: String,
    pub value: String,
}

impl KeyValueEntry {
    /// Creates a row with a freshly generated id.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates the empty placeholder row shown when a list would otherwise be empty.
    pub fn placeholder() -> Self {
        Self::new("", "")
    }

    /// Returns `true` if both key and value are empty.
    pub fn is_blank(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }
}

/// Key/value pair as transmitted to the relay and the code generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Returns the rows whose key is non-empty, in order.
pub fn non_empty_entries(entries: &[KeyValueEntry]) -> Vec<KeyValueEntry> {
    entries
        .iter()
        .filter(|entry| !entry.key.is_empty())
        .cloned()
        .collect()
}

/// Converts rows with a non-empty key into wire pairs, in order.
pub fn to_pairs(entries: &[KeyValueEntry]) -> Vec<KeyValue> {
    entries
        .iter()
        .filter(|entry| !entry.key.is_empty())
        .map(|entry| KeyValue::new(entry.key.clone(), entry.value.clone()))
        .collect()
}

/// Ensures a list is never empty by inserting a placeholder row.
pub(crate) fn ensure_placeholder(entries: &mut Vec<KeyValueEntry>) {
    if entries.is_empty() {
        entries.push(KeyValueEntry::placeholder());
    }
}
