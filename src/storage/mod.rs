//! Durable key-value storage port.
//!
//! Variables, request history and a few UI flags are persisted through the
//! [`Storage`] trait. Every operation returns a `Result` so callers decide
//! explicitly where a failure is ignored; reads of corrupt or missing data
//! degrade to an empty default through [`load_json`].

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Storage key for the variable collection.
pub const VARIABLES_KEY: &str = "rest-workbench.variables";

/// Storage key for the request history log.
pub const HISTORY_KEY: &str = "rest-workbench.history";

/// Storage key for the code panel open/closed flag.
pub const CODE_PANEL_OPEN_KEY: &str = "rest-workbench.code-panel-open";

/// Errors raised by storage backends.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying I/O failure.
    Io(std::io::Error),

    /// A value could not be serialized or deserialized.
    Serialization(serde_json::Error),

    /// The backend cannot be used (poisoned lock, missing directory, ...).
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "Storage I/O error: {}", err),
            StorageError::Serialization(err) => write!(f, "Storage serialization error: {}", err),
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            StorageError::Serialization(err) => Some(err),
            StorageError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err)
    }
}

/// A session-scoped string key-value store.
pub trait Storage: Send + Sync {
    /// Reads the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Shared handle to a storage backend.
pub type SharedStorage = Arc<dyn Storage>;

/// Loads and deserializes a JSON value, falling back to `T::default()`.
///
/// Missing keys, read failures and corrupt JSON all yield the default; the
/// latter two are logged.
pub fn load_json<T>(storage: &dyn Storage, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            log::warn!("Failed to read '{}' from storage: {}", key, e);
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Ignoring corrupt '{}' in storage: {}", key, e);
            T::default()
        }
    }
}

/// Serializes a value as JSON and stores it under `key`.
pub fn save_json<T>(storage: &dyn Storage, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    storage.set(key, &json)
}

/// Reads the code panel flag. Defaults to closed.
pub fn load_code_panel_open(storage: &dyn Storage) -> bool {
    load_json::<Option<bool>>(storage, CODE_PANEL_OPEN_KEY).unwrap_or(false)
}

/// Persists the code panel flag.
pub fn save_code_panel_open(storage: &dyn Storage, open: bool) -> Result<(), StorageError> {
    save_json(storage, CODE_PANEL_OPEN_KEY, &open)
}
