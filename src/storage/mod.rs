//! Key-value persistence for records and schedules
//!
//! Everything the engine persists lives under a handful of well-known keys
//! as pretty-printed JSON documents. Two backends are provided:
//!
//! - [`FileStore`] - one `<key>.json` file per key in a data directory,
//!   written atomically via a temp file and rename
//! - [`MemoryStore`] - process-local map, used in tests and when embedding
//!
//! [`RecordStore`] sits on top of either backend and handles the imported
//! employee and shift batches.

pub mod file;
pub mod memory;
pub mod records;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use records::{parse_record_batch, Imported, RecordStore};

/// Key of the last computed schedule
pub const SCHEDULE_KEY: &str = "schedule";

/// Key of the validated employee batch
pub const EMPLOYEES_KEY: &str = "employees";

/// Key of the validated shift batch
pub const SHIFTS_KEY: &str = "shifts";

/// Errors raised by a key-value backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid document under key '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

impl StorageError {
    pub(crate) fn io(key: &str, source: std::io::Error) -> Self {
        Self::Io {
            key: key.to_string(),
            source,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Raw string storage under string keys
pub trait KeyValueStore: Send + Sync {
    /// Read the document under `key`, `None` when absent
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the document under `key`
    fn put_raw(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove the document under `key`; absent keys are not an error
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Read and decode a JSON document
pub fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StorageResult<Option<T>> {
    match store.get_raw(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Serialization {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Encode and write a JSON document
pub fn put_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let raw = serde_json::to_string_pretty(value).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })?;
    store.put_raw(key, &raw)
}

pub(crate) fn check_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
