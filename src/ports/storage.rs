use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to read entry '{key}': {reason}")]
    ReadError { key: String, reason: String },
    #[error("Failed to write entry '{key}': {reason}")]
    WriteError { key: String, reason: String },
    #[error("Storage quota exceeded")]
    QuotaExceeded,
}

/// Key/value string storage for persisted preferences
///
/// Mirrors a browser's local storage: independent entries under fixed keys,
/// each holding one serialized value. `read` returns `Ok(None)` for an absent key.
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceStorage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites any previous value under `key`
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
