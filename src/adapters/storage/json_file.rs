//! JSON File Storage
//!
//! Persists each preference entry as `<data_dir>/<key>.json`, so liked and
//! bookmarked sets survive process restarts.

use std::fs;
use std::path::{Path, PathBuf};

use crate::ports::storage::{PreferenceStorage, StorageError};

/// File-backed key/value storage rooted at a data directory
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    data_dir: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage rooted at `data_dir` (created lazily on first write)
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File path for a storage key
    pub fn entry_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StorageError::Unavailable(format!("invalid storage key '{}'", key)));
        }
        Ok(self.data_dir.join(format!("{}.json", key)))
    }
}

impl PreferenceStorage for JsonFileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.entry_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|e| StorageError::ReadError {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        }

        fs::write(&path, value).map_err(|e| StorageError::WriteError {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!("Preference entry written: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_nonexistent() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());
        assert_eq!(storage.read("likedQuotes").unwrap(), None);
    }

    #[test]
    fn test_write_and_read() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());

        storage.write("likedQuotes", r#"["Know thyself."]"#).unwrap();
        assert!(dir.path().join("likedQuotes.json").exists());
        assert_eq!(
            storage.read("likedQuotes").unwrap(),
            Some(r#"["Know thyself."]"#.to_string())
        );
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());

        storage.write("bookmarkedQuotes", r#"["a","b"]"#).unwrap();
        storage.write("bookmarkedQuotes", r#"["c"]"#).unwrap();
        assert_eq!(storage.read("bookmarkedQuotes").unwrap(), Some(r#"["c"]"#.to_string()));
    }

    #[test]
    fn test_creates_missing_data_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("state").join("quoteverse");
        let storage = JsonFileStorage::new(&nested);

        storage.write("likedQuotes", "[]").unwrap();
        assert!(nested.join("likedQuotes.json").exists());
    }

    #[test]
    fn test_blank_file_reads_as_absent() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("likedQuotes.json"), "  \n").unwrap();
        let storage = JsonFileStorage::new(dir.path());
        assert_eq!(storage.read("likedQuotes").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let storage = JsonFileStorage::new("/tmp");
        assert!(storage.entry_path("../escape").is_err());
        assert!(storage.entry_path("a/b").is_err());
        assert!(storage.entry_path("").is_err());
        assert!(storage.entry_path("likedQuotes").is_ok());
    }

    #[test]
    fn test_unwritable_location_is_an_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "file").unwrap();

        let storage = JsonFileStorage::new(&blocker);
        assert!(storage.write("likedQuotes", "[]").is_err());
    }
}
