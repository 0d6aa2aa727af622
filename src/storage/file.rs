//! File-backed key-value store

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{check_key, KeyValueStore, StorageError, StorageResult};

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| StorageError::io("<root>", e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        check_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => {
                tracing::debug!(key, path = %path.display(), "Document loaded");
                Ok(Some(raw))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn put_raw(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;

        // Write to temp file first, then rename over the target
        let temp_path = self.dir.join(format!("{key}.json.tmp"));
        let mut file = File::create(&temp_path).map_err(|e| StorageError::io(key, e))?;
        file.write_all(value.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| StorageError::io(key, e))?;

        fs::rename(&temp_path, &path).map_err(|e| StorageError::io(key, e))?;

        tracing::debug!(key, path = %path.display(), bytes = value.len(), "Document saved");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(key, "Document removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_put_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        assert_eq!(store.get_raw("shifts").unwrap(), None);

        store.put_raw("shifts", "[]").unwrap();
        assert_eq!(store.get_raw("shifts").unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("shifts.json").exists());
        assert!(!temp_dir.path().join("shifts.json.tmp").exists());

        store.remove("shifts").unwrap();
        assert_eq!(store.get_raw("shifts").unwrap(), None);
        store.remove("shifts").unwrap();
    }

    #[test]
    fn test_put_replaces_previous_value() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        store.put_raw("schedule", "{\"v\":1}").unwrap();
        store.put_raw("schedule", "{\"v\":2}").unwrap();
        assert_eq!(store.get_raw("schedule").unwrap().as_deref(), Some("{\"v\":2}"));
    }

    #[test]
    fn test_open_creates_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        assert!(matches!(
            store.put_raw("../outside", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
