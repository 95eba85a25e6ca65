//! File-backed key-value store
//!
//! Each key is stored as `<dir>/<key>.json` and written atomically.

use std::path::PathBuf;

use super::file_io::{read_optional, write_atomic};
use super::KeyValueStore;
use crate::error::{LedgerError, LedgerResult};

/// Stores every key as a JSON file in one directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        read_optional(self.path_for(key))
    }

    fn put(&self, key: &str, value: &str) -> LedgerResult<()> {
        if key.is_empty() || key.contains(['/', '\\']) {
            return Err(LedgerError::Persistence(format!("Invalid storage key '{}'", key)));
        }
        write_atomic(self.path_for(key), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_keys_map_to_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.put("budgets_data", r#"{"Food":1.0}"#).unwrap();
        assert!(temp_dir.path().join("budgets_data.json").exists());
        assert_eq!(
            store.get("budgets_data").unwrap().as_deref(),
            Some(r#"{"Food":1.0}"#)
        );
        assert_eq!(store.get("transactions_data").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        assert!(store.put("../escape", "{}").unwrap_err().is_persistence());
    }

    #[test]
    fn test_clones_share_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        let other = store.clone();

        store.put("k", "1").unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("1"));
    }
}
