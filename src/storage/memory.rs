//! In-memory key-value store
//!
//! Clones share the same map, so a test can keep a handle to the store it gave
//! a ledger and inspect or break it afterwards.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::KeyValueStore;
use crate::error::{LedgerError, LedgerResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put` fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw value under `key`, bypassing failure injection
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(key).cloned())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| LedgerError::Io(format!("Failed to acquire lock: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> LedgerResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::Persistence(format!(
                "write to '{}' rejected by store",
                key
            )));
        }
        let mut values = self
            .values
            .lock()
            .map_err(|e| LedgerError::Persistence(format!("Failed to acquire lock: {}", e)))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.put("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_failure_injection() {
        let store = MemoryStore::new();
        let handle = store.clone();

        handle.set_fail_writes(true);
        assert!(store.put("k", "v").unwrap_err().is_persistence());
        assert_eq!(store.raw("k"), None);

        handle.set_fail_writes(false);
        store.put("k", "v").unwrap();
        assert_eq!(handle.raw("k").as_deref(), Some("v"));
    }
}
