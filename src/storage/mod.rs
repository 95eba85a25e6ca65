//! Durable key-value storage
//!
//! The engine persists two independent keys, one per store. Values are JSON
//! documents. [`FileStore`] keeps each key in its own file under the data
//! directory; [`MemoryStore`] keeps them in memory and can be told to fail
//! writes, which is how persistence failures are exercised in tests.

pub mod file_io;
pub mod file_store;
pub mod memory;

pub use file_store::FileStore;
pub use memory::MemoryStore;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Key holding the transaction list
pub const TRANSACTIONS_KEY: &str = "transactions_data";

/// Key holding the budget ceilings
pub const BUDGETS_KEY: &str = "budgets_data";

/// A durable string store addressed by key
///
/// Implementations must make `put` durable before returning `Ok`.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if it was never written
    fn get(&self, key: &str) -> LedgerResult<Option<String>>;

    /// Replace the value under `key`
    fn put(&self, key: &str, value: &str) -> LedgerResult<()>;
}

/// Read and deserialize a JSON value, returning the default if the key is absent
pub fn read_json<T>(store: &dyn KeyValueStore, key: &str) -> LedgerResult<T>
where
    T: DeserializeOwned + Default,
{
    match store.get(key)? {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
            .map_err(|e| LedgerError::Json(format!("Failed to parse '{}': {}", key, e))),
        _ => Ok(T::default()),
    }
}

/// Serialize and write a JSON value
pub fn write_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, data: &T) -> LedgerResult<()> {
    let raw = serde_json::to_string_pretty(data)
        .map_err(|e| LedgerError::Persistence(format!("Failed to serialize '{}': {}", key, e)))?;
    store.put(key, &raw)
}
