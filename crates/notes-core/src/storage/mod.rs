//! Local key-value storage and the versioned persistence adapter.

mod adapter;
mod file;
mod memory;

pub use adapter::{storage_key, PersistenceAdapter, DEFAULT_STORAGE_PREFIX, STORAGE_VERSION};
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::Result;

/// String key-value store backing persistence.
///
/// Implementations report failures as errors; the persistence adapter is
/// responsible for degrading them.
pub trait KeyValueStore {
    /// Read a value, `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace a value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key succeeds.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
