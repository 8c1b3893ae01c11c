//! Persistent key-value snapshot storage
//!
//! LocalStorage on the web, an in-memory map everywhere else (native builds
//! and tests). One key, one text slot; the controller is the sole reader and
//! writer, so "last write wins" is the whole consistency story.

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

/// A storage read or write went wrong
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store is not reachable at all (storage disabled, no window)
    #[error("persistent storage is unavailable")]
    Unavailable,
    /// The backend rejected the operation (quota exceeded, access denied)
    #[error("storage backend rejected the operation: {0}")]
    Backend(String),
}

/// Synchronous, origin-scoped string key-value storage
pub trait SnapshotStore {
    /// Read the text under `key`; `Ok(None)` means no data, not an error
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, overwriting any prior value
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Drop the slot under `key` (absent slot is fine)
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Browser LocalStorage backend (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl SnapshotStore for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?.get_item(key).map_err(js_err)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(key, value).map_err(js_err)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?.remove_item(key).map_err(js_err)
    }
}

#[cfg(target_arch = "wasm32")]
fn js_err(err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(format!("{err:?}"))
}

/// In-memory store for native builds and tests.
///
/// Interior mutability keeps the trait surface identical to LocalStorage
/// (shared-reference writes); single-threaded use only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        store.write("draft", "{\"query\":\"loft\"}").unwrap();
        assert_eq!(
            store.read("draft").unwrap(),
            Some("{\"query\":\"loft\"}".to_string())
        );
    }

    #[test]
    fn test_memory_store_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.read("nothing-here").unwrap(), None);
    }

    #[test]
    fn test_memory_store_overwrite_and_remove() {
        let store = MemoryStore::new();
        store.write("draft", "first").unwrap();
        store.write("draft", "second").unwrap();
        assert_eq!(store.read("draft").unwrap(), Some("second".to_string()));

        store.remove("draft").unwrap();
        assert_eq!(store.read("draft").unwrap(), None);
        // Removing an absent slot is fine
        store.remove("draft").unwrap();
    }
}
