//! The autosave controller
//!
//! Owns the debounce window, the storage backend and the configured key.
//! Generic over the host's snapshot type: anything serde can turn into JSON
//! text and back. Save and load failures are logged and swallowed; nothing
//! here ever propagates an error to the caller.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::AutosaveConfig;
use crate::debounce::DebounceWindow;
use crate::storage::{SnapshotStore, StorageError};

/// What can go wrong on a save or load attempt. Internal: callers only ever
/// see the logged message.
#[derive(Debug, Error)]
pub enum AutosaveError {
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Debounced persistence of a host-defined snapshot type `T` through a
/// [`SnapshotStore`] backend `S`
pub struct Autosave<T, S> {
    config: AutosaveConfig,
    store: S,
    window: DebounceWindow,
    /// setTimeout handle of the armed browser timer, if any
    #[cfg(target_arch = "wasm32")]
    pub(crate) timer: Option<i32>,
    _snapshot: PhantomData<T>,
}

impl<T, S> Autosave<T, S>
where
    T: Serialize + DeserializeOwned,
    S: SnapshotStore,
{
    pub fn new(config: AutosaveConfig, store: S) -> Self {
        let window = DebounceWindow::new(config.interval_ms);
        Self {
            config,
            store,
            window,
            #[cfg(target_arch = "wasm32")]
            timer: None,
            _snapshot: PhantomData,
        }
    }

    pub fn config(&self) -> &AutosaveConfig {
        &self.config
    }

    /// Serialize `snapshot` and write it under the configured key.
    /// Failures (serialization or storage) are logged and swallowed; no
    /// retry, no error surfaces to the caller.
    pub fn persist(&self, snapshot: &T) {
        match self.try_persist(snapshot) {
            Ok(()) => log::info!("Snapshot saved under '{}'", self.config.storage_key),
            Err(e) => log::error!("Autosave failed: {e}"),
        }
    }

    fn try_persist(&self, snapshot: &T) -> Result<(), AutosaveError> {
        let text = serde_json::to_string(snapshot)?;
        self.store.write(&self.config.storage_key, &text)?;
        Ok(())
    }

    /// Read back the stored snapshot. `None` means no data (absent slot) or
    /// a logged failure; both are benign.
    pub fn restore(&self) -> Option<T> {
        match self.try_restore() {
            Ok(Some(snapshot)) => {
                log::info!("Restored snapshot from '{}'", self.config.storage_key);
                Some(snapshot)
            }
            Ok(None) => {
                log::info!("No saved snapshot under '{}'", self.config.storage_key);
                None
            }
            Err(e) => {
                log::error!("Restore failed: {e}");
                None
            }
        }
    }

    fn try_restore(&self) -> Result<Option<T>, AutosaveError> {
        let Some(text) = self.store.read(&self.config.storage_key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Drop the saved slot (e.g. once the draft was submitted)
    pub fn clear(&self) {
        match self.store.remove(&self.config.storage_key) {
            Ok(()) => log::info!("Cleared snapshot under '{}'", self.config.storage_key),
            Err(e) => log::error!("Clear failed: {e}"),
        }
    }

    /// Debounce entry point: every qualifying activity signal replaces the
    /// pending window with a fresh one ending a full interval from `now_ms`.
    pub fn schedule_autosave(&mut self, now_ms: f64) {
        self.window.signal(now_ms);
    }

    /// Discard the pending window without persisting
    pub fn cancel_pending(&mut self) {
        self.window.cancel();
    }

    /// When the pending persist will fire, if one is scheduled
    pub fn pending_save_at(&self) -> Option<f64> {
        self.window.fires_at()
    }

    /// Polling driver for native builds and tests: persist `snapshot` once
    /// the quiet period has elapsed. Returns whether a save fired.
    pub fn save_if_due(&mut self, now_ms: f64, snapshot: &T) -> bool {
        if self.window.expire(now_ms) {
            self.persist(snapshot);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Draft {
        query: String,
        edited_at: f64,
    }

    fn draft(query: &str) -> Draft {
        Draft {
            query: query.to_string(),
            edited_at: 1_700_000_000_000.0,
        }
    }

    fn controller() -> Autosave<Draft, MemoryStore> {
        Autosave::new(AutosaveConfig::new(5000, "test_draft"), MemoryStore::new())
    }

    /// Store that rejects everything, simulating disabled/full storage
    struct FailingStore;

    impl SnapshotStore for FailingStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_persist_restore_roundtrip() {
        let autosave = controller();
        let snapshot = draft("two bedroom loft");
        autosave.persist(&snapshot);
        assert_eq!(autosave.restore(), Some(snapshot));
    }

    #[test]
    fn test_restore_empty_store_is_no_data() {
        let autosave = controller();
        assert_eq!(autosave.restore(), None);
    }

    #[test]
    fn test_restore_corrupt_text_is_no_data() {
        let store = MemoryStore::new();
        store.write("test_draft", "not json{").unwrap();
        let autosave: Autosave<Draft, _> =
            Autosave::new(AutosaveConfig::new(5000, "test_draft"), store);
        assert_eq!(autosave.restore(), None);
    }

    #[test]
    fn test_storage_failure_never_propagates() {
        let autosave: Autosave<Draft, _> =
            Autosave::new(AutosaveConfig::new(5000, "test_draft"), FailingStore);
        // Both directions no-op quietly
        autosave.persist(&draft("ignored"));
        assert_eq!(autosave.restore(), None);
        autosave.clear();
    }

    #[test]
    fn test_last_write_wins() {
        let autosave = controller();
        autosave.persist(&draft("first"));
        autosave.persist(&draft("second"));
        assert_eq!(autosave.restore(), Some(draft("second")));
    }

    #[test]
    fn test_debounced_save_fires_once_after_quiet_period() {
        let mut autosave = controller();
        let snapshot = draft("still typing");

        // Signals at 0, 2000, 4999: nothing may fire before 9999
        autosave.schedule_autosave(0.0);
        autosave.schedule_autosave(2000.0);
        autosave.schedule_autosave(4999.0);
        assert_eq!(autosave.pending_save_at(), Some(9999.0));

        assert!(!autosave.save_if_due(5000.0, &snapshot));
        assert!(!autosave.save_if_due(7000.0, &snapshot));
        assert_eq!(autosave.restore(), None);

        assert!(autosave.save_if_due(9999.0, &snapshot));
        assert_eq!(autosave.restore(), Some(snapshot.clone()));

        // Window is consumed: no second save without a new signal
        assert!(!autosave.save_if_due(20000.0, &snapshot));
    }

    #[test]
    fn test_cancel_pending_suppresses_save() {
        let mut autosave = controller();
        autosave.schedule_autosave(0.0);
        autosave.cancel_pending();
        assert!(!autosave.save_if_due(10000.0, &draft("never saved")));
        assert_eq!(autosave.restore(), None);
    }
}
