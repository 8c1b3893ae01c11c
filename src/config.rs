//! Autosave configuration
//!
//! Fixed for the lifetime of a controller: how long the quiet period is and
//! which storage slot the serialized snapshot lands in.

use crate::consts::{DEFAULT_INTERVAL_MS, DEFAULT_STORAGE_KEY};

/// Debounce interval and storage key for one autosave controller
#[derive(Debug, Clone)]
pub struct AutosaveConfig {
    /// Quiet period (ms) that must elapse after the last qualifying signal
    /// before a persist fires
    pub interval_ms: u32,
    /// Storage key the serialized snapshot is written under
    pub storage_key: String,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl AutosaveConfig {
    pub fn new(interval_ms: u32, storage_key: impl Into<String>) -> Self {
        Self {
            interval_ms,
            storage_key: storage_key.into(),
        }
    }
}
