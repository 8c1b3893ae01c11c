//! Formkeeper - debounced autosave for browser form state
//!
//! Core modules:
//! - `config`: debounce interval and storage key
//! - `debounce`: trailing-edge debounce window
//! - `storage`: LocalStorage / in-memory snapshot stores
//! - `controller`: generic autosave controller (persist/restore)
//! - `events`: DOM event wiring (wasm32 only)

pub mod config;
pub mod controller;
pub mod debounce;
#[cfg(target_arch = "wasm32")]
pub mod events;
pub mod storage;

pub use config::AutosaveConfig;
pub use controller::{Autosave, AutosaveError};
pub use debounce::DebounceWindow;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
pub use storage::{MemoryStore, SnapshotStore, StorageError};

/// Autosave tuning constants
pub mod consts {
    /// Default quiet period before a persist fires (ms)
    pub const DEFAULT_INTERVAL_MS: u32 = 5000;

    /// Default storage key for the serialized snapshot
    pub const DEFAULT_STORAGE_KEY: &str = "formkeeper_draft";

    /// Activity events that reset the debounce window: any input-field
    /// value edit and any form-control change/commit
    pub const ACTIVITY_EVENTS: [&str; 2] = ["input", "change"];
}
