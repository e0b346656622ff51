#![forbid(unsafe_code)]

//! Flat key-value persistence for Codeshelf.
//!
//! # Role in Codeshelf
//! The app persists only small string flags: onboarding completion, last
//! tour step, app version, favorite ids. [`KeyValueStore`] is the seam the
//! rest of the workspace programs against; backends are swappable and the
//! adapters above this crate (onboarding store, favorites) are responsible
//! for their own fail-open policies.
//!
//! # Primary responsibilities
//! - **KeyValueStore**: get/set/remove of string values, each independently
//!   fallible.
//! - **MemoryStore**: in-process map, the default for tests and previews.
//! - **FileStore**: a single JSON document on disk, written via a temp file
//!   and rename so a crash never leaves a torn store behind.
//!
//! No transactional guarantee spans multiple keys; callers that need
//! consistency across keys must tolerate partial writes.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failure modes of a key-value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("storage unavailable: {message}")]
    Unavailable { message: String },
}

impl StoreError {
    /// Construct an availability failure with a free-form message.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Asynchronous-in-spirit string storage: each operation is independently
/// fallible and callers decide how failures degrade.
///
/// Implementations must be safe to share behind an `Arc` — the navigation
/// shell and the tour engine both hold handles to the same store.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` means the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, overwriting any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}
