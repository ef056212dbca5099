//! Storage abstraction for persistence.

mod memory;
mod store;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;
pub use store::PageStore;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use crate::snapshot::PageSnapshot;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Snapshot not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for page snapshot storage backends.
///
/// Browser local storage is synchronous, so unlike a database-backed store
/// these calls complete immediately.
pub trait Storage {
    /// Save a snapshot under `key`, replacing any previous one.
    fn save(&self, key: &str, snapshot: &PageSnapshot) -> StorageResult<()>;

    /// Load the snapshot saved under `key`.
    fn load(&self, key: &str) -> StorageResult<PageSnapshot>;

    /// Delete the snapshot under `key`. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if a snapshot exists under `key`.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}
