//! Browser local storage implementation for WebAssembly.

use super::{Storage, StorageError, StorageResult};
use crate::snapshot::PageSnapshot;

/// Snapshot storage in `window.localStorage`, one string entry per key.
#[derive(Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> StorageResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Other(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))
    }
}

impl Storage for LocalStorage {
    fn save(&self, key: &str, snapshot: &PageSnapshot) -> StorageResult<()> {
        let json = snapshot
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        // Quota exhaustion surfaces here as a thrown DOMException.
        self.storage()?
            .set_item(key, &json)
            .map_err(|e| StorageError::Io(format!("Failed to store {}: {:?}", key, e)))
    }

    fn load(&self, key: &str) -> StorageResult<PageSnapshot> {
        let json = self
            .storage()?
            .get_item(key)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {:?}", key, e)))?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        PageSnapshot::from_json(&json).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Io(format!("Failed to remove {}: {:?}", key, e)))
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        self.storage()?
            .get_item(key)
            .map(|value| value.is_some())
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {:?}", key, e)))
    }
}
