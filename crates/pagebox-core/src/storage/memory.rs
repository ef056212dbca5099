//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use crate::snapshot::PageSnapshot;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    snapshots: RwLock<HashMap<String, PageSnapshot>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> Vec<String> {
        self.snapshots
            .read()
            .map(|snapshots| snapshots.keys().cloned().collect())
            .unwrap_or_default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, snapshot: &PageSnapshot) -> StorageResult<()> {
        let mut snapshots = self.snapshots.write().map_err(lock_error)?;
        snapshots.insert(key.to_string(), snapshot.clone());
        Ok(())
    }

    fn load(&self, key: &str) -> StorageResult<PageSnapshot> {
        let snapshots = self.snapshots.read().map_err(lock_error)?;
        snapshots
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let mut snapshots = self.snapshots.write().map_err(lock_error)?;
        snapshots.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let snapshots = self.snapshots.read().map_err(lock_error)?;
        Ok(snapshots.contains_key(key))
    }
}
