//! Save, reset and restore of the builder page.

use super::{Storage, StorageError, StorageResult};
use crate::page::Page;
use crate::snapshot::PageSnapshot;
use std::sync::Arc;

/// Persists a page under a single well-known key.
pub struct PageStore<S: Storage> {
    storage: Arc<S>,
    key: String,
}

impl<S: Storage> PageStore<S> {
    /// Create a store writing to `key` in `storage`.
    pub fn new(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Snapshot the whole page into storage, replacing any earlier save.
    pub fn save_all(&self, page: &Page) -> StorageResult<()> {
        let snapshot = PageSnapshot::capture(page);
        self.storage.save(&self.key, &snapshot)?;
        log::info!(
            "Saved page under {:?} ({} units)",
            self.key,
            snapshot.records.len()
        );
        Ok(())
    }

    /// Discard the saved snapshot.
    pub fn reset_all(&self) -> StorageResult<()> {
        self.storage.delete(&self.key)?;
        log::info!("Discarded saved page {:?}", self.key);
        Ok(())
    }

    /// Rebuild the saved page. Returns `None` if nothing is saved.
    pub fn restore(&self) -> StorageResult<Option<Page>> {
        match self.storage.load(&self.key) {
            Ok(snapshot) => {
                log::info!("Restoring page from {:?}", self.key);
                Ok(Some(snapshot.into_page()))
            }
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Check if a saved snapshot exists.
    pub fn has_saved(&self) -> StorageResult<bool> {
        self.storage.exists(&self.key)
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}
