//! The `PreferenceStore` trait and its in-memory implementation.

use async_trait::async_trait;
use std::fmt;
use tokio::sync::RwLock;

use toolgate_core::PreferenceMap;

use crate::error::StorageResult;

/// Durable home of the persisted [`PreferenceMap`].
///
/// The document is read and replaced as a whole: `write` must be atomic (a
/// reader never observes a partially applied map), and a failed `write`
/// must leave the previously stored document intact.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Read a consistent snapshot of the stored document.
    ///
    /// A store with no document yet returns an empty map.
    async fn read(&self) -> StorageResult<PreferenceMap>;

    /// Atomically replace the stored document.
    async fn write(&self, map: &PreferenceMap) -> StorageResult<()>;
}

/// In-process [`PreferenceStore`] for tests and ephemeral embeddings.
///
/// # Example
///
/// ```
/// use toolgate_storage::MemoryPreferenceStore;
///
/// let store = MemoryPreferenceStore::new();
/// ```
pub struct MemoryPreferenceStore {
    map: RwLock<PreferenceMap>,
}

impl MemoryPreferenceStore {
    /// Create a store with an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: RwLock::new(PreferenceMap::new()),
        }
    }

    /// Create a store seeded with an existing document.
    #[must_use]
    pub fn with_map(map: PreferenceMap) -> Self {
        Self {
            map: RwLock::new(map),
        }
    }
}

impl Default for MemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn read(&self) -> StorageResult<PreferenceMap> {
        Ok(self.map.read().await.clone())
    }

    async fn write(&self, map: &PreferenceMap) -> StorageResult<()> {
        *self.map.write().await = map.clone();
        Ok(())
    }
}

impl fmt::Debug for MemoryPreferenceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryPreferenceStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolgate_core::{ToolConfirmationMode, ToolId};

    #[tokio::test]
    async fn test_empty_store_reads_empty_map() {
        let store = MemoryPreferenceStore::new();
        let map = store.read().await.unwrap();
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let store = MemoryPreferenceStore::new();

        let mut map = PreferenceMap::new();
        map.insert(ToolId::new("toolA"), ToolConfirmationMode::Disabled);
        store.write(&map).await.unwrap();

        let read_back = store.read().await.unwrap();
        assert_eq!(read_back, map);
    }

    #[tokio::test]
    async fn test_write_replaces_whole_document() {
        let store = MemoryPreferenceStore::with_map(
            [(ToolId::new("old"), ToolConfirmationMode::Confirm)]
                .into_iter()
                .collect(),
        );

        let replacement: PreferenceMap =
            [(ToolId::new("new"), ToolConfirmationMode::AlwaysAllow)]
                .into_iter()
                .collect();
        store.write(&replacement).await.unwrap();

        let read_back = store.read().await.unwrap();
        assert!(!read_back.contains(&ToolId::new("old")));
        assert!(read_back.contains(&ToolId::new("new")));
    }
}
