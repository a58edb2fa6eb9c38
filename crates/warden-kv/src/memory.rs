//! In-memory storage backend

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::traits::KvStore;

/// Ordered in-memory storage
///
/// Thread-safe via `RwLock`. Not persistent: data is lost on drop.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all stored keys
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.entries
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        self.entries.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.entries.read().contains_key(key))
    }

    async fn list(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip() {
        let store = MemoryKvStore::new();

        store.put("alpha", b"one").await.unwrap();
        assert_eq!(store.get("alpha").await.unwrap(), b"one");
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemoryKvStore::new();

        store.put("alpha", b"one").await.unwrap();
        store.put("alpha", b"two").await.unwrap();

        assert_eq!(store.get("alpha").await.unwrap(), b"two");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_not_found() {
        let store = MemoryKvStore::new();

        let result = store.get("missing").await;
        assert!(matches!(result, Err(StorageError::NotFound(k)) if k == "missing"));
    }

    #[tokio::test]
    async fn test_delete_idempotent() {
        let store = MemoryKvStore::new();

        // Deleting a missing key succeeds
        store.delete("gone").await.unwrap();

        store.put("gone", b"x").await.unwrap();
        store.delete("gone").await.unwrap();
        assert!(!store.exists("gone").await.unwrap());

        store.delete("gone").await.unwrap();
    }

    #[tokio::test]
    async fn test_list_sorted() {
        let store = MemoryKvStore::new();

        for key in ["pear", "apple", "fig"] {
            store.put(key, b"").await.unwrap();
        }

        assert_eq!(store.list().await.unwrap(), vec!["apple", "fig", "pear"]);

        store.clear();
        assert!(store.is_empty());
    }
}
