//! Storage trait definitions

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StorageResult;

/// Sorted key-value storage
///
/// Keys are strings compared bytewise; values are opaque bytes. Each `put`
/// and `delete` is atomic on its own, there are no multi-key transactions.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Retrieve the value stored under `key`
    ///
    /// Returns `StorageError::NotFound` if the key doesn't exist.
    async fn get(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Store `value` under `key`, replacing any previous value
    async fn put(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Delete a key
    ///
    /// Returns `Ok(())` even if the key didn't exist (idempotent).
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// List all keys in ascending order (primarily for testing/debugging)
    async fn list(&self) -> StorageResult<Vec<String>>;
}

#[async_trait]
impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    async fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        (**self).put(key, value).await
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        (**self).delete(key).await
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        (**self).exists(key).await
    }

    async fn list(&self) -> StorageResult<Vec<String>> {
        (**self).list().await
    }
}
