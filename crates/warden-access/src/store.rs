//! Access store: create/read/update/delete and verification of access records

use std::sync::Arc;

use tracing::{debug, instrument, warn};
use warden_kv::{KvConfig, KvStore, Namespaced, StorageError};

use crate::error::{AccessError, AccessResult};
use crate::lock::{LockHandle, LockManager, LockMode};
use crate::record::AccessRecord;
use crate::scope::first_missing;

/// Namespace the store's keys live under in the backing store
pub const NAMESPACE: &str = "warden-access";

/// Maps identity keys to access records in an injected key-value store
///
/// Records are JSON-encoded. Only `update` takes a lock; `get`, `create`,
/// `destroy` and `verify` may observe or overwrite state around an in-flight
/// update.
pub struct AccessStore {
    db: Namespaced<Arc<dyn KvStore>>,
    locks: LockManager,
}

impl AccessStore {
    pub fn new(backend: Arc<dyn KvStore>) -> AccessResult<Self> {
        Ok(Self {
            db: Namespaced::new(backend, NAMESPACE)?,
            locks: LockManager::new(),
        })
    }

    /// Open the backend described by `config` and build a store on it
    pub fn open(config: &KvConfig) -> AccessResult<Self> {
        Self::new(config.open()?)
    }

    /// The namespaced view of the backing store
    pub fn db(&self) -> &Namespaced<Arc<dyn KvStore>> {
        &self.db
    }

    /// Lock a key with this store's lock manager
    ///
    /// A write lock held here blocks `update` on the same key until released.
    pub async fn lock(&self, key: &str, mode: LockMode) -> LockHandle {
        self.locks.acquire(key, mode).await
    }

    pub fn locks(&self) -> &LockManager {
        &self.locks
    }

    /// Fetch the record for `key`
    #[instrument(skip(self), level = "debug")]
    pub async fn get(&self, key: &str) -> AccessResult<AccessRecord> {
        let bytes = self.db.get(key).await.map_err(|e| {
            if e.is_not_found() {
                AccessError::NotFound(key.to_string())
            } else {
                AccessError::Storage(e)
            }
        })?;

        decode(key, &bytes)
    }

    /// Write a record for `key`, overwriting any existing one
    #[instrument(skip(self, scopes), level = "debug")]
    pub async fn create(
        &self,
        key: &str,
        scopes: impl IntoIterator<Item = impl Into<String>>,
    ) -> AccessResult<AccessRecord> {
        let record = AccessRecord::new(key, scopes);
        self.put(&record).await?;

        debug!(scopes = record.scopes().len(), "access record created");
        Ok(record)
    }

    /// Replace the scopes of an existing record
    ///
    /// Serialized per key: concurrent updates of one key run their
    /// read-modify-write sequences one after another.
    #[instrument(skip(self, scopes), level = "debug")]
    pub async fn update(
        &self,
        key: &str,
        scopes: impl IntoIterator<Item = impl Into<String>>,
    ) -> AccessResult<AccessRecord> {
        let scopes: Vec<String> = scopes.into_iter().map(Into::into).collect();

        let lock = self.locks.acquire(key, LockMode::Write).await;
        let result = self.replace_scopes(key, scopes).await;
        lock.release();

        result
    }

    async fn replace_scopes(&self, key: &str, scopes: Vec<String>) -> AccessResult<AccessRecord> {
        let mut record = self.get(key).await?;
        record.replace_scopes(scopes);

        if let Err(e) = self.put(&record).await {
            warn!(key, error = %e, "access record update failed");
            return Err(e);
        }

        debug!(scopes = record.scopes().len(), "access record updated");
        Ok(record)
    }

    /// Delete the record for `key`; succeeds if there was none
    #[instrument(skip(self), level = "debug")]
    pub async fn destroy(&self, key: &str) -> AccessResult<()> {
        self.db.delete(key).await?;
        debug!("access record destroyed");
        Ok(())
    }

    /// Fetch the record for `key` and require it to hold every scope in
    /// `required`
    ///
    /// Fails with `AccessDenied` naming the first missing scope, in the order
    /// given.
    #[instrument(skip(self, required), fields(required_scopes = required.len()), level = "debug")]
    pub async fn verify<S: AsRef<str>>(
        &self,
        key: &str,
        required: &[S],
    ) -> AccessResult<AccessRecord> {
        let record = self.get(key).await?;

        if let Some(scope) = first_missing(Some(&record), required) {
            debug!(scope, "access denied");
            return Err(AccessError::AccessDenied {
                key: key.to_string(),
                scope: scope.to_string(),
            });
        }

        Ok(record)
    }

    async fn put(&self, record: &AccessRecord) -> AccessResult<()> {
        let bytes = serde_json::to_vec(record).map_err(|e| StorageError::Corrupt {
            key: record.key().to_string(),
            reason: e.to_string(),
        })?;

        self.db.put(record.key(), &bytes).await?;
        Ok(())
    }
}

fn decode(key: &str, bytes: &[u8]) -> AccessResult<AccessRecord> {
    let corrupt = |reason: String| {
        warn!(key, %reason, "corrupt access record");
        AccessError::Storage(StorageError::Corrupt {
            key: key.to_string(),
            reason,
        })
    };

    let record: AccessRecord = serde_json::from_slice(bytes).map_err(|e| corrupt(e.to_string()))?;

    if record.key() != key {
        return Err(corrupt(format!("stored under {key} but names {}", record.key())));
    }

    Ok(record)
}
