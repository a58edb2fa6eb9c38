//! Sublevel namespacing: many consumers, one physical store

use async_trait::async_trait;

use crate::error::{StorageError, StorageResult};
use crate::traits::KvStore;

/// A view of a store restricted to keys under one prefix
///
/// Keys are encoded as `!{name}!{key}`, so a namespace's keys sort together
/// and never collide with another namespace's. Names must be non-empty and
/// free of `!`. Namespaces nest: `!outer!!inner!key`. Keys inside a namespace
/// that start with `!` share space with its sublevels, and raw writes to the
/// underlying store bypass namespacing entirely.
#[derive(Clone, Debug)]
pub struct Namespaced<S> {
    inner: S,
    prefix: String,
}

impl<S: KvStore> Namespaced<S> {
    /// Returns `StorageError::Config` if `name` is empty or contains `!`
    pub fn new(inner: S, name: &str) -> StorageResult<Self> {
        check_name(name)?;
        Ok(Self {
            inner,
            prefix: format!("!{name}!"),
        })
    }

    /// A nested namespace inside this one
    pub fn sublevel(&self, name: &str) -> StorageResult<Namespaced<S>>
    where
        S: Clone,
    {
        check_name(name)?;
        Ok(Namespaced {
            inner: self.inner.clone(),
            prefix: format!("{}!{name}!", self.prefix),
        })
    }

    /// The raw key prefix, e.g. `!accounts!`
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn raw_key(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }
}

fn check_name(name: &str) -> StorageResult<()> {
    if name.is_empty() || name.contains('!') {
        return Err(StorageError::Config(format!(
            "invalid namespace name {name:?}: must be non-empty and contain no '!'"
        )));
    }
    Ok(())
}

#[async_trait]
impl<S: KvStore> KvStore for Namespaced<S> {
    async fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
        // NotFound carries the caller's key, not the prefixed one
        self.inner
            .get(&self.raw_key(key))
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    StorageError::NotFound(key.to_string())
                } else {
                    e
                }
            })
    }

    async fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        self.inner.put(&self.raw_key(key), value).await
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.inner.delete(&self.raw_key(key)).await
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner.exists(&self.raw_key(key)).await
    }

    async fn list(&self) -> StorageResult<Vec<String>> {
        let keys = self.inner.list().await?;
        Ok(keys
            .into_iter()
            .filter_map(|k| k.strip_prefix(self.prefix.as_str()).map(str::to_string))
            .collect())
    }
}
