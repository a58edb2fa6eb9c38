//! warden-access: Scope-based access records
//!
//! Associates an identity key with a list of permission scopes, persists the
//! association in an ordered key-value store, and answers "does this key hold
//! all of these scopes?".
//!
//! Updates are read-modify-write under a per-key write lock, so concurrent
//! updates to one key never lose each other's writes. Reads and verification
//! take no lock.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use warden_access::{AccessError, AccessStore};
//! use warden_kv::MemoryKvStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let access = AccessStore::new(Arc::new(MemoryKvStore::new()))?;
//!
//!     access.create("pizza", ["site:read"]).await?;
//!     access.update("pizza", ["site:read", "site:edit"]).await?;
//!
//!     access.verify("pizza", &["site:edit"]).await?;
//!     assert!(matches!(
//!         access.verify("pizza", &["site:admin"]).await,
//!         Err(AccessError::AccessDenied { .. })
//!     ));
//!
//!     Ok(())
//! }
//! ```

mod error;
mod lock;
mod record;
mod scope;
mod store;

// Re-exports
pub use error::{AccessError, AccessResult};
pub use lock::{LockHandle, LockManager, LockMode};
pub use record::AccessRecord;
pub use scope::{verify_scope, verify_scopes};
pub use store::{AccessStore, NAMESPACE};

pub use warden_kv::{KvConfig, KvStore, StorageError};
