//! warden-kv: Ordered key-value storage for access records
//!
//! Provides async, string-keyed storage backends with opaque byte values.
//! No authorization logic; that lives in `warden-access`.
//!
//! ## Backends
//!
//! | Backend         | Use Case                 | Feature Flag |
//! |-----------------|--------------------------|--------------|
//! | `MemoryKvStore` | Unit tests, ephemeral    | (always)     |
//! | `SqliteKvStore` | Persistent, single node  | `sqlite`     |
//!
//! Any backend can be wrapped in [`Namespaced`] so several consumers share
//! one physical store without key collisions.
//!
//! ## Example
//!
//! ```rust,ignore
//! use warden_kv::{KvStore, MemoryKvStore, Namespaced};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Namespaced::new(MemoryKvStore::new(), "sessions")?;
//!
//!     db.put("alice", b"{}").await?;
//!     assert_eq!(db.get("alice").await?, b"{}");
//!
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod memory;
mod namespace;
mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

// Re-exports
pub use config::{BackendKind, KvConfig};
pub use error::{StorageError, StorageResult};
pub use memory::MemoryKvStore;
pub use namespace::Namespaced;
pub use traits::KvStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteKvStore;
