//! Per-key advisory locks
//!
//! Lock state lives only in memory: a table entry is created the first time
//! a key is locked and removed once nobody holds or waits for it.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};
use tracing::trace;

/// How a key is locked
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LockMode {
    /// Shared with other readers, excluded by writers
    Read,
    /// Exclusive
    #[default]
    Write,
    /// Read and write; exclusive
    ReadWrite,
}

impl LockMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockMode::Read => "r",
            LockMode::Write => "w",
            LockMode::ReadWrite => "rw",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "r" => Some(LockMode::Read),
            "w" => Some(LockMode::Write),
            "rw" => Some(LockMode::ReadWrite),
            _ => None,
        }
    }

    pub fn is_exclusive(&self) -> bool {
        !matches!(self, LockMode::Read)
    }
}

struct Slot {
    lock: Arc<RwLock<()>>,
    /// Holders plus waiters
    refs: usize,
}

type LockTable = Arc<Mutex<HashMap<String, Slot>>>;

/// Grants read/write locks scoped to a key
///
/// Locks on different keys never contend. Each manager has its own table, so
/// independent stores never see each other's locks.
#[derive(Default)]
pub struct LockManager {
    table: LockTable,
}

impl LockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until `key` can be locked in `mode`, then lock it
    ///
    /// There is no timeout: a holder that never releases blocks waiters
    /// indefinitely.
    pub async fn acquire(&self, key: &str, mode: LockMode) -> LockHandle {
        let entry = TableRef::new(&self.table, key);
        let lock = entry.lock.clone();

        let guard = if mode.is_exclusive() {
            Guard::Exclusive(lock.write_owned().await)
        } else {
            Guard::Shared(lock.read_owned().await)
        };

        trace!(key, mode = mode.as_str(), "lock acquired");
        LockHandle {
            _guard: guard,
            entry,
            mode,
        }
    }

    /// Lock `key` only if no conflicting lock is held right now
    pub fn try_acquire(&self, key: &str, mode: LockMode) -> Option<LockHandle> {
        let entry = TableRef::new(&self.table, key);
        let lock = entry.lock.clone();

        let guard = if mode.is_exclusive() {
            Guard::Exclusive(lock.try_write_owned().ok()?)
        } else {
            Guard::Shared(lock.try_read_owned().ok()?)
        };

        trace!(key, mode = mode.as_str(), "lock acquired");
        Some(LockHandle {
            _guard: guard,
            entry,
            mode,
        })
    }

    /// Number of keys with a live lock-table entry
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registration of one holder or waiter in the lock table
struct TableRef {
    table: LockTable,
    key: String,
    lock: Arc<RwLock<()>>,
}

impl TableRef {
    fn new(table: &LockTable, key: &str) -> Self {
        let mut slots = table.lock();
        let slot = slots.entry(key.to_string()).or_insert_with(|| Slot {
            lock: Arc::new(RwLock::new(())),
            refs: 0,
        });
        slot.refs += 1;

        Self {
            table: table.clone(),
            key: key.to_string(),
            lock: slot.lock.clone(),
        }
    }
}

impl Drop for TableRef {
    fn drop(&mut self) {
        let mut slots = self.table.lock();
        if let Some(slot) = slots.get_mut(&self.key) {
            slot.refs -= 1;
            if slot.refs == 0 {
                slots.remove(&self.key);
            }
        }
    }
}

// Guards are held only for their Drop
#[allow(dead_code)]
enum Guard {
    Shared(OwnedRwLockReadGuard<()>),
    Exclusive(OwnedRwLockWriteGuard<()>),
}

/// A held lock on one key
///
/// Released by [`LockHandle::release`] or on drop, exactly once either way.
#[must_use = "the lock is released as soon as the handle is dropped"]
pub struct LockHandle {
    // Field order matters: the guard must unlock before the table entry is
    // unregistered. Held only for its Drop.
    _guard: Guard,
    entry: TableRef,
    mode: LockMode,
}

impl LockHandle {
    pub fn key(&self) -> &str {
        &self.entry.key
    }

    pub fn mode(&self) -> LockMode {
        self.mode
    }

    pub fn release(self) {
        trace!(key = self.key(), mode = self.mode.as_str(), "lock released");
    }
}

impl std::fmt::Debug for LockHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockHandle")
            .field("key", &self.entry.key)
            .field("mode", &self.mode)
            .finish()
    }
}
