//! Shared cache machinery for resource controllers.
//!
//! Every list fetch is stamped with a monotonically increasing sequence
//! number at issue time; a response may only be committed if no younger
//! response has been committed already. This closes the "last response wins"
//! race when listings are refreshed in quick succession. The sequence check
//! and the cache write happen under the same write lock, so the committed
//! sequence number and the cached items can never disagree.

use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Entities keyed by a server-issued identifier.
pub trait HasId {
    type Id: PartialEq;

    fn id(&self) -> &Self::Id;
}

/// In-memory mirror of one backend collection.
///
/// Shared between clones of a controller; mutated only on confirmed server
/// responses.
#[derive(Debug)]
pub(crate) struct SharedCache<T> {
    state: RwLock<CacheState<T>>,
    issued: AtomicU64,
}

#[derive(Debug)]
struct CacheState<T> {
    items: Vec<T>,
    /// Sequence number of the listing the cache currently holds.
    committed: u64,
}

impl<T> Default for SharedCache<T> {
    fn default() -> Self {
        Self {
            state: RwLock::new(CacheState {
                items: Vec::new(),
                committed: 0,
            }),
            issued: AtomicU64::new(0),
        }
    }
}

impl<T: Clone + HasId> SharedCache<T> {
    /// Snapshot of the cached collection.
    pub(crate) fn items(&self) -> Vec<T> {
        self.read().items.clone()
    }

    /// Stamp a new list fetch. Called before the request is issued.
    pub(crate) fn begin_fetch(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Replace the cache with a fetched listing, unless a younger fetch has
    /// already landed. Returns whether the listing was applied.
    pub(crate) fn commit_fetch(&self, seq: u64, items: Vec<T>) -> bool {
        let mut state = self.write();
        if seq <= state.committed {
            return false;
        }
        state.committed = seq;
        state.items = items;
        true
    }

    /// Prepend a server-confirmed creation, mirroring the admin panel which
    /// shows the newest entry first.
    pub(crate) fn apply_created(&self, item: T) {
        self.write().items.insert(0, item);
    }

    /// Replace the entry matching the server representation's id wholesale.
    /// Never merges field-by-field, to avoid stale-field drift.
    pub(crate) fn apply_updated(&self, item: T) {
        let mut state = self.write();
        if let Some(existing) = state.items.iter_mut().find(|e| e.id() == item.id()) {
            *existing = item;
        }
    }

    /// Drop the entry with the given id after a confirmed delete.
    pub(crate) fn apply_removed(&self, id: &T::Id) {
        self.write().items.retain(|e| e.id() != id);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, CacheState<T>> {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CacheState<T>> {
        self.state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
