//! Versioned snapshot persistence.
//!
//! A snapshot is the serialized representation of one store's collection.
//! Loading is tolerant: a missing key, unreadable bytes, or an unknown
//! version all read as "nothing persisted" so a corrupt snapshot can
//! never prevent the stores from starting empty. Saving is best-effort:
//! failures are logged and swallowed, and in-memory state stays the
//! source of truth for the session.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{KvStore, StorageError};

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Envelope written around every persisted collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot<T> {
    /// Schema version of `data`.
    pub version: u32,
    /// The store's collection.
    pub data: T,
}

/// Store-facing persistence adapter.
///
/// Owns the key scheme and the tolerant load / best-effort save
/// semantics; the stores above it never observe a storage failure.
pub struct SnapshotStore {
    kv: KvStore,
}

impl SnapshotStore {
    /// Wrap an already-open key-value store.
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// Open the default backing store.
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::new(KvStore::open_default()?))
    }

    /// Open a named backing store.
    pub fn open(name: &str) -> Result<Self, StorageError> {
        Ok(Self::new(KvStore::open(name)?))
    }

    /// Load a previously persisted collection.
    ///
    /// Returns `None` when nothing was stored, and also when the stored
    /// bytes fail to deserialize or carry an unknown schema version; both
    /// are logged and treated as a cold start, never propagated.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.kv.get::<Snapshot<T>>(key) {
            Ok(Some(snapshot)) if snapshot.version == SNAPSHOT_VERSION => Some(snapshot.data),
            Ok(Some(snapshot)) => {
                tracing::warn!(
                    key,
                    version = snapshot.version,
                    "discarding snapshot with unknown schema version"
                );
                None
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable snapshot");
                None
            }
        }
    }

    /// Persist a collection, best-effort.
    ///
    /// Failures (quota exceeded, storage disabled) are logged and
    /// swallowed; the caller's in-memory state is unaffected either way.
    /// Returns `true` when the write went through, so callers that only
    /// act on a successful write (notification toasts) can check without
    /// ever seeing the error itself.
    pub fn save<T: Serialize>(&self, key: &str, data: &T) -> bool {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            data,
        };
        match self.kv.set(key, &snapshot) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to persist snapshot");
                false
            }
        }
    }

    /// Drop a persisted collection, best-effort.
    pub fn discard(&self, key: &str) {
        if let Err(e) = self.kv.delete(key) {
            tracing::warn!(key, error = %e, "failed to discard snapshot");
        }
    }
}
