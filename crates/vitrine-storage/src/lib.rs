//! Best-effort key-value persistence for Vitrine commerce state.
//!
//! Isolates the stores from the concrete storage medium: a type-safe
//! key-value wrapper with automatic JSON serialization, and a versioned
//! snapshot layer with tolerant loads and best-effort saves.
//!
//! # Example
//!
//! ```
//! use vitrine_storage::SnapshotStore;
//!
//! let store = SnapshotStore::open("docs-example").unwrap();
//! store.save("greeting", &"bonjour".to_string());
//!
//! let back: Option<String> = store.load("greeting");
//! assert_eq!(back.as_deref(), Some("bonjour"));
//! ```

mod error;
mod kv;
mod snapshot;

pub use error::StorageError;
pub use kv::KvStore;
pub use snapshot::{Snapshot, SnapshotStore, SNAPSHOT_VERSION};
