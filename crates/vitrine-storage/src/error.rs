//! Storage error types.

use thiserror::Error;

/// Errors that can occur when reading or writing persisted state.
///
/// Callers above the adapter never see these: the snapshot layer logs
/// and swallows them, per the best-effort persistence contract.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    Open(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The underlying store rejected the operation (quota exceeded,
    /// storage disabled, backend failure).
    #[error("Store operation failed: {0}")]
    Backend(String),
}
