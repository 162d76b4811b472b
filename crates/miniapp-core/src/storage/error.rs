//! Storage error type.

use thiserror::Error;

/// Errors from [`super::LocalStorage`] backends and the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Backend I/O failure (open, transaction, commit).
    #[error("storage I/O error: {0}")]
    Io(String),

    /// Value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Storage is not available on this device.
    #[error("storage unavailable")]
    Unavailable,
}
