use std::path::PathBuf;

/// Errors from key-value store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage backend is read-only.
    #[error("store is read-only")]
    ReadOnly,

    /// The store root does not exist or is not a directory.
    #[error("store root is not a directory: {0}")]
    InvalidRoot(PathBuf),

    /// Attempted to use an empty key.
    #[error("cannot store a value under an empty key")]
    EmptyKey,

    /// Failure reported by a third-party backend.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
