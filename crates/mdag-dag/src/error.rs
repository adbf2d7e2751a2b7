//! Error types for building and reading the Merkle DAG.

use mdag_store::StoreError;
use mdag_types::Digest;

/// Errors that can occur while building or reading a DAG.
#[derive(Debug, thiserror::Error)]
pub enum DagError {
    /// A node is neither a file nor a directory, or its kind disagrees with
    /// the accessor it exposes.
    #[error("invalid node type for {name:?}: {kind}")]
    InvalidNodeType {
        /// Reported name of the offending node.
        name: String,
        /// Reported kind of the offending node.
        kind: String,
    },

    /// The key-value store failed; the build path was aborted.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Encoding a well-formed object failed. This is a defect, not a
    /// recoverable condition.
    #[error("object encoding failed: {0}")]
    Encoding(String),

    /// Stored bytes could not be decoded into a well-formed object.
    #[error("corrupt object: {0}")]
    CorruptObject(String),

    /// No value is stored under the requested digest.
    #[error("object not found: {0}")]
    NotFound(Digest),

    /// The stored bytes do not hash to the key they were stored under.
    #[error("hash mismatch for {key}: computed {computed}")]
    HashMismatch {
        /// The key that was requested.
        key: Digest,
        /// Digest of the bytes actually stored.
        computed: Digest,
    },

    /// The configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for DAG results.
pub type DagResult<T> = Result<T, DagError>;
