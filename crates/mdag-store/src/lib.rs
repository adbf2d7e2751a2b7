//! Key-value storage for the Merkle DAG.
//!
//! The DAG persists every object under the digest of its canonical encoding.
//! This crate defines that narrow contract and a few backends for it:
//!
//! - [`InMemoryKvStore`] -- `HashMap`-based store for tests and embedding
//! - [`FsKvStore`] -- sharded loose-object directory on local disk
//!
//! [`DedupStore`] wraps any backend with the check-then-write discipline the
//! DAG builder relies on.
//!
//! # Design Rules
//!
//! 1. Values are immutable once written; a key always maps to the same bytes.
//! 2. Redundant `put` calls with identical bytes must succeed.
//! 3. The store never interprets values -- it is a pure key-value store.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod dedup;
pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use dedup::{DedupStats, DedupStore};
pub use error::{StoreError, StoreResult};
pub use fs::FsKvStore;
pub use memory::InMemoryKvStore;
pub use traits::KvStore;
