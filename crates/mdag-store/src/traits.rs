use std::sync::Arc;

use mdag_types::Digest;

use crate::error::StoreResult;

/// Digest-keyed key-value store.
///
/// All implementations must satisfy these invariants:
/// - `put` is idempotent: writing the same bytes under the same key again
///   succeeds and leaves the store unchanged.
/// - Concurrent `has`/`put`/`get` from multiple threads are safe.
/// - The store never interprets values; it is a pure key-value store.
/// - All I/O errors are propagated, never silently ignored.
pub trait KvStore: Send + Sync {
    /// Check whether a value exists under `key`.
    fn has(&self, key: &Digest) -> StoreResult<bool>;

    /// Store `value` under `key`.
    fn put(&self, key: &Digest, value: &[u8]) -> StoreResult<()>;

    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &Digest) -> StoreResult<Option<Vec<u8>>>;
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn has(&self, key: &Digest) -> StoreResult<bool> {
        (**self).has(key)
    }

    fn put(&self, key: &Digest, value: &[u8]) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn get(&self, key: &Digest) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }
}

impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    fn has(&self, key: &Digest) -> StoreResult<bool> {
        (**self).has(key)
    }

    fn put(&self, key: &Digest, value: &[u8]) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn get(&self, key: &Digest) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }
}
