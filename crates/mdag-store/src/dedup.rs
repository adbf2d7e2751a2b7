use std::sync::atomic::{AtomicU64, Ordering};

use mdag_types::Digest;
use tracing::debug;

use crate::error::StoreResult;
use crate::traits::KvStore;

/// Counters collected by a [`DedupStore`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DedupStats {
    /// Values actually handed to the backend's `put`.
    pub written: u64,
    /// Writes skipped because the key was already present.
    pub deduplicated: u64,
    /// Bytes handed to the backend's `put`.
    pub bytes_written: u64,
}

/// Check-then-write adapter over a [`KvStore`].
///
/// `put_if_absent` asks the backend whether the key exists and only writes
/// when it does not. The sequence is not atomic: two concurrent writers of the
/// same key may both write, which is harmless because both carry identical
/// bytes and backends tolerate redundant puts.
pub struct DedupStore<S> {
    inner: S,
    written: AtomicU64,
    deduplicated: AtomicU64,
    bytes_written: AtomicU64,
}

impl<S: KvStore> DedupStore<S> {
    /// Wrap a backend.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            written: AtomicU64::new(0),
            deduplicated: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
        }
    }

    /// Store `value` under `key` unless the key is already present.
    ///
    /// Returns `true` when the value was written. Backend failures from either
    /// call are returned unmodified.
    pub fn put_if_absent(&self, key: &Digest, value: &[u8]) -> StoreResult<bool> {
        if self.inner.has(key)? {
            self.deduplicated.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key.short_hex(), "dedup hit");
            return Ok(false);
        }
        self.inner.put(key, value)?;
        self.written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written
            .fetch_add(value.len() as u64, Ordering::Relaxed);
        Ok(true)
    }

    /// Snapshot of the counters so far.
    pub fn stats(&self) -> DedupStats {
        DedupStats {
            written: self.written.load(Ordering::Relaxed),
            deduplicated: self.deduplicated.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
        }
    }

    /// The wrapped backend.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap the backend.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> std::fmt::Debug for DedupStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DedupStore")
            .field("written", &self.written.load(Ordering::Relaxed))
            .field("deduplicated", &self.deduplicated.load(Ordering::Relaxed))
            .finish()
    }
}
