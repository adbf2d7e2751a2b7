//! Store doubles for failure-path tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use mdag_store::{InMemoryKvStore, KvStore, StoreError, StoreResult};
use mdag_types::Digest;

/// Wraps a backend and fails the N-th `put` or `has` call (1-based).
pub(crate) struct FailingStore<S = InMemoryKvStore> {
    inner: S,
    fail_put_at: Option<usize>,
    fail_has_at: Option<usize>,
    puts: AtomicUsize,
    hases: AtomicUsize,
}

impl FailingStore<InMemoryKvStore> {
    pub(crate) fn failing_on_put(n: usize) -> Self {
        Self::wrapping(InMemoryKvStore::new(), n)
    }

    pub(crate) fn failing_on_has(n: usize) -> Self {
        Self {
            fail_put_at: None,
            fail_has_at: Some(n),
            ..Self::wrapping(InMemoryKvStore::new(), 0)
        }
    }
}

impl<S: KvStore> FailingStore<S> {
    /// Fail the `n`-th put against `inner`.
    pub(crate) fn wrapping(inner: S, n: usize) -> Self {
        Self {
            inner,
            fail_put_at: Some(n),
            fail_has_at: None,
            puts: AtomicUsize::new(0),
            hases: AtomicUsize::new(0),
        }
    }

    /// Puts attempted so far, the refused one included.
    pub(crate) fn put_attempts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub(crate) fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: KvStore> KvStore for FailingStore<S> {
    fn has(&self, key: &Digest) -> StoreResult<bool> {
        let n = self.hases.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_has_at == Some(n) {
            return Err(StoreError::Backend(format!("injected has failure #{n}")));
        }
        self.inner.has(key)
    }

    fn put(&self, key: &Digest, value: &[u8]) -> StoreResult<()> {
        let n = self.puts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_put_at == Some(n) {
            return Err(StoreError::Backend(format!("injected put failure #{n}")));
        }
        self.inner.put(key, value)
    }

    fn get(&self, key: &Digest) -> StoreResult<Option<Vec<u8>>> {
        self.inner.get(key)
    }
}
