//! Process-local backend.

use std::collections::HashMap;
use std::sync::RwLock;

use mdag_types::Digest;

use crate::error::{StoreError, StoreResult};
use crate::traits::KvStore;

/// Encoded objects keyed by digest, held in this process.
///
/// Nothing survives the process; use [`FsKvStore`](crate::FsKvStore) for
/// that. Readers share the lock, so concurrent DAG builds only serialize on
/// writes.
pub struct InMemoryKvStore {
    entries: RwLock<HashMap<Digest, Vec<u8>>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Distinct digests held.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Held digests in byte order, for comparing two stores.
    pub fn keys(&self) -> Vec<Digest> {
        let mut keys: Vec<Digest> = self
            .entries
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}

impl Default for InMemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for InMemoryKvStore {
    fn has(&self, key: &Digest) -> StoreResult<bool> {
        let map = self.entries.read().expect("lock poisoned");
        Ok(map.contains_key(key))
    }

    fn put(&self, key: &Digest, value: &[u8]) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        let mut map = self.entries.write().expect("lock poisoned");
        // Content addressing guarantees an existing key already holds these bytes.
        map.entry(key.clone()).or_insert_with(|| value.to_vec());
        Ok(())
    }

    fn get(&self, key: &Digest) -> StoreResult<Option<Vec<u8>>> {
        let map = self.entries.read().expect("lock poisoned");
        Ok(map.get(key).cloned())
    }
}

impl std::fmt::Debug for InMemoryKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryKvStore")
            .field("digests", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(seed: u8) -> Digest {
        Digest::from([seed; 32])
    }

    #[test]
    fn put_and_get() {
        let store = InMemoryKvStore::new();
        store.put(&key(1), b"hello world").unwrap();
        let value = store.get(&key(1)).unwrap().expect("should exist");
        assert_eq!(value, b"hello world");
    }

    #[test]
    fn has_reflects_puts() {
        let store = InMemoryKvStore::new();
        assert!(!store.has(&key(1)).unwrap());
        store.put(&key(1), b"x").unwrap();
        assert!(store.has(&key(1)).unwrap());
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemoryKvStore::new();
        assert!(store.get(&key(9)).unwrap().is_none());
    }

    #[test]
    fn redundant_put_is_idempotent() {
        let store = InMemoryKvStore::new();
        store.put(&key(1), b"same").unwrap();
        store.put(&key(1), b"same").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&key(1)).unwrap().unwrap(), b"same");
    }

    #[test]
    fn empty_key_is_rejected() {
        let store = InMemoryKvStore::new();
        let err = store.put(&Digest::from_bytes(Vec::new()), b"x").unwrap_err();
        assert!(matches!(err, StoreError::EmptyKey));
    }

    #[test]
    fn len_and_is_empty() {
        let store = InMemoryKvStore::new();
        assert!(store.is_empty());
        store.put(&key(1), b"a").unwrap();
        assert!(!store.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn keys_are_sorted() {
        let store = InMemoryKvStore::new();
        store.put(&key(3), b"c").unwrap();
        store.put(&key(1), b"a").unwrap();
        store.put(&key(2), b"b").unwrap();
        assert_eq!(store.keys(), vec![key(1), key(2), key(3)]);
    }

    #[test]
    fn concurrent_puts_of_same_key_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryKvStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store.put(&key(7), b"shared").unwrap();
                    assert!(store.has(&key(7)).unwrap());
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn debug_format() {
        let store = InMemoryKvStore::new();
        store.put(&key(1), b"x").unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryKvStore"));
        assert!(debug.contains("digests: 1"));
    }
}
