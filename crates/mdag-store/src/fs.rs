//! Filesystem-backed key-value store.
//!
//! Layout:
//! ```text
//! {root}/
//! ├── ab/
//! │   └── abcde123...   # value stored under key abcde123...
//! └── 12/
//!     └── 123456789...
//! ```
//!
//! Values are written to a temporary file in the shard directory and then
//! renamed into place, so readers never observe a partially written value.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use mdag_types::Digest;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::KvStore;

/// Sharded loose-object store on local disk.
#[derive(Debug, Clone)]
pub struct FsKvStore {
    root: PathBuf,
    read_only: bool,
}

impl FsKvStore {
    /// Open a writable store at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            read_only: false,
        })
    }

    /// Open an existing store that rejects writes.
    pub fn open_read_only(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StoreError::InvalidRoot(root));
        }
        Ok(Self {
            root,
            read_only: true,
        })
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `put` is rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Path where the value for `key` lives.
    pub fn value_path(&self, key: &Digest) -> PathBuf {
        let hex = key.to_hex();
        let shard = &hex[..hex.len().min(2)];
        self.root.join(shard).join(&hex)
    }
}

impl KvStore for FsKvStore {
    fn has(&self, key: &Digest) -> StoreResult<bool> {
        if key.is_empty() {
            return Ok(false);
        }
        match fs::metadata(self.value_path(key)) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &Digest, value: &[u8]) -> StoreResult<()> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }

        if self.has(key)? {
            return Ok(());
        }
        let path = self.value_path(key);
        let shard_dir = path
            .parent()
            .ok_or_else(|| StoreError::InvalidRoot(self.root.clone()))?;
        fs::create_dir_all(shard_dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(shard_dir)?;
        tmp.write_all(value)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;

        debug!(key = %key.short_hex(), len = value.len(), "wrote value");
        Ok(())
    }

    fn get(&self, key: &Digest) -> StoreResult<Option<Vec<u8>>> {
        if key.is_empty() {
            return Ok(None);
        }
        match fs::read(self.value_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key(seed: u8) -> Digest {
        Digest::from([seed; 32])
    }

    #[test]
    fn put_get_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FsKvStore::open(dir.path()).unwrap();
        store.put(&key(0xab), b"payload").unwrap();
        assert_eq!(store.get(&key(0xab)).unwrap().unwrap(), b"payload");
    }

    #[test]
    fn values_are_sharded_by_prefix() {
        let dir = TempDir::new().unwrap();
        let store = FsKvStore::open(dir.path()).unwrap();
        store.put(&key(0xab), b"payload").unwrap();
        let expected = dir.path().join("ab").join(key(0xab).to_hex());
        assert_eq!(store.value_path(&key(0xab)), expected);
        assert!(expected.is_file());
    }

    #[test]
    fn has_and_missing() {
        let dir = TempDir::new().unwrap();
        let store = FsKvStore::open(dir.path()).unwrap();
        assert!(!store.has(&key(1)).unwrap());
        assert!(store.get(&key(1)).unwrap().is_none());
        store.put(&key(1), b"x").unwrap();
        assert!(store.has(&key(1)).unwrap());
    }

    #[test]
    fn redundant_put_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FsKvStore::open(dir.path()).unwrap();
        store.put(&key(2), b"same").unwrap();
        store.put(&key(2), b"same").unwrap();
        let shard = dir.path().join(&key(2).to_hex()[..2]);
        assert_eq!(fs::read_dir(shard).unwrap().count(), 1);
    }

    #[test]
    fn reopen_sees_existing_values() {
        let dir = TempDir::new().unwrap();
        FsKvStore::open(dir.path())
            .unwrap()
            .put(&key(3), b"persisted")
            .unwrap();
        let reopened = FsKvStore::open_read_only(dir.path()).unwrap();
        assert_eq!(reopened.get(&key(3)).unwrap().unwrap(), b"persisted");
    }

    #[test]
    fn has_propagates_io_errors() {
        let dir = TempDir::new().unwrap();
        let store = FsKvStore::open(dir.path()).unwrap();
        // A plain file where the shard directory belongs.
        fs::write(dir.path().join("ab"), b"not a directory").unwrap();
        let err = store.has(&key(0xab)).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(store.put(&key(0xab), b"x").is_err());
    }

    #[test]
    fn read_only_rejects_put() {
        let dir = TempDir::new().unwrap();
        let store = FsKvStore::open_read_only(dir.path()).unwrap();
        assert!(store.is_read_only());
        let err = store.put(&key(4), b"nope").unwrap_err();
        assert!(matches!(err, StoreError::ReadOnly));
    }

    #[test]
    fn read_only_requires_existing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let err = FsKvStore::open_read_only(&missing).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRoot(_)));
    }
}
