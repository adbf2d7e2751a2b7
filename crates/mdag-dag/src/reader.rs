//! Reading objects back out of a store.
//!
//! The kind tag stored next to each link says how to read its target, so
//! a reader never has to guess from the bytes: `Blob` targets are chunk
//! leaves, `Link` targets are files, and `Tree` targets are directories.

use std::collections::VecDeque;

use mdag_crypto::DigestAlgorithm;
use mdag_store::KvStore;
use mdag_types::Digest;

use crate::codec;
use crate::error::{DagError, DagResult};
use crate::hasher;
use crate::object::{LinkKind, Object};

/// One entry of a directory object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: LinkKind,
    pub hash: Digest,
    pub size: u64,
}

/// Verifying reader over a store.
pub struct DagReader<'a, S> {
    store: S,
    algorithm: &'a dyn DigestAlgorithm,
}

impl<'a, S: KvStore> DagReader<'a, S> {
    /// `algorithm` must be the one the DAG was built with.
    pub fn new(store: S, algorithm: &'a dyn DigestAlgorithm) -> Self {
        Self { store, algorithm }
    }

    /// Fetch, verify and decode the object stored under `digest`.
    pub fn object(&self, digest: &Digest) -> DagResult<Object> {
        let bytes = self
            .store
            .get(digest)?
            .ok_or_else(|| DagError::NotFound(digest.clone()))?;
        let computed = hasher::digest_bytes(&bytes, self.algorithm);
        if &computed != digest {
            return Err(DagError::HashMismatch {
                key: digest.clone(),
                computed,
            });
        }
        codec::decode(&bytes)
    }

    /// Reassemble the contents of the file rooted at `digest`.
    pub fn read_file(&self, digest: &Digest) -> DagResult<Vec<u8>> {
        let object = self.object(digest)?;
        if object.is_leaf() {
            return Ok(object.data().to_vec());
        }

        // Link sizes are untrusted: reject overflow, never preallocate from them.
        object
            .links()
            .iter()
            .try_fold(0u64, |total, link| total.checked_add(link.size))
            .ok_or_else(|| {
                DagError::CorruptObject(format!(
                    "{}: chunk sizes overflow a file length",
                    digest.short_hex()
                ))
            })?;

        let mut out = Vec::new();
        for (link, kind) in object.entries() {
            if kind != LinkKind::Blob {
                return Err(DagError::CorruptObject(format!(
                    "{} is not a file: found a {kind} link",
                    digest.short_hex()
                )));
            }
            let chunk = self.object(&link.hash)?;
            if !chunk.is_leaf() || chunk.data().len() as u64 != link.size {
                return Err(DagError::CorruptObject(format!(
                    "chunk {} does not match its link ({} bytes expected)",
                    link.hash.short_hex(),
                    link.size
                )));
            }
            out.extend_from_slice(chunk.data());
        }
        Ok(out)
    }

    /// Entries of the directory rooted at `digest`, in stored order.
    ///
    /// An empty directory encodes like an empty file, so an empty leaf lists
    /// as an empty directory.
    pub fn list(&self, digest: &Digest) -> DagResult<Vec<DirEntry>> {
        let object = self.object(digest)?;
        if object.is_leaf() && !object.data().is_empty() {
            return Err(DagError::CorruptObject(format!(
                "{} is a file, not a directory",
                digest.short_hex()
            )));
        }
        object
            .entries()
            .map(|(link, kind)| match kind {
                LinkKind::Blob => Err(DagError::CorruptObject(format!(
                    "{} is a chunked file, not a directory",
                    digest.short_hex()
                ))),
                LinkKind::Link | LinkKind::Tree => Ok(DirEntry {
                    name: link.name.clone(),
                    kind,
                    hash: link.hash.clone(),
                    size: link.size,
                }),
            })
            .collect()
    }

    /// Every entry below the directory at `digest`, breadth first, with
    /// `/`-joined paths relative to it.
    pub fn walk(&self, digest: &Digest) -> DagResult<Vec<(String, DirEntry)>> {
        let mut out = Vec::new();
        let mut pending = VecDeque::from([(String::new(), digest.clone())]);
        while let Some((prefix, dir)) = pending.pop_front() {
            for entry in self.list(&dir)? {
                let path = if prefix.is_empty() {
                    entry.name.clone()
                } else {
                    format!("{prefix}/{}", entry.name)
                };
                if entry.kind == LinkKind::Tree {
                    pending.push_back((path.clone(), entry.hash.clone()));
                }
                out.push((path, entry));
            }
        }
        Ok(out)
    }
}
