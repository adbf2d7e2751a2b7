//! Canonical object encoding and deduplicated persistence.
//!
//! Objects are encoded with bincode's fixed-width little-endian format:
//! fields in declaration order (`links`, `kinds`, `data`), link fields in
//! declaration order (`name`, `hash`, `size`), every sequence length-prefixed
//! and written in list order. The same bytes are hashed and stored.

use mdag_crypto::DigestAlgorithm;
use mdag_store::{DedupStore, KvStore};
use mdag_types::Digest;
use tracing::debug;

use crate::error::{DagError, DagResult};
use crate::hasher::{self, Sealed};
use crate::object::Object;

/// Canonical encoding of `object`.
pub fn encode(object: &Object) -> DagResult<Vec<u8>> {
    bincode::serialize(object).map_err(|e| DagError::Encoding(e.to_string()))
}

/// Decode and validate canonical bytes.
pub fn decode(bytes: &[u8]) -> DagResult<Object> {
    let object: Object =
        bincode::deserialize(bytes).map_err(|e| DagError::CorruptObject(e.to_string()))?;
    let canonical_len =
        bincode::serialized_size(&object).map_err(|e| DagError::Encoding(e.to_string()))?;
    if canonical_len != bytes.len() as u64 {
        return Err(DagError::CorruptObject(format!(
            "{} trailing bytes",
            bytes.len() as u64 - canonical_len
        )));
    }
    if !object.is_well_formed() {
        return Err(DagError::CorruptObject(format!(
            "{} links but {} kind tags",
            object.links().len(),
            object.kinds().len()
        )));
    }
    Ok(object)
}

/// Encode `object`, hash it, and store it unless already present.
pub fn persist<S: KvStore>(
    store: &DedupStore<S>,
    object: &Object,
    algorithm: &dyn DigestAlgorithm,
) -> DagResult<Digest> {
    let sealed = hasher::seal(object, algorithm)?;
    put_sealed(store, &sealed)?;
    Ok(sealed.digest)
}

/// Store already sealed bytes unless their digest is present.
///
/// Returns `true` when the bytes were written.
pub fn put_sealed<S: KvStore>(store: &DedupStore<S>, sealed: &Sealed) -> DagResult<bool> {
    let written = store.put_if_absent(&sealed.digest, &sealed.bytes)?;
    if written {
        debug!(
            key = %sealed.digest.short_hex(),
            len = sealed.bytes.len(),
            "persisted object"
        );
    }
    Ok(written)
}
