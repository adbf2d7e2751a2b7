//! Root hashing: the digest of an object's canonical encoding.
//!
//! Every computation here takes a fresh accumulator from the algorithm, so
//! hashing never depends on what was hashed before.

use mdag_crypto::DigestAlgorithm;
use mdag_types::Digest;

use crate::codec;
use crate::error::DagResult;
use crate::object::Object;

/// An object's canonical bytes together with their digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sealed {
    pub digest: Digest,
    pub bytes: Vec<u8>,
}

/// Digest of `object`'s canonical encoding. No store interaction.
pub fn root_digest(object: &Object, algorithm: &dyn DigestAlgorithm) -> DagResult<Digest> {
    Ok(seal(object, algorithm)?.digest)
}

/// Encode `object` once and hash exactly those bytes.
pub fn seal(object: &Object, algorithm: &dyn DigestAlgorithm) -> DagResult<Sealed> {
    let bytes = codec::encode(object)?;
    let digest = digest_bytes(&bytes, algorithm);
    Ok(Sealed { digest, bytes })
}

/// Digest of already encoded bytes.
pub fn digest_bytes(bytes: &[u8], algorithm: &dyn DigestAlgorithm) -> Digest {
    let mut acc = algorithm.accumulator();
    acc.write(bytes);
    acc.sum()
}
