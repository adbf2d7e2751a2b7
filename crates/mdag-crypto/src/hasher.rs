use std::fmt;
use std::str::FromStr;

use mdag_types::Digest;
use serde::{Deserialize, Serialize};
use sha2::Digest as _;

/// Incremental digest state.
///
/// An accumulator carries mutable internal state and belongs to exactly one
/// computation at a time. `sum` finalizes without consuming, so callers may
/// keep writing afterwards; `reset` returns it to the freshly created state.
pub trait Accumulator: Send {
    /// Feed more bytes into the running digest.
    fn write(&mut self, data: &[u8]);

    /// Digest of everything written since creation or the last `reset`.
    fn sum(&self) -> Digest;

    /// Discard all written bytes.
    fn reset(&mut self);
}

/// A digest algorithm the DAG can be built with.
///
/// Implementations hand out independent accumulators; the DAG obtains a new
/// one for every object it hashes.
pub trait DigestAlgorithm: Send + Sync {
    /// Stable, lowercase algorithm name.
    fn name(&self) -> &'static str;

    /// Number of bytes in every digest this algorithm produces.
    fn output_len(&self) -> usize;

    /// A new accumulator in the reset state.
    fn accumulator(&self) -> Box<dyn Accumulator>;

    /// Hash `data` in one shot with a dedicated accumulator.
    fn digest(&self, data: &[u8]) -> Digest {
        let mut acc = self.accumulator();
        acc.write(data);
        acc.sum()
    }
}

/// Built-in digest algorithms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// BLAKE3, 32-byte output.
    #[default]
    Blake3,
    /// SHA-256, 32-byte output.
    Sha256,
}

impl DigestAlgorithm for HashAlgorithm {
    fn name(&self) -> &'static str {
        match self {
            Self::Blake3 => "blake3",
            Self::Sha256 => "sha256",
        }
    }

    fn output_len(&self) -> usize {
        32
    }

    fn accumulator(&self) -> Box<dyn Accumulator> {
        match self {
            Self::Blake3 => Box::new(Blake3Accumulator(blake3::Hasher::new())),
            Self::Sha256 => Box::new(Sha256Accumulator(sha2::Sha256::new())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = HasherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blake3" => Ok(Self::Blake3),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            other => Err(HasherError::UnknownAlgorithm(other.to_string())),
        }
    }
}

struct Blake3Accumulator(blake3::Hasher);

impl Accumulator for Blake3Accumulator {
    fn write(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn sum(&self) -> Digest {
        Digest::from(*self.0.finalize().as_bytes())
    }

    fn reset(&mut self) {
        self.0.reset();
    }
}

struct Sha256Accumulator(sha2::Sha256);

impl Accumulator for Sha256Accumulator {
    fn write(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn sum(&self) -> Digest {
        Digest::from_bytes(self.0.clone().finalize().to_vec())
    }

    fn reset(&mut self) {
        sha2::Digest::reset(&mut self.0);
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("unknown digest algorithm: {0}")]
    UnknownAlgorithm(String),
}
