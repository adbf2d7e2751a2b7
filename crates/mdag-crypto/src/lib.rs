//! Digest algorithms for the Merkle DAG.
//!
//! The DAG core never names a hash function. It asks a [`DigestAlgorithm`]
//! for a fresh [`Accumulator`] whenever it needs to hash something, so no two
//! computations ever share mutable hashing state.
//!
//! All crypto operations wrap established libraries; no custom cryptography.

pub mod hasher;

pub use hasher::{Accumulator, DigestAlgorithm, HashAlgorithm, HasherError};
