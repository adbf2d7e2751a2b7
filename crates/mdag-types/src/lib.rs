//! Foundation types for the Merkle DAG.
//!
//! Every other `mdag-*` crate depends on `mdag-types`.
//!
//! # Key Types
//!
//! - [`Digest`] -- Content address produced by a pluggable digest algorithm

pub mod digest;
pub mod error;

pub use digest::Digest;
pub use error::TypeError;
