use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Content address of a stored object.
///
/// A `Digest` is the output of whichever digest algorithm built the DAG, so
/// its length is not fixed by this type. Identical canonical encodings always
/// produce the same `Digest` under the same algorithm, which is what makes
/// objects deduplicatable and verifiable.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(Vec<u8>);

impl Digest {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes in the digest.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for a zero-length digest.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        let end = self.0.len().min(4);
        hex::encode(&self.0[..end])
    }

    /// Parse from a hex string of any non-zero length.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.is_empty() {
            return Err(TypeError::InvalidHex("empty digest".into()));
        }
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Digest {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hex_roundtrip() {
        let d = Digest::from([7u8; 32]);
        let parsed = Digest::from_hex(&d.to_hex()).unwrap();
        assert_eq!(d, parsed);
    }

    #[test]
    fn short_hex_is_8_chars() {
        let d = Digest::from([0xab; 32]);
        assert_eq!(d.short_hex(), "abababab");
    }

    #[test]
    fn short_hex_of_tiny_digest() {
        let d = Digest::from_bytes(vec![0x01, 0x02]);
        assert_eq!(d.short_hex(), "0102");
    }

    #[test]
    fn display_is_full_hex() {
        let d = Digest::from([1u8; 32]);
        let display = format!("{d}");
        assert_eq!(display.len(), 64);
        assert_eq!(display, d.to_hex());
    }

    #[test]
    fn debug_uses_short_hex() {
        let d = Digest::from([0xcd; 32]);
        assert_eq!(format!("{d:?}"), "Digest(cdcdcdcd)");
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(matches!(
            Digest::from_hex("zz"),
            Err(TypeError::InvalidHex(_))
        ));
        assert!(matches!(Digest::from_hex(""), Err(TypeError::InvalidHex(_))));
    }

    #[test]
    fn serde_roundtrip() {
        let d = Digest::from([9u8; 32]);
        let json = serde_json::to_string(&d).unwrap();
        let parsed: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(d, parsed);
    }

    #[test]
    fn ordering_is_bytewise() {
        let a = Digest::from([0u8; 32]);
        let b = Digest::from([1u8; 32]);
        assert!(a < b);
    }

    proptest! {
        #[test]
        fn any_nonempty_bytes_roundtrip_through_hex(bytes in proptest::collection::vec(any::<u8>(), 1..128)) {
            let d = Digest::from_bytes(bytes.clone());
            let parsed = Digest::from_hex(&d.to_hex()).unwrap();
            prop_assert_eq!(parsed.as_bytes(), bytes.as_slice());
        }
    }
}
