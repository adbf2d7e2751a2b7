use mdag_crypto::HashAlgorithm;
use serde::{Deserialize, Serialize};

use crate::error::{DagError, DagResult};

/// Default chunk size: 256 KiB.
pub const DEFAULT_CHUNK_SIZE: usize = 256 * 1024;

/// Configuration for building a Merkle DAG.
///
/// Missing keys in a TOML document fall back to [`DagConfig::default`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DagConfig {
    /// Files larger than this are split into chunks of this many bytes.
    pub chunk_size: usize,
    /// Digest algorithm used when none is supplied explicitly.
    pub algorithm: HashAlgorithm,
    /// Encode and hash the chunks of one file on worker threads.
    pub parallel: bool,
    /// Number of worker threads used when `parallel` is set.
    pub workers: usize,
}

impl Default for DagConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            algorithm: HashAlgorithm::Blake3,
            parallel: false,
            workers: 4,
        }
    }
}

impl DagConfig {
    /// Default configuration with a different chunk size.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            ..Default::default()
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> DagResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| DagError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the builder cannot run with.
    pub fn validate(&self) -> DagResult<()> {
        if self.chunk_size == 0 {
            return Err(DagError::InvalidConfig("chunk_size must be positive".into()));
        }
        if self.parallel && self.workers == 0 {
            return Err(DagError::InvalidConfig(
                "workers must be positive when parallel is enabled".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = DagConfig::default();
        assert_eq!(c.chunk_size, 256 * 1024);
        assert_eq!(c.algorithm, HashAlgorithm::Blake3);
        assert!(!c.parallel);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn toml_overrides_some_fields() {
        let c = DagConfig::from_toml_str(
            r#"
            chunk_size = 1024
            algorithm = "sha256"
            "#,
        )
        .unwrap();
        assert_eq!(c.chunk_size, 1024);
        assert_eq!(c.algorithm, HashAlgorithm::Sha256);
        assert_eq!(c.workers, 4);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(DagConfig::from_toml_str("").unwrap(), DagConfig::default());
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let err = DagConfig::from_toml_str("chunk_size = 0").unwrap_err();
        assert!(matches!(err, DagError::InvalidConfig(_)));
    }

    #[test]
    fn parallel_without_workers_rejected() {
        let c = DagConfig {
            parallel: true,
            workers: 0,
            ..Default::default()
        };
        assert!(matches!(c.validate(), Err(DagError::InvalidConfig(_))));
    }

    #[test]
    fn unknown_algorithm_rejected() {
        let err = DagConfig::from_toml_str(r#"algorithm = "md5""#).unwrap_err();
        assert!(matches!(err, DagError::InvalidConfig(_)));
    }
}
