//! The single entry point: add a node tree to a store and get its root digest.

use std::sync::Arc;
use std::time::Instant;

use mdag_crypto::DigestAlgorithm;
use mdag_store::{DedupStats, DedupStore, KvStore};
use mdag_types::Digest;
use tracing::info;

use crate::builder::{BuildStats, TreeBuilder};
use crate::chunker::Chunker;
use crate::codec;
use crate::config::{DagConfig, DEFAULT_CHUNK_SIZE};
use crate::error::DagResult;
use crate::hasher;
use crate::node::{resolve, Node, NodeVariant};
use crate::object::Object;

/// Result of [`MerkleDag::add`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddOutcome {
    /// Digest of the top-level object.
    pub root: Digest,
    /// What was visited.
    pub build: BuildStats,
    /// What was written and what was already present.
    pub store: DedupStats,
}

/// A configured DAG builder.
///
/// Holds the chunker built from a [`DagConfig`] and the digest algorithm;
/// the store is supplied per call so one builder can feed many stores.
#[derive(Clone)]
pub struct MerkleDag {
    chunker: Chunker,
    algorithm: Arc<dyn DigestAlgorithm>,
}

impl MerkleDag {
    /// Builder using the algorithm named in `config`.
    pub fn new(config: DagConfig) -> DagResult<Self> {
        let algorithm = Arc::new(config.algorithm);
        Self::with_algorithm(config, algorithm)
    }

    /// Builder using a caller-supplied algorithm; `config.algorithm` is
    /// ignored.
    pub fn with_algorithm(
        config: DagConfig,
        algorithm: Arc<dyn DigestAlgorithm>,
    ) -> DagResult<Self> {
        config.validate()?;
        let chunker = Chunker::from_config(&config)?;
        Ok(Self { chunker, algorithm })
    }

    pub fn algorithm(&self) -> &dyn DigestAlgorithm {
        self.algorithm.as_ref()
    }

    /// Persist `node` and everything under it, returning the root digest.
    ///
    /// Files are chunked and their top-level object stored; directories are
    /// built bottom-up. On error the objects already written stay in the
    /// store: they are content-addressed, so a retry deduplicates against
    /// them.
    pub fn add<S: KvStore>(&self, store: S, node: &dyn Node) -> DagResult<AddOutcome> {
        let start = Instant::now();
        let algorithm = self.algorithm.as_ref();
        let store = DedupStore::new(store);
        let (object, build) = build_root(&self.chunker, &store, node, algorithm)?;

        let root = hasher::root_digest(&object, algorithm)?;
        let stats = store.stats();
        info!(
            root = %root.short_hex(),
            algorithm = algorithm.name(),
            files = build.files,
            directories = build.directories,
            chunks = build.chunks,
            written = stats.written,
            deduplicated = stats.deduplicated,
            duration_ms = start.elapsed().as_millis() as u64,
            "added node"
        );

        Ok(AddOutcome {
            root,
            build,
            store: stats,
        })
    }
}

impl std::fmt::Debug for MerkleDag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerkleDag")
            .field("chunk_size", &self.chunker.chunk_size())
            .field("algorithm", &self.algorithm.name())
            .finish()
    }
}

/// Add `node` to `store` with the default configuration and `algorithm`,
/// returning the root digest.
pub fn add<S: KvStore>(
    store: S,
    node: &dyn Node,
    algorithm: &dyn DigestAlgorithm,
) -> DagResult<Digest> {
    let store = DedupStore::new(store);
    let chunker = Chunker::new(DEFAULT_CHUNK_SIZE);
    let (object, _) = build_root(&chunker, &store, node, algorithm)?;
    hasher::root_digest(&object, algorithm)
}

/// Build and persist the top-level object for `node`.
fn build_root<S: KvStore>(
    chunker: &Chunker,
    store: &DedupStore<S>,
    node: &dyn Node,
    algorithm: &dyn DigestAlgorithm,
) -> DagResult<(Object, BuildStats)> {
    match resolve(node)? {
        NodeVariant::File(file) => {
            let object = chunker.chunk_file(file, store, algorithm)?;
            codec::persist(store, &object, algorithm)?;
            let build = BuildStats {
                files: 1,
                directories: 0,
                chunks: object.links().len() as u64,
            };
            Ok((object, build))
        }
        NodeVariant::Directory(dir) => {
            let built = TreeBuilder::new(chunker, store, algorithm).build(node, dir)?;
            Ok((built.object, built.stats))
        }
    }
}
