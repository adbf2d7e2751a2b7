//! Fixed-size file chunking.
//!
//! A file no larger than the chunk size becomes a single leaf object that is
//! returned unpersisted; its owner decides where it is stored. A larger file
//! is cut into chunks starting at offset 0, each stored as its own leaf, and
//! the returned parent lists them in ascending offset order.

use std::ops::Range;
use std::sync::Arc;

use bytes::Bytes;
use mdag_crypto::DigestAlgorithm;
use mdag_store::{DedupStore, KvStore};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::codec;
use crate::config::DagConfig;
use crate::error::{DagError, DagResult};
use crate::hasher::{self, Sealed};
use crate::node::FileNode;
use crate::object::{Link, LinkKind, Object, ObjectBuilder};

/// Byte ranges of the chunks of a `len`-byte file.
///
/// Ranges start at 0, are contiguous and non-overlapping, and cover every
/// byte; only the last one may be shorter than `chunk_size`.
pub fn chunk_ranges(len: usize, chunk_size: usize) -> impl Iterator<Item = Range<usize>> {
    let step = chunk_size.max(1);
    (0..len)
        .step_by(step)
        .map(move |start| start..(start + step).min(len))
}

/// Splits files into chunk objects.
///
/// With a worker pool, the chunks of one file are encoded and hashed on the
/// pool; they are still stored one by one in offset order on the calling
/// thread.
#[derive(Clone, Debug)]
pub struct Chunker {
    chunk_size: usize,
    pool: Option<Arc<ThreadPool>>,
}

impl Chunker {
    /// Sequential chunker with the given chunk size.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            pool: None,
        }
    }

    /// Chunker for `config`, with a dedicated pool of `workers` threads when
    /// `parallel` is set.
    pub fn from_config(config: &DagConfig) -> DagResult<Self> {
        let mut chunker = Self::new(config.chunk_size);
        if config.parallel && config.workers > 1 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(config.workers)
                .thread_name(|i| format!("mdag-chunk-{i}"))
                .build()
                .map_err(|e| DagError::InvalidConfig(format!("chunk worker pool: {e}")))?;
            chunker.pool = Some(Arc::new(pool));
        }
        Ok(chunker)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Build the object for `file`.
    ///
    /// Chunk leaves are persisted through `store` in ascending offset order;
    /// the first store failure aborts the file and no parent is returned.
    /// The returned object itself is never persisted here.
    pub fn chunk_file<S: KvStore>(
        &self,
        file: &dyn FileNode,
        store: &DedupStore<S>,
        algorithm: &dyn DigestAlgorithm,
    ) -> DagResult<Object> {
        let bytes = file.bytes();
        if bytes.len() <= self.chunk_size {
            return Ok(Object::leaf(bytes.to_vec()));
        }

        let ranges: Vec<Range<usize>> = chunk_ranges(bytes.len(), self.chunk_size).collect();
        let mut parent = ObjectBuilder::new();
        let mut append = |range: &Range<usize>, sealed: Sealed| -> DagResult<()> {
            codec::put_sealed(store, &sealed)?;
            parent.push(Link::chunk(sealed.digest, range.len() as u64), LinkKind::Blob);
            Ok(())
        };

        match &self.pool {
            Some(pool) => {
                let sealed: Vec<Sealed> = pool.install(|| {
                    ranges
                        .par_iter()
                        .map(|range| seal_chunk(&bytes, range, algorithm))
                        .collect::<DagResult<Vec<Sealed>>>()
                })?;
                for (range, leaf) in ranges.iter().zip(sealed) {
                    append(range, leaf)?;
                }
            }
            None => {
                for range in &ranges {
                    append(range, seal_chunk(&bytes, range, algorithm)?)?;
                }
            }
        }

        debug!(len = bytes.len(), chunks = ranges.len(), "chunked file");
        Ok(parent.finish())
    }
}

/// Encode and hash one chunk leaf with its own accumulator.
fn seal_chunk(
    bytes: &Bytes,
    range: &Range<usize>,
    algorithm: &dyn DigestAlgorithm,
) -> DagResult<Sealed> {
    hasher::seal(&Object::leaf(bytes[range.clone()].to_vec()), algorithm)
}
