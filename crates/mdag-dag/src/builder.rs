//! Directory tree building.
//!
//! [`TreeBuilder`] walks a directory with an explicit stack of frames, one per
//! directory currently being assembled, so arbitrarily deep trees never
//! exhaust the call stack. A frame is finished only after its iterator is
//! exhausted; at that point all of its children's digests are known.

use mdag_crypto::DigestAlgorithm;
use mdag_store::{DedupStore, KvStore};
use mdag_types::Digest;
use tracing::debug;

use crate::chunker::Chunker;
use crate::codec;
use crate::error::DagResult;
use crate::node::{resolve, DirectoryNode, Node, NodeIter, NodeVariant};
use crate::object::{Link, LinkKind, Object, ObjectBuilder};

/// Counters for one build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Files visited, at any depth.
    pub files: u64,
    /// Directories visited, including the root when it is one.
    pub directories: u64,
    /// Chunk leaves produced by files larger than the chunk size.
    pub chunks: u64,
}

/// A finished, persisted tree.
#[derive(Clone, Debug)]
pub struct BuiltTree {
    pub object: Object,
    pub digest: Digest,
    pub stats: BuildStats,
}

/// A directory whose links are still being collected.
struct Frame {
    name: String,
    size: u64,
    children: NodeIter,
    tree: ObjectBuilder,
}

impl Frame {
    fn open(node: &dyn Node, dir: &dyn DirectoryNode) -> Self {
        Self {
            name: node.name().to_string(),
            size: node.size(),
            children: dir.children(),
            tree: ObjectBuilder::new(),
        }
    }
}

/// Builds and persists the tree object for a directory.
pub struct TreeBuilder<'a, S> {
    chunker: &'a Chunker,
    store: &'a DedupStore<S>,
    algorithm: &'a dyn DigestAlgorithm,
}

impl<'a, S: KvStore> TreeBuilder<'a, S> {
    pub fn new(
        chunker: &'a Chunker,
        store: &'a DedupStore<S>,
        algorithm: &'a dyn DigestAlgorithm,
    ) -> Self {
        Self {
            chunker,
            store,
            algorithm,
        }
    }

    /// Build the tree for `root`, persisting every object reachable from it.
    ///
    /// Links are appended in iteration order. A directory link's `size` is
    /// the child's self-reported size, not the total of its descendants.
    pub fn build(&self, root: &dyn Node, root_dir: &dyn DirectoryNode) -> DagResult<BuiltTree> {
        let mut stats = BuildStats {
            directories: 1,
            ..Default::default()
        };
        let mut current = Frame::open(root, root_dir);
        let mut parents: Vec<Frame> = Vec::new();

        loop {
            if let Some(child) = current.children.next() {
                match resolve(child.as_ref())? {
                    NodeVariant::File(file) => {
                        let object = self.chunker.chunk_file(file, self.store, self.algorithm)?;
                        stats.files += 1;
                        stats.chunks += object.links().len() as u64;
                        let digest = codec::persist(self.store, &object, self.algorithm)?;
                        current.tree.push(
                            Link::named(child.name(), digest, child.size()),
                            LinkKind::Link,
                        );
                    }
                    NodeVariant::Directory(dir) => {
                        stats.directories += 1;
                        let next = Frame::open(child.as_ref(), dir);
                        parents.push(std::mem::replace(&mut current, next));
                    }
                }
                continue;
            }

            let Frame { name, size, tree, .. } = current;
            let entries = tree.len();
            let object = tree.finish();
            let digest = codec::persist(self.store, &object, self.algorithm)?;
            debug!(name = %name, entries, key = %digest.short_hex(), "built tree");

            match parents.pop() {
                Some(mut parent) => {
                    parent
                        .tree
                        .push(Link::named(name, digest, size), LinkKind::Tree);
                    current = parent;
                }
                None => {
                    return Ok(BuiltTree {
                        object,
                        digest,
                        stats,
                    })
                }
            }
        }
    }
}
