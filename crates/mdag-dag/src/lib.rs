//! Content-addressed Merkle DAG builder.
//!
//! Turns a tree of files and directories into immutable objects keyed by the
//! digest of their canonical encoding, writing each distinct object to a
//! [`KvStore`](mdag_store::KvStore) exactly once.
//!
//! # Layout
//!
//! - Files no larger than the chunk size become a single leaf object.
//! - Larger files are cut into fixed-size chunks; each chunk is a leaf and the
//!   file object links them in offset order with [`LinkKind::Blob`] tags.
//! - Directories link their children in iteration order, tagging files
//!   [`LinkKind::Link`] and subdirectories [`LinkKind::Tree`].
//!
//! # Example
//!
//! ```
//! use mdag_dag::{DagConfig, DagReader, MemDir, MemFile, MerkleDag};
//! use mdag_crypto::HashAlgorithm;
//! use mdag_store::InMemoryKvStore;
//!
//! let tree = MemDir::new("root")
//!     .with_child(MemFile::new("hello.txt", "hello"))
//!     .with_child(MemDir::new("empty"));
//!
//! let store = InMemoryKvStore::new();
//! let dag = MerkleDag::new(DagConfig::default()).unwrap();
//! let outcome = dag.add(&store, &tree).unwrap();
//!
//! let reader = DagReader::new(&store, &HashAlgorithm::Blake3);
//! let entries = reader.list(&outcome.root).unwrap();
//! assert_eq!(entries[0].name, "hello.txt");
//! assert_eq!(reader.read_file(&entries[0].hash).unwrap(), b"hello");
//! ```

pub mod builder;
pub mod chunker;
pub mod codec;
pub mod config;
pub mod dag;
pub mod error;
pub mod hasher;
pub mod mem;
pub mod node;
pub mod object;
pub mod reader;

#[cfg(test)]
pub(crate) mod testing;

pub use builder::{BuildStats, BuiltTree, TreeBuilder};
pub use chunker::Chunker;
pub use config::{DagConfig, DEFAULT_CHUNK_SIZE};
pub use dag::{add, AddOutcome, MerkleDag};
pub use error::{DagError, DagResult};
pub use hasher::root_digest;
pub use mem::{MemDir, MemFile, MemOther};
pub use node::{resolve, DirectoryNode, FileNode, Node, NodeIter, NodeKind, NodeRef, NodeVariant};
pub use object::{Link, LinkKind, Object, ObjectBuilder};
pub use reader::{DagReader, DirEntry};
