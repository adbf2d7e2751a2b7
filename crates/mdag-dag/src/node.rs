//! The node abstraction the DAG is built from.
//!
//! The builder never touches a filesystem. It sees a tree of [`Node`]s, each
//! either a file exposing its bytes or a directory exposing an iterator over
//! its children. Whatever order that iterator yields is the order links are
//! written in, so callers that need reproducible digests across runs must
//! iterate deterministically (e.g. sorted by name).

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

use crate::error::{DagError, DagResult};

/// Shared handle to a node.
pub type NodeRef = Arc<dyn Node>;

/// Forward-only iterator over a directory's children.
pub type NodeIter = Box<dyn Iterator<Item = NodeRef> + Send>;

/// Kind discriminator reported by a node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Directory,
    /// Anything else (symlinks, devices, ...). The builder rejects these.
    Other(String),
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
            Self::Other(kind) => write!(f, "{kind}"),
        }
    }
}

/// A node in the tree being added.
pub trait Node: Send + Sync {
    /// Which variant this node is.
    fn kind(&self) -> NodeKind;

    /// Name used for the link that points at this node.
    fn name(&self) -> &str;

    /// Self-reported size. For directories this is not necessarily the sum
    /// of their descendants.
    fn size(&self) -> u64;

    /// File view, present when `kind()` is [`NodeKind::File`].
    fn as_file(&self) -> Option<&dyn FileNode> {
        None
    }

    /// Directory view, present when `kind()` is [`NodeKind::Directory`].
    fn as_directory(&self) -> Option<&dyn DirectoryNode> {
        None
    }
}

/// File capabilities.
pub trait FileNode {
    /// Entire file contents.
    fn bytes(&self) -> Bytes;
}

/// Directory capabilities.
pub trait DirectoryNode {
    /// A fresh iterator over the children. Each call starts from the first
    /// child again.
    fn children(&self) -> NodeIter;
}

/// A node narrowed to one of the two variants the builder accepts.
pub enum NodeVariant<'a> {
    File(&'a dyn FileNode),
    Directory(&'a dyn DirectoryNode),
}

/// Classify `node`, rejecting anything that is not a well-formed file or
/// directory with [`DagError::InvalidNodeType`].
pub fn resolve(node: &dyn Node) -> DagResult<NodeVariant<'_>> {
    let kind = node.kind();
    let variant = match kind {
        NodeKind::File => node.as_file().map(NodeVariant::File),
        NodeKind::Directory => node.as_directory().map(NodeVariant::Directory),
        NodeKind::Other(_) => None,
    };
    variant.ok_or_else(|| DagError::InvalidNodeType {
        name: node.name().to_string(),
        kind: kind.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::{MemDir, MemFile, MemOther};

    /// Claims to be a file but exposes no file view.
    struct Liar;

    impl Node for Liar {
        fn kind(&self) -> NodeKind {
            NodeKind::File
        }
        fn name(&self) -> &str {
            "liar"
        }
        fn size(&self) -> u64 {
            0
        }
    }

    #[test]
    fn resolves_file() {
        let file = MemFile::new("a", "hello");
        assert!(matches!(resolve(&file).unwrap(), NodeVariant::File(_)));
    }

    #[test]
    fn resolves_directory() {
        let dir = MemDir::new("d");
        assert!(matches!(resolve(&dir).unwrap(), NodeVariant::Directory(_)));
    }

    #[test]
    fn other_kind_is_invalid() {
        let link = MemOther::new("link", "symlink");
        let err = resolve(&link).err().unwrap();
        assert!(matches!(
            err,
            DagError::InvalidNodeType { ref name, ref kind } if name == "link" && kind == "symlink"
        ));
    }

    #[test]
    fn kind_without_accessor_is_invalid() {
        assert!(matches!(
            resolve(&Liar),
            Err(DagError::InvalidNodeType { .. })
        ));
    }

    #[test]
    fn kind_display() {
        assert_eq!(NodeKind::File.to_string(), "file");
        assert_eq!(NodeKind::Directory.to_string(), "directory");
        assert_eq!(NodeKind::Other("fifo".into()).to_string(), "fifo");
    }
}
