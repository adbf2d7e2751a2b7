//! In-memory [`Node`] implementations for tests and embedding.

use std::sync::Arc;

use bytes::Bytes;

use crate::node::{DirectoryNode, FileNode, Node, NodeIter, NodeKind, NodeRef};

/// A file held entirely in memory.
#[derive(Clone, Debug)]
pub struct MemFile {
    name: String,
    data: Bytes,
    size: Option<u64>,
}

impl MemFile {
    /// A file whose reported size is its byte length.
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            size: None,
        }
    }

    /// Override the reported size.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Wrap in a shared handle.
    pub fn into_ref(self) -> NodeRef {
        Arc::new(self)
    }
}

impl Node for MemFile {
    fn kind(&self) -> NodeKind {
        NodeKind::File
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size.unwrap_or(self.data.len() as u64)
    }

    fn as_file(&self) -> Option<&dyn FileNode> {
        Some(self)
    }
}

impl FileNode for MemFile {
    fn bytes(&self) -> Bytes {
        self.data.clone()
    }
}

/// A directory whose children are held in memory, in insertion order.
#[derive(Clone)]
pub struct MemDir {
    name: String,
    size: u64,
    children: Vec<NodeRef>,
}

impl MemDir {
    /// An empty directory reporting size 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0,
            children: Vec::new(),
        }
    }

    /// Set the reported size.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Append a child.
    pub fn with_child(mut self, child: impl Node + 'static) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    /// Append an already shared child.
    pub fn push(&mut self, child: NodeRef) {
        self.children.push(child);
    }

    /// Sort children by name so iteration order is reproducible.
    pub fn sorted(mut self) -> Self {
        self.children.sort_by(|a, b| a.name().cmp(b.name()));
        self
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the directory has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Wrap in a shared handle.
    pub fn into_ref(self) -> NodeRef {
        Arc::new(self)
    }
}

impl Node for MemDir {
    fn kind(&self) -> NodeKind {
        NodeKind::Directory
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn as_directory(&self) -> Option<&dyn DirectoryNode> {
        Some(self)
    }
}

impl DirectoryNode for MemDir {
    fn children(&self) -> NodeIter {
        Box::new(self.children.clone().into_iter())
    }
}

impl std::fmt::Debug for MemDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemDir")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("children", &self.children.len())
            .finish()
    }
}

/// A node of some kind the builder does not support.
#[derive(Clone, Debug)]
pub struct MemOther {
    name: String,
    kind: String,
}

impl MemOther {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

impl Node for MemOther {
    fn kind(&self) -> NodeKind {
        NodeKind::Other(self.kind.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        0
    }
}
