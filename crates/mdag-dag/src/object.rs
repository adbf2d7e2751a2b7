use serde::{Deserialize, Serialize};

use mdag_types::Digest;

/// How to interpret the object a link points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    /// A raw chunk of a larger file.
    Blob,
    /// A file (either inlined as a single leaf or a list of chunks).
    Link,
    /// A directory.
    Tree,
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::Link => write!(f, "link"),
            Self::Tree => write!(f, "tree"),
        }
    }
}

/// Reference from a parent object to a child's content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Empty for file chunks, the entry name for directory entries.
    pub name: String,
    /// Digest of the child's canonical encoding.
    pub hash: Digest,
    /// Chunk length for chunk links, the child's self-reported size for
    /// directory entries.
    pub size: u64,
}

impl Link {
    /// Unnamed link to a file chunk.
    pub fn chunk(hash: Digest, size: u64) -> Self {
        Self {
            name: String::new(),
            hash,
            size,
        }
    }

    /// Named link to a directory entry.
    pub fn named(name: impl Into<String>, hash: Digest, size: u64) -> Self {
        Self {
            name: name.into(),
            hash,
            size,
        }
    }
}

/// The unit of content addressing.
///
/// Leaves carry raw bytes in `data` and no links. Internal objects carry one
/// link per chunk or directory entry plus a parallel sequence of
/// [`LinkKind`]s saying how to read each one; their `data` is empty.
///
/// Objects are immutable: build internal ones with [`ObjectBuilder`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    links: Vec<Link>,
    kinds: Vec<LinkKind>,
    data: Vec<u8>,
}

impl Object {
    /// A leaf holding raw bytes.
    pub fn leaf(data: impl Into<Vec<u8>>) -> Self {
        Self {
            links: Vec::new(),
            kinds: Vec::new(),
            data: data.into(),
        }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn kinds(&self) -> &[LinkKind] {
        &self.kinds
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns `true` if the object has no links.
    pub fn is_leaf(&self) -> bool {
        self.links.is_empty()
    }

    /// Links paired with their kind tags, in order.
    pub fn entries(&self) -> impl Iterator<Item = (&Link, LinkKind)> + '_ {
        self.links.iter().zip(self.kinds.iter().copied())
    }

    /// Whether every link has exactly one kind tag.
    pub(crate) fn is_well_formed(&self) -> bool {
        self.links.len() == self.kinds.len()
    }
}

/// Accumulates links for an internal object.
#[derive(Debug, Default)]
pub struct ObjectBuilder {
    links: Vec<Link>,
    kinds: Vec<LinkKind>,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a link and its kind tag.
    pub fn push(&mut self, link: Link, kind: LinkKind) {
        self.links.push(link);
        self.kinds.push(kind);
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Freeze into an object.
    pub fn finish(self) -> Object {
        Object {
            links: self.links,
            kinds: self.kinds,
            data: Vec::new(),
        }
    }
}
