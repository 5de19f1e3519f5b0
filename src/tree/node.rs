//! Tree node representation

use crate::types::Digest;
use std::ops::Range;

/// What a node is, and where its children live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Digest over raw input data; no children
    Leaf,
    /// Digest over its children's digests. The children are the contiguous
    /// `children` range of the level directly below this node's level.
    Internal { children: Range<usize> },
}

/// A fully hashed node of a [`MerkleTree`](crate::tree::MerkleTree)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    digest: Digest,
    kind: NodeKind,
}

impl Node {
    pub(crate) fn leaf(digest: Digest) -> Self {
        Self {
            digest,
            kind: NodeKind::Leaf,
        }
    }

    pub(crate) fn internal(digest: Digest, children: Range<usize>) -> Self {
        Self {
            digest,
            kind: NodeKind::Internal { children },
        }
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf)
    }

    /// Index range of the children in the next level down, if any
    pub fn child_range(&self) -> Option<Range<usize>> {
        match &self.kind {
            NodeKind::Leaf => None,
            NodeKind::Internal { children } => Some(children.clone()),
        }
    }

    pub fn child_count(&self) -> usize {
        self.child_range().map_or(0, |range| range.len())
    }
}
