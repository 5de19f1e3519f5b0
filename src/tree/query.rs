//! Level, lookup and diff queries over a built tree
//!
//! All queries are read-only. Any level index outside `0..depth` fails with
//! [`TreeError::LevelOutOfRange`]; lookups that simply find nothing return an
//! empty result instead of an error.

use crate::error::TreeError;
use crate::tree::node::Node;
use crate::tree::MerkleTree;
use crate::types::{Digest, NodePosition};

impl MerkleTree {
    /// Nodes at `level`, left to right
    pub fn nodes_at_level(&self, level: usize) -> Result<&[Node], TreeError> {
        self.levels
            .get(level)
            .map(Vec::as_slice)
            .ok_or(TreeError::LevelOutOfRange {
                level,
                depth: self.depth,
            })
    }

    /// Digests at `level`, left to right
    pub fn hashes_at_level(&self, level: usize) -> Result<Vec<Digest>, TreeError> {
        Ok(self
            .nodes_at_level(level)?
            .iter()
            .map(|node| node.digest().clone())
            .collect())
    }

    /// First node carrying `digest`, searching root to leaves and left to right
    ///
    /// Several nodes can share a digest when a lone child is passed through to
    /// its parent; the one closest to the root wins.
    pub fn find_node_by_hash(&self, digest: &Digest) -> Option<&Node> {
        self.position_of(digest)
            .map(|position| &self.levels[position.level][position.index])
    }

    /// Level and index of the node [`find_node_by_hash`](Self::find_node_by_hash) returns
    pub fn position_of(&self, digest: &Digest) -> Option<NodePosition> {
        self.first_position(digest)
    }

    /// Children of `node`, which must live at `level` of this tree
    ///
    /// Leaves have no children. A node from another level or another tree
    /// yields whatever its range addresses one level down, or nothing.
    pub fn children_of(&self, level: usize, node: &Node) -> &[Node] {
        match (node.child_range(), self.levels.get(level + 1)) {
            (Some(range), Some(below)) => below.get(range).unwrap_or(&[]),
            _ => &[],
        }
    }

    /// Digests of the children of every node at `level` whose digest is `digest`
    ///
    /// Empty when nothing at that level matches or the match is a leaf.
    pub fn children_hashes_of_hash(
        &self,
        level: usize,
        digest: &Digest,
    ) -> Result<Vec<Digest>, TreeError> {
        let nodes = self.nodes_at_level(level)?;
        Ok(nodes
            .iter()
            .filter(|node| node.digest() == digest)
            .flat_map(|node| self.children_of(level, node))
            .map(|child| child.digest().clone())
            .collect())
    }

    /// This tree's digests at `level` that differ from a peer's digests for the same level
    ///
    /// Comparison is positional: entry `i` is reported when the peer has no
    /// entry `i` or a different one. Only this tree's digests are returned, so
    /// a full picture of a mismatch needs the call in both directions. An
    /// inserted or removed leaf shifts every later position and shows up as a
    /// run of differences.
    pub fn compare_hashes_at_level(
        &self,
        level: usize,
        other_level_hashes: &[Digest],
    ) -> Result<Vec<Digest>, TreeError> {
        let nodes = self.nodes_at_level(level)?;
        Ok(nodes
            .iter()
            .enumerate()
            .filter(|(position, node)| {
                other_level_hashes
                    .get(*position)
                    .map_or(true, |theirs| theirs != node.digest())
            })
            .map(|(_, node)| node.digest().clone())
            .collect())
    }
}
