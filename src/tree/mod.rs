//! Level-ordered Merkle tree
//!
//! Built once, bottom-up, from an ordered sequence of leaf digests. Every
//! level's node list is kept after construction so that two parties can
//! compare their trees one level at a time and only descend into subtrees
//! whose hashes differ.

pub mod builder;
pub mod hasher;
pub mod node;
pub mod query;

use crate::tree::hasher::HashingScheme;
use crate::tree::node::Node;
use crate::types::{BranchingFactor, Digest, NodePosition};
use std::collections::HashMap;

/// Immutable Merkle tree with its full level table
///
/// `levels[0]` holds the root alone and the last level holds the leaves in
/// input order. The tree is plain owned data, so it can be shared across
/// threads for read-only queries.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    levels: Vec<Vec<Node>>,
    /// First position of each digest in level order
    index: HashMap<Digest, NodePosition>,
    node_count: usize,
    depth: usize,
    scheme: HashingScheme,
    branching_factor: BranchingFactor,
}

impl MerkleTree {
    /// Assemble a tree from a root-first level table produced by the builder
    pub(crate) fn from_levels(
        levels: Vec<Vec<Node>>,
        node_count: usize,
        depth: usize,
        scheme: HashingScheme,
        branching_factor: BranchingFactor,
    ) -> Self {
        let mut index = HashMap::with_capacity(node_count);
        for (level, nodes) in levels.iter().enumerate() {
            for (position, node) in nodes.iter().enumerate() {
                index
                    .entry(node.digest().clone())
                    .or_insert(NodePosition {
                        level,
                        index: position,
                    });
            }
        }

        Self {
            levels,
            index,
            node_count,
            depth,
            scheme,
            branching_factor,
        }
    }

    /// The single node at level 0
    pub fn root(&self) -> &Node {
        // The builder never produces an empty level table
        &self.levels[0][0]
    }

    pub fn root_hash(&self) -> &Digest {
        self.root().digest()
    }

    pub fn hashing_scheme(&self) -> HashingScheme {
        self.scheme
    }

    pub fn branching_factor(&self) -> BranchingFactor {
        self.branching_factor
    }

    /// Total number of nodes across all levels
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of levels, leaves and root included
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.last().map_or(0, Vec::len)
    }

    /// All nodes, level-ordered from the root down
    pub fn levels(&self) -> &[Vec<Node>] {
        &self.levels
    }

    pub(crate) fn first_position(&self, digest: &Digest) -> Option<NodePosition> {
        self.index.get(digest).copied()
    }
}
