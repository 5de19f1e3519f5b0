//! Tree builder for constructing level-ordered Merkle trees

use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::source::LeafSource;
use crate::tree::hasher::{self, HashingScheme};
use crate::tree::node::Node;
use crate::tree::MerkleTree;
use crate::types::{BranchingFactor, Digest};
use std::time::Instant;
use tracing::{debug, error, info, instrument, trace};

/// Builds [`MerkleTree`]s for one hashing scheme and branching factor
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder {
    scheme: HashingScheme,
    branching_factor: BranchingFactor,
}

impl TreeBuilder {
    /// Create a builder with a binary fan-out
    pub fn new(scheme: HashingScheme) -> Self {
        Self {
            scheme,
            branching_factor: BranchingFactor::TWO,
        }
    }

    pub fn with_branching_factor(mut self, branching_factor: BranchingFactor) -> Self {
        self.branching_factor = branching_factor;
        self
    }

    /// Create a builder from the `[tree]` configuration section
    pub fn from_config(config: &TreeConfig) -> Result<Self, TreeError> {
        Ok(Self::new(config.scheme()?).with_branching_factor(config.branching()?))
    }

    pub fn scheme(&self) -> HashingScheme {
        self.scheme
    }

    pub fn branching_factor(&self) -> BranchingFactor {
        self.branching_factor
    }

    /// Build the complete tree from leaf digests in order
    ///
    /// Leaves are grouped into consecutive runs of `branching_factor` (the last
    /// run may be shorter), each run becomes one parent, and this repeats until
    /// a level holds a single node. Fails with [`TreeError::EmptySource`] when
    /// there are no leaves; no partially built tree is ever returned.
    #[instrument(skip_all, fields(scheme = %self.scheme, branching_factor = %self.branching_factor, leaves = leaves.len()))]
    pub fn build(&self, leaves: Vec<Digest>) -> Result<MerkleTree, TreeError> {
        let start = Instant::now();

        if leaves.is_empty() {
            error!("Refusing to build a tree without leaves");
            return Err(TreeError::EmptySource);
        }

        let leaf_level: Vec<Node> = leaves.into_iter().map(Node::leaf).collect();
        let mut node_count = leaf_level.len();
        let mut depth = 1;
        debug!(level_size = leaf_level.len(), "Materialized leaf level");

        // Built leaves-first, flipped once the root is reached
        let mut levels = vec![leaf_level];
        loop {
            let current = &levels[levels.len() - 1];
            if current.len() <= 1 {
                break;
            }
            let parents = self.build_parent_level(current)?;
            node_count += parents.len();
            depth += 1;
            debug!(level_size = parents.len(), depth, "Built parent level");
            levels.push(parents);
        }
        levels.reverse();

        let tree = MerkleTree::from_levels(
            levels,
            node_count,
            depth,
            self.scheme,
            self.branching_factor,
        );

        info!(
            node_count = tree.node_count(),
            depth = tree.depth(),
            root_hash = %tree.root_hash(),
            duration_ms = start.elapsed().as_millis(),
            "Tree build completed"
        );

        Ok(tree)
    }

    /// Materialize a source's leaves with this builder's scheme, then build
    pub fn build_from_source<S>(&self, source: &S) -> Result<MerkleTree, TreeError>
    where
        S: LeafSource + ?Sized,
    {
        let leaves = source.leaf_digests(self.scheme)?;
        self.build(leaves)
    }

    /// Build the tree and return only its root digest
    pub fn compute_root(&self, leaves: Vec<Digest>) -> Result<Digest, TreeError> {
        let tree = self.build(leaves)?;
        Ok(tree.root_hash().clone())
    }

    /// Group `level` into runs of `branching_factor` and hash each run into a parent
    fn build_parent_level(&self, level: &[Node]) -> Result<Vec<Node>, TreeError> {
        let factor = self.branching_factor.get();
        let mut parents = Vec::with_capacity(level.len().div_ceil(factor));

        for (group, children) in level.chunks(factor).enumerate() {
            let first = group * factor;
            let digest = hasher::compose_children(self.scheme, children.iter().map(Node::digest))?;
            trace!(
                group,
                children = children.len(),
                digest = %digest,
                "Composed parent"
            );
            parents.push(Node::internal(digest, first..first + children.len()));
        }

        Ok(parents)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(HashingScheme::default())
    }
}
