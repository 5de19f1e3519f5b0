//! Iterative level-by-level reconciliation against a peer tree
//!
//! The walk mirrors what two parties would exchange over a wire: start with
//! the peer's root, compare, then ask the peer only for the children of
//! hashes that differ, and repeat one level down. Matching subtrees are never
//! expanded.
//!
//! Pairing is positional under each parent, so the walk shares the limits of
//! [`MerkleTree::compare_hashes_at_level`]: an inserted or removed leaf
//! misaligns everything to its right.

use crate::error::TreeError;
use crate::tree::MerkleTree;
use crate::types::Digest;
use tracing::{debug, info, instrument};

/// The hash-only view of a tree that a peer has to provide
pub trait PeerLevels {
    /// Number of levels in the peer's tree
    fn depth(&self) -> usize;

    /// Peer digests at `level`, left to right
    fn hashes_at_level(&self, level: usize) -> Result<Vec<Digest>, TreeError>;

    /// Peer digests of the children of the node(s) at `level` carrying `digest`
    fn children_hashes_of_hash(&self, level: usize, digest: &Digest)
        -> Result<Vec<Digest>, TreeError>;
}

impl PeerLevels for MerkleTree {
    fn depth(&self) -> usize {
        MerkleTree::depth(self)
    }

    fn hashes_at_level(&self, level: usize) -> Result<Vec<Digest>, TreeError> {
        MerkleTree::hashes_at_level(self, level)
    }

    fn children_hashes_of_hash(
        &self,
        level: usize,
        digest: &Digest,
    ) -> Result<Vec<Digest>, TreeError> {
        MerkleTree::children_hashes_of_hash(self, level, digest)
    }
}

/// Counters describing how much of the trees a reconciliation touched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Levels of the local tree that had at least one node compared
    pub levels_visited: usize,
    /// Digests received from the peer
    pub hashes_requested: usize,
    /// Local subtrees skipped because their root matched the peer
    pub subtrees_matched: usize,
}

/// Outcome of [`find_divergent_leaves`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Divergence {
    /// Indices into the local leaf level, ascending
    pub leaves: Vec<usize>,
    pub stats: DiffStats,
}

impl Divergence {
    /// True when the roots matched
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}

/// Find the local leaves whose content differs from the peer's
///
/// A leaf is reported when its digest differs from the peer digest at the
/// same position, or when the peer has nothing at that position.
#[instrument(skip_all, fields(local_depth = local.depth(), peer_depth = peer.depth()))]
pub fn find_divergent_leaves<P>(local: &MerkleTree, peer: &P) -> Result<Divergence, TreeError>
where
    P: PeerLevels + ?Sized,
{
    let mut divergence = Divergence::default();

    let peer_root = peer.hashes_at_level(0)?.into_iter().next();
    divergence.stats.hashes_requested += usize::from(peer_root.is_some());

    // (position in the local level, peer digest at the same position)
    let mut frontier: Vec<(usize, Option<Digest>)> = vec![(0, peer_root)];

    for level in 0..local.depth() {
        if frontier.is_empty() {
            break;
        }
        divergence.stats.levels_visited += 1;

        let nodes = local.nodes_at_level(level)?;
        let mut next = Vec::new();
        for (position, theirs) in frontier {
            let node = &nodes[position];
            if theirs.as_ref() == Some(node.digest()) {
                divergence.stats.subtrees_matched += 1;
                continue;
            }

            let Some(children) = node.child_range() else {
                divergence.leaves.push(position);
                continue;
            };

            let their_children = match &theirs {
                Some(digest) => peer.children_hashes_of_hash(level, digest)?,
                None => Vec::new(),
            };
            divergence.stats.hashes_requested += their_children.len();

            let mut their_children = their_children.into_iter();
            next.extend(children.map(|child| (child, their_children.next())));
        }

        debug!(level, pending = next.len(), "Compared level");
        frontier = next;
    }

    info!(
        divergent_leaves = divergence.leaves.len(),
        hashes_requested = divergence.stats.hashes_requested,
        subtrees_matched = divergence.stats.subtrees_matched,
        "Reconciliation completed"
    );

    Ok(divergence)
}
