//! Level-by-level reconciliation between two trees

use super::test_utils::block_leaves;
use merkle_sync::tree::hasher::hash;
use merkle_sync::{
    find_divergent_leaves, BranchingFactor, Digest, HashingScheme, MerkleTree, PeerLevels,
    TreeBuilder, TreeError,
};
use std::cell::Cell;

/// Peer wrapper that counts the requests a reconciliation makes
struct CountingPeer<'a> {
    tree: &'a MerkleTree,
    requests: Cell<usize>,
}

impl PeerLevels for CountingPeer<'_> {
    fn depth(&self) -> usize {
        self.tree.depth()
    }

    fn hashes_at_level(&self, level: usize) -> Result<Vec<Digest>, TreeError> {
        self.requests.set(self.requests.get() + 1);
        self.tree.hashes_at_level(level)
    }

    fn children_hashes_of_hash(
        &self,
        level: usize,
        digest: &Digest,
    ) -> Result<Vec<Digest>, TreeError> {
        self.requests.set(self.requests.get() + 1);
        self.tree.children_hashes_of_hash(level, digest)
    }
}

#[test]
fn test_identical_trees_need_one_request() {
    let tree = TreeBuilder::default()
        .build(block_leaves(HashingScheme::Sha1, 64))
        .unwrap();
    let peer = CountingPeer {
        tree: &tree,
        requests: Cell::new(0),
    };

    let divergence = find_divergent_leaves(&tree, &peer).unwrap();
    assert!(divergence.is_empty());
    assert_eq!(peer.requests.get(), 1);
}

#[test]
fn test_single_change_walks_one_path() {
    let builder = TreeBuilder::default();
    let local = builder
        .build(block_leaves(HashingScheme::Sha1, 64))
        .unwrap();
    let mut changed = block_leaves(HashingScheme::Sha1, 64);
    changed[37] = hash(HashingScheme::Sha1, b"edited");
    let remote = builder.build(changed).unwrap();
    let peer = CountingPeer {
        tree: &remote,
        requests: Cell::new(0),
    };

    let divergence = find_divergent_leaves(&local, &peer).unwrap();
    assert_eq!(divergence.leaves, vec![37]);
    // Root request plus one child request per internal level on the path
    assert_eq!(peer.requests.get(), 1 + (local.depth() - 1));
    assert_eq!(divergence.stats.hashes_requested, 1 + 2 * (local.depth() - 1));
}

#[test]
fn test_every_level_agrees_with_divergence() {
    let builder = TreeBuilder::new(HashingScheme::Blake3)
        .with_branching_factor(BranchingFactor::new(4).unwrap());
    let local = builder
        .build(block_leaves(HashingScheme::Blake3, 40))
        .unwrap();
    let mut changed = block_leaves(HashingScheme::Blake3, 40);
    for index in [3, 4, 22] {
        changed[index] = hash(HashingScheme::Blake3, format!("edit {}", index).as_bytes());
    }
    let remote = builder.build(changed).unwrap();

    let divergence = find_divergent_leaves(&local, &remote).unwrap();
    assert_eq!(divergence.leaves, vec![3, 4, 22]);

    let leaf_level = local.depth() - 1;
    let differing = local
        .compare_hashes_at_level(leaf_level, &remote.hashes_at_level(leaf_level).unwrap())
        .unwrap();
    let expected: Vec<Digest> = divergence
        .leaves
        .iter()
        .map(|&index| local.levels()[leaf_level][index].digest().clone())
        .collect();
    assert_eq!(differing, expected);
}

#[test]
fn test_compare_with_shorter_and_empty_peer_levels() {
    let tree = TreeBuilder::default()
        .build(block_leaves(HashingScheme::Sha1, 6))
        .unwrap();
    let leaf_level = tree.depth() - 1;
    let ours = tree.hashes_at_level(leaf_level).unwrap();

    // Missing tail entries are reported
    let differing = tree
        .compare_hashes_at_level(leaf_level, &ours[..4])
        .unwrap();
    assert_eq!(differing, ours[4..].to_vec());

    // Extra peer entries are ignored
    let mut longer = ours.clone();
    longer.push(hash(HashingScheme::Sha1, b"extra"));
    assert!(tree
        .compare_hashes_at_level(leaf_level, &longer)
        .unwrap()
        .is_empty());

    assert_eq!(tree.compare_hashes_at_level(leaf_level, &[]).unwrap(), ours);
}

#[test]
fn test_peer_with_different_scheme_diverges_everywhere() {
    let sha1_tree = TreeBuilder::new(HashingScheme::Sha1)
        .build(block_leaves(HashingScheme::Sha1, 4))
        .unwrap();
    let blake3_tree = TreeBuilder::new(HashingScheme::Blake3)
        .build(block_leaves(HashingScheme::Blake3, 4))
        .unwrap();

    let divergence = find_divergent_leaves(&sha1_tree, &blake3_tree).unwrap();
    assert_eq!(divergence.leaves, vec![0, 1, 2, 3]);
}
