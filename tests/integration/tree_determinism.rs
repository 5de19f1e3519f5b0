//! Integration tests for tree building determinism

use super::test_utils::block_leaves;
use merkle_sync::tree::hasher::hash;
use merkle_sync::{BranchingFactor, HashedSource, HashingScheme, TreeBuilder};

/// Same leaves produce the same root, every time
#[test]
fn test_same_leaves_same_root() {
    for scheme in [HashingScheme::Sha1, HashingScheme::Blake3] {
        let builder = TreeBuilder::new(scheme);
        let root1 = builder.compute_root(block_leaves(scheme, 13)).unwrap();
        let root2 = builder.compute_root(block_leaves(scheme, 13)).unwrap();
        assert_eq!(root1, root2);
        assert_eq!(root1.len(), scheme.digest_len());
    }
}

/// Leaf order is significant
#[test]
fn test_leaf_order_changes_root() {
    let builder = TreeBuilder::default();
    let leaves = block_leaves(HashingScheme::Sha1, 6);
    let mut swapped = leaves.clone();
    swapped.swap(1, 4);

    assert_ne!(
        builder.compute_root(leaves).unwrap(),
        builder.compute_root(swapped).unwrap()
    );
}

/// Appending a leaf changes the root
#[test]
fn test_leaf_addition_changes_root() {
    let builder = TreeBuilder::default();
    assert_ne!(
        builder
            .compute_root(block_leaves(HashingScheme::Sha1, 8))
            .unwrap(),
        builder
            .compute_root(block_leaves(HashingScheme::Sha1, 9))
            .unwrap()
    );
}

/// Branching factor is part of the tree's identity
#[test]
fn test_branching_factor_changes_root() {
    let leaves = block_leaves(HashingScheme::Sha1, 9);
    let binary = TreeBuilder::default().compute_root(leaves.clone()).unwrap();
    let ternary = TreeBuilder::default()
        .with_branching_factor(BranchingFactor::new(3).unwrap())
        .compute_root(leaves)
        .unwrap();
    assert_ne!(binary, ternary);
}

/// Level sizes shrink by ceil(n / b) and the counts add up
#[test]
fn test_level_shape() {
    let tree = TreeBuilder::default()
        .build(block_leaves(HashingScheme::Sha1, 5))
        .unwrap();

    let sizes: Vec<usize> = tree.levels().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![1, 2, 3, 5]);
    assert_eq!(tree.node_count(), 11);
    assert_eq!(tree.depth(), 4);

    let wide = TreeBuilder::default()
        .with_branching_factor(BranchingFactor::new(4).unwrap())
        .build(block_leaves(HashingScheme::Sha1, 17))
        .unwrap();
    let sizes: Vec<usize> = wide.levels().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![1, 2, 5, 17]);
}

/// Single leaf: the root is the leaf
#[test]
fn test_single_leaf_tree() {
    let leaf = hash(HashingScheme::Sha1, b"only");
    let tree = TreeBuilder::default().build(vec![leaf.clone()]).unwrap();

    assert_eq!(tree.root_hash(), &leaf);
    assert_eq!(tree.depth(), 1);
    assert_eq!(tree.node_count(), 1);
    assert!(tree.root().is_leaf());
}

/// Prehashed hex digests build the same tree as the raw digests
#[test]
fn test_hashed_source_from_hex() {
    let leaves = block_leaves(HashingScheme::Sha1, 4);
    let encoded: Vec<String> = leaves.iter().map(|leaf| leaf.to_hex()).collect();
    let source = HashedSource::from_hex(&encoded).unwrap();

    let builder = TreeBuilder::default();
    assert_eq!(
        builder.build_from_source(&source).unwrap().root_hash(),
        builder.build(leaves).unwrap().root_hash()
    );
}

/// Leaves of the wrong width are rejected
#[test]
fn test_mismatched_digest_width_rejected() {
    let leaves = block_leaves(HashingScheme::Blake3, 4);
    let result = TreeBuilder::new(HashingScheme::Sha1).build_from_source(&HashedSource::new(leaves));
    assert!(result.is_err());
}
