//! Property-based tests for tree shape, determinism and comparison

use merkle_sync::tree::hasher::hash;
use merkle_sync::{
    find_divergent_leaves, BranchingFactor, Digest, HashingScheme, TreeBuilder,
};
use proptest::prelude::*;

/// Leaf digests over `blocks`, each prefixed with its position so no two leaves collide
fn digests(blocks: &[Vec<u8>]) -> Vec<Digest> {
    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let mut bytes = (i as u64).to_be_bytes().to_vec();
            bytes.extend_from_slice(block);
            hash(HashingScheme::Sha1, &bytes)
        })
        .collect()
}

fn blocks_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(any::<Vec<u8>>(), 1..80)
}

/// Level sizes follow ceil(n / b) and node count is their sum
#[test]
fn test_node_count_accounting_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(1usize..300, 2usize..9), |(leaf_count, factor)| {
            let leaves: Vec<Digest> = (0..leaf_count)
                .map(|i| hash(HashingScheme::Sha1, &(i as u64).to_be_bytes()))
                .collect();
            let tree = TreeBuilder::default()
                .with_branching_factor(BranchingFactor::new(factor).unwrap())
                .build(leaves)
                .unwrap();

            let mut expected = vec![leaf_count];
            while let Some(&last) = expected.last() {
                if last == 1 {
                    break;
                }
                expected.push(last.div_ceil(factor));
            }
            expected.reverse();

            let sizes: Vec<usize> = tree.levels().iter().map(Vec::len).collect();
            prop_assert_eq!(&sizes, &expected);
            prop_assert_eq!(tree.node_count(), expected.iter().sum::<usize>());
            prop_assert_eq!(tree.depth(), expected.len());
            Ok(())
        })
        .unwrap();
}

/// Same leaves always give the same tree
#[test]
fn test_build_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(blocks_strategy(), 2usize..6), |(blocks, factor)| {
            let builder = TreeBuilder::default()
                .with_branching_factor(BranchingFactor::new(factor).unwrap());
            let first = builder.build(digests(&blocks)).unwrap();
            let second = builder.build(digests(&blocks)).unwrap();

            prop_assert_eq!(first.root_hash(), second.root_hash());
            for level in 0..first.depth() {
                prop_assert_eq!(
                    first.hashes_at_level(level).unwrap(),
                    second.hashes_at_level(level).unwrap()
                );
            }
            Ok(())
        })
        .unwrap();
}

/// Comparing a tree with itself reports nothing at any level
#[test]
fn test_identical_compare_empty_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&blocks_strategy(), |blocks| {
            let tree = TreeBuilder::default().build(digests(&blocks)).unwrap();
            for level in 0..tree.depth() {
                let ours = tree.hashes_at_level(level).unwrap();
                prop_assert!(tree.compare_hashes_at_level(level, &ours).unwrap().is_empty());
            }
            prop_assert!(find_divergent_leaves(&tree, &tree).unwrap().is_empty());
            Ok(())
        })
        .unwrap();
}

/// Replacing one leaf is found by the level walk and by a leaf-level compare
#[test]
fn test_single_leaf_mutation_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(blocks_strategy(), any::<prop::sample::Index>()),
            |(blocks, index)| {
                let target = index.index(blocks.len());
                let local_leaves = digests(&blocks);
                let mut peer_leaves = local_leaves.clone();
                peer_leaves[target] = hash(HashingScheme::Sha1, b"mutated leaf");

                let builder = TreeBuilder::default();
                let local = builder.build(local_leaves.clone()).unwrap();
                let peer = builder.build(peer_leaves.clone()).unwrap();

                prop_assert_ne!(local.root_hash(), peer.root_hash());

                // Exactly the changed leaf's ancestor path differs
                for level in 0..local.depth() {
                    let theirs = peer.hashes_at_level(level).unwrap();
                    let differing = local.compare_hashes_at_level(level, &theirs).unwrap();
                    prop_assert_eq!(differing.len(), 1, "level {}", level);
                    let ours = local.hashes_at_level(level).unwrap();
                    prop_assert_eq!(
                        peer.compare_hashes_at_level(level, &ours).unwrap().len(),
                        1
                    );
                }

                let leaf_level = local.depth() - 1;
                let differing = local
                    .compare_hashes_at_level(leaf_level, &peer.hashes_at_level(leaf_level).unwrap())
                    .unwrap();
                prop_assert_eq!(differing, vec![local_leaves[target].clone()]);

                let divergence = find_divergent_leaves(&local, &peer).unwrap();
                prop_assert_eq!(divergence.leaves, vec![target]);
                Ok(())
            },
        )
        .unwrap();
}

/// Every digest in the tree is found at or above the node carrying it
#[test]
fn test_find_node_by_hash_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&blocks_strategy(), |blocks| {
            let tree = TreeBuilder::default().build(digests(&blocks)).unwrap();
            for (level, nodes) in tree.levels().iter().enumerate() {
                for (index, node) in nodes.iter().enumerate() {
                    let found = tree.find_node_by_hash(node.digest());
                    prop_assert!(found.is_some());
                    prop_assert_eq!(found.unwrap().digest(), node.digest());

                    // A lone child is passed up, so its first occurrence can be higher
                    let position = tree.position_of(node.digest()).unwrap();
                    prop_assert!(position.level <= level);
                    if position.level == level {
                        prop_assert_eq!(position.index, index);
                    }
                }
            }
            prop_assert!(tree
                .find_node_by_hash(&hash(HashingScheme::Sha1, b"not in the tree"))
                .is_none());
            Ok(())
        })
        .unwrap();
}
