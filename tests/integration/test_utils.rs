//! Shared helpers for integration tests

use merkle_sync::tree::hasher::hash;
use merkle_sync::{Digest, HashingScheme};

pub fn sha1(text: &str) -> Digest {
    hash(HashingScheme::Sha1, text.as_bytes())
}

pub fn hex(text: &str) -> Digest {
    Digest::from_hex(text).unwrap()
}

/// Four leaves hashed from "first hash" .. "fourth hash"
pub fn four_leaves() -> Vec<Digest> {
    ["first hash", "second hash", "third hash", "fourth hash"]
        .iter()
        .map(|text| sha1(text))
        .collect()
}

/// `count` distinct leaves hashed from "block {i}"
pub fn block_leaves(scheme: HashingScheme, count: usize) -> Vec<Digest> {
    (0..count)
        .map(|i| hash(scheme, format!("block {}", i).as_bytes()))
        .collect()
}
