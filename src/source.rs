//! Leaf-digest sources
//!
//! A tree is always built from a fully materialized, ordered list of leaf
//! digests. Sources produce that list either from digests computed elsewhere
//! or by hashing fixed-size ranges of a file.

mod file;
mod hashed;

pub use file::{FileChunk, FileChunkSource};
pub use hashed::HashedSource;

use crate::error::TreeError;
use crate::tree::hasher::HashingScheme;
use crate::types::Digest;

/// Producer of ordered leaf digests
pub trait LeafSource {
    /// Leaf digests in order, each `scheme.digest_len()` bytes wide
    fn leaf_digests(&self, scheme: HashingScheme) -> Result<Vec<Digest>, TreeError>;
}

impl LeafSource for [Digest] {
    fn leaf_digests(&self, scheme: HashingScheme) -> Result<Vec<Digest>, TreeError> {
        hashed::validated(self, scheme)
    }
}
