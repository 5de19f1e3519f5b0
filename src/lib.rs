//! merkle-sync: level-by-level Merkle tree comparison
//!
//! Builds an n-ary hash tree over an ordered list of leaf digests (or over
//! the chunks of a file) and compares it against a peer's tree one level at
//! a time, so that differing regions can be localized without exchanging
//! the data itself.

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod source;
pub mod tree;
pub mod types;

pub use diff::{find_divergent_leaves, DiffStats, Divergence, PeerLevels};
pub use error::TreeError;
pub use source::{FileChunk, FileChunkSource, HashedSource, LeafSource};
pub use tree::builder::TreeBuilder;
pub use tree::hasher::HashingScheme;
pub use tree::node::{Node, NodeKind};
pub use tree::MerkleTree;
pub use types::{BranchingFactor, Digest, NodePosition};
