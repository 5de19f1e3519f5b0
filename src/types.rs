//! Core value types shared by the tree, its sources and the diff walker.

use crate::error::TreeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-width output of a hashing scheme.
///
/// Equality, ordering and hashing are byte-wise. The width is owned by the
/// [`HashingScheme`](crate::tree::hasher::HashingScheme) that produced it; a
/// `Digest` itself never changes after construction.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest(Vec<u8>);

impl Digest {
    /// Wrap raw digest bytes without checking their width
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse a hex string (either case)
    pub fn from_hex(encoded: &str) -> Result<Self, TreeError> {
        Ok(Self(hex::decode(encoded.trim())?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Upper-case hex rendering
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.0)
    }

    /// First `len` hex characters, for compact display
    pub fn short_hex(&self, len: usize) -> String {
        let full = self.to_hex();
        full[..full.len().min(len)].to_string()
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> From<[u8; N]> for Digest {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Digest {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Maximum number of children per internal node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct BranchingFactor(usize);

impl BranchingFactor {
    /// Binary fan-out, used when nothing else is configured
    pub const TWO: BranchingFactor = BranchingFactor(2);

    /// Validate a fan-out; anything below two cannot reduce a level
    pub fn new(factor: usize) -> Result<Self, TreeError> {
        if factor < 2 {
            return Err(TreeError::Configuration(format!(
                "Branching factor must be at least 2, got {}",
                factor
            )));
        }
        Ok(Self(factor))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for BranchingFactor {
    fn default() -> Self {
        Self::TWO
    }
}

impl TryFrom<usize> for BranchingFactor {
    type Error = TreeError;

    fn try_from(factor: usize) -> Result<Self, Self::Error> {
        Self::new(factor)
    }
}

impl From<BranchingFactor> for usize {
    fn from(factor: BranchingFactor) -> Self {
        factor.0
    }
}

impl fmt::Display for BranchingFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Address of a node in the level table: level 0 is the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePosition {
    pub level: usize,
    pub index: usize,
}
