//! Digest computation for leaves and parent nodes
//!
//! A parent digest is the hash of its children's digests concatenated in
//! order, except that a lone child is passed through unchanged. Two parties
//! only agree on a root if both apply exactly these rules.

use crate::error::TreeError;
use crate::types::Digest;
use serde::{Deserialize, Serialize};
use sha1::{Digest as _, Sha1};
use std::fmt;
use std::str::FromStr;

/// Hash function used for leaves and for composing parents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashingScheme {
    /// SHA-1, 20-byte digests
    #[default]
    Sha1,
    /// BLAKE3, 32-byte digests
    Blake3,
}

impl HashingScheme {
    /// Fixed width of every digest this scheme produces
    pub fn digest_len(self) -> usize {
        match self {
            HashingScheme::Sha1 => 20,
            HashingScheme::Blake3 => blake3::OUT_LEN,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HashingScheme::Sha1 => "sha1",
            HashingScheme::Blake3 => "blake3",
        }
    }

    fn hasher(self) -> SchemeHasher {
        match self {
            HashingScheme::Sha1 => SchemeHasher::Sha1(Sha1::new()),
            HashingScheme::Blake3 => SchemeHasher::Blake3(Box::new(blake3::Hasher::new())),
        }
    }
}

impl fmt::Display for HashingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashingScheme {
    type Err = TreeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(HashingScheme::Sha1),
            "blake3" => Ok(HashingScheme::Blake3),
            other => Err(TreeError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Incremental state for one digest computation
enum SchemeHasher {
    Sha1(Sha1),
    Blake3(Box<blake3::Hasher>),
}

impl SchemeHasher {
    fn update(&mut self, bytes: &[u8]) {
        match self {
            SchemeHasher::Sha1(state) => state.update(bytes),
            SchemeHasher::Blake3(state) => {
                state.update(bytes);
            }
        }
    }

    fn finalize(self) -> Digest {
        match self {
            SchemeHasher::Sha1(state) => Digest::from_bytes(state.finalize().to_vec()),
            SchemeHasher::Blake3(state) => Digest::from(*state.finalize().as_bytes()),
        }
    }
}

/// Hash arbitrary bytes
pub fn hash(scheme: HashingScheme, bytes: &[u8]) -> Digest {
    let mut hasher = scheme.hasher();
    hasher.update(bytes);
    hasher.finalize()
}

/// Compute a parent digest from its children's digests
///
/// A single child is returned as-is. Otherwise every child must be exactly
/// `scheme.digest_len()` bytes, and the result is `hash(child_0 || child_1 || ...)`.
pub fn compose_children<'a, I>(scheme: HashingScheme, children: I) -> Result<Digest, TreeError>
where
    I: IntoIterator<Item = &'a Digest>,
{
    let children: Vec<&Digest> = children.into_iter().collect();
    if let [only] = children.as_slice() {
        return Ok((*only).clone());
    }

    let expected = scheme.digest_len();
    let mut hasher = scheme.hasher();
    for child in children {
        if child.len() != expected {
            return Err(TreeError::InvalidDigestLength {
                expected,
                actual: child.len(),
            });
        }
        hasher.update(child.as_bytes());
    }
    Ok(hasher.finalize())
}
