//! Precomputed leaf digests

use crate::error::TreeError;
use crate::source::LeafSource;
use crate::tree::hasher::HashingScheme;
use crate::types::Digest;

/// Leaf digests that were already computed, used as-is
#[derive(Debug, Clone, Default)]
pub struct HashedSource {
    digests: Vec<Digest>,
}

impl HashedSource {
    pub fn new(digests: Vec<Digest>) -> Self {
        Self { digests }
    }

    /// Parse one hex digest per entry
    pub fn from_hex<I, S>(encoded: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let digests = encoded
            .into_iter()
            .map(|entry| Digest::from_hex(entry.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(digests))
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}

impl LeafSource for HashedSource {
    fn leaf_digests(&self, scheme: HashingScheme) -> Result<Vec<Digest>, TreeError> {
        validated(&self.digests, scheme)
    }
}

/// Copy `digests` after checking each one has the scheme's width
pub(super) fn validated(digests: &[Digest], scheme: HashingScheme) -> Result<Vec<Digest>, TreeError> {
    let expected = scheme.digest_len();
    if let Some(bad) = digests.iter().find(|digest| digest.len() != expected) {
        return Err(TreeError::InvalidDigestLength {
            expected,
            actual: bad.len(),
        });
    }
    Ok(digests.to_vec())
}
