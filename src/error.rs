//! Error types for Merkle tree construction, querying and leaf sources.

use thiserror::Error;

/// Errors raised while building or querying a tree, or while producing its leaves
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unsupported hashing scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid digest length: expected {expected} bytes, got {actual}")]
    InvalidDigestLength { expected: usize, actual: usize },

    #[error("Cannot build a tree from an empty leaf source")]
    EmptySource,

    #[error("Level {level} out of range for tree of depth {depth}")]
    LevelOutOfRange { level: usize, depth: usize },

    #[error("Invalid hex digest: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Source I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for TreeError {
    fn from(err: config::ConfigError) -> Self {
        TreeError::Configuration(err.to_string())
    }
}
