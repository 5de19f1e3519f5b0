//! Configuration System
//!
//! Layered configuration for tree construction and logging. Defaults can be
//! overridden by a global file, workspace files and environment variables;
//! see [`ConfigLoader`].

use crate::error::TreeError;
use crate::logging::LoggingConfig;
use crate::tree::hasher::HashingScheme;
use crate::types::BranchingFactor;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Default file chunk size: 2 MiB
pub const DEFAULT_CHUNK_SIZE: u64 = 2 * 1024 * 1024;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Tree construction settings
    #[serde(default)]
    pub tree: TreeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tree construction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Hashing scheme name: sha1 or blake3
    #[serde(default = "default_hashing_scheme")]
    pub hashing_scheme: String,

    /// Maximum children per internal node
    #[serde(default = "default_branching_factor")]
    pub branching_factor: usize,

    /// Bytes per leaf when hashing files
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u64,
}

fn default_hashing_scheme() -> String {
    HashingScheme::default().name().to_string()
}

fn default_branching_factor() -> usize {
    BranchingFactor::default().get()
}

fn default_chunk_size() -> u64 {
    DEFAULT_CHUNK_SIZE
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            hashing_scheme: default_hashing_scheme(),
            branching_factor: default_branching_factor(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl TreeConfig {
    pub fn scheme(&self) -> Result<HashingScheme, TreeError> {
        self.hashing_scheme.parse()
    }

    pub fn branching(&self) -> Result<BranchingFactor, TreeError> {
        BranchingFactor::new(self.branching_factor)
    }

    /// Validate tree configuration
    pub fn validate(&self) -> Result<(), TreeError> {
        self.scheme()?;
        self.branching()?;
        if self.chunk_size == 0 {
            return Err(TreeError::Configuration(
                "Chunk size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl SyncConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), TreeError> {
        self.tree.validate()?;
        self.logging.validate()
    }

    /// Render as TOML, the format configuration files are written in
    pub fn to_toml(&self) -> Result<String, TreeError> {
        toml::to_string_pretty(self)
            .map_err(|e| TreeError::Configuration(format!("Failed to render config: {}", e)))
    }
}
