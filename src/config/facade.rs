//! Config loader facade: layers defaults, files and environment into a [`SyncConfig`].

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::SyncConfig;
use config::{ConfigError, Environment, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads configuration from the standard locations
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace
    ///
    /// Precedence, lowest first: built-in defaults, global config file,
    /// `config/config.toml`, `config/{MERKLE_SYNC_ENV}.toml`, then
    /// `MERKLE_SYNC_*` environment variables (`MERKLE_SYNC_TREE__CHUNK_SIZE=65536`).
    pub fn load(workspace_root: &Path) -> Result<SyncConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let config = builder
            .add_source(Self::environment())
            .build()?
            .try_deserialize::<SyncConfig>()?;
        debug!(workspace = %workspace_root.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from one explicit file, still honoring environment overrides
    pub fn load_from_file(path: &Path) -> Result<SyncConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true))
            .add_source(Self::environment())
            .build()?
            .try_deserialize::<SyncConfig>()
    }

    /// Path of the global configuration file, if one can be determined
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn environment() -> Environment {
        Environment::with_prefix("MERKLE_SYNC")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }
}
