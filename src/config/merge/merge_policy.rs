//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources (global file, workspace files, environment) override these.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("tree.hashing_scheme", "sha1")?
        .set_default("tree.branching_factor", 2_i64)?
        .set_default("tree.chunk_size", crate::config::DEFAULT_CHUNK_SIZE as i64)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
