//! CLI parse: clap types for merkle-sync. No behavior; definitions only.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// merkle-sync CLI - Level-by-level Merkle tree comparison of large files
#[derive(Parser)]
#[command(name = "merkle-sync")]
#[command(about = "Localize differences between large files by comparing Merkle trees level by level")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (where config/ is looked up)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Tree settings that override the `[tree]` configuration section
#[derive(Args, Debug, Clone, Default)]
pub struct TreeOptions {
    /// Bytes per leaf
    #[arg(long)]
    pub chunk_size: Option<u64>,

    /// Maximum children per internal node
    #[arg(long)]
    pub branching_factor: Option<usize>,

    /// Hashing scheme (sha1, blake3)
    #[arg(long)]
    pub scheme: Option<String>,
}

/// Rendering of command results
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a tree over a file and report its root
    Build {
        /// File to hash
        file: PathBuf,

        #[command(flatten)]
        tree: TreeOptions,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show the hashes of every level (or one level) of a file's tree
    Levels {
        /// File to hash
        file: PathBuf,

        #[command(flatten)]
        tree: TreeOptions,

        /// Only show this level (0 is the root)
        #[arg(long)]
        level: Option<usize>,
    },
    /// Compare two files level by level and report the differing byte ranges
    Diff {
        /// Local file
        local: PathBuf,

        /// Remote file (stands in for a peer's tree)
        remote: PathBuf,

        #[command(flatten)]
        tree: TreeOptions,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the effective configuration as TOML
    Config,
}
