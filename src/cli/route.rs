//! CLI route: single route table and run context. Dispatches to library services and presentation.

use crate::cli::parse::{Commands, OutputFormat, TreeOptions};
use crate::cli::presentation::{
    format_build_text, format_diff_text, format_levels_table, to_json, BuildSummary, DiffSummary,
    LevelMismatch, RangeReport,
};
use crate::config::{ConfigLoader, SyncConfig, TreeConfig};
use crate::diff::find_divergent_leaves;
use crate::error::TreeError;
use crate::source::{FileChunk, FileChunkSource};
use crate::tree::builder::TreeBuilder;
use crate::tree::MerkleTree;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: workspace and effective configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: SyncConfig,
}

/// A file's tree together with the byte ranges behind its leaves
struct FileTree {
    tree: MerkleTree,
    chunks: Vec<FileChunk>,
    summary: BuildSummary,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, TreeError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Self::with_config(workspace_root, config)
    }

    /// Create run context from an already loaded configuration.
    pub fn with_config(workspace_root: PathBuf, config: SyncConfig) -> Result<Self, TreeError> {
        config.validate()?;
        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, TreeError> {
        match command {
            Commands::Build { file, tree, format } => {
                let file_tree = self.build_file_tree(file, &self.tree_config(tree)?)?;
                match format {
                    OutputFormat::Json => to_json(&file_tree.summary),
                    OutputFormat::Text => Ok(format_build_text(&file_tree.summary)),
                }
            }
            Commands::Levels { file, tree, level } => {
                let file_tree = self.build_file_tree(file, &self.tree_config(tree)?)?;
                format_levels_table(&file_tree.tree, *level)
            }
            Commands::Diff {
                local,
                remote,
                tree,
                format,
            } => {
                let summary = self.diff_files(local, remote, &self.tree_config(tree)?)?;
                match format {
                    OutputFormat::Json => to_json(&summary),
                    OutputFormat::Text => Ok(format_diff_text(&summary)),
                }
            }
            Commands::Config => self.config.to_toml(),
        }
    }

    /// Configured tree settings with command-line overrides applied
    fn tree_config(&self, options: &TreeOptions) -> Result<TreeConfig, TreeError> {
        let mut tree = self.config.tree.clone();
        if let Some(chunk_size) = options.chunk_size {
            tree.chunk_size = chunk_size;
        }
        if let Some(branching_factor) = options.branching_factor {
            tree.branching_factor = branching_factor;
        }
        if let Some(ref scheme) = options.scheme {
            tree.hashing_scheme = scheme.clone();
        }
        tree.validate()?;
        Ok(tree)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }

    fn build_file_tree(&self, file: &Path, config: &TreeConfig) -> Result<FileTree, TreeError> {
        let path = self.resolve(file);
        let source = FileChunkSource::new(&path, config.chunk_size)?;
        let builder = TreeBuilder::from_config(config)?;

        let file_size = std::fs::metadata(&path)?.len();
        let tree = builder.build_from_source(&source)?;
        let chunks = source.chunks()?;

        let summary = BuildSummary {
            file: path.display().to_string(),
            scheme: builder.scheme().to_string(),
            branching_factor: builder.branching_factor().get(),
            chunk_size: source.effective_chunk_size(file_size),
            leaf_count: tree.leaf_count(),
            node_count: tree.node_count(),
            depth: tree.depth(),
            root_hash: tree.root_hash().to_hex(),
        };
        debug!(file = %summary.file, leaves = summary.leaf_count, "Built file tree");

        Ok(FileTree {
            tree,
            chunks,
            summary,
        })
    }

    fn diff_files(
        &self,
        local: &Path,
        remote: &Path,
        config: &TreeConfig,
    ) -> Result<DiffSummary, TreeError> {
        let local = self.build_file_tree(local, config)?;
        let remote = self.build_file_tree(remote, config)?;
        let roots_match = local.tree.root_hash() == remote.tree.root_hash();

        let mut levels = Vec::new();
        if !roots_match {
            for level in 0..local.tree.depth().min(remote.tree.depth()) {
                let local_hashes = local.tree.hashes_at_level(level)?;
                let remote_hashes = remote.tree.hashes_at_level(level)?;
                levels.push(LevelMismatch {
                    level,
                    local_only: local.tree.compare_hashes_at_level(level, &remote_hashes)?.len(),
                    remote_only: remote.tree.compare_hashes_at_level(level, &local_hashes)?.len(),
                });
            }
        }

        let forward = find_divergent_leaves(&local.tree, &remote.tree)?;
        let backward = find_divergent_leaves(&remote.tree, &local.tree)?;

        let summary = DiffSummary {
            roots_match,
            levels,
            local_ranges: ranges(&forward.leaves, &local.chunks),
            remote_ranges: ranges(&backward.leaves, &remote.chunks),
            hashes_requested: forward.stats.hashes_requested,
            local: local.summary,
            remote: remote.summary,
        };
        info!(
            roots_match,
            local_ranges = summary.local_ranges.len(),
            remote_ranges = summary.remote_ranges.len(),
            "Diff completed"
        );
        Ok(summary)
    }
}

fn ranges(leaves: &[usize], chunks: &[FileChunk]) -> Vec<RangeReport> {
    leaves
        .iter()
        .filter_map(|&leaf| chunks.get(leaf).map(|chunk| RangeReport::new(leaf, *chunk)))
        .collect()
}
