//! CLI presentation: text and json formatters per command.

use crate::error::TreeError;
use crate::source::FileChunk;
use crate::tree::MerkleTree;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

/// Result of `merkle-sync build`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSummary {
    pub file: String,
    pub scheme: String,
    pub branching_factor: usize,
    pub chunk_size: u64,
    pub leaf_count: usize,
    pub node_count: usize,
    pub depth: usize,
    pub root_hash: String,
}

/// Mismatch counts for one level compared in both directions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelMismatch {
    pub level: usize,
    pub local_only: usize,
    pub remote_only: usize,
}

/// A leaf that differs, with the byte range of the file it covers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeReport {
    pub leaf: usize,
    pub start_offset: u64,
    pub end_offset: u64,
}

impl RangeReport {
    pub fn new(leaf: usize, chunk: FileChunk) -> Self {
        Self {
            leaf,
            start_offset: chunk.start_offset,
            end_offset: chunk.end_offset,
        }
    }
}

/// Result of `merkle-sync diff`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffSummary {
    pub local: BuildSummary,
    pub remote: BuildSummary,
    pub roots_match: bool,
    pub levels: Vec<LevelMismatch>,
    pub local_ranges: Vec<RangeReport>,
    pub remote_ranges: Vec<RangeReport>,
    pub hashes_requested: usize,
}

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, TreeError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| TreeError::Configuration(format!("Failed to render JSON: {}", e)))
}

pub fn format_build_text(summary: &BuildSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Tree")));
    out.push_str(&format!("  File: {}\n", summary.file));
    out.push_str(&format!("  Root hash: {}\n", summary.root_hash));
    out.push_str(&format!("  Scheme: {}\n", summary.scheme));
    out.push_str(&format!("  Branching factor: {}\n", summary.branching_factor));
    out.push_str(&format!("  Chunk size: {} bytes\n", summary.chunk_size));
    out.push_str(&format!("  Leaves: {}\n", summary.leaf_count));
    out.push_str(&format!("  Nodes: {}\n", summary.node_count));
    out.push_str(&format!("  Depth: {}", summary.depth));
    out
}

/// Table of every node at the requested levels
pub fn format_levels_table(tree: &MerkleTree, only_level: Option<usize>) -> Result<String, TreeError> {
    let levels: Vec<usize> = match only_level {
        Some(level) => {
            tree.nodes_at_level(level)?;
            vec![level]
        }
        None => (0..tree.depth()).collect(),
    };

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Level", "Index", "Hash", "Children"]);
    for level in levels {
        for (index, node) in tree.nodes_at_level(level)?.iter().enumerate() {
            let children = match node.child_range() {
                Some(range) => format!("{}..{}", range.start, range.end),
                None => "leaf".to_string(),
            };
            table.add_row(vec![
                level.to_string(),
                index.to_string(),
                node.digest().to_hex(),
                children,
            ]);
        }
    }
    Ok(format!("{}", table))
}

pub fn format_diff_text(summary: &DiffSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Roots")));
    out.push_str(&format!("  Local:  {}\n", summary.local.root_hash));
    out.push_str(&format!("  Remote: {}\n", summary.remote.root_hash));
    if summary.roots_match {
        out.push_str(&format!("  {}\n", "Trees are identical".green()));
        return out;
    }
    out.push_str(&format!("  {}\n\n", "Trees differ".red()));

    out.push_str(&format!("{}\n\n", format_section_heading("Levels")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Level", "Local only", "Remote only"]);
    for row in &summary.levels {
        table.add_row(vec![
            row.level.to_string(),
            row.local_only.to_string(),
            row.remote_only.to_string(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));

    for (title, ranges) in [
        ("Divergent local ranges", &summary.local_ranges),
        ("Divergent remote ranges", &summary.remote_ranges),
    ] {
        out.push_str(&format!("{}\n\n", format_section_heading(title)));
        if ranges.is_empty() {
            out.push_str("  none\n\n");
            continue;
        }
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Leaf", "Start", "End", "Bytes"]);
        for range in ranges {
            table.add_row(vec![
                range.leaf.to_string(),
                range.start_offset.to_string(),
                range.end_offset.to_string(),
                (range.end_offset - range.start_offset).to_string(),
            ]);
        }
        out.push_str(&format!("{}\n\n", table));
    }
    out.push_str(&format!(
        "  Hashes requested from peer: {}",
        summary.hashes_requested
    ));
    out
}
