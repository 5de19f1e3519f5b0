//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::TreeError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &TreeError) -> String {
    match e {
        TreeError::EmptySource => format!("{} (is the input file empty?)", e),
        TreeError::UnsupportedScheme(_) => format!("{} (supported: sha1, blake3)", e),
        _ => e.to_string(),
    }
}
