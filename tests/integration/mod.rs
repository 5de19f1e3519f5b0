//! Integration tests for merkle-sync

mod level_diff;
mod test_utils;
mod tree_determinism;
