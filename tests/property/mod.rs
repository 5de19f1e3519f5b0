//! Property-based tests for tree construction and comparison

mod determinism;
