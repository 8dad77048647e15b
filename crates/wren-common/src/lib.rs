//! Shared utilities for the Wren tokenizer crates.

/// Deduplicated diagnostic output for parse errors and other warnings.
pub mod warning;
