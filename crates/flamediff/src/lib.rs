//! Flamediff library
//!
//! Differential comparison of two folded-stack profiles. Each input line is a
//! semicolon-joined call stack followed by a sample count; the output merges
//! both profiles into `stack count_a count_b` lines suitable for differential
//! flamegraph rendering.
//!
//! ## Getting Started
//!
//! ```bash
//! cargo install flamediff-cli
//! flamediff before.folded after.folded > diff.folded
//! ```

pub mod aggregator;
pub mod commands;
pub mod diff;
pub mod output;
pub mod parser;
pub mod utils;
