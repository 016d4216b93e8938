//! Differential comparison of two folded profiles.
//!
//! Both profiles are aggregated into a flat stack table (and, for the tree
//! modes, a stack trie). Rows are then produced by one of three strategies:
//!
//! - `DiffMode::Flat`: exact-stack deltas only
//! - `DiffMode::TreeSelf`: every trie node with its own counts
//! - `DiffMode::TreePropagated`: every trie node with descendants rolled up
//!
//! # Example
//! ```ignore
//! use flamediff::diff::from_files;
//! use flamediff::output::write_folded;
//! use flamediff::utils::DiffOptions;
//!
//! let options = DiffOptions::new().with_normalize(true);
//! let result = from_files(&options, "before.folded", "after.folded")?;
//! write_folded(&result.rows, std::io::stdout().lock())?;
//! ```

mod engine;
mod normalizer;
mod output;
mod schema;
mod threshold;

// Public API exports
pub use engine::{compute_flat, compute_tree, from_files, from_readers, DiffEngine, RowContext};
pub use normalizer::{relative_change_percent, Normalizer};
pub use output::{render_terminal_diff, DEFAULT_TOP_ROWS};
pub use schema::{
    DiffMode, DiffReport, DiffResult, DiffRow, IngestStats, ReportInputs, ReportRow, Totals,
};
pub use threshold::SignificanceFilter;

// Error type
use std::path::PathBuf;
use thiserror::Error;

use crate::utils::error::{ConfigError, OutputError};

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Cannot read input {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read input: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write output: {0}")]
    Output(#[from] OutputError),
}
