//! Data structures produced by the diff engine.
//!
//! `DiffResult` is the in-memory outcome of one run; `DiffReport` is its
//! serialized JSON form.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::normalizer::relative_change_percent;
use crate::utils::config::DiffOptions;

/// Strategy used to turn aggregated counts into rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffMode {
    /// One row per exact stack seen in either profile
    Flat,
    /// One row per trie node, own counts only
    TreeSelf,
    /// One row per trie node, counts include all descendants
    TreePropagated,
}

impl fmt::Display for DiffMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiffMode::Flat => "flat",
            DiffMode::TreeSelf => "tree (self counts)",
            DiffMode::TreePropagated => "tree (propagated)",
        };
        f.write_str(name)
    }
}

/// One output row: a stack with both profiles' counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffRow {
    /// Semicolon-joined stack key
    pub stack: String,

    /// Profile A count, normalized if requested
    pub count_a: f64,

    /// Profile B count
    pub count_b: f64,

    /// `count_b - count_a`
    pub delta: f64,
}

impl DiffRow {
    pub fn new(stack: impl Into<String>, count_a: f64, count_b: f64) -> Self {
        Self {
            stack: stack.into(),
            count_a,
            count_b,
            delta: count_b - count_a,
        }
    }

    /// Relative change in percent; see [`relative_change_percent`]
    pub fn relative_change_percent(&self) -> f64 {
        relative_change_percent(self.count_a, self.count_b)
    }
}

/// Raw sample totals per profile, as ingested
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub a: f64,
    pub b: f64,
}

/// Line accounting for one input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Lines that produced a record
    pub parsed: usize,

    /// Blank or malformed lines that were ignored
    pub skipped: usize,
}

/// Complete outcome of one diff run
#[derive(Debug, Clone)]
pub struct DiffResult {
    pub mode: DiffMode,
    pub totals: Totals,
    pub stats_a: IngestStats,
    pub stats_b: IngestStats,

    /// Surviving rows sorted by stack
    pub rows: Vec<DiffRow>,
}

/// Row as written to the JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub stack: String,
    pub count_a: f64,
    pub count_b: f64,
    pub delta: f64,
    pub relative_change_percent: f64,
}

impl From<&DiffRow> for ReportRow {
    fn from(row: &DiffRow) -> Self {
        Self {
            stack: row.stack.clone(),
            count_a: row.count_a,
            count_b: row.count_b,
            delta: row.delta,
            relative_change_percent: row.relative_change_percent(),
        }
    }
}

/// Input accounting in the JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInputs {
    pub a: IngestStats,
    pub b: IngestStats,
}

/// JSON diff report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffReport {
    /// Report format version
    pub report_version: String,

    /// RFC 3339 timestamp of generation
    pub generated_at: String,

    /// Options the run was made with
    pub options: DiffOptions,

    pub mode: DiffMode,
    pub totals: Totals,
    pub inputs: ReportInputs,
    pub row_count: usize,
    pub rows: Vec<ReportRow>,
}
