//! Core diff engine implementation.
//!
//! A `DiffEngine` owns everything one run needs: the flat count table, the
//! optional stack trie and the per-profile totals. Profiles are ingested one
//! after the other, then `finish` turns the aggregated counts into rows using
//! the strategy picked from the options.

use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::normalizer::Normalizer;
use super::schema::{DiffMode, DiffResult, DiffRow, IngestStats, Totals};
use super::threshold::SignificanceFilter;
use super::DiffError;
use crate::aggregator::{Counts, FlatCountTable, StackTrie};
use crate::output::folded::sort_rows;
use crate::parser::{parse_line, DatasetId, FoldedRecord};
use crate::utils::config::{DiffOptions, READER_CAPACITY};

/// Normalization and filtering applied to every candidate row
#[derive(Debug, Clone, Copy)]
pub struct RowContext {
    pub normalizer: Normalizer,
    pub filter: SignificanceFilter,
}

impl RowContext {
    pub fn new(normalizer: Normalizer, filter: SignificanceFilter) -> Self {
        Self { normalizer, filter }
    }

    /// Identity context: no rescaling, nothing elided
    pub fn passthrough() -> Self {
        Self::new(Normalizer::disabled(), SignificanceFilter::keep_all())
    }

    /// Normalize, compute the delta and apply the significance filter
    pub fn finalize(&self, stack: &str, raw: Counts) -> Option<DiffRow> {
        let count_a = self.normalizer.apply(raw.a);
        let row = DiffRow::new(stack, count_a, raw.b);

        if self.filter.is_significant(row.count_a, row.count_b) {
            debug!(
                "row {} {} {} delta={} change={:.2}%",
                row.stack,
                row.count_a,
                row.count_b,
                row.delta,
                row.relative_change_percent()
            );
            Some(row)
        } else {
            debug!(
                "elided {} {} {} change={:.2}%",
                row.stack,
                row.count_a,
                row.count_b,
                row.relative_change_percent()
            );
            None
        }
    }
}

impl DiffMode {
    /// Produce rows from the aggregated counts.
    ///
    /// The tree modes use `trie` when it was built during ingestion and
    /// otherwise rebuild it from the flat table.
    pub fn compute(
        self,
        table: &FlatCountTable,
        trie: Option<&StackTrie>,
        ctx: &RowContext,
    ) -> Vec<DiffRow> {
        match self {
            DiffMode::Flat => compute_flat(table, ctx),
            DiffMode::TreeSelf | DiffMode::TreePropagated => {
                let rebuilt;
                let trie = match trie {
                    Some(trie) => trie,
                    None => {
                        rebuilt = StackTrie::from_table(table);
                        &rebuilt
                    }
                };
                compute_tree(trie, self == DiffMode::TreePropagated, ctx)
            }
        }
    }
}

/// One row per stack seen in either profile, exact matches only
pub fn compute_flat(table: &FlatCountTable, ctx: &RowContext) -> Vec<DiffRow> {
    let mut rows: Vec<DiffRow> = table
        .iter()
        .filter_map(|(stack, counts)| ctx.finalize(stack, *counts))
        .collect();
    sort_rows(&mut rows);
    rows
}

/// One row per trie node below the root.
///
/// With `propagate` each node's counts include every descendant; without it a
/// node reports only the samples that ended exactly at it, so pure ancestors
/// show up as `0 0`.
pub fn compute_tree(trie: &StackTrie, propagate: bool, ctx: &RowContext) -> Vec<DiffRow> {
    let aggregates = if propagate {
        Some(trie.aggregate_counts())
    } else {
        None
    };

    let mut rows = Vec::with_capacity(trie.len().saturating_sub(1));
    trie.visit(|id, stack| {
        let counts = match &aggregates {
            Some(aggregates) => aggregates[id],
            None => trie.node(id).counts,
        };
        if let Some(row) = ctx.finalize(stack, counts) {
            rows.push(row);
        }
    });

    sort_rows(&mut rows);
    rows
}

/// Per-run state for comparing two profiles
#[derive(Debug)]
pub struct DiffEngine {
    options: DiffOptions,
    mode: DiffMode,
    table: FlatCountTable,
    trie: Option<StackTrie>,
    totals: Totals,
    stats_a: IngestStats,
    stats_b: IngestStats,
}

impl DiffEngine {
    pub fn new(options: DiffOptions) -> Self {
        let mode = options.mode();
        let trie = if options.needs_trie() {
            Some(StackTrie::new())
        } else {
            None
        };

        Self {
            options,
            mode,
            table: FlatCountTable::new(),
            trie,
            totals: Totals::default(),
            stats_a: IngestStats::default(),
            stats_b: IngestStats::default(),
        }
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    pub fn mode(&self) -> DiffMode {
        self.mode
    }

    /// Raw totals ingested so far
    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn stats(&self, dataset: DatasetId) -> IngestStats {
        match dataset {
            DatasetId::A => self.stats_a,
            DatasetId::B => self.stats_b,
        }
    }

    /// Add one parsed record to every structure
    pub fn ingest_record(&mut self, record: &FoldedRecord, dataset: DatasetId) {
        self.table.insert(&record.stack, record.count, dataset);

        if let Some(trie) = self.trie.as_mut() {
            trie.insert(&record.stack, record.count, dataset);
        }

        match dataset {
            DatasetId::A => self.totals.a += record.count,
            DatasetId::B => self.totals.b += record.count,
        }
    }

    fn stats_mut(&mut self, dataset: DatasetId) -> &mut IngestStats {
        match dataset {
            DatasetId::A => &mut self.stats_a,
            DatasetId::B => &mut self.stats_b,
        }
    }

    /// Parse and ingest one line. Returns false if the line was skipped.
    pub fn ingest_line(&mut self, line: &str, dataset: DatasetId) -> bool {
        match parse_line(line, self.options.strip_hex) {
            Some(record) => {
                self.stats_mut(dataset).parsed += 1;
                self.ingest_record(&record, dataset);
                true
            }
            None => {
                self.stats_mut(dataset).skipped += 1;
                debug!(
                    "Skipping unparsable line in profile {}: {:?}",
                    dataset,
                    line.trim_end()
                );
                false
            }
        }
    }

    /// Ingest every line of a reader
    ///
    /// # Errors
    /// * `DiffError::Read` - If the reader fails or yields invalid UTF-8
    pub fn ingest_reader<R: BufRead>(
        &mut self,
        mut reader: R,
        dataset: DatasetId,
    ) -> Result<IngestStats, DiffError> {
        let before = self.stats(dataset);
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            self.ingest_line(&line, dataset);
        }

        let after = self.stats(dataset);
        let stats = IngestStats {
            parsed: after.parsed - before.parsed,
            skipped: after.skipped - before.skipped,
        };
        debug!(
            "Profile {}: {} lines parsed, {} skipped",
            dataset, stats.parsed, stats.skipped
        );
        Ok(stats)
    }

    /// Open `path` and ingest it. The file is closed when this returns.
    ///
    /// # Errors
    /// * `DiffError::Io` - If the file cannot be opened or read
    pub fn ingest_file(
        &mut self,
        path: impl AsRef<Path>,
        dataset: DatasetId,
    ) -> Result<IngestStats, DiffError> {
        let path = path.as_ref();
        info!("Reading profile {} from {}", dataset, path.display());

        let file = File::open(path).map_err(|source| DiffError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::with_capacity(READER_CAPACITY, file);

        self.ingest_reader(reader, dataset).map_err(|err| match err {
            DiffError::Read(source) => DiffError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Compute rows without consuming the engine
    pub fn compute(&self) -> Vec<DiffRow> {
        let ctx = RowContext::new(
            Normalizer::new(self.options.normalize, self.totals),
            SignificanceFilter::from_options(&self.options),
        );

        debug!(
            "Totals: A={} B={}, {} distinct stacks, mode {}",
            self.totals.a,
            self.totals.b,
            self.table.len(),
            self.mode
        );

        self.mode.compute(&self.table, self.trie.as_ref(), &ctx)
    }

    /// Compute rows and bundle them with the run's totals
    pub fn finish(self) -> DiffResult {
        let rows = self.compute();
        info!("Diff complete: {} rows ({} mode)", rows.len(), self.mode);

        DiffResult {
            mode: self.mode,
            totals: self.totals,
            stats_a: self.stats_a,
            stats_b: self.stats_b,
            rows,
        }
    }
}

/// Diff two folded profiles read from buffered readers
///
/// # Example
/// ```
/// use flamediff::diff::from_readers;
/// use flamediff::utils::DiffOptions;
///
/// let before = "a;b 10\na;c 5\n";
/// let after = "a;b 12\na;d 3\n";
/// let result = from_readers(&DiffOptions::default(), before.as_bytes(), after.as_bytes()).unwrap();
/// assert_eq!(result.rows.len(), 3);
/// ```
pub fn from_readers<R1, R2>(
    options: &DiffOptions,
    reader_a: R1,
    reader_b: R2,
) -> Result<DiffResult, DiffError>
where
    R1: BufRead,
    R2: BufRead,
{
    options.validate()?;

    let mut engine = DiffEngine::new(options.clone());
    engine.ingest_reader(reader_a, DatasetId::A)?;
    engine.ingest_reader(reader_b, DatasetId::B)?;
    Ok(engine.finish())
}

/// Diff two folded profile files
///
/// # Errors
/// * `DiffError::Config` - If the options are invalid
/// * `DiffError::Io` - If either file cannot be opened or read
pub fn from_files<P1, P2>(
    options: &DiffOptions,
    path_a: P1,
    path_b: P2,
) -> Result<DiffResult, DiffError>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    options.validate()?;

    let mut engine = DiffEngine::new(options.clone());
    engine.ingest_file(path_a, DatasetId::A)?;
    engine.ingest_file(path_b, DatasetId::B)?;
    Ok(engine.finish())
}
