//! JSON diff report writer and reader.

use crate::diff::{DiffReport, DiffResult, ReportInputs, ReportRow};
use crate::utils::config::{DiffOptions, REPORT_VERSION};
use crate::utils::error::OutputError;
use chrono::Utc;
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Build the serializable report for a finished diff
pub fn build_report(result: &DiffResult, options: &DiffOptions) -> DiffReport {
    DiffReport {
        report_version: REPORT_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        options: options.clone(),
        mode: result.mode,
        totals: result.totals,
        inputs: ReportInputs {
            a: result.stats_a,
            b: result.stats_b,
        },
        row_count: result.rows.len(),
        rows: result.rows.iter().map(ReportRow::from).collect(),
    }
}

/// Write a report as pretty-printed JSON
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty or a directory
/// * `OutputError::SerializationFailed` - JSON serialization failed
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_report(report: &DiffReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing diff report to: {}", output_path.display());

    super::validate_path(output_path)?;
    super::ensure_parent_dir(output_path)?;

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!("Diff report written ({} rows)", report.row_count);
    Ok(())
}

/// Read a report back from disk
pub fn read_report(path: impl AsRef<Path>) -> Result<DiffReport, OutputError> {
    let file = File::open(path.as_ref())?;
    let report = serde_json::from_reader(BufReader::new(file))?;
    Ok(report)
}
