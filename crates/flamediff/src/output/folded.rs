//! Three-column folded output writer.
//!
//! Format: "frame1;frame2;frame3 count_a count_b", one line per stack,
//! sorted byte-wise by stack.

use crate::diff::DiffRow;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Sort rows by stack key in byte-wise lexicographic order
pub fn sort_rows(rows: &mut [DiffRow]) {
    rows.sort_by(|a, b| a.stack.cmp(&b.stack));
}

/// Write rows as folded diff lines
///
/// Rows are written in stack order regardless of the order given. Whole
/// counts have no fractional part.
pub fn write_folded<W: Write>(rows: &[DiffRow], mut writer: W) -> std::io::Result<()> {
    let mut ordered: Vec<&DiffRow> = rows.iter().collect();
    ordered.sort_by(|a, b| a.stack.cmp(&b.stack));

    for row in ordered {
        writeln!(writer, "{} {} {}", row.stack, row.count_a, row.count_b)?;
    }
    writer.flush()
}

/// Render rows to an in-memory string
pub fn render_folded(rows: &[DiffRow]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_folded(rows, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write rows to a file, creating parent directories if needed
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_folded_file(
    rows: &[DiffRow],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing folded diff to: {}", output_path.display());

    super::validate_path(output_path)?;
    super::ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    write_folded(rows, BufWriter::new(file)).map_err(OutputError::WriteFailed)?;

    info!("Folded diff written successfully ({} rows)", rows.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sorted_integer_counts() {
        let rows = vec![
            DiffRow::new("a;d", 0.0, 3.0),
            DiffRow::new("a;b", 10.0, 12.0),
            DiffRow::new("a;c", 5.0, 0.0),
        ];
        assert_eq!(render_folded(&rows), "a;b 10 12\na;c 5 0\na;d 0 3\n");
    }

    #[test]
    fn test_fractional_counts_render_as_produced() {
        let rows = vec![DiffRow::new("x", 2.5, 1.0)];
        assert_eq!(render_folded(&rows), "x 2.5 1\n");
    }

    #[test]
    fn test_sort_is_bytewise() {
        let mut rows = vec![
            DiffRow::new("b", 1.0, 1.0),
            DiffRow::new("a;b", 1.0, 1.0),
            DiffRow::new("B", 1.0, 1.0),
            DiffRow::new("a", 1.0, 1.0),
        ];
        sort_rows(&mut rows);
        let stacks: Vec<&str> = rows.iter().map(|r| r.stack.as_str()).collect();
        assert_eq!(stacks, vec!["B", "a", "a;b", "b"]);
    }
}
