use flamediff::diff::{from_readers, DiffRow};
use flamediff::output::validate_path;
use flamediff::output::{build_report, read_report, write_folded, write_folded_file, write_report};
use flamediff::utils::DiffOptions;
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
fn test_write_folded_to_writer() {
    let rows = vec![DiffRow::new("b", 1.0, 2.0), DiffRow::new("a", 3.0, 0.0)];
    let mut buf = Vec::new();
    write_folded(&rows, &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "a 3 0\nb 1 2\n");
}

#[test]
fn test_write_folded_file_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("diff.folded");

    let rows = vec![DiffRow::new("main;work", 10.0, 12.0)];
    write_folded_file(&rows, &path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "main;work 10 12\n");
}

#[test]
fn test_write_and_read_report() {
    let options = DiffOptions::new().with_keep_all(true);
    let result = from_readers(&options, "a;b 10\n".as_bytes(), "a;b 5\n".as_bytes()).unwrap();
    let report = build_report(&result, &options);

    let temp_file = NamedTempFile::new().unwrap();
    write_report(&report, temp_file.path()).unwrap();

    let loaded = read_report(temp_file.path()).unwrap();
    assert_eq!(loaded.row_count, 2);
    assert_eq!(loaded.options, options);
    assert_eq!(loaded.rows[1].stack, "a;b");
    assert_eq!(loaded.rows[1].delta, -5.0);
    assert_eq!(loaded.rows[1].relative_change_percent, 50.0);
}

#[test]
fn test_validate_output_path_empty() {
    assert!(validate_path(Path::new("")).is_err());
}

#[test]
fn test_validate_output_path_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    assert!(validate_path(temp_dir.path()).is_err());
}

#[test]
fn test_write_to_directory_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let rows = vec![DiffRow::new("a", 1.0, 1.0)];
    assert!(write_folded_file(&rows, temp_dir.path()).is_err());
}
