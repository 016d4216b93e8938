use flamediff::commands::{execute_diff, resolve_options, validate_args, DiffArgs};
use flamediff::output::read_report;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_validate_args_requires_two_inputs() {
    let args = DiffArgs {
        input_a: PathBuf::from("before.folded"),
        ..Default::default()
    };
    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_rejects_negative_threshold() {
    let args = DiffArgs {
        input_a: PathBuf::from("a"),
        input_b: PathBuf::from("b"),
        threshold: Some(-0.1),
        ..Default::default()
    };
    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_valid() {
    let args = DiffArgs {
        input_a: PathBuf::from("a"),
        input_b: PathBuf::from("b"),
        threshold: Some(0.05),
        ..Default::default()
    };
    assert!(validate_args(&args).is_ok());
}

#[test]
fn test_resolve_options_merges_config_and_flags() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(
        &dir,
        "flamediff.toml",
        "normalize = true\nelide_insignificant = true\nthreshold = 0.2\n",
    );

    let args = DiffArgs {
        config: Some(config),
        strip_hex: true,
        threshold: Some(0.05),
        ..Default::default()
    };
    let options = resolve_options(&args).unwrap();

    assert!(options.normalize);
    assert!(options.strip_hex);
    assert!(options.elide_insignificant);
    assert!(!options.propagate);
    assert_eq!(options.threshold, 0.05);
}

#[test]
fn test_resolve_options_bad_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(&dir, "bad.toml", "normalize = \"yes\"\n");

    let args = DiffArgs {
        config: Some(config),
        ..Default::default()
    };
    assert!(resolve_options(&args).is_err());
}

#[test]
fn test_execute_diff_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input_a = write(&dir, "a.folded", "a;b 10\na;c 5\n");
    let input_b = write(&dir, "b.folded", "a;b 12\na;d 3\n");
    let output = dir.path().join("out").join("diff.folded");
    let json = dir.path().join("out").join("diff.json");

    let args = DiffArgs {
        input_a,
        input_b,
        propagate: true,
        output: Some(output.clone()),
        json: Some(json.clone()),
        ..Default::default()
    };
    execute_diff(args).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "a 15 15\na;b 10 12\na;c 5 0\na;d 0 3\n"
    );
    let report = read_report(&json).unwrap();
    assert_eq!(report.row_count, 4);
    assert_eq!(report.totals.a, 15.0);
}

#[test]
fn test_execute_diff_missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input_a = write(&dir, "a.folded", "a 1\n");
    let output = dir.path().join("diff.folded");

    let args = DiffArgs {
        input_a,
        input_b: dir.path().join("missing.folded"),
        output: Some(output.clone()),
        ..Default::default()
    };

    assert!(execute_diff(args).is_err());
    assert!(!output.exists());
}
