//! Diff command implementation.
//! Orchestrates the comparison of two folded profiles and writes the results.

use super::models::DiffArgs;
use crate::diff::{from_files, render_terminal_diff};
use crate::output::{build_report, render_folded, validate_path, write_folded_file, write_report};
use crate::utils::config::{load_options, DiffOptions};
use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::io::Write;

/// Validate diff arguments before doing any work
pub fn validate_args(args: &DiffArgs) -> Result<()> {
    if args.input_a.as_os_str().is_empty() || args.input_b.as_os_str().is_empty() {
        bail!("Two input files are required");
    }

    if let Some(threshold) = args.threshold {
        if !threshold.is_finite() || threshold < 0.0 {
            bail!("Threshold must be a finite, non-negative fraction (got {})", threshold);
        }
    }

    if let Some(path) = &args.output {
        validate_path(path).context("Invalid --output path")?;
    }

    if let Some(path) = &args.json {
        validate_path(path).context("Invalid --json path")?;
    }

    Ok(())
}

/// Merge the optional config file with command-line flags.
///
/// Flags can only switch options on; an explicit threshold replaces the
/// file's value.
pub fn resolve_options(args: &DiffArgs) -> Result<DiffOptions> {
    let mut options = match &args.config {
        Some(path) => load_options(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DiffOptions::default(),
    };

    options.normalize |= args.normalize;
    options.strip_hex |= args.strip_hex;
    options.propagate |= args.propagate;
    options.keep_all |= args.keep_all;
    options.elide_insignificant |= args.elide_insignificant;

    if let Some(threshold) = args.threshold {
        options.threshold = threshold;
    }

    options.validate().context("Invalid options")?;
    debug!("Effective options: {:?}", options);
    Ok(options)
}

/// Execute the diff command
pub fn execute_diff(args: DiffArgs) -> Result<()> {
    // Step 1: Validate and resolve options
    validate_args(&args)?;
    let options = resolve_options(&args)?;
    info!("Comparing {} -> {} ({} mode)", args.input_a.display(), args.input_b.display(), options.mode());

    // Step 2: Compute the whole diff before writing anything
    let result = from_files(&options, &args.input_a, &args.input_b)
        .context("Failed to compute diff")?;

    // Step 3: JSON report
    if let Some(path) = &args.json {
        let report = build_report(&result, &options);
        write_report(&report, path).context("Failed to write diff report JSON")?;
    }

    // Step 4: Folded output
    match &args.output {
        Some(path) => {
            write_folded_file(&result.rows, path).context("Failed to write folded diff")?;
        }
        None => {
            let rendered = render_folded(&result.rows);
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(rendered.as_bytes())
                .and_then(|_| handle.flush())
                .context("Failed to write folded diff to stdout")?;
        }
    }

    // Step 5: Terminal summary
    if args.summary {
        eprintln!("{}", render_terminal_diff(&result, args.top));
    }

    Ok(())
}
