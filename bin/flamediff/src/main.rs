//! Flamediff CLI
//!
//! Compares two folded-stack profiles and prints a merged three-column
//! folded file for differential flamegraph rendering.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use flamediff::commands::{execute_diff, DiffArgs};
use flamediff::diff::DEFAULT_TOP_ROWS;

/// Flamediff - differential folded stacks
#[derive(Parser, Debug)]
#[command(name = "flamediff")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Folded profile A ("before")
    input_a: PathBuf,

    /// Folded profile B ("after")
    input_b: PathBuf,

    /// TOML file with default options
    #[arg(short, long, env = "FLAMEDIFF_CONFIG")]
    config: Option<PathBuf>,

    /// Normalize profile A's sample counts to profile B's total
    #[arg(short, long)]
    normalize: bool,

    /// Strip hex addresses like 0x45ef2173, replacing them with 0x...
    #[arg(short = 'x', long)]
    strip_hex: bool,

    /// Roll descendant counts up into every ancestor stack
    #[arg(short, long)]
    propagate: bool,

    /// Emit every observed stack, including ancestor-only stacks
    #[arg(short, long)]
    keep_all: bool,

    /// Drop rows whose relative change is below the threshold
    #[arg(short, long)]
    elide: bool,

    /// Significance threshold as a fraction (0.01 = 1%)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Write the folded diff to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a JSON diff report
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print a human-readable summary to stderr
    #[arg(long)]
    summary: bool,

    /// Number of rows listed in the summary
    #[arg(long, default_value_t = DEFAULT_TOP_ROWS)]
    top: usize,

    /// Trace totals and per-row deltas to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging; stdout is reserved for the folded output
    let log_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = DiffArgs {
        input_a: cli.input_a,
        input_b: cli.input_b,
        config: cli.config,
        normalize: cli.normalize,
        strip_hex: cli.strip_hex,
        propagate: cli.propagate,
        keep_all: cli.keep_all,
        elide_insignificant: cli.elide,
        threshold: cli.threshold,
        output: cli.output,
        json: cli.json,
        summary: cli.summary,
        top: cli.top,
    };

    execute_diff(args)
}
