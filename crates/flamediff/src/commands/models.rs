use crate::diff::DEFAULT_TOP_ROWS;
use std::path::PathBuf;

/// Arguments for the diff command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct DiffArgs {
    /// Folded profile A ("before")
    pub input_a: PathBuf,

    /// Folded profile B ("after")
    pub input_b: PathBuf,

    /// Optional TOML options file
    pub config: Option<PathBuf>,

    /// Rescale profile A to profile B's total
    pub normalize: bool,

    /// Collapse hex addresses in frame names
    pub strip_hex: bool,

    /// Roll descendant counts into ancestors
    pub propagate: bool,

    /// Emit every observed stack including ancestor-only ones
    pub keep_all: bool,

    /// Drop rows below the significance threshold
    pub elide_insignificant: bool,

    /// Significance threshold as a fraction, overrides the config file
    pub threshold: Option<f64>,

    /// Write folded output here instead of stdout
    pub output: Option<PathBuf>,

    /// Path to write the JSON diff report
    pub json: Option<PathBuf>,

    /// Print a human-readable summary to stderr
    pub summary: bool,

    /// Number of rows listed in the summary
    pub top: usize,
}

impl Default for DiffArgs {
    fn default() -> Self {
        Self {
            input_a: PathBuf::new(),
            input_b: PathBuf::new(),
            config: None,
            normalize: false,
            strip_hex: false,
            propagate: false,
            keep_all: false,
            elide_insignificant: false,
            threshold: None,
            output: None,
            json: None,
            summary: false,
            top: DEFAULT_TOP_ROWS,
        }
    }
}
