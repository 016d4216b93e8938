//! Configuration and constants for the diff engine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::ConfigError;
use crate::diff::DiffMode;

/// Current JSON report version
pub const REPORT_VERSION: &str = "1.0.0";

/// Separator between frames of a folded stack
pub const STACK_SEPARATOR: char = ';';

/// Replacement for hexadecimal addresses when stripping is enabled
pub const HEX_PLACEHOLDER: &str = "0x...";

/// Default significance threshold as a fraction (1%)
pub const DEFAULT_THRESHOLD: f64 = 0.01;

/// Buffer size for reading folded input files
pub const READER_CAPACITY: usize = 128 * 1024;

/// Options controlling how two profiles are compared.
///
/// All flags default to off. The same keys are accepted from a TOML file:
///
/// ```toml
/// normalize = true
/// strip_hex = true
/// propagate = false
/// keep_all = false
/// elide_insignificant = true
/// threshold = 0.05
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Rescale profile A's counts so its total matches profile B's.
    pub normalize: bool,

    /// Replace addresses like `0x45ef2173` with `0x...` before comparing.
    pub strip_hex: bool,

    /// Roll descendant counts up into every ancestor stack.
    pub propagate: bool,

    /// Emit every observed stack, including ancestor-only stacks.
    pub keep_all: bool,

    /// Drop rows whose relative change is below `threshold`.
    pub elide_insignificant: bool,

    /// Minimum relative change, as a fraction, for a row to survive elision.
    pub threshold: f64,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            normalize: false,
            strip_hex: false,
            propagate: false,
            keep_all: false,
            elide_insignificant: false,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn with_strip_hex(mut self, strip_hex: bool) -> Self {
        self.strip_hex = strip_hex;
        self
    }

    pub fn with_propagate(mut self, propagate: bool) -> Self {
        self.propagate = propagate;
        self
    }

    pub fn with_keep_all(mut self, keep_all: bool) -> Self {
        self.keep_all = keep_all;
        self
    }

    /// Enable elision with the given threshold fraction.
    pub fn with_elision(mut self, threshold: f64) -> Self {
        self.elide_insignificant = true;
        self.threshold = threshold;
        self
    }

    /// Strategy selected by the flag combination
    pub fn mode(&self) -> DiffMode {
        if self.propagate {
            DiffMode::TreePropagated
        } else if self.keep_all {
            DiffMode::TreeSelf
        } else {
            DiffMode::Flat
        }
    }

    /// Whether ingestion must build the stack trie
    pub fn needs_trie(&self) -> bool {
        self.mode() != DiffMode::Flat
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

/// Load options from a TOML file
///
/// Missing keys fall back to their defaults.
///
/// # Errors
/// * `ConfigError::ReadFailed` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::InvalidThreshold` - If the threshold is negative or not finite
pub fn load_options(path: impl AsRef<Path>) -> Result<DiffOptions, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let options: DiffOptions = toml::from_str(&contents)?;
    options.validate()?;
    Ok(options)
}
