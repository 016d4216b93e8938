//! Count normalization and delta math.
//!
//! Handles rescaling of profile A to profile B's total and the relative
//! change computation, including the zero-baseline edge cases.

use log::debug;

use super::schema::Totals;

/// Rescales profile A counts by `total_b / total_a`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Normalizer {
    /// `(total_a, total_b)` when rescaling is active
    scale: Option<(f64, f64)>,
}

impl Normalizer {
    /// Build a normalizer for the given totals.
    ///
    /// Rescaling is only active when enabled, the totals differ and
    /// `total_a` is non-zero; otherwise counts pass through unchanged.
    pub fn new(enabled: bool, totals: Totals) -> Self {
        let scale = if enabled && totals.a != totals.b && totals.a > 0.0 {
            debug!(
                "Normalizing profile A by {} / {} (factor {:.6})",
                totals.b,
                totals.a,
                totals.b / totals.a
            );
            Some((totals.a, totals.b))
        } else {
            None
        };
        Self { scale }
    }

    /// Identity normalizer
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.scale.is_some()
    }

    /// Scaling factor applied to profile A counts
    pub fn factor(&self) -> f64 {
        self.scale.map(|(a, b)| b / a).unwrap_or(1.0)
    }

    /// Rescale one profile A count, truncating toward zero
    pub fn apply(&self, count_a: f64) -> f64 {
        match self.scale {
            Some((total_a, total_b)) => (count_a * total_b / total_a).trunc(),
            None => count_a,
        }
    }
}

/// Relative change from `count_a` to `count_b`, in percent.
///
/// A stack that only exists in profile B counts as a 100% change; a stack with
/// no samples on either side counts as 0%.
pub fn relative_change_percent(count_a: f64, count_b: f64) -> f64 {
    if count_a > 0.0 {
        ((count_b - count_a).abs() / count_a) * 100.0
    } else if count_b > 0.0 {
        100.0
    } else {
        0.0
    }
}
