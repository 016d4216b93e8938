//! Significance filtering of diff rows.

use super::normalizer::relative_change_percent;
use crate::utils::config::DiffOptions;

/// Suppresses rows whose relative change is below a threshold
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignificanceFilter {
    /// Minimum relative change in percent, `None` when elision is off
    min_percent: Option<f64>,
}

impl SignificanceFilter {
    /// Filter that keeps rows changing by at least `threshold` (a fraction)
    pub fn new(threshold: f64) -> Self {
        Self {
            min_percent: Some(threshold * 100.0),
        }
    }

    /// Filter that keeps every row
    pub fn keep_all() -> Self {
        Self::default()
    }

    pub fn from_options(options: &DiffOptions) -> Self {
        if options.elide_insignificant {
            Self::new(options.threshold)
        } else {
            Self::keep_all()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.min_percent.is_some()
    }

    /// Whether a row with these (already normalized) counts is kept
    pub fn is_significant(&self, count_a: f64, count_b: f64) -> bool {
        match self.min_percent {
            Some(min_percent) => {
                if count_a == 0.0 && count_b == 0.0 {
                    return false;
                }
                relative_change_percent(count_a, count_b) >= min_percent
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_keeps_everything() {
        let filter = SignificanceFilter::keep_all();
        assert!(!filter.is_enabled());
        assert!(filter.is_significant(0.0, 0.0));
        assert!(filter.is_significant(100.0, 100.0));
    }

    #[test]
    fn test_threshold_boundary() {
        let filter = SignificanceFilter::new(0.05);
        assert!(filter.is_significant(100.0, 105.0));
        assert!(filter.is_significant(100.0, 95.0));
        assert!(!filter.is_significant(100.0, 104.0));
    }

    #[test]
    fn test_new_stack_always_significant() {
        let filter = SignificanceFilter::new(0.5);
        assert!(filter.is_significant(0.0, 1.0));
    }

    #[test]
    fn test_all_zero_never_significant() {
        let filter = SignificanceFilter::new(0.0);
        assert!(!filter.is_significant(0.0, 0.0));
        assert!(filter.is_significant(5.0, 5.0));
    }

    #[test]
    fn test_from_options() {
        let options = DiffOptions::new().with_elision(0.2);
        let filter = SignificanceFilter::from_options(&options);
        assert!(filter.is_enabled());
        assert!(!filter.is_significant(10.0, 11.0));
        assert!(!SignificanceFilter::from_options(&DiffOptions::default()).is_enabled());
    }
}
