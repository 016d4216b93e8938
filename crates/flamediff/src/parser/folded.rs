//! Parse one folded stack line into a stack key and sample count.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::utils::config::{HEX_PLACEHOLDER, STACK_SEPARATOR};

/// `<stack-text><whitespace><count>` with the count at the very end of the line.
static FOLDED_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\S.*?)\s+([0-9]+(?:\.[0-9]+)?)$").expect("Invalid folded line regex pattern")
});

static HEX_ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"0x[0-9a-fA-F]+").expect("Invalid hex address regex pattern"));

/// Which of the two compared profiles a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetId {
    /// The "before" profile
    A,
    /// The "after" profile
    B,
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetId::A => write!(f, "A"),
            DatasetId::B => write!(f, "B"),
        }
    }
}

/// A single parsed folded stack line
#[derive(Debug, Clone, PartialEq)]
pub struct FoldedRecord {
    /// Frames joined by `;`, already hex-stripped if requested
    pub stack: String,

    /// Sample count (non-negative)
    pub count: f64,
}

impl FoldedRecord {
    pub fn new(stack: impl Into<String>, count: f64) -> Self {
        Self {
            stack: stack.into(),
            count,
        }
    }

    /// Frame names from outermost caller to leaf
    pub fn frames(&self) -> impl Iterator<Item = &str> {
        self.stack.split(STACK_SEPARATOR)
    }
}

/// Parse stack and sample count from a line.
///
/// Returns `None` for blank or malformed lines. Trailing `\r\n` is ignored.
///
/// # Example
/// ```
/// use flamediff::parser::parse_line;
///
/// let record = parse_line("main;foo;bar 42", false).unwrap();
/// assert_eq!(record.stack, "main;foo;bar");
/// assert_eq!(record.count, 42.0);
/// assert!(parse_line("no count here", false).is_none());
/// ```
pub fn parse_line(line: &str, strip_hex: bool) -> Option<FoldedRecord> {
    let caps = FOLDED_LINE_RE.captures(line.trim_end())?;
    let count: f64 = caps[2].parse().ok()?;

    let stack = if strip_hex {
        strip_hex_addresses(&caps[1])
    } else {
        caps[1].to_string()
    };

    Some(FoldedRecord { stack, count })
}

/// Replace all hex strings like "0x45ef2173" with "0x...".
pub fn strip_hex_addresses(stack: &str) -> String {
    HEX_ADDRESS_RE
        .replace_all(stack, HEX_PLACEHOLDER)
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_count() {
        let record = parse_line("a;b;c 10\n", false).unwrap();
        assert_eq!(record.stack, "a;b;c");
        assert_eq!(record.count, 10.0);
    }

    #[test]
    fn test_parse_decimal_count() {
        let record = parse_line("a;b 2.5", false).unwrap();
        assert_eq!(record.count, 2.5);
    }

    #[test]
    fn test_frames_may_contain_spaces() {
        let record = parse_line("main;std::vec::Vec<T> as Drop 7\r\n", false).unwrap();
        assert_eq!(record.stack, "main;std::vec::Vec<T> as Drop");
        assert_eq!(record.frames().count(), 2);
    }

    #[test]
    fn test_only_last_number_is_count() {
        let record = parse_line("frame 12 34", false).unwrap();
        assert_eq!(record.stack, "frame 12");
        assert_eq!(record.count, 34.0);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        assert!(parse_line("", false).is_none());
        assert!(parse_line("   \n", false).is_none());
        assert!(parse_line("a;b", false).is_none());
        assert!(parse_line("a;b -3", false).is_none());
        assert!(parse_line("a;b 1e5", false).is_none());
        assert!(parse_line("42", false).is_none());
    }

    #[test]
    fn test_strip_hex() {
        assert_eq!(
            strip_hex_addresses("main;[unknown] 0x1a2b;foo@0xDEADbeef"),
            "main;[unknown] 0x...;foo@0x..."
        );
        // A bare prefix without digits is left alone
        assert_eq!(strip_hex_addresses("0x;0xg"), "0x;0xg");
    }

    #[test]
    fn test_parse_with_strip_hex() {
        let a = parse_line("main;0x1a2b 3", true).unwrap();
        let b = parse_line("main;0x3c4d 4", true).unwrap();
        assert_eq!(a.stack, b.stack);
        assert_eq!(a.stack, "main;0x...");
    }
}
