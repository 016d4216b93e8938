//! Parsing of folded stack lines.
//!
//! Folded format: "frame1;frame2;frame3 count"
//!
//! Lines that do not end in a count are skipped rather than rejected, since
//! upstream converters routinely emit headers and stray text.

pub mod folded;

// Re-export main types and functions
pub use folded::{parse_line, strip_hex_addresses, DatasetId, FoldedRecord};
