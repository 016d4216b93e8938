//! Aggregation of folded records into per-profile counts.
//!
//! Two structures are maintained during ingestion:
//! - `FlatCountTable` keyed by the full stack string (always built)
//! - `StackTrie` keyed frame by frame (built only for the tree modes)

pub mod flat_table;
pub mod trie;

// Re-export main types
pub use flat_table::{Counts, FlatCountTable};
pub use trie::{NodeId, StackTrie, TrieNode};
