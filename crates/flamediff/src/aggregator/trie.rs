//! Prefix tree of call stacks.
//!
//! Nodes live in an arena and refer to children by index. A child is always
//! allocated after its parent, so every child id is greater than its parent's
//! id; the diff walk relies on this to fold aggregates bottom-up without
//! recursion.
//!
//! Each node only records samples of stacks that end exactly at it. Totals
//! including descendants are computed per walk and never stored.

use std::collections::BTreeMap;

use super::flat_table::{Counts, FlatCountTable};
use crate::parser::DatasetId;
use crate::utils::config::STACK_SEPARATOR;

/// Index of a node in the trie arena
pub type NodeId = usize;

/// One frame position reachable by a unique path from the root
#[derive(Debug, Clone)]
pub struct TrieNode {
    /// Frame name (empty for the root)
    pub frame: String,

    /// Parent node, `None` only for the root
    pub parent: Option<NodeId>,

    /// Children keyed by frame name, iterated in byte-wise order
    pub children: BTreeMap<String, NodeId>,

    /// Samples of stacks terminating exactly here
    pub counts: Counts,
}

impl TrieNode {
    fn new(frame: String, parent: Option<NodeId>) -> Self {
        Self {
            frame,
            parent,
            children: BTreeMap::new(),
            counts: Counts::default(),
        }
    }
}

/// Arena-backed stack trie
#[derive(Debug)]
pub struct StackTrie {
    nodes: Vec<TrieNode>,
}

impl Default for StackTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl StackTrie {
    /// Id of the root node (the empty stack)
    pub const ROOT: NodeId = 0;

    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::new(String::new(), None)],
        }
    }

    /// Rebuild a trie from an already aggregated flat table
    pub fn from_table(table: &FlatCountTable) -> Self {
        let mut trie = Self::new();
        for (stack, counts) in table.iter() {
            let id = trie.insert(stack, counts.a, DatasetId::A);
            trie.nodes[id].counts.b += counts.b;
        }
        trie
    }

    /// Walk `stack` from the root, creating missing nodes, and add `count`
    /// to the terminal node.
    pub fn insert(&mut self, stack: &str, count: f64, dataset: DatasetId) -> NodeId {
        let mut current = Self::ROOT;

        for frame in stack.split(STACK_SEPARATOR) {
            let existing = self.nodes[current].children.get(frame).copied();
            current = match existing {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes
                        .push(TrieNode::new(frame.to_string(), Some(current)));
                    self.nodes[current].children.insert(frame.to_string(), child);
                    child
                }
            };
        }

        self.nodes[current].counts.add(dataset, count);
        current
    }

    /// Node lookup by id
    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id]
    }

    /// Find the node for a full stack key
    pub fn find(&self, stack: &str) -> Option<NodeId> {
        stack
            .split(STACK_SEPARATOR)
            .try_fold(Self::ROOT, |current, frame| {
                self.nodes[current].children.get(frame).copied()
            })
    }

    /// Number of nodes including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing but the root exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Self plus descendant counts for every node, indexed by `NodeId`.
    pub fn aggregate_counts(&self) -> Vec<Counts> {
        let mut totals: Vec<Counts> = self.nodes.iter().map(|node| node.counts).collect();

        for id in (1..self.nodes.len()).rev() {
            if let Some(parent) = self.nodes[id].parent {
                let child_total = totals[id];
                totals[parent] += child_total;
            }
        }

        totals
    }

    /// Depth-first pre-order traversal below the root, children in lexicographic
    /// order. The visitor receives each node's id and its full stack key.
    pub fn visit<F>(&self, mut visitor: F)
    where
        F: FnMut(NodeId, &str),
    {
        let mut pending: Vec<(NodeId, String)> = self.nodes[Self::ROOT]
            .children
            .values()
            .rev()
            .map(|&id| (id, self.nodes[id].frame.clone()))
            .collect();

        while let Some((id, path)) = pending.pop() {
            visitor(id, &path);

            for &child in self.nodes[id].children.values().rev() {
                let child_path = format!("{}{}{}", path, STACK_SEPARATOR, self.nodes[child].frame);
                pending.push((child, child_path));
            }
        }
    }
}
