//! Exact-stack count table.

use std::collections::HashMap;

use crate::parser::DatasetId;

/// Per-profile sample counts for one stack
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Counts {
    pub a: f64,
    pub b: f64,
}

impl Counts {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Add `count` to the side selected by `dataset`
    pub fn add(&mut self, dataset: DatasetId, count: f64) {
        match dataset {
            DatasetId::A => self.a += count,
            DatasetId::B => self.b += count,
        }
    }

    pub fn get(&self, dataset: DatasetId) -> f64 {
        match dataset {
            DatasetId::A => self.a,
            DatasetId::B => self.b,
        }
    }
}

impl std::ops::AddAssign for Counts {
    fn add_assign(&mut self, other: Self) {
        self.a += other.a;
        self.b += other.b;
    }
}

/// Mapping from full stack key to per-profile counts
#[derive(Debug, Default)]
pub struct FlatCountTable {
    stacks: HashMap<String, Counts>,
}

impl FlatCountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `count` for `stack`; repeated stacks are summed.
    pub fn insert(&mut self, stack: &str, count: f64, dataset: DatasetId) {
        match self.stacks.get_mut(stack) {
            Some(counts) => counts.add(dataset, count),
            None => {
                let mut counts = Counts::default();
                counts.add(dataset, count);
                self.stacks.insert(stack.to_string(), counts);
            }
        }
    }

    /// Counts for `stack`, zero on both sides if it was never seen
    pub fn get(&self, stack: &str) -> Counts {
        self.stacks.get(stack).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Every stack seen in either profile, in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Counts)> {
        self.stacks.iter().map(|(stack, counts)| (stack.as_str(), counts))
    }
}
