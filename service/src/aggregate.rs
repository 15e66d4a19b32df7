//! Line handling shared by the builders: splitting, duplicate collapsing and
//! lazily created per-key accumulators.

use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Char(char),
    /// Runs of whitespace, as in `sinfo -O` column output.
    Whitespace,
}

impl Delimiter {
    pub fn split(self, line: &str) -> Vec<&str> {
        match self {
            Self::Char(c) => line.split(c).collect(),
            Self::Whitespace => line.split_whitespace().collect(),
        }
    }
}

/// Lines of `input`, without the empty line a trailing newline would leave.
#[inline]
pub fn split_lines(input: &str) -> Vec<&str> {
    input.lines().collect()
}

/// Sorted lines with exact duplicates collapsed.
///
/// `sinfo` repeats a node once per heterogeneous resource generation. The
/// node name is part of every row, so distinct nodes never collapse.
pub fn unique_lines(input: &str) -> Vec<&str> {
    let mut lines = split_lines(input);
    lines.sort_unstable();
    lines.dedup();
    lines
}

/// Per-key accumulators in order of first sight.
#[derive(Debug, Clone)]
pub struct Aggregator<R> {
    buckets: IndexMap<String, R>,
}

impl<R> Default for Aggregator<R> {
    fn default() -> Self {
        Self {
            buckets: IndexMap::new(),
        }
    }
}

impl<R> Aggregator<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulator of `key`, created on first sight.
    pub fn bucket(&mut self, key: &str) -> &mut R
    where
        R: Default,
    {
        if !self.buckets.contains_key(key) {
            self.buckets.insert(key.to_owned(), R::default());
        }
        &mut self.buckets[key]
    }

    /// Stores `record` unless `key` was seen before. Returns whether it was stored.
    pub fn first_write(&mut self, key: &str, record: impl FnOnce() -> R) -> bool {
        if self.buckets.contains_key(key) {
            return false;
        }
        self.buckets.insert(key.to_owned(), record());
        true
    }

    #[inline]
    pub fn into_inner(self) -> IndexMap<String, R> {
        self.buckets
    }
}
