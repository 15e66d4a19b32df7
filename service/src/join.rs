use indexmap::IndexMap;

use crate::aggregate::split_lines;

/// Folds key-per-line listings into a base table.
///
/// Secondary sources only count towards keys already in the base table;
/// they never introduce new entities.
#[derive(Debug, Clone)]
pub struct Joiner<R> {
    base: IndexMap<String, R>,
}

impl<R> Joiner<R> {
    pub fn new(base: IndexMap<String, R>) -> Self {
        Self { base }
    }

    /// Adds one to `counter` of the record for every line of `secondary`.
    pub fn count_presence<F>(mut self, secondary: &str, counter: F) -> Self
    where
        F: Fn(&mut R) -> &mut u64,
    {
        let mut discarded = 0usize;
        for key in split_lines(secondary).into_iter().map(str::trim) {
            if key.is_empty() {
                continue;
            }
            match self.base.get_mut(key) {
                Some(record) => *counter(record) += 1,
                None => discarded += 1,
            }
        }
        if discarded > 0 {
            tracing::debug!(discarded, "Dropped keys missing from the base table");
        }
        self
    }

    #[inline]
    pub fn finish(self) -> IndexMap<String, R> {
        self.base
    }
}
