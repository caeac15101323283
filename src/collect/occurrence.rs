use crate::types::Tag;
use hashbrown::HashMap;

/// Counts how often each property was opened at one nesting level.
///
/// A tag that was never opened has no count at all, which is different from
/// a count of zero: the first [`increment`](Self::increment) stores `0`, the
/// second `1`, and so on. [`count`](Self::count) therefore answers "how many
/// earlier occurrences were there" for the occurrence that was opened last.
#[derive(Clone, Debug, Default)]
pub struct PropertyOccurrenceCounter {
    counts: HashMap<Tag, u32>,
}

impl PropertyOccurrenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, tag: Tag) {
        self.counts
            .entry(tag)
            .and_modify(|c| *c += 1)
            .or_insert(0);
    }

    /// `None` when `tag` was never opened at this level.
    pub fn count(&self, tag: Tag) -> Option<u32> {
        self.counts.get(&tag).copied()
    }
}
