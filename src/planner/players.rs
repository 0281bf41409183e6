use std::collections::BTreeSet;

use crate::core::ValueRange;

/// Every group size a search accepts.
///
/// A game matches when it is good at *any* of these sizes, so a game for
/// 3-5 players matches a 4-10 search through 4 and 5.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerCountSet {
    counts: BTreeSet<u32>,
}

impl PlayerCountSet {
    /// Expand `[min, max]` into its integers; an inverted range gives an empty set
    pub fn from_range(range: ValueRange<u32>) -> Self {
        let counts = if range.is_inverted() {
            BTreeSet::new()
        } else {
            (range.min..=range.max).collect()
        };
        Self { counts }
    }

    /// True when `supported` shares at least one count with this set
    pub fn intersects(&self, supported: &BTreeSet<u32>) -> bool {
        if supported.len() < self.counts.len() {
            supported.iter().any(|count| self.counts.contains(count))
        } else {
            self.counts.iter().any(|count| supported.contains(count))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn min(&self) -> Option<u32> {
        self.counts.first().copied()
    }

    pub fn max(&self) -> Option<u32> {
        self.counts.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.counts.iter().copied()
    }
}
