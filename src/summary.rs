//! Per-kind step statistics for report summaries.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::kind::StepKind;
use crate::step::Step;

/// Number of steps of each kind, ordered by first appearance.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KindCounts {
    counts: IndexMap<StepKind, usize>,
}

impl KindCounts {
    /// Tally the kinds of `steps`.
    pub fn from_steps(steps: &[Step]) -> Self {
        let mut counts = Self::default();
        for step in steps {
            counts.record(step.kind());
        }
        counts
    }

    /// Count one more step of `kind`.
    pub fn record(&mut self, kind: StepKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    /// Count for `kind`, zero if it never appeared.
    pub fn get(&self, kind: StepKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(kind, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (StepKind, usize)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }
}

impl Serialize for KindCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.counts.iter().map(|(kind, count)| (kind.tag(), count)))
    }
}
