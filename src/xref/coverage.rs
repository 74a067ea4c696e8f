//! Coverage index over claimed character ranges
//!
//! Stored as disjoint, non-adjacent half-open intervals keyed by start in a
//! `BTreeMap`. Marking and querying cost O(log n) plus the intervals merged,
//! so memory grows with the number of findings rather than with document
//! length.

use crate::domain::{Finding, Span};
use std::collections::BTreeMap;

/// Union of character ranges already claimed by findings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageIndex {
    /// start -> end
    ranges: BTreeMap<usize, usize>,
}

impl CoverageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index covering every span of the given findings
    pub fn from_findings<'a>(findings: impl IntoIterator<Item = &'a Finding>) -> Self {
        let mut index = Self::new();
        for finding in findings {
            index.mark_covered(finding.start, finding.end);
        }
        index
    }

    /// Mark `[start, end)` as covered; empty ranges are ignored
    pub fn mark_covered(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }

        let mut lo = start;
        let mut hi = end;

        // An interval starting before `start` that reaches it gets absorbed
        if let Some((&prev_start, &prev_end)) = self.ranges.range(..start).next_back() {
            if prev_end >= start {
                lo = prev_start;
                hi = hi.max(prev_end);
            }
        }

        // Every interval starting inside `[start, end]` touches the new range
        let absorbed: Vec<usize> = self.ranges.range(lo..=end).map(|(&s, _)| s).collect();
        for s in absorbed {
            if let Some(e) = self.ranges.remove(&s) {
                hi = hi.max(e);
            }
        }

        self.ranges.insert(lo, hi);
    }

    /// True iff any position in `[start, end)` is covered
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        if start >= end {
            return false;
        }
        if let Some((_, &prev_end)) = self.ranges.range(..=start).next_back() {
            if prev_end > start {
                return true;
            }
        }
        self.ranges.range(start..end).next().is_some()
    }

    pub fn overlaps_span(&self, span: Span) -> bool {
        self.overlaps(span.start, span.end)
    }

    /// Number of disjoint intervals
    pub fn interval_count(&self) -> usize {
        self.ranges.len()
    }

    /// Number of covered character positions
    pub fn covered_len(&self) -> usize {
        self.ranges.iter().map(|(s, e)| e - s).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
