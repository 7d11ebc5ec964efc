//! Offset to position resolution over the sorted element sequence.

use std::ops::Range;

use rustc_hash::FxHashMap;
use text_size::{TextRange, TextSize};

/// Ranges of the sorted elements plus a map from exact start offsets to
/// positions.
///
/// Only non-empty elements are entered into the start map, and each start
/// offset maps to the first non-empty element with that start.
pub(crate) struct Index {
    ranges: Box<[TextRange]>,
    starts: FxHashMap<TextSize, usize>,
}

impl Index {
    /// `ranges` must already be sorted by start offset.
    pub(crate) fn new(ranges: Box<[TextRange]>) -> Self {
        debug_assert!(ranges.is_sorted_by_key(|range| range.start()));

        let mut starts = FxHashMap::with_capacity_and_hasher(ranges.len(), Default::default());
        for (position, range) in ranges.iter().enumerate() {
            if !range.is_empty() {
                starts.entry(range.start()).or_insert(position);
            }
        }

        Self { ranges, starts }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.ranges.len()
    }

    #[inline]
    pub(crate) fn range(&self, position: usize) -> TextRange {
        self.ranges[position]
    }

    /// Position of the first non-empty element starting exactly at `offset`.
    #[inline]
    pub(crate) fn exact(&self, offset: TextSize) -> Option<usize> {
        self.starts.get(&offset).copied()
    }

    /// Binary search by start offset.
    ///
    /// Returns the position of an element starting at `offset` if there is
    /// one, otherwise the position of the first element starting after it.
    pub(crate) fn locate(&self, offset: TextSize) -> usize {
        self.ranges.partition_point(|range| range.start() < offset)
    }

    #[inline]
    fn anchor(&self, offset: TextSize) -> usize {
        self.exact(offset).unwrap_or_else(|| self.locate(offset))
    }

    /// Position of the first element whose start is `>= offset`, never a
    /// zero-width one.
    pub(crate) fn lower_bound(&self, offset: TextSize) -> usize {
        let mut position = self.anchor(offset);
        while position < self.ranges.len() && self.ranges[position].is_empty() {
            position += 1;
        }
        position
    }

    /// One past the last element whose end is `<= offset`, never a
    /// zero-width one. `0` when there is no such element.
    pub(crate) fn upper_bound(&self, offset: TextSize) -> usize {
        let mut position = self.anchor(offset);
        while position > 0 && self.ranges[position - 1].is_empty() {
            position -= 1;
        }
        position
    }

    /// Positions of the elements lying within `[start, end)`.
    ///
    /// Empty (possibly with `start > end`) when nothing lies in between.
    #[inline]
    pub(crate) fn window(&self, start: TextSize, end: TextSize) -> Range<usize> {
        self.lower_bound(start)..self.upper_bound(end)
    }

    /// Positions of the elements ending at or before `offset`.
    #[inline]
    pub(crate) fn before(&self, offset: TextSize) -> Range<usize> {
        0..self.upper_bound(offset)
    }

    /// Positions of the elements starting at or after `offset`.
    #[inline]
    pub(crate) fn after(&self, offset: TextSize) -> Range<usize> {
        self.lower_bound(offset)..self.ranges.len()
    }
}
