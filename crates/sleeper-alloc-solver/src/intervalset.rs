// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Sorted, coalesced span set over `Interval<T>`.
//!
//! The ledger keeps one set per berth holding the union of every journey
//! committed to that berth, so a free check is a single binary search.
//!
//! Spans are kept sorted by start, non-empty and strictly apart: `[1, 3)` and
//! `[3, 5)` are stored as `[1, 5)`. A half-open query overlaps the merged span
//! exactly when it overlaps one of the halves, so merging loses nothing.

use sleeper_alloc_core::primitives::Interval;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntervalSet<T> {
    spans: Vec<Interval<T>>,
}

impl<T> IntervalSet<T> {
    #[inline]
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Interval<T>] {
        &self.spans
    }

    /// Position of the first span ending strictly after `point`. Every span
    /// before it lies at or left of `point`.
    #[inline]
    fn first_ending_after(&self, point: T) -> usize
    where
        T: Ord + Copy,
    {
        self.spans.partition_point(|span| span.end() <= point)
    }

    /// Adds `span`, absorbing every stored span it overlaps or touches.
    pub fn insert_and_coalesce(&mut self, span: Interval<T>)
    where
        T: Ord + Copy,
    {
        if span.is_empty() {
            return;
        }

        // First stored span that could merge: one ending at or after our start.
        let first = self.spans.partition_point(|s| s.end() < span.start());
        let mut last = first;
        let (mut start, mut end) = (span.start(), span.end());
        while last < self.spans.len() && self.spans[last].start() <= end {
            start = start.min(self.spans[last].start());
            end = end.max(self.spans[last].end());
            last += 1;
        }

        self.spans
            .splice(first..last, std::iter::once(Interval::new(start, end)));
        debug_assert!(self.is_coalesced());
    }

    /// `true` if some stored span shares a point with `query`.
    #[inline]
    pub fn overlaps(&self, query: Interval<T>) -> bool
    where
        T: Ord + Copy,
    {
        if query.is_empty() {
            return false;
        }
        let i = self.first_ending_after(query.start());
        i < self.spans.len() && self.spans[i].start() < query.end()
    }

    /// The parts of `bounds` not covered by the set.
    pub fn gaps_within(&self, bounds: Interval<T>) -> Self
    where
        T: Ord + Copy,
    {
        let mut gaps = Self::new();
        if bounds.is_empty() {
            return gaps;
        }

        let mut cursor = bounds.start();
        for span in &self.spans[self.first_ending_after(bounds.start())..] {
            if span.start() >= bounds.end() {
                break;
            }
            if cursor < span.start() {
                gaps.spans.push(Interval::new(cursor, span.start()));
            }
            cursor = cursor.max(span.end());
        }
        if cursor < bounds.end() {
            gaps.spans.push(Interval::new(cursor, bounds.end()));
        }
        gaps
    }

    fn is_coalesced(&self) -> bool
    where
        T: Ord + Copy,
    {
        self.spans.iter().all(|s| !s.is_empty())
            && self.spans.windows(2).all(|w| w[0].end() < w[1].start())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type SetI = IntervalSet<i32>;

    fn iv(a: i32, b: i32) -> Interval<i32> {
        Interval::new(a, b)
    }

    fn set(spans: &[(i32, i32)]) -> SetI {
        let mut s = SetI::new();
        for &(a, b) in spans {
            s.insert_and_coalesce(iv(a, b));
        }
        assert!(s.is_coalesced(), "{:?}", s);
        s
    }

    #[test]
    fn empty_set_overlaps_nothing() {
        let s = SetI::new();
        assert!(s.as_slice().is_empty());
        assert!(!s.overlaps(iv(0, 100)));
    }

    #[test]
    fn insert_sorts_and_merges_touching_neighbours() {
        let mut s = set(&[(6, 9), (0, 3)]);
        assert_eq!(s.as_slice(), &[iv(0, 3), iv(6, 9)]);
        s.insert_and_coalesce(iv(3, 6));
        assert_eq!(s.as_slice(), &[iv(0, 9)]);
    }

    #[test]
    fn insert_spanning_many_absorbs_them() {
        let mut s = set(&[(1, 2), (4, 5), (7, 8), (20, 21)]);
        s.insert_and_coalesce(iv(0, 10));
        assert_eq!(s.as_slice(), &[iv(0, 10), iv(20, 21)]);
        s.insert_and_coalesce(iv(12, 14));
        assert_eq!(s.as_slice(), &[iv(0, 10), iv(12, 14), iv(20, 21)]);
        s.insert_and_coalesce(iv(5, 5));
        assert_eq!(s.as_slice().len(), 3);
    }

    #[test]
    fn insert_inside_an_existing_span_changes_nothing() {
        let mut s = set(&[(0, 10)]);
        s.insert_and_coalesce(iv(3, 4));
        assert_eq!(s.as_slice(), &[iv(0, 10)]);
    }

    #[test]
    fn overlaps_is_half_open() {
        let s = set(&[(1, 3), (5, 6), (8, 10)]);
        assert!(s.overlaps(iv(2, 4)));
        assert!(s.overlaps(iv(9, 12)));
        assert!(!s.overlaps(iv(3, 5)));
        assert!(!s.overlaps(iv(6, 8)));
        assert!(!s.overlaps(iv(12, 15)));
        assert!(!s.overlaps(iv(2, 2)));
    }

    #[test]
    fn merged_touching_spans_answer_like_the_halves() {
        let merged = set(&[(0, 3), (3, 6)]);
        assert_eq!(merged.as_slice(), &[iv(0, 6)]);
        assert!(!merged.overlaps(iv(6, 9)));
        assert!(!merged.overlaps(iv(-2, 0)));
        assert!(merged.overlaps(iv(2, 4)));
    }

    #[test]
    fn gaps_within_bounds() {
        let s = set(&[(2, 4), (6, 8)]);
        assert_eq!(
            s.gaps_within(iv(0, 10)).as_slice(),
            &[iv(0, 2), iv(4, 6), iv(8, 10)]
        );
        assert_eq!(s.gaps_within(iv(3, 7)).as_slice(), &[iv(4, 6)]);
        assert!(s.gaps_within(iv(2, 4)).as_slice().is_empty());
        assert!(s.gaps_within(iv(5, 5)).as_slice().is_empty());
        assert_eq!(SetI::new().gaps_within(iv(1, 5)).as_slice(), &[iv(1, 5)]);
    }
}
