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

//! # Core Primitives
//!
//! The half-open interval every occupancy computation in the workspace is built on.
//! A berth is occupied from the station a passenger boards at up to, but not
//! including, the station they alight at, so `[start, end)` is the natural shape.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Sub;

/// A half-open interval `[start, end)`.
///
/// The start is inclusive and the end is exclusive. Two intervals that only
/// touch at a boundary (`a.end() == b.start()`) do not intersect.
///
/// # Examples
///
/// ```
/// use sleeper_alloc_core::primitives::Interval;
/// let interval = Interval::new(1, 5);
/// assert_eq!(interval.start(), 1);
/// assert_eq!(interval.end(), 5);
/// assert!(interval.contains(3));
/// assert!(!interval.contains(5));
/// assert_eq!(interval.length(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    start_inclusive: T,
    end_exclusive: T,
}

impl<T> Interval<T> {
    /// Creates a new half-open interval from two bounds.
    ///
    /// The smaller bound becomes the start, so `Interval::new(5, 3)` is `[3, 5)`.
    ///
    /// # Panics
    ///
    /// Panics if the bounds are not comparable (NaN).
    ///
    /// # Examples
    ///
    /// ```
    /// use sleeper_alloc_core::primitives::Interval;
    ///
    /// let interval = Interval::new(5, 3);
    /// assert_eq!(interval.start(), 3);
    /// assert_eq!(interval.end(), 5);
    /// ```
    #[inline]
    pub fn new(a: T, b: T) -> Self
    where
        T: PartialOrd + Copy,
    {
        let ord = a
            .partial_cmp(&b)
            .expect("Interval::new: non-comparable bounds (NaN?)");
        let (start_inclusive, end_exclusive) = match ord {
            Ordering::Greater => (b, a),
            _ => (a, b),
        };
        Self {
            start_inclusive,
            end_exclusive,
        }
    }

    /// Returns the inclusive start.
    #[inline]
    pub fn start(&self) -> T
    where
        T: Copy,
    {
        self.start_inclusive
    }

    /// Returns the exclusive end.
    #[inline]
    pub fn end(&self) -> T
    where
        T: Copy,
    {
        self.end_exclusive
    }

    /// Returns `true` if the interval covers nothing.
    ///
    /// ```
    /// use sleeper_alloc_core::primitives::Interval;
    ///
    /// assert!(Interval::new(4, 4).is_empty());
    /// assert!(!Interval::new(1, 4).is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool
    where
        T: PartialEq,
    {
        self.start_inclusive == self.end_exclusive
    }

    /// Returns `true` if `x` lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, x: T) -> bool
    where
        T: PartialOrd,
    {
        x >= self.start_inclusive && x < self.end_exclusive
    }

    /// Returns `true` if the two intervals share at least one point.
    ///
    /// This is the overlap test used for berth occupancy:
    /// `a.start < b.end && b.start < a.end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sleeper_alloc_core::primitives::Interval;
    ///
    /// let a = Interval::new(0, 5);
    /// assert!(a.intersects(&Interval::new(2, 8)));
    /// assert!(!a.intersects(&Interval::new(5, 8))); // touching only
    /// ```
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool
    where
        T: PartialOrd + Copy,
    {
        self.start_inclusive < other.end_exclusive && other.start_inclusive < self.end_exclusive
    }

    /// Returns the shared part of the two intervals, or `None` if they do not intersect.
    ///
    /// ```
    /// use sleeper_alloc_core::primitives::Interval;
    ///
    /// let a = Interval::new(0, 5);
    /// assert_eq!(a.intersection(&Interval::new(2, 8)), Some(Interval::new(2, 5)));
    /// assert_eq!(a.intersection(&Interval::new(5, 8)), None);
    /// ```
    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Self>
    where
        T: PartialOrd + Copy,
    {
        let start = if self.start_inclusive > other.start_inclusive {
            self.start_inclusive
        } else {
            other.start_inclusive
        };
        let end = if self.end_exclusive < other.end_exclusive {
            self.end_exclusive
        } else {
            other.end_exclusive
        };
        (start < end).then_some(Self {
            start_inclusive: start,
            end_exclusive: end,
        })
    }

    /// Returns `end - start`.
    #[inline]
    pub fn length<D>(&self) -> D
    where
        T: Copy + Sub<Output = D>,
    {
        self.end_exclusive - self.start_inclusive
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}
