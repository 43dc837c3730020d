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

//! Station coordinates and journeys.
//!
//! A train runs over a fixed, zero-indexed sequence of stations. A
//! [`StationIndex`] is a position in that sequence and a [`Journey`] is the
//! half-open stretch `[board, alight)` a passenger occupies a berth for.
//! Passengers alighting at a station free the berth for passengers boarding
//! at the same station.

use crate::primitives::Interval;
use std::fmt::Display;
use std::ops::Sub;

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct StationIndex(usize);

impl StationIndex {
    #[inline]
    pub const fn new(v: usize) -> Self {
        StationIndex(v)
    }

    #[inline]
    pub const fn value(self) -> usize {
        self.0
    }

    /// The station directly after this one.
    #[inline]
    pub const fn next(self) -> Self {
        StationIndex(self.0 + 1)
    }
}

impl Display for StationIndex {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Station({})", self.0)
    }
}

impl From<usize> for StationIndex {
    #[inline]
    fn from(v: usize) -> Self {
        StationIndex(v)
    }
}

/// Number of legs between two stations.
impl Sub for StationIndex {
    type Output = usize;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.0 - rhs.0
    }
}

pub type StationInterval = Interval<StationIndex>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JourneyNotForwardError {
    board: StationIndex,
    alight: StationIndex,
}

impl JourneyNotForwardError {
    #[inline]
    pub fn new(board: StationIndex, alight: StationIndex) -> Self {
        Self { board, alight }
    }

    #[inline]
    pub fn board(&self) -> StationIndex {
        self.board
    }

    #[inline]
    pub fn alight(&self) -> StationIndex {
        self.alight
    }
}

impl Display for JourneyNotForwardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Journey must alight after boarding: board {} >= alight {}",
            self.board, self.alight
        )
    }
}

impl std::error::Error for JourneyNotForwardError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JourneyOutOfRangeError {
    journey: Journey,
    station_count: usize,
}

impl JourneyOutOfRangeError {
    #[inline]
    pub fn new(journey: Journey, station_count: usize) -> Self {
        Self {
            journey,
            station_count,
        }
    }

    #[inline]
    pub fn journey(&self) -> Journey {
        self.journey
    }

    #[inline]
    pub fn station_count(&self) -> usize {
        self.station_count
    }
}

impl Display for JourneyOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Journey {} leaves the station sequence of {} stations",
            self.journey, self.station_count
        )
    }
}

impl std::error::Error for JourneyOutOfRangeError {}

/// A journey that cannot be placed on any berth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidJourneyError {
    /// `board >= alight`.
    NotForward(JourneyNotForwardError),
    /// A station index is outside `[0, N)`.
    OutOfRange(JourneyOutOfRangeError),
}

impl Display for InvalidJourneyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidJourneyError::NotForward(e) => write!(f, "{}", e),
            InvalidJourneyError::OutOfRange(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InvalidJourneyError {}

impl From<JourneyNotForwardError> for InvalidJourneyError {
    fn from(err: JourneyNotForwardError) -> Self {
        InvalidJourneyError::NotForward(err)
    }
}

impl From<JourneyOutOfRangeError> for InvalidJourneyError {
    fn from(err: JourneyOutOfRangeError) -> Self {
        InvalidJourneyError::OutOfRange(err)
    }
}

/// A passenger's stretch of the route, `[board, alight)`.
///
/// Construction guarantees `board < alight`, so a `Journey` is never empty.
/// Whether it fits a particular station sequence is checked separately with
/// [`Journey::check_within`].
///
/// # Examples
///
/// ```
/// use sleeper_alloc_core::station::Journey;
///
/// let a = Journey::from_indices(0, 3).unwrap();
/// let b = Journey::from_indices(3, 6).unwrap();
/// assert!(!a.overlaps(&b)); // a alights where b boards
/// assert!(Journey::from_indices(4, 4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Journey {
    stretch: StationInterval,
}

impl Journey {
    #[inline]
    pub fn new(board: StationIndex, alight: StationIndex) -> Result<Self, JourneyNotForwardError> {
        if board >= alight {
            return Err(JourneyNotForwardError::new(board, alight));
        }
        Ok(Self {
            stretch: Interval::new(board, alight),
        })
    }

    #[inline]
    pub fn from_indices(board: usize, alight: usize) -> Result<Self, JourneyNotForwardError> {
        Self::new(StationIndex::new(board), StationIndex::new(alight))
    }

    #[inline]
    pub fn board(&self) -> StationIndex {
        self.stretch.start()
    }

    #[inline]
    pub fn alight(&self) -> StationIndex {
        self.stretch.end()
    }

    #[inline]
    pub fn stretch(&self) -> StationInterval {
        self.stretch
    }

    /// Number of station-to-station legs travelled.
    #[inline]
    pub fn legs(&self) -> usize {
        self.alight() - self.board()
    }

    /// `true` iff the two journeys share at least one leg.
    #[inline]
    pub fn overlaps(&self, other: &Journey) -> bool {
        self.stretch.intersects(&other.stretch)
    }

    /// The legs both journeys travel, if any.
    #[inline]
    pub fn overlap(&self, other: &Journey) -> Option<StationInterval> {
        self.stretch.intersection(&other.stretch)
    }

    /// Checks that both ends lie inside a sequence of `station_count` stations.
    #[inline]
    pub fn check_within(&self, station_count: usize) -> Result<(), JourneyOutOfRangeError> {
        // board < alight, so bounding alight bounds both.
        if self.alight().value() >= station_count {
            return Err(JourneyOutOfRangeError::new(*self, station_count));
        }
        Ok(())
    }
}

impl TryFrom<(usize, usize)> for Journey {
    type Error = JourneyNotForwardError;

    fn try_from((board, alight): (usize, usize)) -> Result<Self, Self::Error> {
        Journey::from_indices(board, alight)
    }
}

impl Display for Journey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} -> {})", self.board().value(), self.alight().value())
    }
}
