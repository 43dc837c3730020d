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

//! # Sleeper Allocation Core (`sleeper-alloc-core`)
//!
//! Foundational, domain-neutral building blocks for berth allocation on a train:
//!
//! - [`primitives::Interval`]: a half-open `[start, end)` interval.
//! - [`station::StationIndex`] and [`station::Journey`]: positions along the
//!   station sequence and the stretch a passenger occupies a berth for.
//!
//! Everything above this crate (catalogs, ledgers, allocators) measures
//! occupancy in station legs using these types.

pub mod primitives;
pub mod station;

pub mod prelude {
    pub use crate::primitives::Interval;
    pub use crate::station::{
        InvalidJourneyError, Journey, JourneyNotForwardError, JourneyOutOfRangeError,
        StationIndex, StationInterval,
    };
}
