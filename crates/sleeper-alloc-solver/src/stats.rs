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

//! Run statistics: ledger totals, allocator counters and the onboard profile.

use crate::ledger::ResourceLedger;
use sleeper_alloc_core::station::StationIndex;
use sleeper_alloc_model::station::StationSequence;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerStats {
    pub total_allocations: usize,
    pub exclusive_allocations: usize,
    pub shared_allocations: usize,
    pub shared_pairs: usize,
    pub berths_used: usize,
    pub berths_in_catalog: usize,
    /// Sum over berths of the legs during which the berth is occupied.
    pub occupied_berth_legs: usize,
    /// Sum over allocations of the legs travelled. Exceeds
    /// `occupied_berth_legs` only where a shared pair rides together.
    pub passenger_legs: usize,
}

impl LedgerStats {
    pub fn from_ledger(ledger: &ResourceLedger) -> Self {
        let mut stats = LedgerStats {
            berths_in_catalog: ledger.berth_count(),
            ..Default::default()
        };
        for berth in ledger.used_berths() {
            let shared = ledger.shared_count(berth);
            stats.total_allocations += ledger.allocations(berth).len();
            stats.shared_allocations += shared;
            stats.exclusive_allocations += ledger.exclusive_count(berth);
            stats.shared_pairs += shared / 2;
            stats.berths_used += 1;
            stats.passenger_legs += ledger
                .allocations(berth)
                .iter()
                .map(|a| a.journey().legs())
                .sum::<usize>();
            stats.occupied_berth_legs += ledger
                .occupied_spans(berth)
                .iter()
                .map(|span| span.length::<usize>())
                .sum::<usize>();
        }
        stats
    }

    /// Occupied berth-legs over available berth-legs, in `[0, 1]`.
    pub fn utilization(&self, leg_count: usize) -> f64 {
        let capacity = self.berths_in_catalog * leg_count;
        if capacity == 0 {
            return 0.0;
        }
        self.occupied_berth_legs as f64 / capacity as f64
    }
}

impl Display for LedgerStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LedgerStats {{ total: {}, exclusive: {}, shared: {}, pairs: {}, berths used: {}/{} }}",
            self.total_allocations,
            self.exclusive_allocations,
            self.shared_allocations,
            self.shared_pairs,
            self.berths_used,
            self.berths_in_catalog
        )
    }
}

/// Counters the allocator keeps while processing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllocatorStats {
    pub requests: usize,
    pub allocated: usize,
    pub unallocated: usize,
    pub invalid: usize,
    /// Candidate berths tried and rejected.
    pub rejected_checks: usize,
}

impl Display for AllocatorStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AllocatorStats {{ requests: {}, allocated: {}, unallocated: {}, invalid: {}, rejected checks: {} }}",
            self.requests, self.allocated, self.unallocated, self.invalid, self.rejected_checks
        )
    }
}

/// Occupants aboard on every leg of the route.
///
/// Leg `s` runs from station `s` to station `s + 1`; an allocation counts on
/// every leg in `[board, alight)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardProfile {
    counts: Vec<usize>,
}

impl OnboardProfile {
    pub fn from_ledger(ledger: &ResourceLedger, stations: &StationSequence) -> Self {
        let legs = stations.leg_count();
        // Difference array over stations; alight <= legs for validated journeys.
        let mut delta = vec![0isize; legs + 1];
        for allocation in ledger.iter() {
            let journey = allocation.journey();
            let board = journey.board().value();
            let alight = journey.alight().value();
            if alight > legs {
                continue;
            }
            delta[board] += 1;
            delta[alight] -= 1;
        }
        let mut running = 0isize;
        let counts = delta[..legs]
            .iter()
            .map(|d| {
                running += d;
                running as usize
            })
            .collect();
        Self { counts }
    }

    #[inline]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Occupants aboard on the leg leaving `station`.
    #[inline]
    pub fn aboard_on(&self, station: StationIndex) -> usize {
        self.counts.get(station.value()).copied().unwrap_or(0)
    }

    /// The busiest leg and its count. Earliest leg wins ties.
    pub fn peak(&self) -> Option<(StationIndex, usize)> {
        self.counts
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, usize)>, (i, &c)| match best {
                Some((_, b)) if b >= c => best,
                _ => Some((i, c)),
            })
            .map(|(i, c)| (StationIndex::new(i), c))
    }
}
