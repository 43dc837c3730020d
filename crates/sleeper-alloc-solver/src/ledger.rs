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

//! # Resource Ledger
//!
//! Per-berth record of committed allocations; the only mutable state of an
//! allocation run. Allocations are append-only.
//!
//! Each berth keeps its allocations in insertion order next to an
//! [`IntervalSet`] holding the union of their journeys. Free-for-exclusive
//! queries are answered from that merged set with a binary search; debug
//! builds cross-check every answer against the pairwise scan.

use crate::intervalset::IntervalSet;
use sleeper_alloc_core::station::{Journey, StationIndex, StationInterval};
use sleeper_alloc_model::{
    catalog::BerthCatalog,
    id::{BerthId, OccupantId},
};
use std::collections::HashMap;
use std::fmt::Display;

/// `a.board < b.alight && b.board < a.alight`.
///
/// Touching journeys (`a.alight == b.board`) do not overlap.
#[inline]
pub fn overlaps(a: &Journey, b: &Journey) -> bool {
    a.overlaps(b)
}

/// One occupant committed to one berth for one journey.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Allocation {
    berth: BerthId,
    journey: Journey,
    occupant: OccupantId,
    shared: bool,
}

impl Allocation {
    #[inline]
    pub fn new(berth: BerthId, journey: Journey, occupant: OccupantId, shared: bool) -> Self {
        Self {
            berth,
            journey,
            occupant,
            shared,
        }
    }

    #[inline]
    pub fn berth(&self) -> BerthId {
        self.berth
    }

    #[inline]
    pub fn journey(&self) -> Journey {
        self.journey
    }

    #[inline]
    pub fn occupant(&self) -> &OccupantId {
        &self.occupant
    }

    #[inline]
    pub fn is_shared(&self) -> bool {
        self.shared
    }
}

impl Display for Allocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Allocation {{ berth: {}, journey: {}, occupant: {}, shared: {} }}",
            self.berth, self.journey, self.occupant, self.shared
        )
    }
}

/// How a berth is currently used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BerthMode {
    Vacant,
    Exclusive,
    SharedPair,
}

impl Display for BerthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BerthMode::Vacant => write!(f, "Vacant"),
            BerthMode::Exclusive => write!(f, "Exclusive"),
            BerthMode::SharedPair => write!(f, "SharedPair"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownBerthError {
    berth: BerthId,
    berth_count: usize,
}

impl UnknownBerthError {
    #[inline]
    pub fn new(berth: BerthId, berth_count: usize) -> Self {
        Self { berth, berth_count }
    }

    #[inline]
    pub fn berth(&self) -> BerthId {
        self.berth
    }

    #[inline]
    pub fn berth_count(&self) -> usize {
        self.berth_count
    }
}

impl Display for UnknownBerthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} is not in a ledger of {} berths",
            self.berth, self.berth_count
        )
    }
}

impl std::error::Error for UnknownBerthError {}

#[derive(Debug, Clone, Default)]
struct BerthEntry {
    allocations: Vec<Allocation>,
    occupied: IntervalSet<StationIndex>,
    shared: usize,
}

impl BerthEntry {
    fn is_free_naive(&self, journey: &Journey) -> bool {
        self.allocations
            .iter()
            .all(|a| !overlaps(&a.journey, journey))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceLedger {
    entries: Vec<BerthEntry>,
    // First placement of each occupant: (berth, position in that berth's list).
    occupants: HashMap<OccupantId, (BerthId, usize)>,
    total: usize,
}

impl ResourceLedger {
    /// An empty ledger over berths `0..berth_count`.
    pub fn new(berth_count: usize) -> Self {
        Self {
            entries: vec![BerthEntry::default(); berth_count],
            occupants: HashMap::new(),
            total: 0,
        }
    }

    #[inline]
    pub fn for_catalog(catalog: &BerthCatalog) -> Self {
        Self::new(catalog.len())
    }

    #[inline]
    pub fn berth_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of allocations across all berths.
    #[inline]
    pub fn len(&self) -> usize {
        self.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    #[inline]
    pub fn contains_berth(&self, berth: BerthId) -> bool {
        berth.index() < self.entries.len()
    }

    #[inline]
    fn entry(&self, berth: BerthId) -> Option<&BerthEntry> {
        self.entries.get(berth.index())
    }

    /// Allocations on `berth` in insertion order. Empty for unknown berths.
    #[inline]
    pub fn allocations(&self, berth: BerthId) -> &[Allocation] {
        self.entry(berth)
            .map(|e| e.allocations.as_slice())
            .unwrap_or(&[])
    }

    #[inline]
    pub fn shared_count(&self, berth: BerthId) -> usize {
        self.entry(berth).map_or(0, |e| e.shared)
    }

    #[inline]
    pub fn exclusive_count(&self, berth: BerthId) -> usize {
        self.entry(berth)
            .map_or(0, |e| e.allocations.len() - e.shared)
    }

    /// Shared allocations take precedence: a berth holding any is in shared mode.
    #[inline]
    pub fn mode(&self, berth: BerthId) -> BerthMode {
        match self.entry(berth) {
            Some(e) if e.shared > 0 => BerthMode::SharedPair,
            Some(e) if !e.allocations.is_empty() => BerthMode::Exclusive,
            _ => BerthMode::Vacant,
        }
    }

    /// The merged, sorted spans during which `berth` is occupied.
    #[inline]
    pub fn occupied_spans(&self, berth: BerthId) -> &[StationInterval] {
        self.entry(berth)
            .map(|e| e.occupied.as_slice())
            .unwrap_or(&[])
    }

    /// The stretches of `route` during which `berth` is unoccupied.
    pub fn free_spans(&self, berth: BerthId, route: StationInterval) -> IntervalSet<StationIndex> {
        match self.entry(berth) {
            Some(e) => e.occupied.gaps_within(route),
            None => IntervalSet::new(),
        }
    }

    /// `true` iff no allocation on `berth` overlaps `journey`. Unknown berths
    /// are never free.
    pub fn is_free_for_exclusive(&self, berth: BerthId, journey: &Journey) -> bool {
        let Some(entry) = self.entry(berth) else {
            return false;
        };
        let free = !entry.occupied.overlaps(journey.stretch());
        debug_assert_eq!(
            free,
            entry.is_free_naive(journey),
            "merged spans of {} disagree with the pairwise scan for {}",
            berth,
            journey
        );
        free
    }

    /// Where `occupant` was placed. The first placement wins when an id was
    /// allocated more than once.
    pub fn locate(&self, occupant: &OccupantId) -> Option<&Allocation> {
        let (berth, position) = self.occupants.get(occupant)?;
        self.entry(*berth)?.allocations.get(*position)
    }

    /// All allocations, berth by berth, each berth in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Allocation> + '_ {
        self.entries.iter().flat_map(|e| e.allocations.iter())
    }

    /// Berths holding at least one allocation.
    pub fn used_berths(&self) -> impl Iterator<Item = BerthId> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.allocations.is_empty())
            .map(|(i, _)| BerthId::new(i as u32))
    }

    /// Appends `allocation` without any policy checks.
    ///
    /// The allocator only calls this after its checks pass; ledgers assembled
    /// directly through it can be audited with [`crate::verify::verify`].
    pub fn record_unchecked(&mut self, allocation: Allocation) -> Result<(), UnknownBerthError> {
        let berth_count = self.entries.len();
        let berth = allocation.berth;
        let entry = self
            .entries
            .get_mut(berth.index())
            .ok_or(UnknownBerthError::new(berth, berth_count))?;

        entry.occupied.insert_and_coalesce(allocation.journey.stretch());
        if allocation.shared {
            entry.shared += 1;
        }
        let position = entry.allocations.len();
        self.occupants
            .entry(allocation.occupant.clone())
            .or_insert((berth, position));
        entry.allocations.push(allocation);
        self.total += 1;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ResourceLedger {
    type Item = &'a Allocation;
    type IntoIter = Box<dyn Iterator<Item = &'a Allocation> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
