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

//! # Allocator
//!
//! Greedy, single-pass, first-fit allocation of requests to berths.
//!
//! Two policies write to the ledger:
//!
//! - **exclusive**: one occupant per berth at a time. A berth accepts if no
//!   allocation on it overlaps the journey and it holds no shared pair.
//! - **shared pair**: two occupants with overlapping journeys seated together
//!   on one shareable berth that is otherwise empty. Both allocations are
//!   committed or neither is.
//!
//! Requests are searched over the candidate order their [`SearchPolicy`]
//! resolves to; the first berth that accepts wins and nothing is revisited.

use crate::{
    ledger::{Allocation, ResourceLedger},
    search::SearchPolicy,
    stats::AllocatorStats,
};
use sleeper_alloc_core::station::{InvalidJourneyError, Journey};
use sleeper_alloc_model::{
    catalog::BerthCatalog,
    id::{BerthId, OccupantId},
    req::{Occupant, Request},
    station::StationSequence,
};
use std::fmt::Display;
use tracing::{debug, info, instrument, trace};

/// Why a berth turned a request down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// An existing allocation overlaps the journey.
    Occupied,
    /// The berth holds a shared pair; exclusive occupants may not join it.
    SharedMode,
    /// The berth is not in the catalog.
    UnknownBerth,
    /// The berth's kind is not shareable.
    NotShareable,
    /// The berth already seats a shared pair.
    PairAlreadySeated,
    /// The berth holds exclusive allocations.
    ExclusiveMode,
    /// The two journeys of the pair do not overlap.
    DisjointPair,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Rejection::Occupied => "occupied",
            Rejection::SharedMode => "berth seats a shared pair",
            Rejection::UnknownBerth => "unknown berth",
            Rejection::NotShareable => "berth kind is not shareable",
            Rejection::PairAlreadySeated => "a pair is already seated",
            Rejection::ExclusiveMode => "berth holds exclusive occupants",
            Rejection::DisjointPair => "pair journeys do not overlap",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOutcome {
    Accepted,
    Rejected(Rejection),
}

impl AssignOutcome {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, AssignOutcome::Accepted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
    Allocated { berth: BerthId },
    /// Every candidate rejected the request. Not an error.
    Unallocated,
}

impl RequestOutcome {
    #[inline]
    pub fn berth(&self) -> Option<BerthId> {
        match self {
            RequestOutcome::Allocated { berth } => Some(*berth),
            RequestOutcome::Unallocated => None,
        }
    }
}

impl Display for RequestOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestOutcome::Allocated { berth } => write!(f, "Allocated({})", berth),
            RequestOutcome::Unallocated => write!(f, "Unallocated"),
        }
    }
}

pub struct Allocator<'a> {
    stations: &'a StationSequence,
    catalog: &'a BerthCatalog,
    exclusive_candidates: Vec<BerthId>,
    shared_candidates: Vec<BerthId>,
    ledger: ResourceLedger,
    stats: AllocatorStats,
}

impl<'a> Allocator<'a> {
    /// Resolves both plans of `policy` against `catalog` once, up front.
    pub fn new(
        stations: &'a StationSequence,
        catalog: &'a BerthCatalog,
        policy: &SearchPolicy,
    ) -> Self {
        Self {
            stations,
            catalog,
            exclusive_candidates: policy.exclusive().resolve(catalog),
            shared_candidates: policy.shared().resolve(catalog),
            ledger: ResourceLedger::for_catalog(catalog),
            stats: AllocatorStats::default(),
        }
    }

    #[inline]
    pub fn with_default_policy(stations: &'a StationSequence, catalog: &'a BerthCatalog) -> Self {
        Self::new(stations, catalog, &SearchPolicy::default())
    }

    #[inline]
    pub fn stations(&self) -> &'a StationSequence {
        self.stations
    }

    #[inline]
    pub fn catalog(&self) -> &'a BerthCatalog {
        self.catalog
    }

    #[inline]
    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    #[inline]
    pub fn into_ledger(self) -> ResourceLedger {
        self.ledger
    }

    #[inline]
    pub fn stats(&self) -> &AllocatorStats {
        &self.stats
    }

    #[inline]
    pub fn exclusive_candidates(&self) -> &[BerthId] {
        &self.exclusive_candidates
    }

    #[inline]
    pub fn shared_candidates(&self) -> &[BerthId] {
        &self.shared_candidates
    }

    fn reject(&mut self, berth: BerthId, reason: Rejection) -> AssignOutcome {
        trace!(%berth, %reason, "candidate rejected");
        self.stats.rejected_checks += 1;
        AssignOutcome::Rejected(reason)
    }

    /// Seats `occupant` alone on `berth` for `journey`.
    ///
    /// Fails only if the journey leaves the station sequence; the ledger is
    /// not consulted in that case.
    pub fn assign_exclusive(
        &mut self,
        berth: BerthId,
        journey: Journey,
        occupant: &OccupantId,
    ) -> Result<AssignOutcome, InvalidJourneyError> {
        self.stations.validate(&journey)?;

        if !self.catalog.contains(berth) {
            return Ok(self.reject(berth, Rejection::UnknownBerth));
        }
        if self.ledger.shared_count(berth) > 0 {
            return Ok(self.reject(berth, Rejection::SharedMode));
        }
        if !self.ledger.is_free_for_exclusive(berth, &journey) {
            return Ok(self.reject(berth, Rejection::Occupied));
        }

        self.commit(Allocation::new(berth, journey, occupant.clone(), false));
        Ok(AssignOutcome::Accepted)
    }

    /// Seats `first` and `second` together on a shareable `berth`.
    pub fn assign_shared_pair(
        &mut self,
        berth: BerthId,
        first: &Occupant,
        second: &Occupant,
    ) -> Result<AssignOutcome, InvalidJourneyError> {
        let (a, b) = (first.journey(), second.journey());
        self.stations.validate(&a)?;
        self.stations.validate(&b)?;

        let Some(kind) = self.catalog.berth(berth).map(|entry| entry.kind()) else {
            return Ok(self.reject(berth, Rejection::UnknownBerth));
        };
        if !self.catalog.is_shareable(kind) {
            return Ok(self.reject(berth, Rejection::NotShareable));
        }
        if self.ledger.shared_count(berth) > 0 {
            return Ok(self.reject(berth, Rejection::PairAlreadySeated));
        }
        if self.ledger.exclusive_count(berth) > 0 {
            return Ok(self.reject(berth, Rejection::ExclusiveMode));
        }
        if !a.overlaps(&b) {
            return Ok(self.reject(berth, Rejection::DisjointPair));
        }
        if !self.ledger.is_free_for_exclusive(berth, &a)
            || !self.ledger.is_free_for_exclusive(berth, &b)
        {
            return Ok(self.reject(berth, Rejection::Occupied));
        }

        // Both checks passed; neither commit can fail for a cataloged berth.
        self.commit(Allocation::new(berth, a, first.id().clone(), true));
        self.commit(Allocation::new(berth, b, second.id().clone(), true));
        Ok(AssignOutcome::Accepted)
    }

    fn commit(&mut self, allocation: Allocation) {
        // The ledger is sized from the same catalog the berth was checked against.
        let recorded = self.ledger.record_unchecked(allocation);
        debug_assert!(recorded.is_ok(), "{:?}", recorded);
    }

    /// First-fit search for one request.
    #[instrument(level = "debug", skip_all, fields(request = %request))]
    pub fn allocate(&mut self, request: &Request) -> Result<RequestOutcome, InvalidJourneyError> {
        self.stats.requests += 1;
        let outcome = match request {
            Request::Exclusive(occupant) => self.search_exclusive(occupant),
            Request::SharedPair { first, second } => self.search_shared(first, second),
        };
        match &outcome {
            Ok(RequestOutcome::Allocated { berth }) => {
                self.stats.allocated += 1;
                trace!(%berth, "allocated");
            }
            Ok(RequestOutcome::Unallocated) => {
                self.stats.unallocated += 1;
                debug!("no candidate berth accepted the request");
            }
            Err(e) => {
                self.stats.invalid += 1;
                debug!(error = %e, "invalid journey");
            }
        }
        outcome
    }

    fn search_exclusive(
        &mut self,
        occupant: &Occupant,
    ) -> Result<RequestOutcome, InvalidJourneyError> {
        self.stations.validate(&occupant.journey())?;
        for i in 0..self.exclusive_candidates.len() {
            let berth = self.exclusive_candidates[i];
            if self
                .assign_exclusive(berth, occupant.journey(), occupant.id())?
                .is_accepted()
            {
                return Ok(RequestOutcome::Allocated { berth });
            }
        }
        Ok(RequestOutcome::Unallocated)
    }

    fn search_shared(
        &mut self,
        first: &Occupant,
        second: &Occupant,
    ) -> Result<RequestOutcome, InvalidJourneyError> {
        self.stations.validate(&first.journey())?;
        self.stations.validate(&second.journey())?;
        for i in 0..self.shared_candidates.len() {
            let berth = self.shared_candidates[i];
            if self
                .assign_shared_pair(berth, first, second)?
                .is_accepted()
            {
                return Ok(RequestOutcome::Allocated { berth });
            }
        }
        Ok(RequestOutcome::Unallocated)
    }

    /// Processes `requests` in order; one result per request.
    #[instrument(level = "info", skip_all)]
    pub fn allocate_all<'r, I>(
        &mut self,
        requests: I,
    ) -> Vec<Result<RequestOutcome, InvalidJourneyError>>
    where
        I: IntoIterator<Item = &'r Request>,
    {
        let before = self.stats;
        let outcomes: Vec<_> = requests.into_iter().map(|r| self.allocate(r)).collect();
        info!(
            requests = self.stats.requests - before.requests,
            allocated = self.stats.allocated - before.allocated,
            unallocated = self.stats.unallocated - before.unallocated,
            invalid = self.stats.invalid - before.invalid,
            "allocation pass finished"
        );
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchGroup, SearchPlan};
    use sleeper_alloc_model::{
        berth::{BerthKind, BerthLayout},
        catalog::BerthCatalogBuilder,
    };

    fn stations(n: usize) -> StationSequence {
        StationSequence::new((0..n).map(|i| format!("S{i}"))).unwrap()
    }

    fn j(board: usize, alight: usize) -> Journey {
        Journey::from_indices(board, alight).unwrap()
    }

    fn who(id: &str) -> OccupantId {
        OccupantId::new(id)
    }

    fn occ(id: &str, board: usize, alight: usize) -> Occupant {
        Occupant::new(id, j(board, alight))
    }

    /// One coach with `lowers` lower berths and `side_lowers` side lowers.
    fn catalog(lowers: u16, side_lowers: u16) -> BerthCatalog {
        let layout = BerthLayout::new()
            .with_slots(BerthKind::Lower, 1..=lowers)
            .with_slots(BerthKind::SideLower, 100..100 + side_lowers);
        BerthCatalogBuilder::new()
            .coach("S1", "Sleeper", &layout)
            .build()
            .unwrap()
    }

    fn lower_then_side_lower() -> SearchPolicy {
        SearchPolicy::new(
            SearchPlan::kinds([BerthKind::Lower]),
            SearchPlan::kinds([BerthKind::SideLower]),
        )
    }

    #[test]
    fn test_touching_journeys_fit_one_berth() {
        let stations = stations(10);
        let catalog = catalog(1, 0);
        let mut alloc = Allocator::new(&stations, &catalog, &lower_then_side_lower());
        let berth = BerthId::new(0);
        assert_eq!(
            alloc.assign_exclusive(berth, j(0, 3), &who("A")),
            Ok(AssignOutcome::Accepted)
        );
        assert_eq!(
            alloc.assign_exclusive(berth, j(3, 6), &who("B")),
            Ok(AssignOutcome::Accepted)
        );
        assert_eq!(alloc.ledger().allocations(berth).len(), 2);
    }

    #[test]
    fn test_overlapping_exclusive_is_rejected_and_stays_rejected() {
        let stations = stations(30);
        let catalog = catalog(2, 0);
        let mut alloc = Allocator::new(&stations, &catalog, &lower_then_side_lower());
        let (first, second) = (BerthId::new(0), BerthId::new(1));
        alloc.assign_exclusive(first, j(15, 25), &who("A")).unwrap();
        for _ in 0..2 {
            assert_eq!(
                alloc.assign_exclusive(first, j(10, 20), &who("B")),
                Ok(AssignOutcome::Rejected(Rejection::Occupied))
            );
        }
        assert_eq!(
            alloc.assign_exclusive(second, j(10, 20), &who("B")),
            Ok(AssignOutcome::Accepted)
        );
        assert_eq!(alloc.stats().rejected_checks, 2);
    }

    #[test]
    fn test_out_of_range_journey_fails_before_the_ledger() {
        let stations = stations(5);
        let catalog = catalog(1, 0);
        let mut alloc = Allocator::new(&stations, &catalog, &lower_then_side_lower());
        let err = alloc
            .assign_exclusive(BerthId::new(0), j(2, 5), &who("A"))
            .unwrap_err();
        assert!(matches!(err, InvalidJourneyError::OutOfRange(_)));
        assert!(alloc.ledger().is_empty());
        assert_eq!(alloc.stats().rejected_checks, 0);
    }

    #[test]
    fn test_unknown_berth_is_rejected() {
        let stations = stations(5);
        let catalog = catalog(1, 1);
        let mut alloc = Allocator::new(&stations, &catalog, &lower_then_side_lower());
        assert_eq!(
            alloc.assign_exclusive(BerthId::new(9), j(0, 1), &who("A")),
            Ok(AssignOutcome::Rejected(Rejection::UnknownBerth))
        );
        assert_eq!(
            alloc.assign_shared_pair(BerthId::new(9), &occ("A", 0, 2), &occ("B", 1, 3)),
            Ok(AssignOutcome::Rejected(Rejection::UnknownBerth))
        );
    }

    #[test]
    fn test_shared_pair_needs_a_shareable_empty_berth() {
        let stations = stations(10);
        let catalog = catalog(1, 1);
        let mut alloc = Allocator::new(&stations, &catalog, &lower_then_side_lower());
        let (lower, side_lower) = (BerthId::new(0), BerthId::new(1));

        assert_eq!(
            alloc.assign_shared_pair(lower, &occ("A", 0, 5), &occ("B", 2, 8)),
            Ok(AssignOutcome::Rejected(Rejection::NotShareable))
        );
        assert_eq!(
            alloc.assign_shared_pair(side_lower, &occ("A", 0, 5), &occ("B", 5, 8)),
            Ok(AssignOutcome::Rejected(Rejection::DisjointPair))
        );
        assert_eq!(
            alloc.assign_shared_pair(side_lower, &occ("A", 0, 5), &occ("B", 2, 8)),
            Ok(AssignOutcome::Accepted)
        );
        assert_eq!(alloc.ledger().shared_count(side_lower), 2);
        assert_eq!(
            alloc.assign_shared_pair(side_lower, &occ("C", 8, 9), &occ("D", 8, 9)),
            Ok(AssignOutcome::Rejected(Rejection::PairAlreadySeated))
        );
        assert_eq!(
            alloc.assign_exclusive(side_lower, j(8, 9), &who("E")),
            Ok(AssignOutcome::Rejected(Rejection::SharedMode))
        );
    }

    #[test]
    fn test_shared_pair_refuses_a_berth_with_exclusive_occupants() {
        let stations = stations(10);
        let catalog = catalog(0, 1);
        let mut alloc = Allocator::new(&stations, &catalog, &lower_then_side_lower());
        let berth = BerthId::new(0);
        alloc.assign_exclusive(berth, j(0, 1), &who("X")).unwrap();
        assert_eq!(
            alloc.assign_shared_pair(berth, &occ("A", 4, 6), &occ("B", 5, 7)),
            Ok(AssignOutcome::Rejected(Rejection::ExclusiveMode))
        );
        assert_eq!(alloc.ledger().len(), 1);
    }

    #[test]
    fn test_first_fit_moves_to_the_next_berth() {
        let stations = stations(10);
        let catalog = catalog(2, 0);
        let mut alloc = Allocator::new(&stations, &catalog, &lower_then_side_lower());
        let first = Request::exclusive("A", j(0, 9));
        let second = Request::exclusive("B", j(2, 4));
        assert_eq!(
            alloc.allocate(&first),
            Ok(RequestOutcome::Allocated {
                berth: BerthId::new(0)
            })
        );
        assert_eq!(
            alloc.allocate(&second),
            Ok(RequestOutcome::Allocated {
                berth: BerthId::new(1)
            })
        );
        let third = Request::exclusive("C", j(3, 5));
        assert_eq!(alloc.allocate(&third), Ok(RequestOutcome::Unallocated));
    }

    #[test]
    fn test_shared_request_on_one_shareable_berth() {
        let stations = stations(10);
        let catalog = catalog(0, 1);
        let mut alloc = Allocator::new(&stations, &catalog, &lower_then_side_lower());
        let pair = Request::shared_pair(occ("A", 0, 5), occ("B", 2, 8));
        assert_eq!(
            alloc.allocate(&pair),
            Ok(RequestOutcome::Allocated {
                berth: BerthId::new(0)
            })
        );
    }

    #[test]
    fn test_disjoint_pair_falls_through_every_shareable_berth() {
        let stations = stations(10);
        let catalog = catalog(0, 3);
        let mut alloc = Allocator::new(&stations, &catalog, &lower_then_side_lower());
        let pair = Request::shared_pair(occ("A", 0, 5), occ("B", 5, 8));
        assert_eq!(alloc.allocate(&pair), Ok(RequestOutcome::Unallocated));
        assert!(alloc.ledger().is_empty());
        assert_eq!(alloc.stats().rejected_checks, 3);
        assert_eq!(alloc.stats().unallocated, 1);
    }

    #[test]
    fn test_out_of_range_shared_pair_is_invalid_and_leaves_the_ledger_untouched() {
        let stations = stations(6);
        let catalog = catalog(0, 2);
        let mut alloc = Allocator::new(&stations, &catalog, &lower_then_side_lower());
        // The first half is valid; the second leaves the route.
        let pair = Request::shared_pair(occ("A", 0, 4), occ("B", 2, 7));
        assert!(matches!(
            alloc.allocate(&pair),
            Err(InvalidJourneyError::OutOfRange(_))
        ));
        assert!(alloc.ledger().is_empty());
        assert!(alloc.ledger().locate(&who("A")).is_none());
        let stats = *alloc.stats();
        assert_eq!(stats.invalid, 1);
        assert_eq!(stats.rejected_checks, 0);
        assert_eq!(
            alloc.assign_shared_pair(BerthId::new(0), &occ("A", 0, 4), &occ("B", 2, 7)),
            Err(InvalidJourneyError::OutOfRange(
                j(2, 7).check_within(6).unwrap_err()
            ))
        );
        assert!(alloc.ledger().is_empty());
    }

    #[test]
    fn test_allocate_all_keeps_request_order() {
        let stations = stations(6);
        let catalog = catalog(1, 1);
        let mut alloc = Allocator::new(&stations, &catalog, &lower_then_side_lower());
        let requests = vec![
            Request::exclusive("A", j(0, 3)),
            Request::exclusive("B", j(1, 2)),
            Request::exclusive("C", j(4, 9)),
            Request::shared_pair(occ("D", 0, 4), occ("E", 1, 5)),
        ];
        let outcomes = alloc.allocate_all(&requests);
        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0], Ok(RequestOutcome::Allocated { berth: BerthId::new(0) }));
        assert_eq!(outcomes[1], Ok(RequestOutcome::Unallocated));
        assert!(matches!(outcomes[2], Err(InvalidJourneyError::OutOfRange(_))));
        assert_eq!(outcomes[3], Ok(RequestOutcome::Allocated { berth: BerthId::new(1) }));

        let stats = *alloc.stats();
        assert_eq!(stats.requests, 4);
        assert_eq!(stats.allocated, 2);
        assert_eq!(stats.unallocated, 1);
        assert_eq!(stats.invalid, 1);
        assert_eq!(
            alloc.ledger().locate(&who("E")).map(|a| a.berth()),
            Some(BerthId::new(1))
        );
    }

    #[test]
    fn test_candidate_order_follows_the_policy() {
        let stations = stations(4);
        let catalog = catalog(3, 0);
        let policy = SearchPolicy::new(
            SearchPlan::new([SearchGroup::all_coaches([BerthKind::Lower])]),
            SearchPlan::default(),
        );
        let alloc = Allocator::new(&stations, &catalog, &policy);
        assert_eq!(
            alloc.exclusive_candidates(),
            &[BerthId::new(0), BerthId::new(1), BerthId::new(2)]
        );
        assert!(alloc.shared_candidates().is_empty());
    }

    #[test]
    fn test_same_inputs_same_outcomes() {
        let stations = stations(8);
        let catalog = catalog(2, 2);
        let requests: Vec<Request> = (0..12)
            .map(|i| {
                let board = i % 5;
                if i % 4 == 3 {
                    Request::shared_pair(
                        occ(&format!("R{i}a"), board, board + 2),
                        occ(&format!("R{i}b"), board, board + 3),
                    )
                } else {
                    Request::exclusive(format!("R{i}"), j(board, board + 2))
                }
            })
            .collect();
        let run = || {
            let mut alloc = Allocator::with_default_policy(&stations, &catalog);
            alloc.allocate_all(&requests)
        };
        assert_eq!(run(), run());
    }
}
