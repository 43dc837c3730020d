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

//! # Verifier
//!
//! Stateless audit of a finished ledger. Re-derives every pairwise relation
//! between allocations on the same berth and reports each breach of the
//! occupancy rules:
//!
//! - exclusive allocations on a berth never overlap;
//! - a berth seats at most two shared occupants, their journeys overlap and
//!   the berth's kind is shareable;
//! - exclusive and shared occupants never share a berth.
//!
//! The result is empty iff all of them hold.

use crate::ledger::{Allocation, ResourceLedger};
use sleeper_alloc_core::station::StationInterval;
use sleeper_alloc_model::{
    catalog::BerthCatalog,
    id::{BerthId, OccupantId},
};
use std::fmt::Display;
use tracing::{instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Violation {
    /// Two overlapping allocations that are not the berth's shared pair.
    Collision {
        berth: BerthId,
        first: OccupantId,
        second: OccupantId,
        overlap: StationInterval,
    },
    /// Exclusive and shared allocations on one berth.
    MixedOccupancy {
        berth: BerthId,
        exclusive: usize,
        shared: usize,
    },
    /// More than two shared allocations on one berth.
    SharedOverCapacity { berth: BerthId, shared: usize },
    /// A two-member shared set whose journeys do not overlap.
    DisjointSharedPair {
        berth: BerthId,
        first: OccupantId,
        second: OccupantId,
    },
    /// A shared allocation on a berth whose kind is not shareable.
    UnshareableBerth { berth: BerthId, occupant: OccupantId },
}

impl Violation {
    #[inline]
    pub fn berth(&self) -> BerthId {
        match self {
            Violation::Collision { berth, .. }
            | Violation::MixedOccupancy { berth, .. }
            | Violation::SharedOverCapacity { berth, .. }
            | Violation::DisjointSharedPair { berth, .. }
            | Violation::UnshareableBerth { berth, .. } => *berth,
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::Collision {
                berth,
                first,
                second,
                overlap,
            } => write!(
                f,
                "Collision on {}: {} and {} overlap on {}",
                berth, first, second, overlap
            ),
            Violation::MixedOccupancy {
                berth,
                exclusive,
                shared,
            } => write!(
                f,
                "Mixed occupancy on {}: {} exclusive and {} shared allocations",
                berth, exclusive, shared
            ),
            Violation::SharedOverCapacity { berth, shared } => write!(
                f,
                "Shared over capacity on {}: {} shared allocations",
                berth, shared
            ),
            Violation::DisjointSharedPair {
                berth,
                first,
                second,
            } => write!(
                f,
                "Disjoint shared pair on {}: {} and {} never travel together",
                berth, first, second
            ),
            Violation::UnshareableBerth { berth, occupant } => write!(
                f,
                "Unshareable berth {} holds shared occupant {}",
                berth, occupant
            ),
        }
    }
}

/// Audits `ledger` against the occupancy rules.
///
/// Violations are ordered by berth. Within a berth the whole-berth findings
/// (mixed mode, over capacity, disjoint pair) come first, then per-allocation
/// findings in insertion order. Never mutates the ledger, so repeated calls
/// return the same list.
#[instrument(level = "info", skip_all, fields(allocations = ledger.len()))]
pub fn verify(ledger: &ResourceLedger, catalog: &BerthCatalog) -> Vec<Violation> {
    let mut violations = Vec::new();
    for berth in ledger.used_berths() {
        verify_berth(berth, ledger.allocations(berth), catalog, &mut violations);
    }
    if !violations.is_empty() {
        warn!(
            violations = violations.len(),
            "ledger breaks the occupancy rules"
        );
    }
    violations
}

fn verify_berth(
    berth: BerthId,
    allocations: &[Allocation],
    catalog: &BerthCatalog,
    out: &mut Vec<Violation>,
) {
    let shared: Vec<&Allocation> = allocations.iter().filter(|a| a.is_shared()).collect();
    let exclusive = allocations.len() - shared.len();

    if exclusive > 0 && !shared.is_empty() {
        out.push(Violation::MixedOccupancy {
            berth,
            exclusive,
            shared: shared.len(),
        });
    }
    if shared.len() > 2 {
        out.push(Violation::SharedOverCapacity {
            berth,
            shared: shared.len(),
        });
    }
    if let [first, second] = shared.as_slice()
        && !first.journey().overlaps(&second.journey())
    {
        out.push(Violation::DisjointSharedPair {
            berth,
            first: first.occupant().clone(),
            second: second.occupant().clone(),
        });
    }

    let shareable = catalog
        .berth(berth)
        .is_some_and(|b| catalog.is_shareable(b.kind()));
    // An overlapping shared/shared pair is legal only as the berth's sole pair.
    let exact_pair = shared.len() == 2;

    for (i, a) in allocations.iter().enumerate() {
        if a.is_shared() && !shareable {
            out.push(Violation::UnshareableBerth {
                berth,
                occupant: a.occupant().clone(),
            });
        }
        for b in &allocations[i + 1..] {
            let Some(overlap) = a.journey().overlap(&b.journey()) else {
                continue;
            };
            if exact_pair && a.is_shared() && b.is_shared() {
                continue;
            }
            out.push(Violation::Collision {
                berth,
                first: a.occupant().clone(),
                second: b.occupant().clone(),
                overlap,
            });
        }
    }
}
