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

//! # Sleeper Allocation Solver (`sleeper-alloc-solver`)
//!
//! The allocation core: a per-berth [`ledger::ResourceLedger`] of committed
//! journeys, an [`allocator::Allocator`] enforcing the exclusive and
//! shared-pair policies with first-fit search over a [`search::SearchPolicy`],
//! and a stateless [`verify::verify`] pass over finished ledgers.
//!
//! Allocation is greedy, deterministic and single-pass: identical catalog,
//! policy and request order always produce identical ledgers.

pub mod allocator;
pub mod intervalset;
pub mod ledger;
pub mod search;
pub mod stats;
pub mod verify;

pub mod prelude {
    pub use crate::allocator::{AssignOutcome, Allocator, Rejection, RequestOutcome};
    pub use crate::ledger::{Allocation, BerthMode, ResourceLedger, UnknownBerthError, overlaps};
    pub use crate::search::{CoachSelector, SearchGroup, SearchPlan, SearchPolicy};
    pub use crate::stats::{AllocatorStats, LedgerStats, OnboardProfile};
    pub use crate::verify::{Violation, verify};
}
