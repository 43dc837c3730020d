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

//! # Sleeper Allocation Model (`sleeper-alloc-model`)
//!
//! The inputs of a berth-allocation run, built on the station and journey
//! primitives of `sleeper-alloc-core`:
//!
//! - **`StationSequence`**: the ordered stops; station indices are positions in it.
//! - **`BerthKind`**, **`BerthLayout`** and **`BerthCatalog`**: the fixed berth pool.
//!   Each cataloged berth has a dense `BerthId` and a kind; the catalog knows
//!   which kinds are shareable.
//! - **`Occupant`** and **`Request`**: a passenger with a journey, and either an
//!   exclusive request for one occupant or a shared pair of two.
//! - **`generator`**: seeded synthetic request streams driven by per-station
//!   boarding and alighting weights.

pub mod berth;
pub mod catalog;
pub mod err;
pub mod generator;
pub mod id;
pub mod req;
pub mod station;

pub mod prelude {
    pub use crate::berth::{Berth, BerthKind, BerthLayout};
    pub use crate::catalog::{BerthCatalog, BerthCatalogBuilder, Coach};
    pub use crate::err::{
        CatalogBuildError, DuplicateCoachError, DuplicateSlotError, ParseBerthKindError,
        StationSequenceError,
    };
    pub use crate::id::{BerthId, CoachClass, CoachId, CoachIndex, OccupantId};
    pub use crate::req::{Occupant, Request};
    pub use crate::station::StationSequence;
}
