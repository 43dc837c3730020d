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

use crate::id::OccupantId;
use sleeper_alloc_core::station::Journey;
use std::fmt::Display;

/// One ticketed passenger and the stretch they travel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Occupant {
    id: OccupantId,
    journey: Journey,
}

impl Occupant {
    #[inline]
    pub fn new(id: impl Into<OccupantId>, journey: Journey) -> Self {
        Self {
            id: id.into(),
            journey,
        }
    }

    #[inline]
    pub fn id(&self) -> &OccupantId {
        &self.id
    }

    #[inline]
    pub fn journey(&self) -> Journey {
        self.journey
    }
}

impl Display for Occupant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.id, self.journey)
    }
}

/// A request presented to the allocator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Request {
    /// One occupant who needs a berth to themselves.
    Exclusive(Occupant),
    /// Two occupants seated together on one shareable berth.
    SharedPair { first: Occupant, second: Occupant },
}

impl Request {
    #[inline]
    pub fn exclusive(id: impl Into<OccupantId>, journey: Journey) -> Self {
        Request::Exclusive(Occupant::new(id, journey))
    }

    #[inline]
    pub fn shared_pair(first: Occupant, second: Occupant) -> Self {
        Request::SharedPair { first, second }
    }

    #[inline]
    pub fn is_shared(&self) -> bool {
        matches!(self, Request::SharedPair { .. })
    }

    /// The occupants carried by this request, in order.
    pub fn occupants(&self) -> impl Iterator<Item = &Occupant> + '_ {
        let (first, second) = match self {
            Request::Exclusive(o) => (o, None),
            Request::SharedPair { first, second } => (first, Some(second)),
        };
        std::iter::once(first).chain(second)
    }

    #[inline]
    pub fn occupant_count(&self) -> usize {
        match self {
            Request::Exclusive(_) => 1,
            Request::SharedPair { .. } => 2,
        }
    }
}

impl Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Request::Exclusive(o) => write!(f, "Exclusive({})", o),
            Request::SharedPair { first, second } => {
                write!(f, "SharedPair({}, {})", first, second)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn j(board: usize, alight: usize) -> Journey {
        Journey::from_indices(board, alight).unwrap()
    }

    #[test]
    fn test_occupants_yields_one_or_two() {
        let single = Request::exclusive("P1", j(0, 3));
        let pair = Request::shared_pair(Occupant::new("P2", j(1, 4)), Occupant::new("P3", j(1, 6)));
        assert_eq!(single.occupants().count(), 1);
        let ids: Vec<&str> = pair.occupants().map(|o| o.id().as_str()).collect();
        assert_eq!(ids, vec!["P2", "P3"]);
        assert_eq!(pair.occupant_count(), 2);
        assert!(pair.is_shared());
        assert!(!single.is_shared());
    }

    #[test]
    fn test_display() {
        let single = Request::exclusive("P1", j(0, 3));
        assert_eq!(single.to_string(), "Exclusive(P1 [0 -> 3))");
    }
}
