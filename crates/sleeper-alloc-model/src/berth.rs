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

//! Berth kinds, cataloged berths and per-class coach layouts.

use crate::err::ParseBerthKindError;
use crate::id::{BerthId, CoachIndex};
use std::fmt::Display;
use std::str::FromStr;

/// Physical position of a berth inside a bay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BerthKind {
    Lower,
    Middle,
    Upper,
    SideLower,
    SideUpper,
}

impl BerthKind {
    pub const ALL: [BerthKind; 5] = [
        BerthKind::Lower,
        BerthKind::Middle,
        BerthKind::Upper,
        BerthKind::SideLower,
        BerthKind::SideUpper,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            BerthKind::Lower => 0,
            BerthKind::Middle => 1,
            BerthKind::Upper => 2,
            BerthKind::SideLower => 3,
            BerthKind::SideUpper => 4,
        }
    }

    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            BerthKind::Lower => "Lower",
            BerthKind::Middle => "Middle",
            BerthKind::Upper => "Upper",
            BerthKind::SideLower => "Side Lower",
            BerthKind::SideUpper => "Side Upper",
        }
    }
}

impl Display for BerthKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BerthKind {
    type Err = ParseBerthKindError;

    /// Accepts the display labels as well as their space-free forms,
    /// case-insensitively (`"Side Lower"`, `"sidelower"`, `"SL"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "lower" | "lb" | "l" => Ok(BerthKind::Lower),
            "middle" | "mb" | "m" => Ok(BerthKind::Middle),
            "upper" | "ub" | "u" => Ok(BerthKind::Upper),
            "sidelower" | "sl" => Ok(BerthKind::SideLower),
            "sideupper" | "su" => Ok(BerthKind::SideUpper),
            _ => Err(ParseBerthKindError::new(s)),
        }
    }
}

/// A cataloged berth: `(coach, slot, kind)` plus its dense id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Berth {
    id: BerthId,
    coach: CoachIndex,
    slot: u16,
    kind: BerthKind,
}

impl Berth {
    #[inline]
    pub fn new(id: BerthId, coach: CoachIndex, slot: u16, kind: BerthKind) -> Self {
        Self {
            id,
            coach,
            slot,
            kind,
        }
    }

    #[inline]
    pub fn id(&self) -> BerthId {
        self.id
    }

    #[inline]
    pub fn coach(&self) -> CoachIndex {
        self.coach
    }

    #[inline]
    pub fn slot(&self) -> u16 {
        self.slot
    }

    #[inline]
    pub fn kind(&self) -> BerthKind {
        self.kind
    }
}

impl Display for Berth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Berth {{ id: {}, coach: {}, slot: {}, kind: {} }}",
            self.id, self.coach, self.slot, self.kind
        )
    }
}

/// Slot numbers per berth kind for one class of coach.
///
/// Kinds keep the order in which they were added; the catalog enumerates a
/// coach's berths kind by kind in that order, slots in the listed order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BerthLayout {
    kinds: Vec<(BerthKind, Vec<u16>)>,
}

impl BerthLayout {
    #[inline]
    pub fn new() -> Self {
        Self { kinds: Vec::new() }
    }

    /// Appends slots for `kind`, extending an existing entry for the same kind.
    pub fn with_slots(mut self, kind: BerthKind, slots: impl IntoIterator<Item = u16>) -> Self {
        match self.kinds.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, existing)) => existing.extend(slots),
            None => self.kinds.push((kind, slots.into_iter().collect())),
        }
        self
    }

    /// Standard sleeper-class coach: 9 bays, 72 berths.
    pub fn sleeper() -> Self {
        Self::bays(9)
    }

    /// AC three-tier coach: 8 bays, 64 berths.
    pub fn ac_three_tier() -> Self {
        Self::bays(8)
    }

    /// `n` eight-berth bays numbered the Indian Railways way: per bay of
    /// base `b`, lowers are `b+1, b+4`, middles `b+2, b+5`, uppers `b+3, b+6`,
    /// side lower `b+7` and side upper `b+8`.
    fn bays(n: u16) -> Self {
        let bases = || (0..n).map(|bay| bay * 8);
        Self::new()
            .with_slots(BerthKind::Lower, bases().flat_map(|b| [b + 1, b + 4]))
            .with_slots(BerthKind::Middle, bases().flat_map(|b| [b + 2, b + 5]))
            .with_slots(BerthKind::Upper, bases().flat_map(|b| [b + 3, b + 6]))
            .with_slots(BerthKind::SideLower, bases().map(|b| b + 7))
            .with_slots(BerthKind::SideUpper, bases().map(|b| b + 8))
    }

    #[inline]
    pub fn slots(&self, kind: BerthKind) -> &[u16] {
        self.kinds
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, slots)| slots.as_slice())
            .unwrap_or(&[])
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (BerthKind, u16)> + '_ {
        self.kinds
            .iter()
            .flat_map(|(kind, slots)| slots.iter().map(move |slot| (*kind, *slot)))
    }

    #[inline]
    pub fn berth_count(&self) -> usize {
        self.kinds.iter().map(|(_, slots)| slots.len()).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.berth_count() == 0
    }
}
