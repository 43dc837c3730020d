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

//! # Berth Catalog
//!
//! The fixed pool of allocatable berths. Coaches are added with a class and a
//! [`BerthLayout`]; building the catalog enumerates every `(coach, kind, slot)`
//! in insertion order and hands out dense [`BerthId`]s in that order.
//!
//! The catalog also records which berth kinds are *shareable*, i.e. may hold
//! a two-occupant shared pair. Side lowers are the only shareable kind unless
//! configured otherwise.

use crate::berth::{Berth, BerthKind, BerthLayout};
use crate::err::{CatalogBuildError, DuplicateCoachError, DuplicateSlotError};
use crate::id::{BerthId, CoachClass, CoachId, CoachIndex};
use std::collections::{HashMap, HashSet};
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coach {
    id: CoachId,
    class: CoachClass,
    berths: Range<u32>,
}

impl Coach {
    #[inline]
    pub fn id(&self) -> &CoachId {
        &self.id
    }

    #[inline]
    pub fn class(&self) -> &CoachClass {
        &self.class
    }

    /// Ids of this coach's berths; contiguous by construction.
    #[inline]
    pub fn berth_ids(&self) -> impl Iterator<Item = BerthId> + '_ {
        self.berths.clone().map(BerthId::new)
    }

    #[inline]
    pub fn berth_count(&self) -> usize {
        self.berths.len()
    }
}

#[derive(Debug, Clone)]
pub struct BerthCatalog {
    coaches: Vec<Coach>,
    berths: Vec<Berth>,
    shareable: [bool; BerthKind::ALL.len()],
    by_coach_id: HashMap<CoachId, CoachIndex>,
    by_slot: HashMap<(CoachIndex, u16), BerthId>,
}

impl BerthCatalog {
    #[inline]
    pub fn builder() -> BerthCatalogBuilder {
        BerthCatalogBuilder::new()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.berths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.berths.is_empty()
    }

    #[inline]
    pub fn berth(&self, id: BerthId) -> Option<&Berth> {
        self.berths.get(id.index())
    }

    #[inline]
    pub fn contains(&self, id: BerthId) -> bool {
        id.index() < self.berths.len()
    }

    pub fn find(&self, coach: &CoachId, slot: u16) -> Option<&Berth> {
        let index = self.by_coach_id.get(coach)?;
        let id = self.by_slot.get(&(*index, slot))?;
        self.berth(*id)
    }

    #[inline]
    pub fn coach(&self, index: CoachIndex) -> Option<&Coach> {
        self.coaches.get(index.value())
    }

    #[inline]
    pub fn coach_index(&self, id: &CoachId) -> Option<CoachIndex> {
        self.by_coach_id.get(id).copied()
    }

    /// The coach that holds `berth`.
    #[inline]
    pub fn coach_of(&self, berth: BerthId) -> Option<&Coach> {
        self.berth(berth).and_then(|b| self.coach(b.coach()))
    }

    #[inline]
    pub fn coaches(&self) -> impl Iterator<Item = (CoachIndex, &Coach)> + '_ {
        self.coaches
            .iter()
            .enumerate()
            .map(|(i, c)| (CoachIndex::new(i), c))
    }

    #[inline]
    pub fn coach_count(&self) -> usize {
        self.coaches.len()
    }

    /// Berths of one coach, in catalog order.
    #[inline]
    pub fn berths_of(&self, coach: CoachIndex) -> &[Berth] {
        match self.coach(coach) {
            Some(c) => &self.berths[c.berths.start as usize..c.berths.end as usize],
            None => &[],
        }
    }

    #[inline]
    pub fn is_shareable(&self, kind: BerthKind) -> bool {
        self.shareable[kind.index()]
    }

    #[inline]
    pub fn shareable_kinds(&self) -> impl Iterator<Item = BerthKind> + '_ {
        BerthKind::ALL
            .into_iter()
            .filter(|k| self.is_shareable(*k))
    }

    /// All berths in catalog (= id) order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Berth> {
        self.berths.iter()
    }

    /// Human-readable `coach/slot (kind)` label for reports.
    pub fn describe(&self, id: BerthId) -> Option<String> {
        let berth = self.berth(id)?;
        let coach = self.coach(berth.coach())?;
        Some(format!("{}/{} ({})", coach.id(), berth.slot(), berth.kind()))
    }
}

impl<'a> IntoIterator for &'a BerthCatalog {
    type Item = &'a Berth;
    type IntoIter = std::slice::Iter<'a, Berth>;

    fn into_iter(self) -> Self::IntoIter {
        self.berths.iter()
    }
}

#[derive(Debug, Clone)]
pub struct BerthCatalogBuilder {
    coaches: Vec<(CoachId, CoachClass, BerthLayout)>,
    shareable: [bool; BerthKind::ALL.len()],
}

impl Default for BerthCatalogBuilder {
    fn default() -> Self {
        let mut shareable = [false; BerthKind::ALL.len()];
        shareable[BerthKind::SideLower.index()] = true;
        Self {
            coaches: Vec::new(),
            shareable,
        }
    }
}

impl BerthCatalogBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coach(
        mut self,
        id: impl Into<CoachId>,
        class: impl Into<CoachClass>,
        layout: &BerthLayout,
    ) -> Self {
        self.coaches.push((id.into(), class.into(), layout.clone()));
        self
    }

    /// Replaces the set of shareable kinds.
    pub fn shareable_kinds(mut self, kinds: impl IntoIterator<Item = BerthKind>) -> Self {
        self.shareable = [false; BerthKind::ALL.len()];
        for kind in kinds {
            self.shareable[kind.index()] = true;
        }
        self
    }

    pub fn build(self) -> Result<BerthCatalog, CatalogBuildError> {
        let total: usize = self.coaches.iter().map(|(_, _, l)| l.berth_count()).sum();
        if total == 0 {
            return Err(CatalogBuildError::Empty);
        }

        let mut coaches = Vec::with_capacity(self.coaches.len());
        let mut berths = Vec::with_capacity(total);
        let mut by_coach_id = HashMap::with_capacity(self.coaches.len());
        let mut by_slot = HashMap::with_capacity(total);

        for (id, class, layout) in self.coaches {
            let index = CoachIndex::new(coaches.len());
            if by_coach_id.insert(id.clone(), index).is_some() {
                return Err(DuplicateCoachError::new(id).into());
            }

            let first = berths.len() as u32;
            let mut seen = HashSet::with_capacity(layout.berth_count());
            for (kind, slot) in layout.iter() {
                if !seen.insert(slot) {
                    return Err(DuplicateSlotError::new(id, slot).into());
                }
                let berth_id = BerthId::new(berths.len() as u32);
                berths.push(Berth::new(berth_id, index, slot, kind));
                by_slot.insert((index, slot), berth_id);
            }
            let last = berths.len() as u32;

            coaches.push(Coach {
                id,
                class,
                berths: first..last,
            });
        }

        Ok(BerthCatalog {
            coaches,
            berths,
            shareable: self.shareable,
            by_coach_id,
            by_slot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_coaches() -> BerthCatalog {
        BerthCatalogBuilder::new()
            .coach("S1", "Sleeper", &BerthLayout::sleeper())
            .coach("B1", "AC_3_Tier", &BerthLayout::ac_three_tier())
            .build()
            .expect("valid catalog")
    }

    #[test]
    fn test_ids_are_dense_and_follow_coach_then_layout_order() {
        let catalog = two_coaches();
        assert_eq!(catalog.len(), 72 + 64);
        for (i, berth) in catalog.iter().enumerate() {
            assert_eq!(berth.id().index(), i);
        }
        let first = catalog.berth(BerthId::new(0)).unwrap();
        assert_eq!((first.slot(), first.kind()), (1, BerthKind::Lower));
        let b1_first = catalog.berth(BerthId::new(72)).unwrap();
        assert_eq!(b1_first.coach(), CoachIndex::new(1));
        assert_eq!(b1_first.slot(), 1);
    }

    #[test]
    fn test_find_by_coach_and_slot() {
        let catalog = two_coaches();
        let berth = catalog.find(&CoachId::new("S1"), 7).expect("S1/7");
        assert_eq!(berth.kind(), BerthKind::SideLower);
        assert_eq!(catalog.describe(berth.id()).unwrap(), "S1/7 (Side Lower)");
        assert!(catalog.find(&CoachId::new("B1"), 72).is_none());
        assert!(catalog.find(&CoachId::new("S9"), 1).is_none());
    }

    #[test]
    fn test_berths_of_coach_is_its_contiguous_block() {
        let catalog = two_coaches();
        let b1 = catalog.coach_index(&CoachId::new("B1")).unwrap();
        let block = catalog.berths_of(b1);
        assert_eq!(block.len(), 64);
        assert!(block.iter().all(|b| b.coach() == b1));
        assert_eq!(catalog.coach(b1).unwrap().class().as_str(), "AC_3_Tier");
        assert_eq!(
            catalog.coach_of(block[0].id()).map(|c| c.id().as_str()),
            Some("B1")
        );
    }

    #[test]
    fn test_side_lower_is_the_default_shareable_kind() {
        let catalog = two_coaches();
        assert_eq!(
            catalog.shareable_kinds().collect::<Vec<_>>(),
            vec![BerthKind::SideLower]
        );
        let custom = BerthCatalogBuilder::new()
            .coach("S1", "Sleeper", &BerthLayout::sleeper())
            .shareable_kinds([BerthKind::SideUpper, BerthKind::Lower])
            .build()
            .unwrap();
        assert!(!custom.is_shareable(BerthKind::SideLower));
        assert!(custom.is_shareable(BerthKind::SideUpper));
        assert!(custom.is_shareable(BerthKind::Lower));
    }

    #[test]
    fn test_duplicate_coach_is_rejected() {
        let err = BerthCatalogBuilder::new()
            .coach("S1", "Sleeper", &BerthLayout::sleeper())
            .coach("S1", "Sleeper", &BerthLayout::sleeper())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CatalogBuildError::DuplicateCoach(DuplicateCoachError::new(CoachId::new("S1")))
        );
    }

    #[test]
    fn test_duplicate_slot_is_rejected() {
        let layout = BerthLayout::new()
            .with_slots(BerthKind::Lower, [1, 4])
            .with_slots(BerthKind::SideLower, [4]);
        let err = BerthCatalogBuilder::new()
            .coach("X1", "Test", &layout)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CatalogBuildError::DuplicateSlot(DuplicateSlotError::new(CoachId::new("X1"), 4))
        );
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        assert_eq!(
            BerthCatalogBuilder::new().build().unwrap_err(),
            CatalogBuildError::Empty
        );
        assert_eq!(
            BerthCatalogBuilder::new()
                .coach("X1", "Test", &BerthLayout::new())
                .build()
                .unwrap_err(),
            CatalogBuildError::Empty
        );
    }
}
