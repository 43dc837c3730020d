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

//! # Candidate Search Order
//!
//! A [`SearchPlan`] is an ordered list of groups. Each group names a set of
//! coaches (by id, by class, or all) and a kind precedence. Resolving a plan
//! against a catalog yields the flat first-fit candidate order:
//!
//! groups in plan order, then kinds in the group's precedence, then berths in
//! catalog order restricted to the group's coaches.
//!
//! A berth reachable from several groups is tried only at its first position.

use sleeper_alloc_model::{
    berth::BerthKind,
    catalog::{BerthCatalog, Coach},
    id::{BerthId, CoachClass, CoachId},
};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CoachSelector {
    Coach(CoachId),
    Class(CoachClass),
    All,
}

impl CoachSelector {
    #[inline]
    pub fn matches(&self, coach: &Coach) -> bool {
        match self {
            CoachSelector::Coach(id) => coach.id() == id,
            CoachSelector::Class(class) => coach.class() == class,
            CoachSelector::All => true,
        }
    }
}

impl Display for CoachSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoachSelector::Coach(id) => write!(f, "coach {}", id),
            CoachSelector::Class(class) => write!(f, "class {}", class),
            CoachSelector::All => write!(f, "all coaches"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchGroup {
    coaches: Vec<CoachSelector>,
    kinds: Vec<BerthKind>,
}

impl SearchGroup {
    pub fn new(
        coaches: impl IntoIterator<Item = CoachSelector>,
        kinds: impl IntoIterator<Item = BerthKind>,
    ) -> Self {
        Self {
            coaches: coaches.into_iter().collect(),
            kinds: kinds.into_iter().collect(),
        }
    }

    #[inline]
    pub fn all_coaches(kinds: impl IntoIterator<Item = BerthKind>) -> Self {
        Self::new([CoachSelector::All], kinds)
    }

    #[inline]
    pub fn coaches(&self) -> &[CoachSelector] {
        &self.coaches
    }

    #[inline]
    pub fn kinds(&self) -> &[BerthKind] {
        &self.kinds
    }

    #[inline]
    fn selects(&self, coach: &Coach) -> bool {
        self.coaches.iter().any(|s| s.matches(coach))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPlan {
    groups: Vec<SearchGroup>,
}

impl SearchPlan {
    #[inline]
    pub fn new(groups: impl IntoIterator<Item = SearchGroup>) -> Self {
        Self {
            groups: groups.into_iter().collect(),
        }
    }

    /// One group over every coach.
    #[inline]
    pub fn kinds(kinds: impl IntoIterator<Item = BerthKind>) -> Self {
        Self::new([SearchGroup::all_coaches(kinds)])
    }

    /// One group per coach, in catalog order: the coach-then-kind-then-slot
    /// sweep a conductor does walking the train.
    pub fn coach_major(catalog: &BerthCatalog, kinds: &[BerthKind]) -> Self {
        Self::new(catalog.coaches().map(|(_, coach)| {
            SearchGroup::new(
                [CoachSelector::Coach(coach.id().clone())],
                kinds.iter().copied(),
            )
        }))
    }

    #[inline]
    pub fn groups(&self) -> &[SearchGroup] {
        &self.groups
    }

    /// Flattens the plan into the candidate order for `catalog`.
    pub fn resolve(&self, catalog: &BerthCatalog) -> Vec<BerthId> {
        let mut seen = vec![false; catalog.len()];
        let mut order = Vec::new();
        for group in &self.groups {
            let selected: Vec<bool> = catalog
                .coaches()
                .map(|(_, coach)| group.selects(coach))
                .collect();
            for kind in &group.kinds {
                for berth in catalog.iter() {
                    if berth.kind() != *kind || !selected[berth.coach().value()] {
                        continue;
                    }
                    let slot = &mut seen[berth.id().index()];
                    if !*slot {
                        *slot = true;
                        order.push(berth.id());
                    }
                }
            }
        }
        order
    }
}

/// Which plan each request kind searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    exclusive: SearchPlan,
    shared: SearchPlan,
}

impl Default for SearchPolicy {
    /// Exclusive requests try lowers, middles, uppers and side uppers on
    /// every coach, leaving side lowers to shared pairs.
    fn default() -> Self {
        Self {
            exclusive: SearchPlan::kinds([
                BerthKind::Lower,
                BerthKind::Middle,
                BerthKind::Upper,
                BerthKind::SideUpper,
            ]),
            shared: SearchPlan::kinds([BerthKind::SideLower]),
        }
    }
}

impl SearchPolicy {
    #[inline]
    pub fn new(exclusive: SearchPlan, shared: SearchPlan) -> Self {
        Self { exclusive, shared }
    }

    /// The default kinds, swept coach by coach.
    pub fn coach_major(catalog: &BerthCatalog) -> Self {
        Self {
            exclusive: SearchPlan::coach_major(
                catalog,
                &[
                    BerthKind::Lower,
                    BerthKind::Middle,
                    BerthKind::Upper,
                    BerthKind::SideUpper,
                ],
            ),
            shared: SearchPlan::coach_major(catalog, &[BerthKind::SideLower]),
        }
    }

    #[inline]
    pub fn exclusive(&self) -> &SearchPlan {
        &self.exclusive
    }

    #[inline]
    pub fn shared(&self) -> &SearchPlan {
        &self.shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleeper_alloc_model::{berth::BerthLayout, catalog::BerthCatalogBuilder};

    fn tiny_layout() -> BerthLayout {
        BerthLayout::new()
            .with_slots(BerthKind::Lower, [1, 4])
            .with_slots(BerthKind::Upper, [3])
            .with_slots(BerthKind::SideLower, [7])
    }

    fn catalog() -> BerthCatalog {
        BerthCatalogBuilder::new()
            .coach("S1", "Sleeper", &tiny_layout())
            .coach("S2", "Sleeper", &tiny_layout())
            .coach("B1", "AC_3_Tier", &tiny_layout())
            .build()
            .unwrap()
    }

    fn labels(catalog: &BerthCatalog, ids: &[BerthId]) -> Vec<String> {
        ids.iter()
            .map(|id| {
                let berth = catalog.berth(*id).unwrap();
                format!("{}/{}", catalog.coach(berth.coach()).unwrap().id(), berth.slot())
            })
            .collect()
    }

    #[test]
    fn test_kind_major_order_spans_all_coaches() {
        let catalog = catalog();
        let plan = SearchPlan::kinds([BerthKind::Lower, BerthKind::Upper]);
        assert_eq!(
            labels(&catalog, &plan.resolve(&catalog)),
            vec!["S1/1", "S1/4", "S2/1", "S2/4", "B1/1", "B1/4", "S1/3", "S2/3", "B1/3"]
        );
    }

    #[test]
    fn test_coach_major_order_finishes_each_coach_first() {
        let catalog = catalog();
        let plan = SearchPlan::coach_major(&catalog, &[BerthKind::Upper, BerthKind::Lower]);
        assert_eq!(plan.groups().len(), 3);
        assert_eq!(
            labels(&catalog, &plan.resolve(&catalog)),
            vec!["S1/3", "S1/1", "S1/4", "S2/3", "S2/1", "S2/4", "B1/3", "B1/1", "B1/4"]
        );
    }

    #[test]
    fn test_class_selector_restricts_coaches() {
        let catalog = catalog();
        let plan = SearchPlan::new([
            SearchGroup::new([CoachSelector::Class("AC_3_Tier".into())], [BerthKind::SideLower]),
            SearchGroup::new([CoachSelector::Coach("S2".into())], [BerthKind::SideLower]),
        ]);
        assert_eq!(
            labels(&catalog, &plan.resolve(&catalog)),
            vec!["B1/7", "S2/7"]
        );
    }

    #[test]
    fn test_berths_repeated_across_groups_are_tried_once() {
        let catalog = catalog();
        let plan = SearchPlan::new([
            SearchGroup::new([CoachSelector::Coach("S2".into())], [BerthKind::SideLower]),
            SearchGroup::all_coaches([BerthKind::SideLower]),
        ]);
        assert_eq!(
            labels(&catalog, &plan.resolve(&catalog)),
            vec!["S2/7", "S1/7", "B1/7"]
        );
    }

    #[test]
    fn test_default_policy_keeps_side_lowers_for_pairs() {
        let catalog = catalog();
        let policy = SearchPolicy::default();
        let exclusive = policy.exclusive().resolve(&catalog);
        let shared = policy.shared().resolve(&catalog);
        assert_eq!(exclusive.len(), 9);
        assert_eq!(shared.len(), 3);
        assert!(shared.iter().all(|id| !exclusive.contains(id)));
        assert!(
            shared
                .iter()
                .all(|id| catalog.berth(*id).unwrap().kind() == BerthKind::SideLower)
        );
    }

    #[test]
    fn test_unknown_selector_resolves_to_nothing() {
        let catalog = catalog();
        let plan = SearchPlan::new([SearchGroup::new(
            [CoachSelector::Coach("Z9".into())],
            BerthKind::ALL,
        )]);
        assert!(plan.resolve(&catalog).is_empty());
        assert!(SearchPlan::default().resolve(&catalog).is_empty());
    }
}
