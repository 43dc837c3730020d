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

use crate::err::StationSequenceError;
use sleeper_alloc_core::station::{InvalidJourneyError, Journey, StationIndex};
use std::collections::HashSet;

/// The ordered stops of a train run.
///
/// Station indices are positions in this list; every journey is validated
/// against its length before it touches a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationSequence {
    names: Vec<String>,
}

impl StationSequence {
    pub fn new<I, S>(names: I) -> Result<Self, StationSequenceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(StationSequenceError::Empty);
        }
        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(StationSequenceError::DuplicateName(name.clone()));
            }
        }
        Ok(Self { names })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of station-to-station legs, `len() - 1`.
    #[inline]
    pub fn leg_count(&self) -> usize {
        self.names.len().saturating_sub(1)
    }

    #[inline]
    pub fn name(&self, station: StationIndex) -> Option<&str> {
        self.names.get(station.value()).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<StationIndex> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(StationIndex::new)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (StationIndex, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (StationIndex::new(i), n.as_str()))
    }

    /// Checks that `journey` lies inside this sequence.
    #[inline]
    pub fn validate(&self, journey: &Journey) -> Result<(), InvalidJourneyError> {
        journey.check_within(self.len())?;
        Ok(())
    }

    /// Builds a journey and checks it against this sequence in one step.
    pub fn journey(
        &self,
        board: StationIndex,
        alight: StationIndex,
    ) -> Result<Journey, InvalidJourneyError> {
        let journey = Journey::new(board, alight)?;
        self.validate(&journey)?;
        Ok(journey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> StationSequence {
        StationSequence::new(["A", "B", "C", "D"]).expect("valid sequence")
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let empty: [&str; 0] = [];
        assert_eq!(
            StationSequence::new(empty),
            Err(StationSequenceError::Empty)
        );
    }

    #[test]
    fn test_duplicate_station_is_rejected() {
        assert_eq!(
            StationSequence::new(["A", "B", "A"]),
            Err(StationSequenceError::DuplicateName("A".into()))
        );
    }

    #[test]
    fn test_lookup_by_name_and_index() {
        let seq = abc();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.leg_count(), 3);
        assert_eq!(seq.index_of("C"), Some(StationIndex::new(2)));
        assert_eq!(seq.name(StationIndex::new(3)), Some("D"));
        assert_eq!(seq.name(StationIndex::new(4)), None);
        assert_eq!(seq.index_of("Z"), None);
    }

    #[test]
    fn test_validate_rejects_alighting_past_the_last_station() {
        let seq = abc();
        let ok = Journey::from_indices(0, 3).unwrap();
        let past = Journey::from_indices(2, 4).unwrap();
        assert!(seq.validate(&ok).is_ok());
        assert!(matches!(
            seq.validate(&past),
            Err(InvalidJourneyError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_journey_reports_either_failure() {
        let seq = abc();
        assert!(matches!(
            seq.journey(StationIndex::new(2), StationIndex::new(1)),
            Err(InvalidJourneyError::NotForward(_))
        ));
        assert!(matches!(
            seq.journey(StationIndex::new(0), StationIndex::new(9)),
            Err(InvalidJourneyError::OutOfRange(_))
        ));
        assert!(seq.journey(StationIndex::new(1), StationIndex::new(2)).is_ok());
    }
}
