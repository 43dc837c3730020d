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

use crate::id::CoachId;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateCoachError {
    coach: CoachId,
}

impl DuplicateCoachError {
    #[inline]
    pub fn new(coach: CoachId) -> Self {
        Self { coach }
    }

    #[inline]
    pub fn coach(&self) -> &CoachId {
        &self.coach
    }
}

impl Display for DuplicateCoachError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Coach {} was added to the catalog twice", self.coach)
    }
}

impl std::error::Error for DuplicateCoachError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateSlotError {
    coach: CoachId,
    slot: u16,
}

impl DuplicateSlotError {
    #[inline]
    pub fn new(coach: CoachId, slot: u16) -> Self {
        Self { coach, slot }
    }

    #[inline]
    pub fn coach(&self) -> &CoachId {
        &self.coach
    }

    #[inline]
    pub fn slot(&self) -> u16 {
        self.slot
    }
}

impl Display for DuplicateSlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Slot {} appears more than once in coach {}",
            self.slot, self.coach
        )
    }
}

impl std::error::Error for DuplicateSlotError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogBuildError {
    DuplicateCoach(DuplicateCoachError),
    DuplicateSlot(DuplicateSlotError),
    Empty,
}

impl Display for CatalogBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CatalogBuildError::*;
        match self {
            DuplicateCoach(e) => write!(f, "{}", e),
            DuplicateSlot(e) => write!(f, "{}", e),
            Empty => write!(f, "Catalog contains no berths"),
        }
    }
}

impl std::error::Error for CatalogBuildError {}

impl From<DuplicateCoachError> for CatalogBuildError {
    fn from(err: DuplicateCoachError) -> Self {
        CatalogBuildError::DuplicateCoach(err)
    }
}

impl From<DuplicateSlotError> for CatalogBuildError {
    fn from(err: DuplicateSlotError) -> Self {
        CatalogBuildError::DuplicateSlot(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationSequenceError {
    Empty,
    DuplicateName(String),
}

impl Display for StationSequenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StationSequenceError::Empty => write!(f, "Station sequence is empty"),
            StationSequenceError::DuplicateName(name) => {
                write!(f, "Station {} appears twice in the sequence", name)
            }
        }
    }
}

impl std::error::Error for StationSequenceError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBerthKindError {
    input: String,
}

impl ParseBerthKindError {
    #[inline]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    #[inline]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Display for ParseBerthKindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown berth kind: {:?}", self.input)
    }
}

impl std::error::Error for ParseBerthKindError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display_forwards_inner() {
        let err: CatalogBuildError = DuplicateSlotError::new(CoachId::new("S3"), 12).into();
        assert_eq!(err.to_string(), "Slot 12 appears more than once in coach S3");
        let err: CatalogBuildError = DuplicateCoachError::new(CoachId::new("B1")).into();
        assert!(matches!(err, CatalogBuildError::DuplicateCoach(ref e) if e.coach().as_str() == "B1"));
    }

    #[test]
    fn test_parse_error_keeps_input() {
        let err = ParseBerthKindError::new("Window");
        assert_eq!(err.input(), "Window");
        assert_eq!(err.to_string(), "Unknown berth kind: \"Window\"");
    }
}
