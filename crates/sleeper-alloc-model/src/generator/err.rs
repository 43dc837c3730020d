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
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharedFractionOutOfRangeError {
    fraction: f64,
}

impl SharedFractionOutOfRangeError {
    pub fn new(fraction: f64) -> Self {
        Self { fraction }
    }
    pub fn fraction(&self) -> f64 {
        self.fraction
    }
}

impl Display for SharedFractionOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SharedFractionOutOfRangeError: shared fraction {} is not in [0, 1]",
            self.fraction
        )
    }
}

impl std::error::Error for SharedFractionOutOfRangeError {}

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioConfigBuildError {
    TooFewStations(usize),
    NoBoardingWeight,
    /// Boarding weights before the terminus add up past `u32::MAX`.
    BoardingWeightOverflow,
    /// Alighting weights after the origin add up past `u32::MAX`.
    AlightingWeightOverflow,
    SharedFractionOutOfRange(SharedFractionOutOfRangeError),
    Stations(StationSequenceError),
}

impl Display for ScenarioConfigBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ScenarioConfigBuildError::*;
        match self {
            TooFewStations(n) => write!(f, "A scenario needs at least 2 stations, got {}", n),
            NoBoardingWeight => write!(
                f,
                "Every station before the terminus has a boarding weight of zero"
            ),
            BoardingWeightOverflow => {
                write!(f, "Boarding weights before the terminus overflow a u32 total")
            }
            AlightingWeightOverflow => {
                write!(f, "Alighting weights after the origin overflow a u32 total")
            }
            SharedFractionOutOfRange(e) => write!(f, "{}", e),
            Stations(e) => write!(f, "{}", e),
        }
    }
}

impl From<SharedFractionOutOfRangeError> for ScenarioConfigBuildError {
    fn from(err: SharedFractionOutOfRangeError) -> Self {
        Self::SharedFractionOutOfRange(err)
    }
}

impl From<StationSequenceError> for ScenarioConfigBuildError {
    fn from(err: StationSequenceError) -> Self {
        Self::Stations(err)
    }
}

impl std::error::Error for ScenarioConfigBuildError {}
