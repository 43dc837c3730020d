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

use std::fmt::Display;

/// Demand at one stop: how strongly passengers board and alight there.
///
/// Weights are relative; only their ratios matter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationProfile {
    name: String,
    boarding_weight: u32,
    alighting_weight: u32,
}

impl StationProfile {
    #[inline]
    pub fn new(name: impl Into<String>, boarding_weight: u32, alighting_weight: u32) -> Self {
        Self {
            name: name.into(),
            boarding_weight,
            alighting_weight,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn boarding_weight(&self) -> u32 {
        self.boarding_weight
    }

    #[inline]
    pub fn alighting_weight(&self) -> u32 {
        self.alighting_weight
    }
}

impl Display for StationProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (boarding: {}, alighting: {})",
            self.name, self.boarding_weight, self.alighting_weight
        )
    }
}

/// How the alighting station is drawn once the boarding station is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlightingPolicy {
    /// Every later station is equally likely.
    #[default]
    Uniform,
    /// Later stations are weighted by their alighting weight. Falls back to
    /// uniform when all later weights are zero.
    Weighted,
}

impl Display for AlightingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlightingPolicy::Uniform => write!(f, "Uniform"),
            AlightingPolicy::Weighted => write!(f, "Weighted"),
        }
    }
}

const AMARAVATI_EXPRESS: [(&str, u32, u32); 28] = [
    ("Narasapur", 195, 0),
    ("Palakollu", 98, 11),
    ("Bhimavaram Jn", 76, 22),
    ("Bhimavaram Town", 74, 6),
    ("Akividu", 33, 11),
    ("Kaikolur", 44, 6),
    ("Gudivada Jn", 66, 22),
    ("Vijayawada Jn", 198, 89),
    ("Guntur Jn", 132, 66),
    ("Narasaraopet", 33, 11),
    ("Vinukonda", 27, 11),
    ("Kurichedu", 16, 11),
    ("Donakonda", 11, 22),
    ("Markapur Road", 39, 11),
    ("Cumbum", 11, 11),
    ("Giddalur", 11, 17),
    ("Nandyal", 44, 33),
    ("Dhone Jn", 39, 44),
    ("Pendekallu", 18, 11),
    ("Guntakal Jn", 94, 111),
    ("Bellary Jn", 74, 66),
    ("Toranagallu Jn", 27, 33),
    ("Hosapete Jn", 39, 66),
    ("Munirabad", 20, 23),
    ("Koppal", 27, 44),
    ("Gadag Jn", 39, 111),
    ("Annigeri", 20, 56),
    ("Hubballi Jn", 0, 579),
];

/// The 28 stops of the Narasapur to Hubballi Amaravati Express with their
/// observed boarding and alighting counts.
pub fn amaravati_express() -> Vec<StationProfile> {
    AMARAVATI_EXPRESS
        .iter()
        .map(|(name, b, a)| StationProfile::new(*name, *b, *a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amaravati_express_runs_narasapur_to_hubballi() {
        let profiles = amaravati_express();
        assert_eq!(profiles.len(), 28);
        assert_eq!(profiles[0].name(), "Narasapur");
        assert_eq!(profiles[0].alighting_weight(), 0);
        let last = profiles.last().unwrap();
        assert_eq!(last.name(), "Hubballi Jn");
        assert_eq!(last.boarding_weight(), 0);
        assert_eq!(last.alighting_weight(), 579);
    }

    #[test]
    fn test_station_profile_display() {
        let p = StationProfile::new("Guntur Jn", 132, 66);
        assert_eq!(p.to_string(), "Guntur Jn (boarding: 132, alighting: 66)");
    }
}
