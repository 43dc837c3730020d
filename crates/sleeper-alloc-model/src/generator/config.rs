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

use super::err::{ScenarioConfigBuildError, SharedFractionOutOfRangeError};
use super::profiles::{AlightingPolicy, StationProfile, amaravati_express};
use crate::station::StationSequence;

/// Configuration for synthetic request streams.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub(crate) profiles: Vec<StationProfile>,
    pub(crate) stations: StationSequence,
    pub(crate) request_count: usize,
    pub(crate) shared_fraction: f64,
    pub(crate) alighting: AlightingPolicy,
    pub(crate) id_prefix: String,
    pub(crate) seed: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        // The preset profiles are distinct and non-empty.
        ScenarioConfigBuilder::default()
            .build()
            .unwrap_or_else(|e| panic!("default scenario config is valid: {e}"))
    }
}

impl ScenarioConfig {
    #[inline]
    pub fn builder() -> ScenarioConfigBuilder {
        ScenarioConfigBuilder::default()
    }

    #[inline]
    pub fn profiles(&self) -> &[StationProfile] {
        &self.profiles
    }

    #[inline]
    pub fn stations(&self) -> &StationSequence {
        &self.stations
    }

    #[inline]
    pub fn request_count(&self) -> usize {
        self.request_count
    }

    #[inline]
    pub fn shared_fraction(&self) -> f64 {
        self.shared_fraction
    }

    #[inline]
    pub fn alighting(&self) -> AlightingPolicy {
        self.alighting
    }

    #[inline]
    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Display for ScenarioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ScenarioConfig {{ stations: {}, request_count: {}, shared_fraction: {:.4}, \
             alighting: {}, id_prefix: {}, seed: {} }}",
            self.stations.len(),
            self.request_count,
            self.shared_fraction,
            self.alighting,
            self.id_prefix,
            self.seed
        )
    }
}

/// Builder for `ScenarioConfig`.
#[derive(Debug, Clone)]
pub struct ScenarioConfigBuilder {
    profiles: Vec<StationProfile>,
    request_count: usize,
    shared_fraction: f64,
    alighting: AlightingPolicy,
    id_prefix: String,
    seed: u64,
}

impl Default for ScenarioConfigBuilder {
    fn default() -> Self {
        Self {
            profiles: amaravati_express(),
            request_count: 1376,
            shared_fraction: 0.055,
            alighting: AlightingPolicy::Uniform,
            id_prefix: "P".to_owned(),
            seed: 20260202,
        }
    }
}

impl ScenarioConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profiles(mut self, profiles: impl IntoIterator<Item = StationProfile>) -> Self {
        self.profiles = profiles.into_iter().collect();
        self
    }

    pub fn request_count(mut self, n: usize) -> Self {
        self.request_count = n;
        self
    }

    /// Probability that a generated request is a shared pair.
    pub fn shared_fraction(mut self, p: f64) -> Self {
        self.shared_fraction = p;
        self
    }

    pub fn alighting(mut self, policy: AlightingPolicy) -> Self {
        self.alighting = policy;
        self
    }

    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<ScenarioConfig, ScenarioConfigBuildError> {
        let n = self.profiles.len();
        if n < 2 {
            return Err(ScenarioConfigBuildError::TooFewStations(n));
        }
        if self.profiles[..n - 1]
            .iter()
            .all(|p| p.boarding_weight() == 0)
        {
            return Err(ScenarioConfigBuildError::NoBoardingWeight);
        }
        if !fits_u32_total(self.profiles[..n - 1].iter().map(|p| p.boarding_weight())) {
            return Err(ScenarioConfigBuildError::BoardingWeightOverflow);
        }
        // Every per-origin alighting table is a suffix of this one.
        if self.alighting == AlightingPolicy::Weighted
            && !fits_u32_total(self.profiles[1..].iter().map(|p| p.alighting_weight()))
        {
            return Err(ScenarioConfigBuildError::AlightingWeightOverflow);
        }
        if !(0.0..=1.0).contains(&self.shared_fraction) {
            return Err(SharedFractionOutOfRangeError::new(self.shared_fraction).into());
        }
        let stations = StationSequence::new(self.profiles.iter().map(|p| p.name().to_owned()))?;

        Ok(ScenarioConfig {
            profiles: self.profiles,
            stations,
            request_count: self.request_count,
            shared_fraction: self.shared_fraction,
            alighting: self.alighting,
            id_prefix: self.id_prefix,
            seed: self.seed,
        })
    }
}

/// `true` if the weights sum without overflowing the sampler's `u32` total.
fn fits_u32_total(mut weights: impl Iterator<Item = u32>) -> bool {
    weights.try_fold(0u32, u32::checked_add).is_some()
}
