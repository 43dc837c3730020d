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

//! Seeded synthetic request streams.
//!
//! Boarding stations are drawn by their boarding weight (the terminus never
//! boards anyone); the alighting station is drawn after the boarding station
//! according to the configured [`AlightingPolicy`]. Shared pairs board
//! together and alight independently, so their journeys always overlap.

mod config;
mod err;
mod profiles;

pub use config::{ScenarioConfig, ScenarioConfigBuilder};
pub use err::{ScenarioConfigBuildError, SharedFractionOutOfRangeError};
pub use profiles::{AlightingPolicy, StationProfile, amaravati_express};

use crate::{
    id::OccupantId,
    req::{Occupant, Request},
    station::StationSequence,
};
use rand::distr::{Distribution, weighted::WeightedIndex};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use sleeper_alloc_core::station::Journey;

pub struct ScenarioGenerator {
    config: ScenarioConfig,
    rng: SmallRng,
    boarding: WeightedIndex<u32>,
    // Per boarding station, weights over the stations after it.
    alighting: Vec<Option<WeightedIndex<u32>>>,
    next_id: u64,
}

impl From<ScenarioConfig> for ScenarioGenerator {
    fn from(config: ScenarioConfig) -> Self {
        Self::new(config)
    }
}

impl ScenarioGenerator {
    pub fn new(config: ScenarioConfig) -> Self {
        let n = config.profiles.len();
        let boarding = WeightedIndex::new(config.profiles[..n - 1].iter().map(|p| p.boarding_weight()))
            .expect("config guarantees a positive, non-overflowing boarding total");
        let alighting = match config.alighting {
            AlightingPolicy::Uniform => Vec::new(),
            AlightingPolicy::Weighted => (0..n - 1)
                .map(|board| {
                    WeightedIndex::new(
                        config.profiles[board + 1..]
                            .iter()
                            .map(|p| p.alighting_weight()),
                    )
                    .ok()
                })
                .collect(),
        };
        Self {
            rng: SmallRng::seed_from_u64(config.seed),
            boarding,
            alighting,
            config,
            next_id: 1,
        }
    }

    #[inline]
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    #[inline]
    pub fn stations(&self) -> &StationSequence {
        &self.config.stations
    }

    /// Draws `request_count` requests.
    pub fn generate(&mut self) -> Vec<Request> {
        (0..self.config.request_count)
            .map(|_| self.next_request())
            .collect()
    }

    pub fn next_request(&mut self) -> Request {
        let board = self.boarding.sample(&mut self.rng);
        if self.rng.random_bool(self.config.shared_fraction) {
            let first = Occupant::new(self.fresh_id(), self.journey_from(board));
            let second = Occupant::new(self.fresh_id(), self.journey_from(board));
            Request::shared_pair(first, second)
        } else {
            let id = self.fresh_id();
            Request::exclusive(id, self.journey_from(board))
        }
    }

    #[inline]
    fn fresh_id(&mut self) -> OccupantId {
        let id = self.next_id;
        self.next_id += 1;
        OccupantId::new(format!("{}{:05}", self.config.id_prefix, id))
    }

    fn sample_alight(&mut self, board: usize) -> usize {
        let last = self.config.profiles.len() - 1;
        match self.alighting.get(board).and_then(Option::as_ref) {
            Some(weights) => board + 1 + weights.sample(&mut self.rng),
            None => self.rng.random_range(board + 1..=last),
        }
    }

    fn journey_from(&mut self, board: usize) -> Journey {
        let alight = self.sample_alight(board);
        Journey::from_indices(board, alight).expect("alighting is drawn after boarding")
    }
}
