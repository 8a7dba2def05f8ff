// RoadRoute: Decentralized Route Computation for Road Networks
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Forecast profiles
//!
//! The temporal protocols do not route on the current cost of a turning or section, but on the
//! cost that is expected at the time a vehicle actually arrives there. A [`ForecastProfile`]
//! stores the cost sampled at fixed offsets into the future, and answers with the sample closest
//! to a given arrival time.

use crate::netsim::{is_valid_cost, Cost, INVALID_COST};

/// Costs of a turning or section, sampled at increasing offsets (in seconds) into the future.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastProfile {
    samples: Vec<(f64, Cost)>,
}

impl ForecastProfile {
    /// Sample `cost_at` every `step` seconds, starting at zero and stopping before `horizon`.
    /// Returns `None` if any of the samples is invalid.
    pub fn sample<F>(horizon: f64, step: f64, mut cost_at: F) -> Option<Self>
    where
        F: FnMut(f64) -> Cost,
    {
        if step.is_nan() || step <= 0.0 {
            return None;
        }
        let num_samples = (horizon / step).ceil().max(1.0) as usize;
        let mut samples = Vec::with_capacity(num_samples);
        for i in 0..num_samples {
            let offset = i as f64 * step;
            let cost = cost_at(offset);
            if !is_valid_cost(cost) {
                return None;
            }
            samples.push((offset, cost));
        }
        Some(Self { samples })
    }

    /// Profile with the same cost at every point in time
    pub fn constant(cost: Cost) -> Self {
        Self { samples: vec![(0.0, cost)] }
    }

    /// Returns the sample with the offset closest to `elapsed`. On a tie, the earlier sample is
    /// chosen.
    pub fn at(&self, elapsed: f64) -> Cost {
        let mut best: Option<(f64, Cost)> = None;
        for (offset, cost) in self.samples.iter() {
            let distance = (offset - elapsed).abs();
            match best {
                Some((d, _)) if d <= distance => {}
                _ => best = Some((distance, *cost)),
            }
        }
        best.map(|(_, c)| c).unwrap_or(INVALID_COST)
    }

    /// Merge consecutive samples whose costs differ by at most `threshold` seconds. A merged
    /// sample keeps the offset of the first sample of the run, and has the average cost of all
    /// merged samples.
    pub fn compress(&mut self, threshold: f64) {
        let mut merged: Vec<(f64, Cost, usize)> = Vec::with_capacity(self.samples.len());
        let mut previous: Option<Cost> = None;
        for (offset, cost) in self.samples.iter() {
            match (merged.last_mut(), previous) {
                (Some((_, sum, n)), Some(p)) if (p - cost).abs() <= threshold => {
                    *sum += cost;
                    *n += 1;
                }
                _ => merged.push((*offset, *cost, 1)),
            }
            previous = Some(*cost);
        }
        self.samples = merged.into_iter().map(|(o, sum, n)| (o, sum / n as f64)).collect();
    }

    /// The samples as pairs of offset and cost
    pub fn samples(&self) -> &[(f64, Cost)] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the profile has no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// One hop of a path in the temporal distance-vector protocol: the turning at a junction,
/// followed by the section leaving it.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastHop {
    /// Forecasted cost of the turning
    pub turning: ForecastProfile,
    /// Forecasted cost of the outgoing section
    pub section: ForecastProfile,
}

impl ForecastHop {
    /// Cost of the hop when it is entered `elapsed` seconds from now.
    pub fn cost_at(&self, elapsed: f64) -> Cost {
        let turning = self.turning.at(elapsed);
        turning + self.section.at(elapsed + turning)
    }
}

/// Travel time along a path. The hops are ordered from the destination towards the origin, so
/// the travel time is accumulated from the last hop to the first one, and every hop is evaluated
/// at the time it is reached.
pub fn path_travel_time(path: &[ForecastHop]) -> Cost {
    path.iter().rev().fold(0.0, |elapsed, hop| elapsed + hop.cost_at(elapsed))
}
