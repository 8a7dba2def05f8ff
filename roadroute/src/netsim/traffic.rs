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

//! # Traffic model
//!
//! Sections, turnings and junctions of the road network, together with the delay functions used to
//! turn measured (or forecasted) flows into travel times.

use crate::netsim::types::{Cost, NodeId, INVALID_COST};

/// Saturation flow of a single lane in vehicles per hour.
pub const SATURATION_FLOW_PER_LANE: f64 = 1800.0;

/// Maximal degree of saturation that is used in the Webster formula.
const MAX_SATURATION: f64 = 0.99;

/// Webster delay for a signalized turning. The result is the average delay (in seconds) of a
/// vehicle passing the turning.
///
/// - `flow`: flow of the turning in vehicles per hour. A flow of zero is treated as a single
///   vehicle per hour.
/// - `green`: effective green time of the turning in seconds.
/// - `cycle`: cycle time of the junction in seconds.
/// - `lanes`: number of lanes of the turning.
///
/// If the parameters do not describe a working signal (no green, no cycle, no lane, or an unknown
/// flow), [`INVALID_COST`] is returned.
pub fn webster_delay(flow: f64, green: f64, cycle: f64, lanes: u32) -> Cost {
    if flow.is_nan() || flow < 0.0 || green <= 0.0 || cycle <= 0.0 || lanes == 0 {
        return INVALID_COST;
    }
    let m = if flow == 0.0 { 1.0 } else { flow };
    let s = lanes as f64 * SATURATION_FLOW_PER_LANE;
    let f = green / cycle;
    let mut g = m / (f * s);
    if g >= 1.0 {
        g = MAX_SATURATION;
    }

    let first = cycle * (1.0 - f).powi(2) / (2.0 * (1.0 - m / s));
    let second = 1800.0 * g.powi(2) / (m * (1.0 - g));
    0.9 * (first + second)
}

/// Forecast of a flow value, given as a list of values with a fixed time step between two
/// consecutive values. The first value is the forecast for the current time.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    step: f64,
    values: Vec<f64>,
}

impl Forecast {
    /// Create a new forecast. `step` is the time (in seconds) between two consecutive values.
    pub fn new(step: f64, values: Vec<f64>) -> Self {
        Self { step, values }
    }

    /// Returns the time between two forecast values.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the forecasted value `seconds` into the future, or NaN if the forecast does not
    /// reach that far.
    pub fn value_at(&self, seconds: f64) -> f64 {
        if self.step <= 0.0 || seconds < 0.0 {
            return f64::NAN;
        }
        let steps = (seconds / self.step).round() as usize;
        self.values.get(steps).copied().unwrap_or(f64::NAN)
    }
}

/// Returns true if the forecasted flow can be used as a cost basis.
pub(crate) fn is_valid_flow(flow: f64) -> bool {
    flow.is_finite() && flow > 0.0
}

/// Directed road section between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Node at which the section starts
    pub from: NodeId,
    /// Node at which the section ends
    pub to: NodeId,
    /// Length in meters
    pub length: f64,
    /// Speed limit in kilometers per hour
    pub speed_limit: f64,
    /// Capacity in vehicles per hour
    pub capacity: f64,
    /// Currently measured flow in vehicles per hour
    pub flow: f64,
    /// Degree of all active disturbances (e.g. incidents) on the section
    pub disturbances: Vec<f64>,
    /// Forecast of the flow
    pub forecast: Option<Forecast>,
}

impl Section {
    pub(crate) fn new(
        from: NodeId,
        to: NodeId,
        length: f64,
        speed_limit: f64,
        capacity: f64,
    ) -> Self {
        Self {
            from,
            to,
            length,
            speed_limit,
            capacity,
            flow: 0.0,
            disturbances: Vec::new(),
            forecast: None,
        }
    }

    /// Travel time on the empty section, in seconds.
    pub fn free_flow_time(&self) -> Cost {
        if self.speed_limit <= 0.0 {
            return INVALID_COST;
        }
        self.length / (self.speed_limit / 3.6)
    }

    /// Travel time for the given flow (BPR function), including all disturbances. Returns an
    /// invalid cost for zero or unknown flow.
    pub fn delay_for_flow(&self, flow: f64) -> Cost {
        if !is_valid_flow(flow) || self.capacity <= 0.0 {
            return INVALID_COST;
        }
        let free = self.free_flow_time();
        if free < 0.0 {
            return INVALID_COST;
        }
        let delay = free * (1.0 + 0.7 * (flow / self.capacity).powi(3));
        self.disturbances.iter().fold(delay, |d, degree| d * (1.0 + degree))
    }

    /// Travel time for the currently measured flow.
    pub fn current_delay(&self) -> Cost {
        self.delay_for_flow(self.flow)
    }

    /// Travel time for the forecasted flow `seconds` into the future.
    pub fn forecast_delay(&self, seconds: f64) -> Cost {
        match self.forecast.as_ref() {
            Some(forecast) => self.delay_for_flow(forecast.value_at(seconds)),
            None => INVALID_COST,
        }
    }
}

/// Turning relation at a junction, from an incoming to an outgoing section.
#[derive(Debug, Clone, PartialEq)]
pub struct Turning {
    /// Effective green time in seconds
    pub green: f64,
    /// Number of lanes
    pub lanes: u32,
    /// Current flow in vehicles per hour, if measured
    pub flow: Option<f64>,
    /// Measured average delay in seconds (from traffic statistics)
    pub measured_delay: Option<Cost>,
    /// Forecast of the flow
    pub forecast: Option<Forecast>,
}

impl Turning {
    pub(crate) fn new(green: f64, lanes: u32) -> Self {
        Self { green, lanes, flow: None, measured_delay: None, forecast: None }
    }

    /// Webster delay of the turning for the given flow and junction cycle.
    pub fn delay_for_flow(&self, flow: f64, cycle: f64) -> Cost {
        webster_delay(flow, self.green, cycle, self.lanes)
    }
}

/// Signalized junction
#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    /// Cycle time of the signal plan in seconds
    pub cycle: f64,
}
