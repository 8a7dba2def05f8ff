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

#![deny(missing_docs, missing_debug_implementations)]

//! # NetSim
//!
//! Model of the road network on which the routing agents operate. The network consists of
//! junctions (where agents are bound), centroids (traffic sources and sinks), directed sections
//! and turnings. The simulation layer keeps the measured flows, forecasts and disturbances up to
//! date, and the routing agents derive their travel time estimates from them.
//!
//! ## Example usage
//!
//! ```rust
//! use roadroute::netsim::{Forecast, RoadNetwork, is_valid_cost};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut net = RoadNetwork::new();
//!     let a = net.add_junction("A");
//!     let b = net.add_junction("B");
//!
//!     // 100 meters at 36 km/h takes 10 seconds on the empty road
//!     let ab = net.add_section(a, b, 100.0, 36.0, 1800.0)?;
//!     assert!(!is_valid_cost(net.section(ab)?.current_delay()));
//!
//!     net.set_section_flow(ab, 900.0)?;
//!     assert!(net.section(ab)?.current_delay() > 10.0);
//!
//!     net.set_section_forecast(ab, Forecast::new(300.0, vec![900.0, 1800.0]))?;
//!     assert!(net.section(ab)?.forecast_delay(300.0) > net.section(ab)?.current_delay());
//!     Ok(())
//! }
//! ```

pub mod geometry;
pub(crate) mod network;
pub mod printer;
pub mod region;
pub mod traffic;
pub(crate) mod types;

pub use geometry::{CoordinateError, Point};
pub use network::RoadNetwork;
pub use region::{RegionError, RegionMap};
pub use traffic::{webster_delay, Forecast, Junction, Section, Turning};
pub use types::{
    are_costs_valid, is_valid_cost, Cost, NetworkError, NodeId, NodeKind, RegionId, RoadGraph,
    SectionId, COST_EPSILON, INVALID_COST,
};
