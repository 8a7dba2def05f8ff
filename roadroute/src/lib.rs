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

#![deny(missing_docs)]

//! # RoadRoute: Decentralized Route Computation for Road Networks
//! This is a library for computing the routes of vehicles in a road network with distributed
//! routing protocols. Every signalized junction hosts a routing agent, which exchanges messages
//! with the agents at the neighbouring junctions, and maintains a routing table for each of its
//! incoming sections.
//!
//! ## Structure
//!
//! This library is structured in the following way:
//!
//! - **[`NetSim`](netsim)**: Model of the road network, with junctions, centroids, sections and
//!   turnings, and the delay functions that estimate travel times from the measured flows. See
//!   the main structure [`RoadNetwork`](netsim::RoadNetwork).
//!
//! - **[`Routing`](routing)**: The routing agents and their protocols: distance-vector and
//!   link-state, each with a regional (hierarchical) extension, and variants that route on
//!   forecasted instead of current costs. Two geometric protocols (greedy and A*) route locally
//!   without communication. The [`RoutingOrchestrator`](routing::RoutingOrchestrator) schedules
//!   the protocol rounds.
//!
//! - **[`Config`](config)**: Configuration of the routing engine, read from JSON.
//!
//! - **[`ExampleNetworks`](example_networks)**: Collection of prepared road networks to test the
//!   different protocols. Some of these networks can be scaled to arbitrary size.
//!
//! ## Usage
//!
//! Prepare the [network](netsim::RoadNetwork), choose a protocol in the
//! [configuration](config::RoutingConfig), and create the orchestrator. Then, call
//! [`process`](routing::RoutingOrchestrator::process) on every simulation tick, and read the
//! routes from the orchestrator or from the published
//! [table updates](routing::TableUpdate).
//!
//! ```
//! use roadroute::config::RoutingConfig;
//! use roadroute::routing::{ProtocolType, RoutingOrchestrator};
//! use roadroute::Error;
//! # use roadroute::example_networks::*;
//!
//! fn main() -> Result<(), Error> {
//!     // prepare the network
//!     // let net = ...
//! # let net = DiamondNet::net();
//!
//!     let config = RoutingConfig::with_protocol(ProtocolType::LinkState);
//!     let mut orchestrator = RoutingOrchestrator::new(net, config)?;
//!     orchestrator.run_round();
//!
//!     // Do something with the result
//!     for update in orchestrator.take_updates() {
//!         println!("{:?}", update);
//!     }
//!
//!     Ok(())
//! }
//! ```

// test modules
pub mod example_networks;
mod test;

pub mod config;
mod error;
pub mod netsim;
pub mod routing;

pub use error::Error;
