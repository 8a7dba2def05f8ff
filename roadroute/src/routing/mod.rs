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

//! # Routing
//!
//! Decentralized route computation. A [`RoutingAgent`] is bound to every junction of the road
//! network. Each agent owns one [`RoutingTable`] per incoming section, which maps every reachable
//! destination centroid to the outgoing section to take and the expected travel time. The agents
//! fill their tables by exchanging messages with their neighbour agents, following one of the
//! protocols in [`ProtocolType`]. The [`RoutingOrchestrator`] schedules the protocol rounds and
//! delivers all messages.
//!
//! ## Example usage
//!
//! ```rust
//! use roadroute::config::RoutingConfig;
//! use roadroute::example_networks::{ExampleNetwork, TriangleNet};
//! use roadroute::routing::{ProtocolType, RoutingOrchestrator};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let net = TriangleNet::net();
//!     let config = RoutingConfig::with_protocol(ProtocolType::DistanceVector);
//!     let mut orchestrator = RoutingOrchestrator::new(net, config)?;
//!
//!     // nothing happens during the warmup
//!     assert!(!orchestrator.process(100.0));
//!     // the first round is executed after warmup and interval
//!     assert!(orchestrator.process(601.0));
//!
//!     let j1 = orchestrator.network().get_node_id("J1")?;
//!     let j2 = orchestrator.network().get_node_id("J2")?;
//!     let c2 = orchestrator.network().get_node_id("C2")?;
//!     let in_section = orchestrator.network().find_section(j2, j1)?;
//!     assert!(orchestrator.route(j1, in_section, c2).is_some());
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod distance_vector;
pub mod forecast;
pub mod greedy;
pub mod heuristic;
pub mod link_state;
pub mod message;
pub mod orchestrator;
pub mod protocol;
pub mod regional;
pub mod table;

pub use agent::{AgentCore, ProtocolState, RoutingAgent, RoutingContext};
pub use message::{Message, MessageQueue};
pub use orchestrator::{RoutingOrchestrator, TableUpdate};
pub use protocol::ProtocolType;
pub use regional::RegionalRole;
pub use table::{RouteEntry, RoutingTable};
