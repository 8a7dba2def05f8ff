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

//! # Link-state protocol
//!
//! Every agent describes its turnings in an [`Advertisement`], and floods it to all neighbour
//! agents. Each agent stores the advertisements it has not seen before (by origin and sequence
//! number) in its [`TopologyDatabase`] and forwards them to all neighbours except the sender. Once
//! the flood is exhausted, every agent runs Dijkstra on its database, once per incoming section.
//!
//! The regional variant floods the advertisements only within the region. The border agents
//! then summarize the shortest paths through their region into a border advertisement, which is
//! flooded to all other border agents. After computing the routes to the foreign regions, the
//! border agents inject them as virtual entries back into their region.

pub mod database;
pub mod dijkstra;
mod state;

pub use database::{Advertisement, DatabaseEntry, Target, TopologyDatabase};
pub use dijkstra::{shortest_paths, AgentRoute, Route, ShortestPaths};
pub use state::{LinkStateState, RegionalPhase};
