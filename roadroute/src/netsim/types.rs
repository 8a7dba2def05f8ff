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

//! Module containing all type definitions

use crate::netsim::traffic::Section;
use petgraph::prelude::*;
use petgraph::stable_graph::StableGraph;
use thiserror::Error;

type IndexType = u32;
/// Node Identification (and index into the graph). Both junctions and centroids are nodes.
pub type NodeId = NodeIndex<IndexType>;
/// Section Identification (and index into the graph)
pub type SectionId = EdgeIndex<IndexType>;
/// Region identifier used by the regional protocols
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct RegionId(pub u32);
/// Travel time in seconds.
pub type Cost = f64;
/// Road network graph. Nodes carry their kind, edges are the sections.
pub type RoadGraph = StableGraph<NodeKind, Section, Directed, IndexType>;

/// Sentinel for a cost that is not available (no turning, no flow, no forecast).
pub const INVALID_COST: Cost = -1.0;

/// Smallest difference between two costs that is treated as an improvement. Costs that are summed
/// up in a different order may differ in the last bits, which must not change a route.
pub const COST_EPSILON: Cost = 1e-6;

/// Returns `true` if the cost can be used for routing. A cost is unusable if it is NaN, infinite,
/// or not strictly positive.
pub fn is_valid_cost(cost: Cost) -> bool {
    cost.is_finite() && cost > 0.0
}

/// Returns `true` if all provided costs are valid.
pub fn are_costs_valid(costs: &[Cost]) -> bool {
    costs.iter().all(|c| is_valid_cost(*c))
}

/// Kind of a node in the road network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Signalized intersection, where a routing agent may be bound.
    Junction,
    /// Traffic source and sink. Never takes part in the protocol exchange.
    Centroid,
}

/// Network Errors
#[derive(Error, Debug, PartialEq)]
pub enum NetworkError {
    /// Node was not found in the network
    #[error("Node {0:?} was not found in the network")]
    NodeNotFound(NodeId),
    /// Node name was not found in the network
    #[error("Node name \"{0}\" was not found in the network")]
    NodeNameNotFound(String),
    /// Section was not found in the network
    #[error("Section {0:?} was not found in the network")]
    SectionNotFound(SectionId),
    /// There is no section between the two nodes
    #[error("No section from {0:?} to {1:?}")]
    NoSectionBetween(NodeId, NodeId),
    /// The node exists, but is not a junction
    #[error("Node {0:?} is not a junction")]
    NotAJunction(NodeId),
    /// The node exists, but is not a centroid
    #[error("Node {0:?} is not a centroid")]
    NotACentroid(NodeId),
    /// Sections between two centroids are not part of the road network
    #[error("A section cannot connect two centroids: {0:?} -> {1:?}")]
    CentroidConnection(NodeId, NodeId),
    /// The sections do not form a turning at the given junction
    #[error("Sections {1:?} -> {2:?} do not form a turning at {0:?}")]
    InvalidTurning(NodeId, SectionId, SectionId),
    /// The turning was not found at the junction
    #[error("Turning {1:?} -> {2:?} was not found at {0:?}")]
    TurningNotFound(NodeId, SectionId, SectionId),
    /// A numerical parameter is out of its domain
    #[error("Invalid parameter {0}: {1}")]
    InvalidParameter(&'static str, f64),
}
