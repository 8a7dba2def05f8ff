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

//! # Top-level road network module
//!
//! This module represents the road topology together with all traffic measurements that the
//! routing agents use to estimate travel times.

use crate::netsim::geometry::Point;
use crate::netsim::traffic::{Forecast, Junction, Section, Turning};
use crate::netsim::types::{Cost, NodeId, NodeKind, RoadGraph, SectionId};
use crate::netsim::NetworkError;

use itertools::Itertools;
use log::*;
use petgraph::visit::EdgeRef;
use petgraph::Direction::{Incoming, Outgoing};
use std::collections::HashMap;

/// Default cycle time of a junction, in seconds.
pub const DEFAULT_CYCLE_TIME: f64 = 90.0;

#[derive(Debug, Clone)]
/// # Road network
/// The struct contains the topology of the road network (junctions, centroids and the directed
/// sections between them), the turnings at every junction, and the static travel time offsets
/// between nodes. The topology is fixed once the routing is started. Only flows, forecasts and
/// disturbances are expected to change while the simulation runs.
///
/// ```rust
/// use roadroute::netsim::RoadNetwork;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut net = RoadNetwork::new();
///     let a = net.add_junction("A");
///     let b = net.add_junction("B");
///     let c = net.add_centroid("C");
///
///     let ab = net.add_section(a, b, 100.0, 36.0, 1800.0)?;
///     let bc = net.add_section(b, c, 50.0, 36.0, 1800.0)?;
///     net.add_turning(ab, bc, 30.0, 1)?;
///
///     net.set_section_flow(ab, 400.0)?;
///     net.set_turning_flow(ab, bc, 300.0)?;
///
///     assert_eq!(net.out_sections(a), vec![ab]);
///     assert!(net.turning(ab, bc).is_some());
///     Ok(())
/// }
/// ```
pub struct RoadNetwork {
    graph: RoadGraph,
    names: HashMap<NodeId, String>,
    junctions: HashMap<NodeId, Junction>,
    turnings: HashMap<(SectionId, SectionId), Turning>,
    offsets: HashMap<(NodeId, NodeId), Cost>,
    coordinates: HashMap<NodeId, Point>,
}

impl Default for RoadNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl RoadNetwork {
    /// Generate an empty road network
    pub fn new() -> Self {
        Self {
            graph: RoadGraph::default(),
            names: HashMap::new(),
            junctions: HashMap::new(),
            turnings: HashMap::new(),
            offsets: HashMap::new(),
            coordinates: HashMap::new(),
        }
    }

    /// Add a new signalized junction with the default cycle time. Routing agents can be bound to
    /// junctions only.
    pub fn add_junction<S: Into<String>>(&mut self, name: S) -> NodeId {
        let id = self.graph.add_node(NodeKind::Junction);
        self.names.insert(id, name.into());
        self.junctions.insert(id, Junction { cycle: DEFAULT_CYCLE_TIME });
        id
    }

    /// Add a new centroid, which is a source and destination of traffic.
    pub fn add_centroid<S: Into<String>>(&mut self, name: S) -> NodeId {
        let id = self.graph.add_node(NodeKind::Centroid);
        self.names.insert(id, name.into());
        id
    }

    /// Add a directed section from `from` to `to`. The section has the given length (in meters),
    /// speed limit (in km/h) and capacity (in vehicles per hour). Its flow is initially zero,
    /// which means that it has no valid delay until a flow is measured.
    pub fn add_section(
        &mut self,
        from: NodeId,
        to: NodeId,
        length: f64,
        speed_limit: f64,
        capacity: f64,
    ) -> Result<SectionId, NetworkError> {
        let from_kind = self.kind(from)?;
        let to_kind = self.kind(to)?;
        if from_kind == NodeKind::Centroid && to_kind == NodeKind::Centroid {
            return Err(NetworkError::CentroidConnection(from, to));
        }
        if length.is_nan() || length <= 0.0 {
            return Err(NetworkError::InvalidParameter("length", length));
        }
        if speed_limit.is_nan() || speed_limit <= 0.0 {
            return Err(NetworkError::InvalidParameter("speed_limit", speed_limit));
        }
        Ok(self.graph.add_edge(from, to, Section::new(from, to, length, speed_limit, capacity)))
    }

    /// Add a turning at a junction, from the section `from` (which must end at the junction) to
    /// the section `to` (which must start at the same junction).
    pub fn add_turning(
        &mut self,
        from: SectionId,
        to: SectionId,
        green: f64,
        lanes: u32,
    ) -> Result<(), NetworkError> {
        let node = self.section(from)?.to;
        if self.section(to)?.from != node {
            return Err(NetworkError::InvalidTurning(node, from, to));
        }
        if !self.junctions.contains_key(&node) {
            return Err(NetworkError::NotAJunction(node));
        }
        if self.turnings.insert((from, to), Turning::new(green, lanes)).is_some() {
            debug!("Turning {:?} -> {:?} at {:?} was replaced", from, to, node);
        }
        Ok(())
    }

    /// Returns the kind of a node
    pub fn kind(&self, node: NodeId) -> Result<NodeKind, NetworkError> {
        self.graph.node_weight(node).copied().ok_or(NetworkError::NodeNotFound(node))
    }

    /// Returns true if the node exists and is a junction
    pub fn is_junction(&self, node: NodeId) -> bool {
        self.junctions.contains_key(&node)
    }

    /// Returns true if the node exists and is a centroid
    pub fn is_centroid(&self, node: NodeId) -> bool {
        self.kind(node) == Ok(NodeKind::Centroid)
    }

    /// Returns all junctions, ordered by their id
    pub fn junctions(&self) -> Vec<NodeId> {
        self.junctions.keys().copied().sorted().collect()
    }

    /// Returns all centroids, ordered by their id
    pub fn centroids(&self) -> Vec<NodeId> {
        self.graph
            .node_indices()
            .filter(|n| self.graph[*n] == NodeKind::Centroid)
            .sorted()
            .collect()
    }

    /// Returns a reference to the junction
    pub fn junction(&self, node: NodeId) -> Result<&Junction, NetworkError> {
        self.junctions.get(&node).ok_or(NetworkError::NotAJunction(node))
    }

    /// Set the cycle time of the signal plan at a junction
    pub fn set_cycle_time(&mut self, node: NodeId, cycle: f64) -> Result<(), NetworkError> {
        self.junctions.get_mut(&node).ok_or(NetworkError::NotAJunction(node))?.cycle = cycle;
        Ok(())
    }

    /// Returns a reference to the section
    pub fn section(&self, section: SectionId) -> Result<&Section, NetworkError> {
        self.graph.edge_weight(section).ok_or(NetworkError::SectionNotFound(section))
    }

    fn section_mut(&mut self, section: SectionId) -> Result<&mut Section, NetworkError> {
        self.graph.edge_weight_mut(section).ok_or(NetworkError::SectionNotFound(section))
    }

    /// Returns all sections, ordered by their id
    pub fn sections(&self) -> Vec<SectionId> {
        self.graph.edge_indices().sorted().collect()
    }

    /// Returns all sections ending at `node`, ordered by their id
    pub fn in_sections(&self, node: NodeId) -> Vec<SectionId> {
        self.graph.edges_directed(node, Incoming).map(|e| e.id()).sorted().collect()
    }

    /// Returns all sections starting at `node`, ordered by their id
    pub fn out_sections(&self, node: NodeId) -> Vec<SectionId> {
        self.graph.edges_directed(node, Outgoing).map(|e| e.id()).sorted().collect()
    }

    /// Returns the section from `from` to `to`. If there are multiple sections, the one with
    /// the lowest id is returned.
    pub fn find_section(&self, from: NodeId, to: NodeId) -> Result<SectionId, NetworkError> {
        self.graph
            .edges_directed(from, Outgoing)
            .filter(|e| e.target() == to)
            .map(|e| e.id())
            .min()
            .ok_or(NetworkError::NoSectionBetween(from, to))
    }

    /// Returns the turning from section `from` to section `to`, if it exists.
    pub fn turning(&self, from: SectionId, to: SectionId) -> Option<&Turning> {
        self.turnings.get(&(from, to))
    }

    fn turning_mut(
        &mut self,
        from: SectionId,
        to: SectionId,
    ) -> Result<&mut Turning, NetworkError> {
        let node = self.section(from)?.to;
        self.turnings.get_mut(&(from, to)).ok_or(NetworkError::TurningNotFound(node, from, to))
    }

    /// Returns all turnings at the junction as pairs of (incoming, outgoing) sections, ordered by
    /// the incoming and then the outgoing section.
    pub fn turnings_at(&self, node: NodeId) -> Vec<(SectionId, SectionId)> {
        let mut result: Vec<(SectionId, SectionId)> = self
            .turnings
            .keys()
            .filter(|(from, _)| self.graph.edge_weight(*from).map(|s| s.to) == Some(node))
            .copied()
            .collect();
        result.sort();
        result
    }

    /// Set the measured flow of a section (vehicles per hour)
    pub fn set_section_flow(&mut self, section: SectionId, flow: f64) -> Result<(), NetworkError> {
        self.section_mut(section)?.flow = flow;
        Ok(())
    }

    /// Set the flow forecast of a section
    pub fn set_section_forecast(
        &mut self,
        section: SectionId,
        forecast: Forecast,
    ) -> Result<(), NetworkError> {
        self.section_mut(section)?.forecast = Some(forecast);
        Ok(())
    }

    /// Add a disturbance to a section. The delay of the section is multiplied by `1 + degree`.
    pub fn add_disturbance(&mut self, section: SectionId, degree: f64) -> Result<(), NetworkError> {
        self.section_mut(section)?.disturbances.push(degree);
        Ok(())
    }

    /// Remove all disturbances of a section
    pub fn clear_disturbances(&mut self, section: SectionId) -> Result<(), NetworkError> {
        self.section_mut(section)?.disturbances.clear();
        Ok(())
    }

    /// Set the measured flow of a turning (vehicles per hour)
    pub fn set_turning_flow(
        &mut self,
        from: SectionId,
        to: SectionId,
        flow: f64,
    ) -> Result<(), NetworkError> {
        self.turning_mut(from, to)?.flow = Some(flow);
        Ok(())
    }

    /// Set the measured delay of a turning (in seconds), used by the statistics delay method.
    pub fn set_turning_delay(
        &mut self,
        from: SectionId,
        to: SectionId,
        delay: Cost,
    ) -> Result<(), NetworkError> {
        self.turning_mut(from, to)?.measured_delay = Some(delay);
        Ok(())
    }

    /// Set the flow forecast of a turning
    pub fn set_turning_forecast(
        &mut self,
        from: SectionId,
        to: SectionId,
        forecast: Forecast,
    ) -> Result<(), NetworkError> {
        self.turning_mut(from, to)?.forecast = Some(forecast);
        Ok(())
    }

    /// Set the static travel time offset between two nodes. Offsets are used as fallback costs if
    /// no measurement is available, and to classify neighbours in the regional protocols.
    pub fn set_offset(&mut self, from: NodeId, to: NodeId, cost: Cost) -> Result<(), NetworkError> {
        self.kind(from)?;
        self.kind(to)?;
        self.offsets.insert((from, to), cost);
        Ok(())
    }

    /// Returns the static travel time offset between two nodes, if known.
    pub fn offset(&self, from: NodeId, to: NodeId) -> Option<Cost> {
        self.offsets.get(&(from, to)).copied()
    }

    /// Set the position of a node, in meters. Positions are only needed by the geometric
    /// protocols.
    pub fn set_coordinates(&mut self, node: NodeId, position: Point) -> Result<(), NetworkError> {
        self.kind(node)?;
        self.coordinates.insert(node, position);
        Ok(())
    }

    /// Returns the position of the node, if known.
    pub fn coordinates(&self, node: NodeId) -> Option<Point> {
        self.coordinates.get(&node).copied()
    }

    /// Highest speed limit of all sections in km/h, or `None` if there is no section.
    pub fn max_speed_limit(&self) -> Option<f64> {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_weight(e))
            .map(|s| s.speed_limit)
            .fold(None, |max, v| match max {
                Some(m) if m >= v => Some(m),
                _ => Some(v),
            })
    }

    /// Returns the node id with the given name
    pub fn get_node_id(&self, name: impl AsRef<str>) -> Result<NodeId, NetworkError> {
        self.names
            .iter()
            .filter(|(_, n)| n.as_str() == name.as_ref())
            .map(|(id, _)| *id)
            .next()
            .ok_or_else(|| NetworkError::NodeNameNotFound(name.as_ref().to_string()))
    }

    /// Returns the name of the node
    pub fn get_node_name(&self, node: NodeId) -> Result<&str, NetworkError> {
        self.names.get(&node).map(|n| n.as_str()).ok_or(NetworkError::NodeNotFound(node))
    }
}
