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

//! # Heuristic routing
//!
//! Every agent keeps its own [`StreetMap`] of the whole network. The map starts with the static
//! travel time offsets of all turnings, and the agent overwrites its own turnings with the
//! measured costs in every round. Routes are computed locally with A*, using the straight-line
//! distance to the destination at the highest speed limit of the network as estimate. Without
//! positions, the estimate is zero and the search degrades to Dijkstra.
//!
//! Agents do not communicate. Congestion at other junctions is therefore never seen.

use crate::netsim::{is_valid_cost, Cost, NodeId, Point, RoadNetwork, SectionId};
use crate::routing::agent::{AgentCore, RoutingContext};

use log::*;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};

/// Hop from a junction to the next node of the street map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Section to take
    pub out_section: SectionId,
    /// Node at the end of the section
    pub target: NodeId,
    /// Travel time of the hop
    pub cost: Cost,
}

/// Static map of the network, as seen by a single agent
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreetMap {
    /// usable hops, by junction and incoming section
    links: BTreeMap<(NodeId, SectionId), Vec<Link>>,
}

impl StreetMap {
    /// Build the map from the turnings and the static offsets of the network. Turnings without a
    /// valid offset are left out.
    pub fn from_network(net: &RoadNetwork) -> Self {
        let mut links: BTreeMap<(NodeId, SectionId), Vec<Link>> = BTreeMap::new();
        for junction in net.junctions() {
            for (in_section, out_section) in net.turnings_at(junction) {
                let target = match net.section(out_section) {
                    Ok(s) => s.to,
                    Err(_) => continue,
                };
                match net.offset(junction, target) {
                    Some(cost) if is_valid_cost(cost) => links
                        .entry((junction, in_section))
                        .or_insert_with(Vec::new)
                        .push(Link { out_section, target, cost }),
                    _ => trace!("No static cost from {:?} to {:?}", junction, target),
                }
            }
        }
        Self { links }
    }

    /// All hops from the junction, entered through `in_section`
    pub fn links(&self, junction: NodeId, in_section: SectionId) -> &[Link] {
        self.links.get(&(junction, in_section)).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Overwrite the cost of a hop. Returns false if the hop is not on the map.
    pub fn set_cost(
        &mut self,
        junction: NodeId,
        in_section: SectionId,
        out_section: SectionId,
        cost: Cost,
    ) -> bool {
        match self
            .links
            .get_mut(&(junction, in_section))
            .and_then(|v| v.iter_mut().find(|l| l.out_section == out_section))
        {
            Some(link) => {
                link.cost = cost;
                true
            }
            None => false,
        }
    }
}

/// Route found by A*
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicRoute {
    /// Section to take at the start
    pub first_hop: SectionId,
    /// Total travel time
    pub cost: Cost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum State {
    Junction(NodeId, SectionId),
    Centroid(NodeId),
}

#[derive(Debug, Clone, Copy)]
struct FrontierItem {
    estimate: Cost,
    cost: Cost,
    order: usize,
    state: State,
}

impl PartialEq for FrontierItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierItem {}

impl Ord for FrontierItem {
    // reversed, such that the max-heap pops the most promising (and then oldest) item
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .partial_cmp(&self.estimate)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for FrontierItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lower bound of the travel time between two positions.
#[derive(Debug, Clone, Copy)]
struct Estimator<'a> {
    net: &'a RoadNetwork,
    target: Option<Point>,
    /// meters per second
    speed: Option<f64>,
}

impl<'a> Estimator<'a> {
    fn new(net: &'a RoadNetwork, destination: NodeId) -> Self {
        let speed = net.max_speed_limit().map(|v| v / 3.6).filter(|v| *v > 0.0);
        Self { net, target: net.coordinates(destination), speed }
    }

    fn estimate(&self, node: NodeId) -> Cost {
        match (self.target, self.net.coordinates(node), self.speed) {
            (Some(target), Some(position), Some(speed)) => position.distance(&target) / speed,
            _ => 0.0,
        }
    }
}

/// Search the cheapest route on the map from `start`, entered through `in_section`, to the
/// centroid `destination`. Centroids are terminal. Returns `None` if the centroid is not
/// reachable.
pub fn astar(
    map: &StreetMap,
    net: &RoadNetwork,
    start: NodeId,
    in_section: SectionId,
    destination: NodeId,
) -> Option<HeuristicRoute> {
    let estimator = Estimator::new(net, destination);
    let start_state = State::Junction(start, in_section);
    let mut best: HashMap<State, Cost> = HashMap::new();
    let mut first_hops: HashMap<State, SectionId> = HashMap::new();
    let mut done: HashSet<State> = HashSet::new();
    let mut frontier: BinaryHeap<FrontierItem> = BinaryHeap::new();
    let mut order: usize = 0;

    best.insert(start_state, 0.0);
    frontier.push(FrontierItem {
        estimate: estimator.estimate(start),
        cost: 0.0,
        order,
        state: start_state,
    });

    while let Some(item) = frontier.pop() {
        if !done.insert(item.state) {
            continue;
        }
        let (junction, via) = match item.state {
            State::Centroid(c) if c == destination => {
                let first_hop = *first_hops.get(&item.state)?;
                return Some(HeuristicRoute { first_hop, cost: item.cost });
            }
            State::Centroid(_) => continue,
            State::Junction(j, s) => (j, s),
        };
        for link in map.links(junction, via) {
            let next = if net.is_centroid(link.target) {
                State::Centroid(link.target)
            } else {
                State::Junction(link.target, link.out_section)
            };
            let hop = if item.state == start_state {
                link.out_section
            } else {
                match first_hops.get(&item.state) {
                    Some(hop) => *hop,
                    None => continue,
                }
            };
            let cost = item.cost + link.cost;
            if best.get(&next).map(|known| cost < *known).unwrap_or(true) {
                best.insert(next, cost);
                first_hops.insert(next, hop);
                order += 1;
                frontier.push(FrontierItem {
                    estimate: cost + estimator.estimate(link.target),
                    cost,
                    order,
                    state: next,
                });
            }
        }
    }
    None
}

/// State of a heuristic agent
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeuristicState {
    map: Option<StreetMap>,
}

impl HeuristicState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Street map of the agent, once it is built
    pub fn map(&self) -> Option<&StreetMap> {
        self.map.as_ref()
    }

    pub(crate) fn perform(&mut self, core: &mut AgentCore, ctx: &RoutingContext) {
        core.process_local_destinations(ctx);
        let node = core.node();
        let map = self.map.get_or_insert_with(|| StreetMap::from_network(ctx.net));

        for in_section in core.in_sections() {
            let outs: Vec<SectionId> =
                map.links(node, in_section).iter().map(|l| l.out_section).collect();
            for out_section in outs {
                let turning = core.turning_cost(ctx, in_section, out_section);
                let link = core.link_cost(ctx, out_section);
                if is_valid_cost(turning) && is_valid_cost(link) {
                    map.set_cost(node, in_section, out_section, turning + link);
                }
            }
        }

        let centroids = ctx.net.centroids();
        for in_section in core.in_sections() {
            for destination in centroids.iter() {
                if let Some(route) = astar(map, ctx.net, node, in_section, *destination) {
                    if let Some(table) = core.table_mut(in_section) {
                        table.update(*destination, route.first_hop, route.cost);
                    }
                }
            }
        }
        debug!("{:?} computed its heuristic routes", node);
    }
}
