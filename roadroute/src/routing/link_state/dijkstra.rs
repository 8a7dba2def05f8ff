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

//! # Shortest path computation
//!
//! Dijkstra's algorithm on a [`TopologyDatabase`]. Since the cost of leaving an agent depends on
//! the section through which it was entered (turnings), the search operates on pairs of agent
//! and incoming section. Sinks are terminal.
//!
//! The frontier is ordered by the accumulated cost. Entries with the same cost are popped in the
//! order in which they were pushed, which makes the chosen next hops reproducible on ties.

use crate::netsim::{is_valid_cost, Cost, NodeId, SectionId};
use crate::routing::link_state::database::{DatabaseEntry, Target, TopologyDatabase};

use log::*;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet};

/// Best route from the start to a sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    /// Total travel time
    pub cost: Cost,
    /// Section to take at the start
    pub first_hop: SectionId,
}

/// Best route from the start to another agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentRoute {
    /// Total travel time
    pub cost: Cost,
    /// Section to take at the start
    pub first_hop: SectionId,
    /// Section through which the agent is entered
    pub entered_via: SectionId,
}

/// Result of the shortest path computation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortestPaths {
    /// Best route to each reached sink
    pub sinks: BTreeMap<NodeId, Route>,
    /// Best route to each reached agent. The start agent is only contained if it is re-entered
    /// through another section than the one the search started from.
    pub agents: BTreeMap<NodeId, AgentRoute>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum State {
    Agent(NodeId, SectionId),
    Sink(NodeId),
}

#[derive(Debug, Clone, Copy)]
struct FrontierItem {
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
    // reversed, such that the max-heap pops the cheapest (and then oldest) item
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for FrontierItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute the shortest paths from agent `start`, entered through `in_section`, to all sinks in
/// the database. The search stops as soon as all sinks are settled, unless `exhaustive` is set.
/// In that case, all reachable agents are settled as well.
pub fn shortest_paths(
    db: &TopologyDatabase,
    start: NodeId,
    in_section: SectionId,
    exhaustive: bool,
) -> ShortestPaths {
    let start_state = State::Agent(start, in_section);
    let mut outstanding: BTreeSet<NodeId> = db.sinks();
    let mut best: HashMap<State, Cost> = HashMap::new();
    let mut predecessors: HashMap<State, (State, &DatabaseEntry)> = HashMap::new();
    let mut settled: Vec<(State, Cost)> = Vec::new();
    let mut done: HashSet<State> = HashSet::new();
    let mut frontier: BinaryHeap<FrontierItem> = BinaryHeap::new();
    let mut order: usize = 0;

    best.insert(start_state, 0.0);
    frontier.push(FrontierItem { cost: 0.0, order, state: start_state });

    while let Some(item) = frontier.pop() {
        if !done.insert(item.state) {
            // already settled with a lower cost
            continue;
        }
        settled.push((item.state, item.cost));
        match item.state {
            State::Sink(sink) => {
                outstanding.remove(&sink);
                if outstanding.is_empty() && !exhaustive {
                    break;
                }
            }
            State::Agent(agent, via) => {
                for entry in db.entries_from(agent, via) {
                    let step = entry.cost_at(item.cost);
                    if !is_valid_cost(step) {
                        continue;
                    }
                    let next = match entry.target {
                        Target::Agent(a) => State::Agent(a, entry.out_section),
                        Target::Sink(s) => State::Sink(s),
                    };
                    let cost = item.cost + step;
                    if best.get(&next).map(|known| cost < *known).unwrap_or(true) {
                        best.insert(next, cost);
                        predecessors.insert(next, (item.state, entry));
                        order += 1;
                        frontier.push(FrontierItem { cost, order, state: next });
                    }
                }
            }
        }
    }

    let first_hop = |mut state: State| -> Option<SectionId> {
        loop {
            let (prev, entry) = predecessors.get(&state)?;
            if *prev == start_state {
                return Some(entry.first_hop());
            }
            state = *prev;
        }
    };

    let mut result = ShortestPaths::default();
    for (state, cost) in settled {
        match state {
            State::Sink(sink) => {
                if let Some(hop) = first_hop(state) {
                    result.sinks.insert(sink, Route { cost, first_hop: hop });
                }
            }
            State::Agent(agent, via) if agent != start || via != in_section => {
                if result.agents.get(&agent).map(|r| cost < r.cost).unwrap_or(true) {
                    if let Some(hop) = first_hop(state) {
                        result
                            .agents
                            .insert(agent, AgentRoute { cost, first_hop: hop, entered_via: via });
                    }
                }
            }
            State::Agent(_, _) => {}
        }
    }
    trace!(
        "Dijkstra from {:?} via {:?}: {} sinks, {} agents",
        start,
        in_section,
        result.sinks.len(),
        result.agents.len()
    );
    result
}
