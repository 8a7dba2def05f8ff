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

//! # Routing agent
//!
//! A routing agent is bound to a junction. It owns one routing table per incoming section, knows
//! its neighbour agents (agents of the same protocol on adjacent junctions), and estimates the
//! travel time of its turnings and outgoing sections. The shared state lives in [`AgentCore`],
//! while the protocol specific state is kept in a [`ProtocolState`].
//!
//! Agents never reference each other. All communication happens through [`Message`]s, which are
//! put on a [`MessageQueue`] and delivered by the
//! [`RoutingOrchestrator`](crate::routing::RoutingOrchestrator).

use crate::config::{DelayMethod, RoutingConfig};
use crate::netsim::traffic::is_valid_flow;
use crate::netsim::{
    is_valid_cost, Cost, NodeId, RegionId, RegionMap, RoadNetwork, SectionId, INVALID_COST,
};
use crate::routing::distance_vector::DistanceVectorState;
use crate::routing::forecast::{ForecastHop, ForecastProfile};
use crate::routing::greedy::GreedyState;
use crate::routing::heuristic::HeuristicState;
use crate::routing::link_state::{LinkStateState, RegionalPhase};
use crate::routing::message::{Message, MessageQueue};
use crate::routing::regional::{RegionalRole, RegionalState};
use crate::routing::table::{RouteEntry, RoutingTable};
use crate::routing::ProtocolType;

use log::*;
use std::collections::{BTreeMap, BTreeSet};

/// Everything an agent may read while it executes the protocol. The context is created by the
/// orchestrator for every round.
#[derive(Debug, Clone, Copy)]
pub struct RoutingContext<'a> {
    /// Road network with the current measurements
    pub net: &'a RoadNetwork,
    /// Routing configuration
    pub config: &'a RoutingConfig,
    /// Region membership of all nodes
    pub regions: &'a RegionMap,
    /// Protocol of every bound agent
    pub peers: &'a BTreeMap<NodeId, ProtocolType>,
}

/// State shared by all protocol variants
#[derive(Debug, Clone, PartialEq)]
pub struct AgentCore {
    node: NodeId,
    protocol: ProtocolType,
    tables: BTreeMap<SectionId, RoutingTable>,
    neighbours: BTreeSet<NodeId>,
    /// agent at the start of each incoming section
    predecessors: BTreeMap<SectionId, NodeId>,
    /// sections leading to each neighbour
    out_sections: BTreeMap<NodeId, Vec<SectionId>>,
    /// outgoing sections that end at a centroid
    local_destinations: BTreeMap<SectionId, NodeId>,
    cost_to_neighbour: BTreeMap<NodeId, Cost>,
    discovered: bool,
    regional: RegionalState,
}

impl AgentCore {
    fn new(node: NodeId, protocol: ProtocolType, net: &RoadNetwork) -> Self {
        let tables =
            net.in_sections(node).into_iter().map(|s| (s, RoutingTable::new(s))).collect();
        let local_destinations = net
            .out_sections(node)
            .into_iter()
            .filter_map(|s| net.section(s).ok().map(|sec| (s, sec.to)))
            .filter(|(_, to)| net.is_centroid(*to))
            .collect();
        Self {
            node,
            protocol,
            tables,
            neighbours: BTreeSet::new(),
            predecessors: BTreeMap::new(),
            out_sections: BTreeMap::new(),
            local_destinations,
            cost_to_neighbour: BTreeMap::new(),
            discovered: false,
            regional: RegionalState::default(),
        }
    }

    /// Find all neighbour agents running the same protocol, and their static costs.
    fn discover_neighbours(&mut self, ctx: &RoutingContext) {
        let protocol = self.protocol;
        let same_protocol = |n: &NodeId| ctx.peers.get(n) == Some(&protocol);
        for s in ctx.net.out_sections(self.node) {
            if let Ok(section) = ctx.net.section(s) {
                if section.to != self.node && same_protocol(&section.to) {
                    self.out_sections.entry(section.to).or_insert_with(Vec::new).push(s);
                }
            }
        }
        for s in ctx.net.in_sections(self.node) {
            if let Ok(section) = ctx.net.section(s) {
                if section.from != self.node && same_protocol(&section.from) {
                    self.predecessors.insert(s, section.from);
                }
            }
        }
        self.neighbours =
            self.out_sections.keys().chain(self.predecessors.values()).copied().collect();
        for n in self.neighbours.iter() {
            match ctx.net.offset(self.node, *n) {
                Some(cost) => {
                    self.cost_to_neighbour.insert(*n, cost);
                }
                None => trace!("No static cost from {:?} to {:?}", self.node, n),
            }
        }
        self.discovered = true;
        debug!("{:?} has {} neighbour agents", self.node, self.neighbours.len());
    }

    /// Junction of the agent
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Protocol of the agent
    pub fn protocol(&self) -> ProtocolType {
        self.protocol
    }

    /// All neighbour agents with the same protocol
    pub fn neighbours(&self) -> &BTreeSet<NodeId> {
        &self.neighbours
    }

    /// Static costs to the neighbours, where known
    pub fn costs_to_neighbours(&self) -> &BTreeMap<NodeId, Cost> {
        &self.cost_to_neighbour
    }

    /// Regional state (role, region, and accepted neighbours)
    pub fn regional(&self) -> &RegionalState {
        &self.regional
    }

    pub(crate) fn regional_mut(&mut self) -> &mut RegionalState {
        &mut self.regional
    }

    /// Neighbours which take part in the protocol. For regional protocols, these are the accepted
    /// interior and border neighbours, otherwise all neighbours.
    pub(crate) fn peers(&self) -> Vec<NodeId> {
        if self.protocol.is_regional() {
            self.neighbours
                .iter()
                .filter(|n| self.regional.neighbour_role(**n).is_some())
                .copied()
                .collect()
        } else {
            self.neighbours.iter().copied().collect()
        }
    }

    /// Returns true if the neighbour takes part in the protocol
    pub(crate) fn is_peer(&self, node: NodeId) -> bool {
        if self.protocol.is_regional() {
            self.regional.neighbour_role(node).is_some()
        } else {
            self.neighbours.contains(&node)
        }
    }

    /// Agent at the start of the incoming section, if there is one
    pub(crate) fn predecessor(&self, in_section: SectionId) -> Option<NodeId> {
        self.predecessors.get(&in_section).copied()
    }

    /// Incoming sections that start at the given neighbour
    pub(crate) fn in_sections_from(&self, neighbour: NodeId) -> Vec<SectionId> {
        self.predecessors.iter().filter(|(_, n)| **n == neighbour).map(|(s, _)| *s).collect()
    }

    /// Outgoing sections that end at the given neighbour
    pub(crate) fn out_sections_to(&self, neighbour: NodeId) -> &[SectionId] {
        self.out_sections.get(&neighbour).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Centroid at the end of the outgoing section, if the section leaves the network
    pub(crate) fn local_destination(&self, out_section: SectionId) -> Option<NodeId> {
        self.local_destinations.get(&out_section).copied()
    }

    /// All incoming sections (one table each)
    pub(crate) fn in_sections(&self) -> Vec<SectionId> {
        self.tables.keys().copied().collect()
    }

    /// All routing tables, ordered by incoming section
    pub fn tables(&self) -> impl Iterator<Item = &RoutingTable> {
        self.tables.values()
    }

    /// Routing table of the incoming section
    pub fn table(&self, in_section: SectionId) -> Option<&RoutingTable> {
        self.tables.get(&in_section)
    }

    pub(crate) fn table_mut(&mut self, in_section: SectionId) -> Option<&mut RoutingTable> {
        self.tables.get_mut(&in_section)
    }

    /// Clear all tables, and discover the neighbours on the first call.
    fn reset(&mut self, ctx: &RoutingContext) {
        if !self.discovered {
            self.discover_neighbours(ctx);
        }
        self.tables.values_mut().for_each(|t| t.reset());
    }

    /// Current cost of the turning from `in_section` to `out_section`. Returns an invalid cost if
    /// the turning does not exist or no measurement is available.
    pub fn turning_cost(
        &self,
        ctx: &RoutingContext,
        in_section: SectionId,
        out_section: SectionId,
    ) -> Cost {
        let turning = match ctx.net.turning(in_section, out_section) {
            Some(t) => t,
            None => return INVALID_COST,
        };
        match ctx.config.delay_method {
            DelayMethod::Webster => {
                let cycle = match ctx.net.junction(self.node) {
                    Ok(j) => j.cycle,
                    Err(_) => return INVALID_COST,
                };
                match turning.flow {
                    Some(flow) => turning.delay_for_flow(flow, cycle),
                    None => INVALID_COST,
                }
            }
            DelayMethod::Statistics => turning.measured_delay.unwrap_or(INVALID_COST),
        }
    }

    /// Current cost of an outgoing section. Uses the measured flow if possible, and falls back to
    /// the static offset to the node at the end of the section.
    pub fn link_cost(&self, ctx: &RoutingContext, out_section: SectionId) -> Cost {
        let section = match ctx.net.section(out_section) {
            Ok(s) => s,
            Err(_) => return INVALID_COST,
        };
        let delay = section.current_delay();
        if is_valid_cost(delay) {
            delay
        } else {
            ctx.net.offset(self.node, section.to).unwrap_or(INVALID_COST)
        }
    }

    /// Forecasted cost of the turning `seconds` into the future. Falls back to the current cost.
    pub fn turning_forecast(
        &self,
        ctx: &RoutingContext,
        seconds: f64,
        in_section: SectionId,
        out_section: SectionId,
    ) -> Cost {
        if seconds <= 0.0 {
            return self.turning_cost(ctx, in_section, out_section);
        }
        let forecast = ctx
            .net
            .turning(in_section, out_section)
            .and_then(|t| t.forecast.as_ref().map(|f| (t, f.value_at(seconds))));
        match (forecast, ctx.net.junction(self.node)) {
            (Some((turning, flow)), Ok(junction)) if is_valid_flow(flow) => {
                let cost = turning.delay_for_flow(flow, junction.cycle);
                if is_valid_cost(cost) {
                    cost
                } else {
                    self.turning_cost(ctx, in_section, out_section)
                }
            }
            _ => self.turning_cost(ctx, in_section, out_section),
        }
    }

    /// Forecasted cost of the outgoing section `seconds` into the future. Falls back to the
    /// current cost.
    pub fn section_forecast(
        &self,
        ctx: &RoutingContext,
        seconds: f64,
        out_section: SectionId,
    ) -> Cost {
        let forecast = match ctx.net.section(out_section) {
            Ok(s) if seconds > 0.0 => s.forecast_delay(seconds),
            Ok(_) => INVALID_COST,
            Err(_) => return INVALID_COST,
        };
        if is_valid_cost(forecast) {
            forecast
        } else {
            self.link_cost(ctx, out_section)
        }
    }

    /// Sample the forecasted costs of a turning and its outgoing section. Returns `None` if any
    /// sample is invalid.
    pub fn forecast_hop(
        &self,
        ctx: &RoutingContext,
        in_section: SectionId,
        out_section: SectionId,
    ) -> Option<ForecastHop> {
        let horizon = ctx.config.forecast.horizon;
        let step = ctx.config.forecast.step;
        let turning = ForecastProfile::sample(horizon, step, |t| {
            self.turning_forecast(ctx, t, in_section, out_section)
        })?;
        let section =
            ForecastProfile::sample(horizon, step, |t| self.section_forecast(ctx, t, out_section))?;
        Some(ForecastHop { turning, section })
    }

    /// Enter all centroids that are directly reachable from this junction into the tables.
    pub fn process_local_destinations(&mut self, ctx: &RoutingContext) {
        let local: Vec<(SectionId, NodeId)> =
            self.local_destinations.iter().map(|(s, c)| (*s, *c)).collect();
        for (out_section, centroid) in local {
            let link = self.link_cost(ctx, out_section);
            if !is_valid_cost(link) {
                trace!("{:?}: no cost for the section to {:?}", self.node, centroid);
                continue;
            }
            for in_section in self.in_sections() {
                let turning = self.turning_cost(ctx, in_section, out_section);
                if !is_valid_cost(turning) {
                    continue;
                }
                if let Some(table) = self.tables.get_mut(&in_section) {
                    table.update_local(centroid, out_section, turning + link);
                }
            }
        }
    }
}

/// Protocol specific state of an agent
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolState {
    /// Flat, temporal and regional distance-vector
    DistanceVector(DistanceVectorState),
    /// Flat, temporal and regional link-state
    LinkState(LinkStateState),
    /// Greedy choice by direction
    Greedy(GreedyState),
    /// Local A* on a static street map
    Heuristic(HeuristicState),
}

/// Routing agent, bound to a junction
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingAgent {
    core: AgentCore,
    state: ProtocolState,
}

impl RoutingAgent {
    /// Create a new agent for the junction. `protocol` must not be [`ProtocolType::None`].
    pub fn new(node: NodeId, protocol: ProtocolType, net: &RoadNetwork) -> Self {
        let state = match protocol {
            ProtocolType::Greedy => ProtocolState::Greedy(GreedyState::new()),
            ProtocolType::Heuristic => ProtocolState::Heuristic(HeuristicState::new()),
            p if p.is_link_state() => ProtocolState::LinkState(LinkStateState::new(p)),
            p => ProtocolState::DistanceVector(DistanceVectorState::new(p)),
        };
        Self { core: AgentCore::new(node, protocol, net), state }
    }

    /// Junction of the agent
    pub fn node(&self) -> NodeId {
        self.core.node
    }

    /// Protocol of the agent
    pub fn protocol(&self) -> ProtocolType {
        self.core.protocol
    }

    /// Shared state of the agent
    pub fn core(&self) -> &AgentCore {
        &self.core
    }

    /// Protocol specific state of the agent
    pub fn state(&self) -> &ProtocolState {
        &self.state
    }

    /// Role of the agent (only meaningful for regional protocols)
    pub fn role(&self) -> RegionalRole {
        self.core.regional.role()
    }

    /// Region of the agent (only meaningful for regional protocols)
    pub fn region(&self) -> RegionId {
        self.core.regional.region()
    }

    /// Routing table of the incoming section
    pub fn table(&self, in_section: SectionId) -> Option<&RoutingTable> {
        self.core.table(in_section)
    }

    /// All routing tables, ordered by incoming section
    pub fn tables(&self) -> impl Iterator<Item = &RoutingTable> {
        self.core.tables()
    }

    /// Route towards the destination for vehicles arriving through `in_section`, or `None` if
    /// there is no route.
    pub fn route(&self, in_section: SectionId, destination: NodeId) -> Option<RouteEntry> {
        self.core.table(in_section).and_then(|t| t.get(destination)).copied()
    }

    /// Clear all routing data. On the first call, the neighbour agents are discovered.
    pub fn reset_routing_data(&mut self, ctx: &RoutingContext) {
        self.core.reset(ctx);
        match &mut self.state {
            ProtocolState::DistanceVector(dv) => dv.reset(),
            ProtocolState::LinkState(ls) => ls.reset(),
            ProtocolState::Greedy(_) | ProtocolState::Heuristic(_) => {}
        }
    }

    /// Start the protocol on this agent. All messages to other agents are put on the queue. For
    /// the regional link-state protocols, this only starts the interior flood. The remaining
    /// phases are driven by the orchestrator.
    pub fn perform_protocol(&mut self, ctx: &RoutingContext, queue: &mut MessageQueue) {
        let core = &mut self.core;
        match &mut self.state {
            ProtocolState::DistanceVector(dv) => dv.perform(core, ctx, queue),
            ProtocolState::LinkState(ls) => ls.perform(core, ctx, queue),
            ProtocolState::Greedy(greedy) => greedy.perform(core, ctx),
            ProtocolState::Heuristic(heuristic) => heuristic.perform(core, ctx),
        }
    }

    /// Finish the protocol after all messages triggered by [`Self::perform_protocol`] are
    /// delivered. Link-state agents compute their routes here, and regional distance-vector
    /// agents translate their region routes into routes to centroids.
    pub fn finish_protocol(&mut self, ctx: &RoutingContext) {
        let core = &mut self.core;
        match &mut self.state {
            ProtocolState::LinkState(ls) if !core.protocol.is_regional() => {
                ls.compute_routes(core, ctx)
            }
            ProtocolState::DistanceVector(dv) if core.protocol.is_regional() => {
                dv.translate_regions_to_centroids(core, ctx)
            }
            _ => {}
        }
    }

    /// Execute a phase of the regional link-state protocol. Does nothing for all other
    /// protocols.
    pub(crate) fn run_regional_phase(
        &mut self,
        ctx: &RoutingContext,
        phase: RegionalPhase,
        queue: &mut MessageQueue,
    ) {
        let core = &mut self.core;
        if let ProtocolState::LinkState(ls) = &mut self.state {
            ls.run_phase(core, ctx, phase, queue)
        }
    }

    /// Number of origins from which a link-state advertisement was accepted. Always zero for
    /// all other agents.
    pub fn num_sequence_entries(&self) -> usize {
        match &self.state {
            ProtocolState::LinkState(ls) => ls.num_sequence_entries(),
            _ => 0,
        }
    }

    /// Handle a message from another agent.
    pub fn handle_message(
        &mut self,
        ctx: &RoutingContext,
        message: Message,
        queue: &mut MessageQueue,
    ) {
        if message.to() != self.core.node {
            warn!("{:?} received a message for {:?}", self.core.node, message.to());
            return;
        }
        let core = &mut self.core;
        match (message, &mut self.state) {
            (Message::Cooperation { from, role, kind, .. }, _) => {
                core.handle_cooperation(from, role, kind, queue)
            }
            (Message::DistanceVector(update), ProtocolState::DistanceVector(dv)) => {
                dv.handle_update(core, ctx, update, queue)
            }
            (Message::Region(update), ProtocolState::DistanceVector(dv)) => {
                dv.handle_region_update(core, ctx, update, queue)
            }
            (Message::Flood { from, scope, advertisements, .. }, ProtocolState::LinkState(ls)) => {
                ls.receive(core, ctx, from, scope, advertisements, queue)
            }
            (message, _) => {
                warn!("{:?} ignores unexpected message: {:?}", core.node, message)
            }
        }
    }

    /// Propose the regional roles of all neighbours
    pub(crate) fn propose_cooperations(&mut self, ctx: &RoutingContext) {
        self.core.propose_cooperations(ctx)
    }

    /// Start the cooperation handshake
    pub(crate) fn ask_cooperations(&mut self, queue: &mut MessageQueue) {
        self.core.ask_cooperations(queue)
    }

    /// Determine the role after the handshake
    pub(crate) fn finish_cooperations(&mut self) {
        self.core.finish_cooperations()
    }
}
