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

//! Module containing the protocol state of a link-state agent

use crate::netsim::{are_costs_valid, NodeId, SectionId};
use crate::routing::agent::{AgentCore, RoutingContext};
use crate::routing::link_state::database::{
    Advertisement, DatabaseEntry, Target, TopologyDatabase,
};
use crate::routing::link_state::dijkstra::shortest_paths;
use crate::routing::message::{Message, MessageQueue, Scope};
use crate::routing::regional::RegionalRole;
use crate::routing::ProtocolType;

use log::*;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// Phases of the regional link-state protocol, executed by all agents in this order after the
/// interior flood. The messages of each phase must be delivered before the next phase starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionalPhase {
    /// Border agents compute the shortest paths through their region.
    InteriorRoutes,
    /// Border agents flood their summarized paths to all other border agents.
    DistributeBorder,
    /// Border agents compute the routes to the foreign regions.
    BorderRoutes,
    /// Border agents inject the foreign destinations into their region.
    DistributeVirtual,
    /// Interior agents compute all routes.
    FinalRoutes,
}

impl RegionalPhase {
    /// All phases in the order of execution
    pub fn all() -> [RegionalPhase; 5] {
        [
            RegionalPhase::InteriorRoutes,
            RegionalPhase::DistributeBorder,
            RegionalPhase::BorderRoutes,
            RegionalPhase::DistributeVirtual,
            RegionalPhase::FinalRoutes,
        ]
    }
}

/// State of a link-state agent
#[derive(Debug, Clone, PartialEq)]
pub struct LinkStateState {
    temporal: bool,
    regional: bool,
    /// never reset, such that every advertisement is newer than all previous ones
    sequence_counter: u32,
    /// newest sequence number seen from each origin, kept across rounds
    last_seen: BTreeMap<NodeId, u32>,
    database: TopologyDatabase,
    border_database: TopologyDatabase,
    /// summarized entries of a border agent, computed from the interior database
    border_entries: Vec<DatabaseEntry>,
    /// border agents of the own region
    border_agents: BTreeSet<NodeId>,
}

impl LinkStateState {
    pub(crate) fn new(protocol: ProtocolType) -> Self {
        Self {
            temporal: protocol.is_temporal(),
            regional: protocol.is_regional(),
            sequence_counter: 0,
            last_seen: BTreeMap::new(),
            database: TopologyDatabase::new(),
            border_database: TopologyDatabase::new(),
            border_entries: Vec::new(),
            border_agents: BTreeSet::new(),
        }
    }

    /// Topology database (for regional agents, the database of the own region)
    pub fn database(&self) -> &TopologyDatabase {
        &self.database
    }

    /// Database of the summarized paths between border agents. Only border agents fill it.
    pub fn border_database(&self) -> &TopologyDatabase {
        &self.border_database
    }

    /// Number of origins of which an advertisement was accepted
    pub fn num_sequence_entries(&self) -> usize {
        self.last_seen.len()
    }

    /// Newest sequence number accepted from the origin
    pub fn last_seen(&self, origin: NodeId) -> Option<u32> {
        self.last_seen.get(&origin).copied()
    }

    pub(crate) fn reset(&mut self) {
        self.database.clear();
        self.border_database.clear();
        self.border_entries.clear();
        self.border_agents.clear();
    }

    /// Returns true if the advertisement is newer than everything seen from its origin, and
    /// remembers its sequence number.
    fn accept(&mut self, advertisement: &Advertisement) -> bool {
        match self.last_seen.get(&advertisement.origin()) {
            Some(seen) if *seen >= advertisement.sequence_number() => false,
            _ => {
                self.last_seen.insert(advertisement.origin(), advertisement.sequence_number());
                true
            }
        }
    }

    fn next_advertisement(
        &mut self,
        core: &AgentCore,
        entries: Vec<DatabaseEntry>,
    ) -> Rc<Advertisement> {
        self.sequence_counter += 1;
        let role = if self.regional { core.regional().role() } else { RegionalRole::Interior };
        let advertisement =
            Rc::new(Advertisement::new(core.node(), self.sequence_counter, role, entries));
        self.accept(&advertisement);
        advertisement
    }

    /// Neighbours that take part in a flood with the given scope
    fn flood_targets(&self, core: &AgentCore, scope: Scope) -> Vec<NodeId> {
        match scope {
            Scope::Flat | Scope::Border => core.peers(),
            Scope::Interior => core.regional().interior_neighbours().iter().copied().collect(),
        }
    }

    fn flood(
        &self,
        core: &AgentCore,
        scope: Scope,
        except: Option<NodeId>,
        advertisements: Vec<Rc<Advertisement>>,
        queue: &mut MessageQueue,
    ) {
        if advertisements.is_empty() {
            return;
        }
        for to in self.flood_targets(core, scope) {
            if Some(to) == except {
                continue;
            }
            queue.push_back(Message::Flood {
                from: core.node(),
                to,
                scope,
                advertisements: advertisements.clone(),
            });
        }
    }

    /// Entry for the turning from `in_section` to `out_section`, if its cost is known.
    fn turning_entry(
        &self,
        core: &AgentCore,
        ctx: &RoutingContext,
        target: Target,
        in_section: SectionId,
        out_section: SectionId,
    ) -> Option<DatabaseEntry> {
        let turning = core.turning_cost(ctx, in_section, out_section);
        let link = core.link_cost(ctx, out_section);
        if !are_costs_valid(&[turning, link]) {
            return None;
        }
        let mut entry =
            DatabaseEntry::new(core.node(), target, in_section, out_section, turning + link);
        if self.temporal {
            entry.profile = core.forecast_hop(ctx, in_section, out_section).map(|mut hop| {
                hop.turning.compress(ctx.config.forecast.merge_threshold);
                hop.section.compress(ctx.config.forecast.merge_threshold);
                hop
            });
        }
        Some(entry)
    }

    /// Entries for all turnings towards the given neighbours and towards all local sinks.
    fn local_entries(
        &self,
        core: &AgentCore,
        ctx: &RoutingContext,
        neighbours: &[NodeId],
    ) -> Vec<DatabaseEntry> {
        let mut targets: Vec<(Target, SectionId)> = Vec::new();
        for n in neighbours {
            for out in core.out_sections_to(*n) {
                targets.push((Target::Agent(*n), *out));
            }
        }
        for out in ctx.net.out_sections(core.node()) {
            if let Some(sink) = core.local_destination(out) {
                targets.push((Target::Sink(sink), out));
            }
        }
        let mut entries = Vec::new();
        for in_section in core.in_sections() {
            for (target, out) in targets.iter() {
                if let Some(e) = self.turning_entry(core, ctx, *target, in_section, *out) {
                    entries.push(e);
                }
            }
        }
        entries
    }

    /// Determine the local advertisement and start the flood. For the regional protocols, only
    /// the interior neighbours are advertised and flooded to.
    pub(crate) fn perform(
        &mut self,
        core: &mut AgentCore,
        ctx: &RoutingContext,
        queue: &mut MessageQueue,
    ) {
        core.process_local_destinations(ctx);
        let (scope, neighbours): (Scope, Vec<NodeId>) = if self.regional {
            (Scope::Interior, core.regional().interior_neighbours().iter().copied().collect())
        } else {
            (Scope::Flat, core.peers())
        };
        let entries = self.local_entries(core, ctx, &neighbours);
        let advertisement = self.next_advertisement(core, entries);
        trace!(
            "{:?} advertises {} entries (seq {})",
            core.node(),
            advertisement.entries().len(),
            advertisement.sequence_number()
        );
        self.database.add_advertisement(&advertisement);
        self.flood(core, scope, None, vec![advertisement], queue);
    }

    /// Handle a flood message. New advertisements are stored and forwarded to all neighbours of
    /// the same scope, except the sender.
    pub(crate) fn receive(
        &mut self,
        core: &mut AgentCore,
        _ctx: &RoutingContext,
        from: NodeId,
        scope: Scope,
        advertisements: Vec<Rc<Advertisement>>,
        queue: &mut MessageQueue,
    ) {
        let mut fresh = Vec::with_capacity(advertisements.len());
        for advertisement in advertisements {
            if !self.accept(&advertisement) {
                trace!(
                    "{:?} drops stale advertisement of {:?}",
                    core.node(),
                    advertisement.origin()
                );
                continue;
            }
            match scope {
                Scope::Flat => self.database.add_advertisement(&advertisement),
                Scope::Interior => {
                    if advertisement.origin_role() == RegionalRole::Border {
                        self.border_agents.insert(advertisement.origin());
                    }
                    self.database.add_advertisement(&advertisement)
                }
                Scope::Border => {
                    if core.regional().role() == RegionalRole::Border {
                        self.border_database.add_advertisement(&advertisement)
                    }
                }
            }
            fresh.push(advertisement);
        }
        self.flood(core, scope, Some(from), fresh, queue);
    }

    /// Compute the routes of all tables from the database.
    pub(crate) fn compute_routes(&mut self, core: &mut AgentCore, _ctx: &RoutingContext) {
        Self::routes_from(&self.database, core, false);
    }

    /// Run Dijkstra for every incoming section, and enter the routes to all sinks into the
    /// tables.
    fn routes_from(db: &TopologyDatabase, core: &mut AgentCore, exhaustive: bool) -> usize {
        let node = core.node();
        let mut num_routes = 0;
        for in_section in core.in_sections() {
            let paths = shortest_paths(db, node, in_section, exhaustive);
            if let Some(table) = core.table_mut(in_section) {
                for (sink, route) in paths.sinks.iter() {
                    table.update(*sink, route.first_hop, route.cost);
                    num_routes += 1;
                }
            }
        }
        num_routes
    }

    /// Execute a phase of the regional protocol
    pub(crate) fn run_phase(
        &mut self,
        core: &mut AgentCore,
        ctx: &RoutingContext,
        phase: RegionalPhase,
        queue: &mut MessageQueue,
    ) {
        if !self.regional {
            return;
        }
        let is_border = core.regional().role() == RegionalRole::Border;
        match phase {
            RegionalPhase::InteriorRoutes if is_border => self.compute_interior_routes(core, ctx),
            RegionalPhase::DistributeBorder if is_border => {
                self.distribute_border(core, ctx, queue)
            }
            RegionalPhase::BorderRoutes if is_border => self.compute_border_routes(core),
            RegionalPhase::DistributeVirtual if is_border => {
                self.distribute_virtual_interior(core, queue)
            }
            RegionalPhase::FinalRoutes if !is_border => self.compute_routes(core, ctx),
            _ => {}
        }
    }

    /// Compute the shortest paths through the region for every incoming section, and summarize
    /// them as entries to the sinks and to the other border agents of the region.
    fn compute_interior_routes(&mut self, core: &mut AgentCore, ctx: &RoutingContext) {
        let node = core.node();
        let mut entries = Vec::new();
        for in_section in core.in_sections() {
            let paths = shortest_paths(&self.database, node, in_section, true);
            if let Some(table) = core.table_mut(in_section) {
                for (sink, route) in paths.sinks.iter() {
                    table.update(*sink, route.first_hop, route.cost);
                }
            }
            for (sink, route) in paths.sinks.iter() {
                let mut entry = DatabaseEntry::new(
                    node,
                    Target::Sink(*sink),
                    in_section,
                    route.first_hop,
                    route.cost,
                );
                entry.real_out_section = Some(route.first_hop);
                entries.push(entry);
            }
            for (agent, route) in paths.agents.iter() {
                // loops back to the agent itself are needed to turn around inside the region
                if *agent != node && !self.border_agents.contains(agent) {
                    continue;
                }
                let mut entry = DatabaseEntry::new(
                    node,
                    Target::Agent(*agent),
                    in_section,
                    route.entered_via,
                    route.cost,
                );
                entry.real_out_section = Some(route.first_hop);
                entries.push(entry);
            }
        }
        let border: Vec<NodeId> = core.regional().border_neighbours().iter().copied().collect();
        entries.extend(
            self.local_entries(core, ctx, &border)
                .into_iter()
                .filter(|e| matches!(e.target, Target::Agent(_))),
        );
        debug!("{:?} summarizes its region in {} entries", node, entries.len());
        self.border_entries = entries;
    }

    /// Flood the summarized entries to all border agents
    fn distribute_border(
        &mut self,
        core: &mut AgentCore,
        _ctx: &RoutingContext,
        queue: &mut MessageQueue,
    ) {
        let entries = std::mem::take(&mut self.border_entries);
        let advertisement = self.next_advertisement(core, entries);
        self.border_database.add_advertisement(&advertisement);
        self.flood(core, Scope::Border, None, vec![advertisement], queue);
    }

    fn compute_border_routes(&mut self, core: &mut AgentCore) {
        let num_routes = Self::routes_from(&self.border_database, core, false);
        trace!("{:?} knows {} routes across its region", core.node(), num_routes);
    }

    /// Advertise the routes to all sinks outside the own region to the interior neighbours.
    fn distribute_virtual_interior(&mut self, core: &mut AgentCore, queue: &mut MessageQueue) {
        let interior_sinks = self.database.sinks();
        let foreign: Vec<NodeId> = self
            .border_database
            .sinks()
            .into_iter()
            .filter(|s| !interior_sinks.contains(s))
            .collect();
        let node = core.node();
        let mut entries = Vec::new();
        for table in core.tables() {
            for sink in foreign.iter() {
                if let Some(route) = table.get(*sink) {
                    entries.push(DatabaseEntry::new(
                        node,
                        Target::Sink(*sink),
                        table.in_section(),
                        route.next_hop,
                        route.cost,
                    ));
                }
            }
        }
        let advertisement = self.next_advertisement(core, entries);
        self.database.add_advertisement(&advertisement);
        self.flood(core, Scope::Interior, None, vec![advertisement], queue);
    }
}
