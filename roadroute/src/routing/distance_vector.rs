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

//! # Distance-vector protocol
//!
//! Every agent enters its directly reachable centroids into its tables, and sends them to the
//! neighbours upstream of each incoming section. A neighbour adds the cost of its own turning and
//! of the section towards the sender, and keeps the route if it improves its table. Every
//! improvement is passed on to the next agents upstream. The propagation terminates, since costs
//! are only ever improved.
//!
//! The temporal variant does not send costs, but the forecasted costs of every hop to the
//! destination. The receiver then evaluates every hop at the time when a vehicle, starting now,
//! would actually reach it.
//!
//! The regional variant restricts the propagation of local information to the interior
//! neighbours. Border agents pass every improvement across the region boundary, where it is
//! propagated to all cooperating neighbours. Additionally, border agents enter the neighbouring
//! regions into separate region tables, which are propagated in the same way.

use crate::netsim::{are_costs_valid, is_valid_cost, NodeId, RegionId, SectionId};
use crate::routing::agent::{AgentCore, RoutingContext};
use crate::routing::forecast::path_travel_time;
use crate::routing::message::{
    DistanceVectorUpdate, Message, MessageQueue, Payload, RegionUpdate, Scope,
};
use crate::routing::regional::RegionalRole;
use crate::routing::table::RoutingTable;
use crate::routing::ProtocolType;

use log::*;
use std::collections::BTreeMap;

/// State of a distance-vector agent
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceVectorState {
    temporal: bool,
    regional: bool,
    region_tables: BTreeMap<SectionId, RoutingTable<RegionId>>,
}

impl DistanceVectorState {
    pub(crate) fn new(protocol: ProtocolType) -> Self {
        Self {
            temporal: protocol.is_temporal(),
            regional: protocol.is_regional(),
            region_tables: BTreeMap::new(),
        }
    }

    /// Tables with regions as destinations, for each incoming section. Only regional agents
    /// have such tables.
    pub fn region_tables(&self) -> impl Iterator<Item = &RoutingTable<RegionId>> {
        self.region_tables.values()
    }

    /// Region table of an incoming section
    pub fn region_table(&self, in_section: SectionId) -> Option<&RoutingTable<RegionId>> {
        self.region_tables.get(&in_section)
    }

    pub(crate) fn reset(&mut self) {
        self.region_tables.values_mut().for_each(|t| t.reset());
    }

    /// Scope of updates sent to the neighbour
    fn scope_towards(&self, core: &AgentCore, neighbour: NodeId) -> Option<Scope> {
        if !self.regional {
            return Some(Scope::Flat);
        }
        match core.regional().neighbour_role(neighbour) {
            Some(RegionalRole::Interior) => Some(Scope::Interior),
            Some(RegionalRole::Border) => Some(Scope::Border),
            None => None,
        }
    }

    /// Scope with which an update received with `scope` is passed on to the neighbour.
    fn forward_scope(&self, core: &AgentCore, scope: Scope, neighbour: NodeId) -> Option<Scope> {
        match (scope, self.scope_towards(core, neighbour)?) {
            (Scope::Flat, _) => Some(Scope::Flat),
            (Scope::Interior, Scope::Interior) => Some(Scope::Interior),
            (_, _) => Some(Scope::Border),
        }
    }

    pub(crate) fn perform(
        &mut self,
        core: &mut AgentCore,
        ctx: &RoutingContext,
        queue: &mut MessageQueue,
    ) {
        core.process_local_destinations(ctx);
        let node = core.node();
        for neighbour in core.peers() {
            let scope = match self.scope_towards(core, neighbour) {
                Some(scope) => scope,
                None => continue,
            };
            for via in core.in_sections_from(neighbour) {
                let table = match core.table(via) {
                    Some(t) => t,
                    None => continue,
                };
                for destination in table.local_destinations() {
                    let entry = match table.get(destination) {
                        Some(e) => e,
                        None => continue,
                    };
                    let direct = core.local_destination(entry.next_hop) == Some(destination);
                    let hop = if self.temporal && direct {
                        core.forecast_hop(ctx, via, entry.next_hop)
                    } else {
                        None
                    };
                    let payload = match hop {
                        Some(hop) => Payload::Path(vec![hop]),
                        None => Payload::Cost(entry.cost),
                    };
                    queue.push_back(Message::DistanceVector(DistanceVectorUpdate {
                        from: node,
                        to: neighbour,
                        via,
                        destination,
                        scope,
                        payload,
                    }));
                }
            }
        }

        if self.regional && core.regional().role() == RegionalRole::Border {
            self.process_border_neighbours(core, ctx);
            self.send_local_regions(core, queue);
        }
    }

    /// Handle an update from the neighbour at the end of `update.via`.
    pub(crate) fn handle_update(
        &mut self,
        core: &mut AgentCore,
        ctx: &RoutingContext,
        update: DistanceVectorUpdate,
        queue: &mut MessageQueue,
    ) {
        if !core.is_peer(update.from) || !core.out_sections_to(update.from).contains(&update.via)
        {
            trace!("{:?} ignores update from {:?}", core.node(), update.from);
            return;
        }
        let out_section = update.via;
        let link = core.link_cost(ctx, out_section);
        for in_section in core.in_sections() {
            let (total, payload) = match &update.payload {
                Payload::Cost(cost) => {
                    let turning = core.turning_cost(ctx, in_section, out_section);
                    if !are_costs_valid(&[turning, link, *cost]) {
                        continue;
                    }
                    let total = turning + link + cost;
                    (total, Payload::Cost(total))
                }
                Payload::Path(path) => {
                    if !is_valid_cost(core.turning_cost(ctx, in_section, out_section)) {
                        continue;
                    }
                    let hop = match core.forecast_hop(ctx, in_section, out_section) {
                        Some(hop) => hop,
                        None => continue,
                    };
                    let mut path = path.clone();
                    path.push(hop);
                    (path_travel_time(&path), Payload::Path(path))
                }
            };
            let changed = core
                .table_mut(in_section)
                .map(|t| t.update(update.destination, out_section, total))
                .unwrap_or(false);
            if !changed {
                continue;
            }
            if let Some(predecessor) = core.predecessor(in_section) {
                if let Some(scope) = self.forward_scope(core, update.scope, predecessor) {
                    queue.push_back(Message::DistanceVector(DistanceVectorUpdate {
                        from: core.node(),
                        to: predecessor,
                        via: in_section,
                        destination: update.destination,
                        scope,
                        payload,
                    }));
                }
            }
        }
    }

    /// Enter all regions of the border neighbours as local destinations into the region tables.
    fn process_border_neighbours(&mut self, core: &AgentCore, ctx: &RoutingContext) {
        let own_region = core.regional().region();
        for neighbour in core.regional().border_neighbours().iter() {
            let region = ctx.regions.region_of(*neighbour);
            if region == own_region {
                continue;
            }
            for out_section in core.out_sections_to(*neighbour) {
                let link = core.link_cost(ctx, *out_section);
                for in_section in core.in_sections() {
                    let turning = core.turning_cost(ctx, in_section, *out_section);
                    if !are_costs_valid(&[turning, link]) {
                        continue;
                    }
                    self.region_tables
                        .entry(in_section)
                        .or_insert_with(|| RoutingTable::new(in_section))
                        .update_local(region, *out_section, turning + link);
                }
            }
        }
    }

    /// Send the directly reachable regions to all cooperating neighbours.
    fn send_local_regions(&self, core: &AgentCore, queue: &mut MessageQueue) {
        for neighbour in core.peers() {
            for via in core.in_sections_from(neighbour) {
                let table = match self.region_tables.get(&via) {
                    Some(t) => t,
                    None => continue,
                };
                for region in table.local_destinations() {
                    if let Some(cost) = table.cost(region) {
                        queue.push_back(Message::Region(RegionUpdate {
                            from: core.node(),
                            to: neighbour,
                            via,
                            region,
                            cost,
                        }));
                    }
                }
            }
        }
    }

    /// Handle a region update from the neighbour at the end of `update.via`. Updates about the
    /// own region are ignored.
    pub(crate) fn handle_region_update(
        &mut self,
        core: &mut AgentCore,
        ctx: &RoutingContext,
        update: RegionUpdate,
        queue: &mut MessageQueue,
    ) {
        if update.region == core.regional().region()
            || !core.is_peer(update.from)
            || !core.out_sections_to(update.from).contains(&update.via)
        {
            return;
        }
        let out_section = update.via;
        let link = core.link_cost(ctx, out_section);
        for in_section in core.in_sections() {
            let turning = core.turning_cost(ctx, in_section, out_section);
            if !are_costs_valid(&[turning, link, update.cost]) {
                continue;
            }
            let total = turning + link + update.cost;
            let changed = self
                .region_tables
                .entry(in_section)
                .or_insert_with(|| RoutingTable::new(in_section))
                .update(update.region, out_section, total);
            if !changed {
                continue;
            }
            if let Some(predecessor) = core.predecessor(in_section) {
                if core.is_peer(predecessor) {
                    queue.push_back(Message::Region(RegionUpdate {
                        from: core.node(),
                        to: predecessor,
                        via: in_section,
                        region: update.region,
                        cost: total,
                    }));
                }
            }
        }
    }

    /// Enter a route to every centroid of a foreign region that has no route yet, following the
    /// route to its region.
    pub(crate) fn translate_regions_to_centroids(
        &self,
        core: &mut AgentCore,
        ctx: &RoutingContext,
    ) {
        let own_region = core.regional().region();
        for (in_section, region_table) in self.region_tables.iter() {
            let table = match core.table_mut(*in_section) {
                Some(t) => t,
                None => continue,
            };
            for entry in region_table.entries() {
                if entry.destination == own_region {
                    continue;
                }
                for centroid in ctx.regions.centroids_in(ctx.net, entry.destination) {
                    if table.insert_if_absent(centroid, entry.next_hop, entry.cost) {
                        trace!("{:?} routes to {:?} through its region", in_section, centroid);
                    }
                }
            }
        }
    }
}
