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

//! # Regional cooperation
//!
//! Agents of the regional protocols split their neighbours into interior neighbours (same
//! region) and border neighbours (other region). Every agent first proposes a role for each of
//! its neighbours, either from the region mapping or from the static costs. The proposals are
//! then negotiated with a three-message handshake: an agent sends `Ask(role)` to the neighbour,
//! which answers with `Ack(role)` if it has proposed the same role for the sender, and with
//! `Reject(role)` otherwise. A link that is rejected is not used by the regional protocol.
//!
//! An agent with at least one accepted border neighbour is a border agent.

use crate::config::Classification;
use crate::netsim::{NodeId, RegionId};
use crate::routing::agent::{AgentCore, RoutingContext};
use crate::routing::message::{Message, MessageQueue};

use log::*;
use std::collections::BTreeSet;

/// Role of a neighbour, or of the agent itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionalRole {
    /// Same region
    Interior,
    /// Different region
    Border,
}

/// Message of the cooperation handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooperationKind {
    /// Ask the neighbour to cooperate with the given role
    Ask,
    /// Accept the cooperation
    Ack,
    /// Reject the cooperation
    Reject,
}

/// Regional state of an agent
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalState {
    region: RegionId,
    role: RegionalRole,
    interior: BTreeSet<NodeId>,
    border: BTreeSet<NodeId>,
    proposed_interior: BTreeSet<NodeId>,
    proposed_border: BTreeSet<NodeId>,
}

impl Default for RegionalState {
    fn default() -> Self {
        Self {
            region: crate::netsim::region::DEFAULT_REGION,
            role: RegionalRole::Interior,
            interior: BTreeSet::new(),
            border: BTreeSet::new(),
            proposed_interior: BTreeSet::new(),
            proposed_border: BTreeSet::new(),
        }
    }
}

impl RegionalState {
    /// Region of the agent
    pub fn region(&self) -> RegionId {
        self.region
    }

    /// Role of the agent
    pub fn role(&self) -> RegionalRole {
        self.role
    }

    /// Accepted interior neighbours
    pub fn interior_neighbours(&self) -> &BTreeSet<NodeId> {
        &self.interior
    }

    /// Accepted border neighbours
    pub fn border_neighbours(&self) -> &BTreeSet<NodeId> {
        &self.border
    }

    /// Returns the accepted role of the neighbour, or `None` if the neighbour does not cooperate.
    pub fn neighbour_role(&self, neighbour: NodeId) -> Option<RegionalRole> {
        if self.interior.contains(&neighbour) {
            Some(RegionalRole::Interior)
        } else if self.border.contains(&neighbour) {
            Some(RegionalRole::Border)
        } else {
            None
        }
    }

    fn proposed(&self, role: RegionalRole) -> &BTreeSet<NodeId> {
        match role {
            RegionalRole::Interior => &self.proposed_interior,
            RegionalRole::Border => &self.proposed_border,
        }
    }

    fn accepted_mut(&mut self, role: RegionalRole) -> &mut BTreeSet<NodeId> {
        match role {
            RegionalRole::Interior => &mut self.interior,
            RegionalRole::Border => &mut self.border,
        }
    }
}

impl AgentCore {
    /// Propose a role for every neighbour. Must be called after the neighbours are discovered.
    pub(crate) fn propose_cooperations(&mut self, ctx: &RoutingContext) {
        let region = ctx.regions.region_of(self.node());
        let mut interior = BTreeSet::new();
        let mut border = BTreeSet::new();
        match ctx.config.classification(self.protocol()) {
            Classification::RegionMap => {
                for n in self.neighbours() {
                    if ctx.regions.region_of(*n) == region {
                        interior.insert(*n);
                    } else {
                        border.insert(*n);
                    }
                }
            }
            Classification::CostThreshold => {
                let costs = self.costs_to_neighbours();
                if !costs.is_empty() {
                    let average = costs.values().sum::<f64>() / costs.len() as f64;
                    let threshold = average * ctx.config.regional.threshold_factor;
                    for (n, cost) in costs {
                        if *cost < threshold {
                            interior.insert(*n);
                        } else {
                            border.insert(*n);
                        }
                    }
                } else {
                    warn!("{:?} has no static costs to its neighbours", self.node());
                }
            }
        }
        let regional = self.regional_mut();
        regional.region = region;
        regional.proposed_interior = interior;
        regional.proposed_border = border;
    }

    /// Ask every proposed neighbour to cooperate, unless the cooperation is already established.
    pub(crate) fn ask_cooperations(&self, queue: &mut MessageQueue) {
        let node = self.node();
        let regional = self.regional();
        for role in [RegionalRole::Interior, RegionalRole::Border].iter().copied() {
            let to_ask = regional
                .proposed(role)
                .iter()
                .filter(|n| regional.neighbour_role(**n).is_none())
                .copied();
            for n in to_ask {
                queue.push_back(Message::Cooperation {
                    from: node,
                    to: n,
                    role,
                    kind: CooperationKind::Ask,
                });
            }
        }
    }

    /// Handle a message of the cooperation handshake
    pub(crate) fn handle_cooperation(
        &mut self,
        from: NodeId,
        role: RegionalRole,
        kind: CooperationKind,
        queue: &mut MessageQueue,
    ) {
        let node = self.node();
        let regional = self.regional_mut();
        match kind {
            CooperationKind::Ask => {
                let reply = if regional.proposed(role).contains(&from) {
                    regional.accepted_mut(role).insert(from);
                    CooperationKind::Ack
                } else {
                    CooperationKind::Reject
                };
                queue.push_back(Message::Cooperation { from: node, to: from, role, kind: reply });
            }
            CooperationKind::Ack => {
                regional.accepted_mut(role).insert(from);
            }
            CooperationKind::Reject => {
                debug!("{:?} rejected the cooperation as {:?} with {:?}", from, role, node);
            }
        }
    }

    /// Determine the role of the agent, once the handshake is complete.
    pub(crate) fn finish_cooperations(&mut self) {
        let regional = self.regional_mut();
        regional.role =
            if regional.border.is_empty() { RegionalRole::Interior } else { RegionalRole::Border };
        trace!(
            "role {:?}, interior: {:?}, border: {:?}",
            regional.role,
            regional.interior,
            regional.border
        );
    }
}
