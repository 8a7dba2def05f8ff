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

//! # Greedy routing
//!
//! The agent splits the plane around its junction into as many equal sectors as the junction has
//! outgoing sections. Every section towards a neighbouring junction, and every centroid that is
//! not directly reachable, is placed into the sector(s) containing its direction. A node exactly
//! on the boundary belongs to both sectors. For each incoming section and each sector, the
//! outgoing section with the cheapest local cost (turning and section) is chosen as next hop for
//! all centroids of the sector.
//!
//! Agents do not communicate. The routes are fast to compute, but neither optimal nor complete:
//! centroids in a sector without a usable section are not reachable, and the cost of a route is
//! only the local cost of the first hop.

use crate::netsim::{is_valid_cost, Cost, NodeId, SectionId, INVALID_COST};
use crate::routing::agent::{AgentCore, RoutingContext};

use log::*;
use std::collections::BTreeSet;
use std::f64::consts::PI;

/// Range of directions, seen from the junction of the agent
#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    /// Smallest angle of the sector
    pub start: f64,
    /// Largest angle of the sector
    pub end: f64,
    /// Outgoing sections towards junctions in this direction
    pub out_sections: Vec<SectionId>,
    /// Centroids in this direction
    pub centroids: Vec<NodeId>,
}

impl Sector {
    /// Returns true if the direction (in `[0, 2 pi)`) lies in the sector, including its
    /// boundaries. The direction `0` also lies at the end of the last sector.
    pub fn contains(&self, angle: f64) -> bool {
        (self.start <= angle && angle <= self.end)
            || (angle == 0.0 && (self.end - 2.0 * PI).abs() < 1e-9)
    }
}

/// State of a greedy agent
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GreedyState {
    sectors: Option<Vec<Sector>>,
}

impl GreedyState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sectors of the junction, or `None` if they could not be determined yet (since the position
    /// of the junction is unknown).
    pub fn sectors(&self) -> Option<&[Sector]> {
        self.sectors.as_deref()
    }

    pub(crate) fn perform(&mut self, core: &mut AgentCore, ctx: &RoutingContext) {
        core.process_local_destinations(ctx);
        if self.sectors.is_none() {
            self.sectors = build_sectors(core, ctx);
        }
        let sectors = match self.sectors.as_ref() {
            Some(sectors) => sectors,
            None => return,
        };
        for in_section in core.in_sections() {
            for sector in sectors.iter().filter(|s| !s.centroids.is_empty()) {
                let best = sector
                    .out_sections
                    .iter()
                    .map(|out| (*out, local_cost(core, ctx, in_section, *out)))
                    .filter(|(_, cost)| is_valid_cost(*cost))
                    .fold(None, |best: Option<(SectionId, Cost)>, (out, cost)| match best {
                        Some((_, known)) if known <= cost => best,
                        _ => Some((out, cost)),
                    });
                let (out_section, cost) = match best {
                    Some(best) => best,
                    None => continue,
                };
                if let Some(table) = core.table_mut(in_section) {
                    for centroid in sector.centroids.iter() {
                        table.update(*centroid, out_section, cost);
                    }
                }
            }
        }
    }
}

/// Cost of the turning from `in_section` to `out_section` and of the outgoing section.
fn local_cost(
    core: &AgentCore,
    ctx: &RoutingContext,
    in_section: SectionId,
    out_section: SectionId,
) -> Cost {
    let turning = core.turning_cost(ctx, in_section, out_section);
    let link = core.link_cost(ctx, out_section);
    if is_valid_cost(turning) && is_valid_cost(link) {
        turning + link
    } else {
        INVALID_COST
    }
}

/// Split the plane around the junction into sectors, and sort the neighbouring junctions and the
/// remote centroids into them.
fn build_sectors(core: &AgentCore, ctx: &RoutingContext) -> Option<Vec<Sector>> {
    let node = core.node();
    let origin = match ctx.net.coordinates(node) {
        Some(p) => p,
        None => {
            warn!("{:?} has no position, greedy routing is not possible", node);
            return None;
        }
    };
    let out_sections = ctx.net.out_sections(node);
    let size = 2.0 * PI / out_sections.len().max(1) as f64;
    let mut sectors: Vec<Sector> = (0..out_sections.len())
        .map(|i| Sector {
            start: i as f64 * size,
            end: (i + 1) as f64 * size,
            out_sections: Vec::new(),
            centroids: Vec::new(),
        })
        .collect();

    let mut local: BTreeSet<NodeId> = BTreeSet::new();
    for out_section in out_sections.iter() {
        if let Some(centroid) = core.local_destination(*out_section) {
            local.insert(centroid);
            continue;
        }
        let target = match ctx.net.section(*out_section) {
            Ok(s) if ctx.net.is_junction(s.to) => s.to,
            _ => continue,
        };
        match ctx.net.coordinates(target) {
            Some(p) => {
                let angle = origin.angle_to(&p);
                for sector in sectors.iter_mut().filter(|s| s.contains(angle)) {
                    sector.out_sections.push(*out_section);
                }
            }
            None => debug!("{:?}: the neighbour {:?} has no position", node, target),
        }
    }

    for centroid in ctx.net.centroids().into_iter().filter(|c| !local.contains(c)) {
        if let Some(p) = ctx.net.coordinates(centroid) {
            let angle = origin.angle_to(&p);
            for sector in sectors.iter_mut().filter(|s| s.contains(angle)) {
                sector.centroids.push(centroid);
            }
        }
    }
    trace!("{:?}: sectors {:?}", node, sectors);
    Some(sectors)
}
