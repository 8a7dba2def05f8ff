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

//! # Routing tables
//!
//! Every agent owns one routing table per incoming section. A table maps each known destination to
//! the outgoing section (next hop) and the expected travel time. Entries are only ever improved:
//! an update replaces an entry if the destination was not known before, or if the new cost is
//! lower by more than [`COST_EPSILON`].

use crate::netsim::{is_valid_cost, Cost, NodeId, SectionId, COST_EPSILON};

use log::*;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

/// Entry of a routing table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteEntry<D = NodeId> {
    /// Destination of the route (a centroid, or a region)
    pub destination: D,
    /// Outgoing section to take at this junction
    pub next_hop: SectionId,
    /// Expected travel time to the destination, in seconds
    pub cost: Cost,
}

/// Routing table of one incoming section at a junction. The destination type is usually a
/// centroid, but the regional distance-vector agents also keep tables with regions as
/// destinations.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingTable<D: Ord + Copy + Debug = NodeId> {
    in_section: SectionId,
    entries: BTreeMap<D, RouteEntry<D>>,
    local: BTreeSet<D>,
}

impl<D: Ord + Copy + Debug> RoutingTable<D> {
    /// Create an empty routing table for the given incoming section
    pub fn new(in_section: SectionId) -> Self {
        Self { in_section, entries: BTreeMap::new(), local: BTreeSet::new() }
    }

    /// Incoming section for which this table is valid
    pub fn in_section(&self) -> SectionId {
        self.in_section
    }

    /// Remove all entries
    pub fn reset(&mut self) {
        self.entries.clear();
        self.local.clear();
    }

    /// Update the route to `destination`. The entry is replaced only if the destination was
    /// unknown, or if the new cost is lower than the known one by more than [`COST_EPSILON`].
    /// Invalid costs are ignored. Returns `true` if the table has changed.
    pub fn update(&mut self, destination: D, next_hop: SectionId, cost: Cost) -> bool {
        if !is_valid_cost(cost) {
            trace!("Ignore invalid cost {} for {:?}", cost, destination);
            return false;
        }
        match self.entries.get(&destination) {
            Some(known) if cost >= known.cost - COST_EPSILON => false,
            _ => {
                self.entries.insert(destination, RouteEntry { destination, next_hop, cost });
                true
            }
        }
    }

    /// Update the route to a destination that is directly reachable from this junction. The
    /// destination is remembered as local, even if a better route was already known. Returns
    /// `true` if the table has changed.
    pub fn update_local(&mut self, destination: D, next_hop: SectionId, cost: Cost) -> bool {
        if !is_valid_cost(cost) {
            return false;
        }
        self.local.insert(destination);
        self.update(destination, next_hop, cost)
    }

    /// Insert the route only if the destination is not yet known. Returns `true` if the entry
    /// was inserted.
    pub fn insert_if_absent(&mut self, destination: D, next_hop: SectionId, cost: Cost) -> bool {
        if self.entries.contains_key(&destination) {
            false
        } else {
            self.update(destination, next_hop, cost)
        }
    }

    /// Returns the entry for the destination, if there is a route
    pub fn get(&self, destination: D) -> Option<&RouteEntry<D>> {
        self.entries.get(&destination)
    }

    /// Returns the next hop towards the destination, if there is a route
    pub fn next_hop(&self, destination: D) -> Option<SectionId> {
        self.get(destination).map(|e| e.next_hop)
    }

    /// Returns the expected travel time to the destination, if there is a route
    pub fn cost(&self, destination: D) -> Option<Cost> {
        self.get(destination).map(|e| e.cost)
    }

    /// Returns true if the destination is directly reachable from this junction
    pub fn is_local(&self, destination: D) -> bool {
        self.local.contains(&destination)
    }

    /// Iterate over all known destinations
    pub fn destinations(&self) -> impl Iterator<Item = D> + '_ {
        self.entries.keys().copied()
    }

    /// Iterate over all directly reachable destinations that have a route
    pub fn local_destinations(&self) -> impl Iterator<Item = D> + '_ {
        self.local.iter().copied().filter(move |d| self.entries.contains_key(d))
    }

    /// Iterate over all entries, ordered by destination
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry<D>> {
        self.entries.values()
    }

    /// Number of known destinations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no destination is known
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
