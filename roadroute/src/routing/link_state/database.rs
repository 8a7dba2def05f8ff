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

//! # Topology database
//!
//! The unit of information exchanged by the link-state agents is the [`Advertisement`]. It
//! contains all [`DatabaseEntry`] of one origin agent, and is tagged with a sequence number. Every
//! agent collects the advertisements of all other agents in its own [`TopologyDatabase`].

use crate::netsim::{Cost, NodeId, SectionId};
use crate::routing::forecast::ForecastHop;
use crate::routing::regional::RegionalRole;

use std::collections::{BTreeMap, BTreeSet};

/// Target of a database entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    /// Another routing agent, bound to the junction at the end of the outgoing section
    Agent(NodeId),
    /// Centroid, where the traffic leaves the network
    Sink(NodeId),
}

/// Cost of going from the `source` agent (entered through `in_section`) to the `target`, leaving
/// through `out_section`.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseEntry {
    /// Agent that advertised the entry
    pub source: NodeId,
    /// Agent or sink that is reached
    pub target: Target,
    /// Section through which the source is entered
    pub in_section: SectionId,
    /// Section through which the target is entered
    pub out_section: SectionId,
    /// Travel time in seconds
    pub cost: Cost,
    /// Sequence number of the advertisement that contained the entry
    pub sequence_number: u32,
    /// First section to take at the source, if the entry summarizes a longer path. In this case,
    /// `out_section` is the section entering the target.
    pub real_out_section: Option<SectionId>,
    /// Forecasted costs, used by the temporal protocols
    pub profile: Option<ForecastHop>,
}

impl DatabaseEntry {
    /// Create a new entry without forecast and without summarized path.
    pub fn new(
        source: NodeId,
        target: Target,
        in_section: SectionId,
        out_section: SectionId,
        cost: Cost,
    ) -> Self {
        Self {
            source,
            target,
            in_section,
            out_section,
            cost,
            sequence_number: 0,
            real_out_section: None,
            profile: None,
        }
    }

    /// Cost of the entry if it is used `elapsed` seconds from now. Without forecast, this is the
    /// current cost.
    pub fn cost_at(&self, elapsed: f64) -> Cost {
        match self.profile.as_ref() {
            Some(profile) => profile.cost_at(elapsed),
            None => self.cost,
        }
    }

    /// Section which the source must take to follow this entry.
    pub fn first_hop(&self) -> SectionId {
        self.real_out_section.unwrap_or(self.out_section)
    }
}

/// Set of entries of one origin agent, tagged with a sequence number
#[derive(Debug, Clone, PartialEq)]
pub struct Advertisement {
    origin: NodeId,
    sequence_number: u32,
    origin_role: RegionalRole,
    entries: Vec<DatabaseEntry>,
}

impl Advertisement {
    /// Create a new advertisement. All entries are tagged with the sequence number.
    pub fn new(
        origin: NodeId,
        sequence_number: u32,
        origin_role: RegionalRole,
        entries: Vec<DatabaseEntry>,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| DatabaseEntry { sequence_number, ..e })
            .collect();
        Self { origin, sequence_number, origin_role, entries }
    }

    /// Agent that created the advertisement
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    /// Sequence number of the advertisement
    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    /// Role of the agent that created the advertisement
    pub fn origin_role(&self) -> RegionalRole {
        self.origin_role
    }

    /// Entries of the advertisement
    pub fn entries(&self) -> &[DatabaseEntry] {
        &self.entries
    }
}

/// Knowledge of one agent about the costs between all known agents and sinks. Entries are
/// indexed by source agent and incoming section, such that the shortest path computation can
/// expand an agent depending on the section through which it was entered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopologyDatabase {
    entries: BTreeMap<(NodeId, SectionId), BTreeMap<Target, DatabaseEntry>>,
}

impl TopologyDatabase {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.clear()
    }

    /// Add all entries of the advertisement
    pub fn add_advertisement(&mut self, advertisement: &Advertisement) {
        for entry in advertisement.entries() {
            self.add_entry(entry.clone());
        }
    }

    /// Add an entry. An existing entry for the same source, target and incoming section is
    /// replaced, unless its sequence number is newer. Returns `true` if the entry was stored.
    pub fn add_entry(&mut self, entry: DatabaseEntry) -> bool {
        let targets = self.entries.entry((entry.source, entry.in_section)).or_default();
        match targets.get(&entry.target) {
            Some(known) if known.sequence_number > entry.sequence_number => false,
            _ => {
                targets.insert(entry.target, entry);
                true
            }
        }
    }

    /// Iterate over all entries of the `source` agent, when it is entered through `in_section`.
    pub fn entries_from(
        &self,
        source: NodeId,
        in_section: SectionId,
    ) -> impl Iterator<Item = &DatabaseEntry> {
        self.entries.get(&(source, in_section)).into_iter().flat_map(|t| t.values())
    }

    /// Iterate over all entries
    pub fn entries(&self) -> impl Iterator<Item = &DatabaseEntry> {
        self.entries.values().flat_map(|t| t.values())
    }

    /// Returns all sinks that are known in the database
    pub fn sinks(&self) -> BTreeSet<NodeId> {
        self.entries()
            .filter_map(|e| match e.target {
                Target::Sink(s) => Some(s),
                Target::Agent(_) => None,
            })
            .collect()
    }

    /// Returns all agents that have advertised entries
    pub fn agents(&self) -> BTreeSet<NodeId> {
        self.entries.keys().map(|(source, _)| *source).collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.values().map(|t| t.len()).sum()
    }

    /// Returns true if the database has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(|t| t.is_empty())
    }
}
