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

use crate::netsim::{NodeId, SectionId};
use crate::routing::link_state::{
    shortest_paths, Advertisement, AgentRoute, DatabaseEntry, Route, Target, TopologyDatabase,
};
use crate::routing::RegionalRole;

use lazy_static::lazy_static;

lazy_static! {
    static ref A: NodeId = 0.into();
    static ref B: NodeId = 1.into();
    static ref C: NodeId = 2.into();
    static ref D: NodeId = 3.into();
    static ref S: NodeId = 10.into();
    static ref IN_A: SectionId = 100.into();
    static ref AB: SectionId = 101.into();
    static ref AC: SectionId = 102.into();
    static ref BD: SectionId = 103.into();
    static ref CD: SectionId = 104.into();
    static ref DS: SectionId = 105.into();
    static ref BA: SectionId = 106.into();
    //         1        5
    //    +--- B --------+
    //    |              |
    // -> A              D --- S
    //    |              |  1
    //    +--- C --------+
    //         2        1
    static ref DB: TopologyDatabase = {
        let mut db = TopologyDatabase::new();
        db.add_entry(DatabaseEntry::new(*A, Target::Agent(*B), *IN_A, *AB, 1.0));
        db.add_entry(DatabaseEntry::new(*A, Target::Agent(*C), *IN_A, *AC, 2.0));
        db.add_entry(DatabaseEntry::new(*B, Target::Agent(*D), *AB, *BD, 5.0));
        db.add_entry(DatabaseEntry::new(*C, Target::Agent(*D), *AC, *CD, 1.0));
        db.add_entry(DatabaseEntry::new(*D, Target::Sink(*S), *CD, *DS, 1.0));
        db.add_entry(DatabaseEntry::new(*D, Target::Sink(*S), *BD, *DS, 1.0));
        db
    };
}

#[test]
fn test_shortest_path() {
    let paths = shortest_paths(&DB, *A, *IN_A, false);
    assert_eq!(paths.sinks.len(), 1);
    assert_eq!(paths.sinks[&*S], Route { cost: 4.0, first_hop: *AC });
    assert_eq!(paths.agents[&*B], AgentRoute { cost: 1.0, first_hop: *AB, entered_via: *AB });
    assert_eq!(paths.agents[&*C], AgentRoute { cost: 2.0, first_hop: *AC, entered_via: *AC });
    assert_eq!(paths.agents[&*D], AgentRoute { cost: 3.0, first_hop: *AC, entered_via: *CD });
    assert!(!paths.agents.contains_key(&*A));
}

#[test]
fn test_exhaustive() {
    let paths = shortest_paths(&DB, *A, *IN_A, true);
    assert_eq!(paths.sinks[&*S].cost, 4.0);
    // D is also reached through B, but with a higher cost
    assert_eq!(paths.agents[&*D].entered_via, *CD);
    assert_eq!(paths.agents.len(), 3);
}

#[test]
fn test_unknown_start() {
    // entering A through another section gives no entries to follow
    let paths = shortest_paths(&DB, *A, *AB, true);
    assert!(paths.sinks.is_empty());
    assert!(paths.agents.is_empty());

    let paths = shortest_paths(&TopologyDatabase::new(), *A, *IN_A, false);
    assert!(paths.sinks.is_empty());
}

#[test]
fn test_starting_at_sink_neighbour() {
    let paths = shortest_paths(&DB, *D, *BD, false);
    assert_eq!(paths.sinks[&*S], Route { cost: 1.0, first_hop: *DS });
    assert!(paths.agents.is_empty());
}

#[test]
fn test_tie_break() {
    let mut db = TopologyDatabase::new();
    db.add_entry(DatabaseEntry::new(*A, Target::Agent(*B), *IN_A, *AB, 1.0));
    db.add_entry(DatabaseEntry::new(*A, Target::Agent(*C), *IN_A, *AC, 1.0));
    db.add_entry(DatabaseEntry::new(*B, Target::Sink(*S), *AB, *DS, 1.0));
    db.add_entry(DatabaseEntry::new(*C, Target::Sink(*S), *AC, *DS, 1.0));
    for _ in 0..10 {
        let paths = shortest_paths(&db, *A, *IN_A, false);
        assert_eq!(paths.sinks[&*S], Route { cost: 2.0, first_hop: *AB });
    }
}

#[test]
fn test_summarized_entry() {
    let mut db = TopologyDatabase::new();
    let mut summary = DatabaseEntry::new(*A, Target::Agent(*D), *IN_A, *CD, 3.0);
    summary.real_out_section = Some(*AC);
    db.add_entry(summary);
    db.add_entry(DatabaseEntry::new(*D, Target::Sink(*S), *CD, *DS, 1.0));
    let paths = shortest_paths(&db, *A, *IN_A, false);
    assert_eq!(paths.sinks[&*S], Route { cost: 4.0, first_hop: *AC });
    assert_eq!(paths.agents[&*D], AgentRoute { cost: 3.0, first_hop: *AC, entered_via: *CD });
}

#[test]
fn test_return_to_start() {
    let mut db = TopologyDatabase::new();
    db.add_entry(DatabaseEntry::new(*A, Target::Agent(*B), *IN_A, *AB, 1.0));
    db.add_entry(DatabaseEntry::new(*B, Target::Agent(*A), *AB, *BA, 1.0));
    let paths = shortest_paths(&db, *A, *IN_A, true);
    assert_eq!(paths.agents[&*A], AgentRoute { cost: 2.0, first_hop: *AB, entered_via: *BA });
}

#[test]
fn test_supersede() {
    let mut db = TopologyDatabase::new();
    let entry = DatabaseEntry::new(*A, Target::Agent(*B), *IN_A, *AB, 1.0);
    assert!(db.add_entry(DatabaseEntry { sequence_number: 5, ..entry.clone() }));
    assert!(!db.add_entry(DatabaseEntry { sequence_number: 3, cost: 7.0, ..entry.clone() }));
    assert_eq!(db.entries().next().unwrap().cost, 1.0);
    assert!(db.add_entry(DatabaseEntry { sequence_number: 5, cost: 2.0, ..entry.clone() }));
    assert_eq!(db.entries().next().unwrap().cost, 2.0);
    assert_eq!(db.len(), 1);

    let advertisement = Advertisement::new(
        *B,
        6,
        RegionalRole::Interior,
        vec![DatabaseEntry::new(*B, Target::Sink(*S), *AB, *DS, 1.0)],
    );
    assert_eq!(advertisement.entries()[0].sequence_number, 6);
    db.add_advertisement(&advertisement);
    assert_eq!(db.len(), 2);
    assert_eq!(db.agents().into_iter().collect::<Vec<_>>(), vec![*A, *B]);
    assert_eq!(db.sinks().into_iter().collect::<Vec<_>>(), vec![*S]);
    assert_eq!(db.entries_from(*B, *AB).count(), 1);

    db.clear();
    assert!(db.is_empty());
}
