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

use crate::netsim::{NodeId, RegionId, SectionId, COST_EPSILON, INVALID_COST};
use crate::routing::{RouteEntry, RoutingTable};

#[test]
fn test_update_only_improves() {
    let c1: NodeId = 10.into();
    let s1: SectionId = 0.into();
    let s2: SectionId = 1.into();
    let s3: SectionId = 2.into();
    let mut table = RoutingTable::new(s1);
    assert_eq!(table.in_section(), s1);
    assert!(table.is_empty());

    assert!(table.update(c1, s2, 30.0));
    assert_eq!(table.get(c1), Some(&RouteEntry { destination: c1, next_hop: s2, cost: 30.0 }));

    // equal or worse costs are ignored
    assert!(!table.update(c1, s3, 30.0));
    assert!(!table.update(c1, s3, 40.0));
    assert_eq!(table.next_hop(c1), Some(s2));

    assert!(table.update(c1, s3, 20.0));
    assert_eq!(table.next_hop(c1), Some(s3));
    assert_eq!(table.cost(c1), Some(20.0));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_rounding_differences_are_ignored() {
    let c1: NodeId = 10.into();
    let s1: SectionId = 0.into();
    let s2: SectionId = 1.into();
    let s3: SectionId = 2.into();
    let mut table = RoutingTable::new(s1);
    let cost = 252.62053337007208;
    assert!(table.update(c1, s2, cost));

    // the same sum in a different order is one bit smaller
    let reordered = 252.62053337007205;
    assert!(reordered < cost);
    assert!(!table.update(c1, s3, reordered));
    assert!(!table.update(c1, s3, cost - COST_EPSILON / 2.0));
    assert_eq!(table.get(c1), Some(&RouteEntry { destination: c1, next_hop: s2, cost }));

    assert!(table.update(c1, s3, cost - 2.0 * COST_EPSILON));
    assert_eq!(table.next_hop(c1), Some(s3));
}

#[test]
fn test_invalid_costs() {
    let c1: NodeId = 10.into();
    let s1: SectionId = 0.into();
    let mut table = RoutingTable::new(s1);
    assert!(!table.update(c1, s1, INVALID_COST));
    assert!(!table.update(c1, s1, 0.0));
    assert!(!table.update(c1, s1, f64::NAN));
    assert!(!table.update(c1, s1, f64::INFINITY));
    assert!(!table.update_local(c1, s1, INVALID_COST));
    assert!(table.get(c1).is_none());
    assert!(!table.is_local(c1));
}

#[test]
fn test_local_destinations() {
    let c1: NodeId = 10.into();
    let c2: NodeId = 11.into();
    let s1: SectionId = 0.into();
    let s2: SectionId = 1.into();
    let mut table = RoutingTable::new(s1);

    assert!(table.update(c1, s2, 10.0));
    // local even if the known route is better
    assert!(!table.update_local(c1, s1, 15.0));
    assert!(table.is_local(c1));
    assert_eq!(table.next_hop(c1), Some(s2));

    assert!(table.update(c2, s2, 50.0));
    assert!(!table.is_local(c2));
    assert_eq!(table.local_destinations().collect::<Vec<_>>(), vec![c1]);
    assert_eq!(table.destinations().collect::<Vec<_>>(), vec![c1, c2]);

    table.reset();
    assert!(table.is_empty());
    assert!(!table.is_local(c1));
    assert_eq!(table.local_destinations().count(), 0);
}

#[test]
fn test_insert_if_absent() {
    let s1: SectionId = 0.into();
    let s2: SectionId = 1.into();
    let mut table: RoutingTable<RegionId> = RoutingTable::new(s1);
    assert!(table.insert_if_absent(RegionId(2), s1, 40.0));
    assert!(!table.insert_if_absent(RegionId(2), s2, 10.0));
    assert_eq!(table.next_hop(RegionId(2)), Some(s1));
    assert!(!table.insert_if_absent(RegionId(3), s1, INVALID_COST));
    assert_eq!(table.entries().count(), 1);
}
