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

use super::helpers::*;
use crate::example_networks::*;
use crate::routing::greedy::Sector;
use crate::routing::{ProtocolState, ProtocolType};

use maplit::btreeset;
use std::collections::BTreeSet;
use std::f64::consts::PI;

#[test]
fn test_diamond() {
    let o = converged::<DiamondNet>(ProtocolType::Greedy);
    // J2 points more towards C4 than J3, and is cheaper to reach
    assert_route(&o, ("J1", "C1"), "C4", "J2", 15.0);
    assert_route(&o, ("J1", "J2"), "C4", "J3", 25.0);
    assert_route(&o, ("J1", "J3"), "C4", "J2", 15.0);
    assert_route(&o, ("J4", "C4"), "C1", "J3", 15.0);
    assert_route(&o, ("J2", "J1"), "C4", "J4", 45.0);
    assert_route(&o, ("J2", "J1"), "C1", "J4", 45.0);
    assert_route(&o, ("J1", "J2"), "C1", "C1", 15.0);
    assert_eq!(o.num_messages(), 0);
}

#[test]
fn test_sectors() {
    let o = converged::<DiamondNet>(ProtocolType::Greedy);
    let net = o.network();
    let sectors = match o.agent(node(net, "J1")).unwrap().state() {
        ProtocolState::Greedy(greedy) => greedy.sectors().unwrap().to_vec(),
        _ => panic!("Unexpected protocol state"),
    };
    assert_eq!(sectors.len(), 3);
    let outs = |s: &Sector| s.out_sections.iter().copied().collect::<BTreeSet<_>>();
    // J3 lies exactly on the boundary between the last and the first sector
    assert_eq!(outs(&sectors[0]), btreeset! {section(net, "J1", "J2"), section(net, "J1", "J3")});
    assert!(sectors[1].out_sections.is_empty());
    assert_eq!(outs(&sectors[2]), btreeset! {section(net, "J1", "J3")});
    // C1 is reached directly, and therefore in no sector
    assert_eq!(sectors[0].centroids, vec![node(net, "C4")]);
    assert!(sectors[1].centroids.is_empty());
    assert_eq!(sectors[2].centroids, vec![node(net, "C4")]);
}

#[test]
fn test_sector_bounds() {
    let sector = Sector {
        start: 4.0 * PI / 3.0,
        end: 2.0 * PI,
        out_sections: Vec::new(),
        centroids: Vec::new(),
    };
    assert!(sector.contains(0.0));
    assert!(sector.contains(4.0 * PI / 3.0));
    assert!(sector.contains(1.9 * PI));
    assert!(!sector.contains(PI));
    let first = Sector { start: 0.0, end: 2.0 * PI / 3.0, ..sector.clone() };
    assert!(first.contains(0.0));
    assert!(first.contains(2.0 * PI / 3.0));
    assert!(!first.contains(1.9 * PI));
}

#[test]
fn test_local_measurements() {
    let mut o = converged::<DiamondNet>(ProtocolType::Greedy);
    let j1j2 = section(o.network(), "J1", "J2");
    // the section J1 -> J2 now takes 30 seconds
    o.network_mut().add_disturbance(j1j2, 2.0).unwrap();
    o.run_round();
    assert_route(&o, ("J1", "C1"), "C4", "J3", 25.0);
    o.network_mut().clear_disturbances(j1j2).unwrap();
    o.run_round();
    assert_route(&o, ("J1", "C1"), "C4", "J2", 15.0);
}

#[test]
fn test_without_positions() {
    let o = converged::<TriangleNet>(ProtocolType::Greedy);
    let net = o.network();
    // only the directly attached centroids are known
    assert_route(&o, ("J1", "J2"), "C1", "C1", 15.0);
    assert!(o.route(node(net, "J1"), section(net, "C1", "J1"), node(net, "C2")).is_none());
    for agent in o.agents() {
        for table in agent.tables() {
            assert!(table.len() <= 1);
        }
        match agent.state() {
            ProtocolState::Greedy(greedy) => assert!(greedy.sectors().is_none()),
            _ => panic!("Unexpected protocol state"),
        }
    }
}
