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
use crate::config::RoutingConfig;
use crate::example_networks::*;
use crate::netsim::{webster_delay, RoadNetwork, SectionId};
use crate::routing::{ProtocolState, ProtocolType, RoutingOrchestrator};

use assert_approx_eq::assert_approx_eq;

#[test]
fn test_diamond() {
    let o = converged::<DiamondNet>(ProtocolType::DistanceVector);
    assert_route(&o, ("J1", "C1"), "C4", "J3", 55.0);
    assert_route(&o, ("J4", "C4"), "C1", "J3", 55.0);
    assert_route(&o, ("J2", "J1"), "C4", "J4", 60.0);
    assert_route(&o, ("J1", "J2"), "C4", "J3", 55.0);
    // U-turns are not allowed, so the long path must be taken
    assert_route(&o, ("J1", "J3"), "C4", "J2", 75.0);
    assert_route(&o, ("J1", "J2"), "C1", "C1", 15.0);
}

#[test]
fn test_triangle() {
    let o = converged::<TriangleNet>(ProtocolType::DistanceVector);
    assert_route(&o, ("J1", "C1"), "C2", "J2", 30.0);
    assert_route(&o, ("J1", "J2"), "C2", "J3", 45.0);
    assert_route(&o, ("J3", "J1"), "C2", "J2", 30.0);
    // every table knows every centroid
    for agent in o.agents() {
        for table in agent.tables() {
            assert_eq!(table.len(), 3);
        }
        match agent.state() {
            ProtocolState::DistanceVector(dv) => assert_eq!(dv.region_tables().count(), 0),
            _ => panic!("Unexpected protocol state"),
        }
    }
}

/// `C1 - J1 - J2 - C2`, without static offsets
fn line_network() -> (RoadNetwork, SectionId) {
    let mut net = RoadNetwork::new();
    let j1 = net.add_junction("J1");
    let j2 = net.add_junction("J2");
    let c1 = net.add_centroid("C1");
    let c2 = net.add_centroid("C2");
    for (a, b) in &[(c1, j1), (j1, c1), (j1, j2), (j2, j1), (j2, c2), (c2, j2)] {
        add_road(&mut net, *a, *b, 100.0).unwrap();
    }
    add_all_turnings(&mut net).unwrap();
    let j1j2 = net.find_section(j1, j2).unwrap();
    (net, j1j2)
}

#[test]
fn test_invalid_cost() {
    let protocols = [
        ProtocolType::DistanceVector,
        ProtocolType::LinkState,
        ProtocolType::TemporalDistanceVector,
        ProtocolType::TemporalLinkState,
    ];
    // without a forecast, the temporal protocols must skip the section in the same way
    for protocol in protocols.iter() {
        init_logger();
        let (mut net, j1j2) = line_network();
        net.set_section_flow(j1j2, 0.0).unwrap();
        let mut o = RoutingOrchestrator::new(net, stats_config(*protocol)).unwrap();
        o.run_round();
        let net = o.network();
        assert_route(&o, ("J2", "J1"), "C2", "C2", 15.0);
        assert_route(&o, ("J2", "C2"), "C1", "J1", 30.0);
        // the section J1 -> J2 has no cost
        assert!(o.route(node(net, "J1"), section(net, "C1", "J1"), node(net, "C2")).is_none());
    }
}

#[test]
fn test_offset_fallback() {
    init_logger();
    let mut net = DiamondNet::net();
    let j1j3 = section(&net, "J1", "J3");
    net.set_section_flow(j1j3, 0.0).unwrap();
    let mut o =
        RoutingOrchestrator::new(net, stats_config(ProtocolType::DistanceVector)).unwrap();
    o.run_round();
    assert_route(&o, ("J1", "C1"), "C4", "J3", 55.0);
}

#[test]
fn test_webster_delays() {
    let mut o = orchestrator::<DiamondNet>(RoutingConfig::with_protocol(
        ProtocolType::DistanceVector,
    ));
    o.run_round();
    // with equal turning delays, the shorter path is still preferred
    let net = o.network();
    let entry =
        o.route(node(net, "J1"), section(net, "C1", "J1"), node(net, "C4")).unwrap();
    assert_eq!(entry.next_hop, section(net, "J1", "J3"));
    let turning = webster_delay(TURNING_FLOW, 30.0, 90.0, 1);
    assert_approx_eq!(entry.cost, 40.0 + 3.0 * turning, 1e-6);
}

#[test]
fn test_idempotent() {
    let mut o = converged::<GridNet>(ProtocolType::DistanceVector);
    let first = routes(&o);
    let messages = o.num_messages();
    assert!(messages > 0);
    o.run_round();
    assert_same_routes(&first, &routes(&o));
    assert_eq!(o.num_messages(), 2 * messages);
}

#[test]
fn test_temporal_congestion() {
    let dvr = congested_diamond(ProtocolType::DistanceVector);
    assert_route(&dvr, ("J1", "C1"), "C4", "J3", 55.0);

    let tdvr = congested_diamond(ProtocolType::TemporalDistanceVector);
    assert_route(&tdvr, ("J1", "C1"), "C4", "J2", 75.0);
    // J3 reaches the section before the congestion starts
    assert_route(&tdvr, ("J3", "J1"), "C4", "J4", 30.0);
}

#[test]
fn test_temporal_without_forecast() {
    let dvr = converged::<GridNet>(ProtocolType::DistanceVector);
    let tdvr = converged::<GridNet>(ProtocolType::TemporalDistanceVector);
    assert_same_costs(&routes(&dvr), &routes(&tdvr));
}
