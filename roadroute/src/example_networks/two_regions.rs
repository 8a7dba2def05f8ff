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

//! # Two Region Network

use super::*;
use crate::netsim::RegionId;

/// # Two Regions
///
/// Two triangles of junctions, connected by a single pair of sections between `J3` and `J4`. The
/// left triangle (with `C1`) forms region 1, the right triangle (with `C6`) region 2. All sections
/// are 100 meters long.
///
/// ```text
/// C1 - J1             J5
///      | \           / |
///      |  J3 ---- J4   |
///      | /           \ |
///      J2             J6 - C6
/// ```
#[derive(Debug)]
pub struct TwoRegionNet {}

impl ExampleNetwork for TwoRegionNet {
    fn net() -> RoadNetwork {
        let mut net = RoadNetwork::new();

        let j1 = net.add_junction("J1");
        let j2 = net.add_junction("J2");
        let j3 = net.add_junction("J3");
        let j4 = net.add_junction("J4");
        let j5 = net.add_junction("J5");
        let j6 = net.add_junction("J6");
        let c1 = net.add_centroid("C1");
        let c6 = net.add_centroid("C6");

        connect(&mut net, j1, j2, 100.0).unwrap();
        connect(&mut net, j2, j3, 100.0).unwrap();
        connect(&mut net, j3, j1, 100.0).unwrap();
        connect(&mut net, j3, j4, 100.0).unwrap();
        connect(&mut net, j4, j5, 100.0).unwrap();
        connect(&mut net, j5, j6, 100.0).unwrap();
        connect(&mut net, j6, j4, 100.0).unwrap();
        connect(&mut net, c1, j1, CENTROID_LENGTH).unwrap();
        connect(&mut net, c6, j6, CENTROID_LENGTH).unwrap();

        add_all_turnings(&mut net).unwrap();

        net
    }

    fn regions(net: &RoadNetwork) -> RegionMap {
        let mut regions = RegionMap::single();
        for name in &["J1", "J2", "J3", "C1"] {
            regions.insert(net.get_node_id(name).unwrap(), RegionId(1));
        }
        for name in &["J4", "J5", "J6", "C6"] {
            regions.insert(net.get_node_id(name).unwrap(), RegionId(2));
        }
        regions
    }
}
