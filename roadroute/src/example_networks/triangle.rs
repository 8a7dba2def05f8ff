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

//! # Triangle Network

use super::*;

/// # Triangle
///
/// Three junctions, all connected with each other by sections of 100 meters. Each junction has a
/// centroid attached.
///
/// ```text
///   C1       C2
///   |        |
///   J1 ----- J2
///    \      /
///     \    /
///      J3
///      |
///      C3
/// ```
#[derive(Debug)]
pub struct TriangleNet {}

impl ExampleNetwork for TriangleNet {
    fn net() -> RoadNetwork {
        let mut net = RoadNetwork::new();

        let j1 = net.add_junction("J1");
        let j2 = net.add_junction("J2");
        let j3 = net.add_junction("J3");
        let c1 = net.add_centroid("C1");
        let c2 = net.add_centroid("C2");
        let c3 = net.add_centroid("C3");

        connect(&mut net, j1, j2, 100.0).unwrap();
        connect(&mut net, j2, j3, 100.0).unwrap();
        connect(&mut net, j3, j1, 100.0).unwrap();
        connect(&mut net, c1, j1, CENTROID_LENGTH).unwrap();
        connect(&mut net, c2, j2, CENTROID_LENGTH).unwrap();
        connect(&mut net, c3, j3, CENTROID_LENGTH).unwrap();

        add_all_turnings(&mut net).unwrap();

        net
    }
}
