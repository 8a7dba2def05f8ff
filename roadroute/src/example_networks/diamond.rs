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

//! # Diamond Network

use super::*;

/// # Diamond
///
/// Two paths between the centroids `C1` and `C4`. The path through `J2` is longer than the path
/// through `J3`.
///
/// ```text
///          100     400
///      +--- J2 ---------+
///      |                |
/// C1 - J1               J4 - C4
///      |                |
///      +--- J3 ---------+
///          200     100
/// ```
///
/// With the measured turning delays, the travel time from `C1` to `C4` is 55 seconds through
/// `J3`, and 75 seconds through `J2`.
///
/// All nodes are positioned, with `J1` at the origin, `J2` at `(0, 100)`, `J3` at `(200, 0)`,
/// `J4` at `(300, 0)` and the centroids 100 meters further out on the x-axis.
#[derive(Debug)]
pub struct DiamondNet {}

impl ExampleNetwork for DiamondNet {
    fn net() -> RoadNetwork {
        let mut net = RoadNetwork::new();

        let j1 = net.add_junction("J1");
        let j2 = net.add_junction("J2");
        let j3 = net.add_junction("J3");
        let j4 = net.add_junction("J4");
        let c1 = net.add_centroid("C1");
        let c4 = net.add_centroid("C4");

        connect(&mut net, j1, j2, 100.0).unwrap();
        connect(&mut net, j2, j4, 400.0).unwrap();
        connect(&mut net, j1, j3, 200.0).unwrap();
        connect(&mut net, j3, j4, 100.0).unwrap();
        connect(&mut net, c1, j1, CENTROID_LENGTH).unwrap();
        connect(&mut net, c4, j4, CENTROID_LENGTH).unwrap();

        add_all_turnings(&mut net).unwrap();

        net.set_coordinates(j1, Point::new(0.0, 0.0)).unwrap();
        net.set_coordinates(j2, Point::new(0.0, 100.0)).unwrap();
        net.set_coordinates(j3, Point::new(200.0, 0.0)).unwrap();
        net.set_coordinates(j4, Point::new(300.0, 0.0)).unwrap();
        net.set_coordinates(c1, Point::new(-100.0, 0.0)).unwrap();
        net.set_coordinates(c4, Point::new(400.0, 0.0)).unwrap();

        net
    }
}
