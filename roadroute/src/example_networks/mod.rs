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

//! Networks for testing
//!
//! All networks use sections with a speed limit of 36 km/h, such that the free flow travel time in
//! seconds is a tenth of the length in meters. Sections carry a flow of a single vehicle per hour
//! on a huge capacity, which makes the current delay equal to the free flow travel time. Every
//! turning (except U-turns) has a measured delay of [`TURNING_DELAY`] seconds, and a flow which
//! gives a valid Webster delay.

use crate::netsim::{NetworkError, NodeId, Point, RegionMap, RoadNetwork, SectionId};

mod diamond;
pub use diamond::DiamondNet;

mod triangle;
pub use triangle::TriangleNet;

mod two_regions;
pub use two_regions::TwoRegionNet;

mod grid;
pub use grid::GridNet;

/// Speed limit of all sections in the example networks (km/h)
pub const SPEED_LIMIT: f64 = 36.0;
/// Capacity of all sections in the example networks (vehicles per hour)
pub const CAPACITY: f64 = 1_000_000.0;
/// Measured delay of all turnings in the example networks (seconds)
pub const TURNING_DELAY: f64 = 5.0;
/// Flow of all turnings in the example networks (vehicles per hour)
pub const TURNING_FLOW: f64 = 300.0;
/// Length of the sections between a centroid and its junction (meters)
pub const CENTROID_LENGTH: f64 = 100.0;

/// Trait for easier access to example networks.
pub trait ExampleNetwork {
    /// Get the network with all measurements set.
    fn net() -> RoadNetwork;
    /// Get the region mapping of the network. By default, all nodes are in the same region.
    fn regions(_net: &RoadNetwork) -> RegionMap {
        RegionMap::single()
    }
}

/// Add a section with the default speed limit and capacity, and a flow of one vehicle per hour.
pub fn add_road(
    net: &mut RoadNetwork,
    from: NodeId,
    to: NodeId,
    length: f64,
) -> Result<SectionId, NetworkError> {
    let section = net.add_section(from, to, length, SPEED_LIMIT, CAPACITY)?;
    net.set_section_flow(section, 1.0)?;
    Ok(section)
}

/// Connect two nodes in both directions, and set the static offsets between them to the free flow
/// travel time.
pub fn connect(
    net: &mut RoadNetwork,
    a: NodeId,
    b: NodeId,
    length: f64,
) -> Result<(SectionId, SectionId), NetworkError> {
    let ab = add_road(net, a, b, length)?;
    let ba = add_road(net, b, a, length)?;
    let free = net.section(ab)?.free_flow_time();
    net.set_offset(a, b, free)?;
    net.set_offset(b, a, free)?;
    Ok((ab, ba))
}

/// Add all turnings at the junction, from every incoming to every outgoing section, except
/// U-turns.
pub fn add_turnings(net: &mut RoadNetwork, junction: NodeId) -> Result<(), NetworkError> {
    for in_section in net.in_sections(junction) {
        let from = net.section(in_section)?.from;
        for out_section in net.out_sections(junction) {
            if net.section(out_section)?.to == from {
                continue;
            }
            net.add_turning(in_section, out_section, 30.0, 1)?;
            net.set_turning_flow(in_section, out_section, TURNING_FLOW)?;
            net.set_turning_delay(in_section, out_section, TURNING_DELAY)?;
        }
    }
    Ok(())
}

/// Add the turnings at all junctions of the network.
pub fn add_all_turnings(net: &mut RoadNetwork) -> Result<(), NetworkError> {
    for junction in net.junctions() {
        add_turnings(net, junction)?;
    }
    Ok(())
}
