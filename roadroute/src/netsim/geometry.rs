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

//! # Node positions
//!
//! The geometric protocols need the position of junctions and centroids. The simulation does not
//! provide them, so they are read from a CSV file with one node per line, in the form
//! `<node name>;<x>;<y>` (in meters). Lines starting with `#` are ignored.
//!
//! ```text
//! # junctions
//! J1;0;0
//! J2;0;100
//! # centroids
//! C1;-100;0
//! ```

use crate::netsim::RoadNetwork;

use log::*;
use serde::Deserialize;
use std::f64::consts::PI;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Position in the plane, in meters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position, growing eastwards
    pub x: f64,
    /// Vertical position, growing northwards
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to the other point
    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Direction towards the other point, as angle in `[0, 2 pi)` measured counter-clockwise from
    /// the x-axis. The direction to the point itself is `0`.
    pub fn angle_to(&self, other: &Point) -> f64 {
        let angle = (other.y - self.y).atan2(other.x - self.x);
        if angle < 0.0 {
            angle + 2.0 * PI
        } else {
            angle
        }
    }
}

/// Errors while reading the node positions
#[derive(Error, Debug)]
pub enum CoordinateError {
    /// The file could not be opened or read
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    /// The file contains malformed lines
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct CoordinateRecord {
    name: String,
    x: f64,
    y: f64,
}

/// Read the node positions from a reader, and store them in the network. Names that are not part
/// of the network are skipped. Returns the number of positioned nodes.
pub fn load_coordinates<R: Read>(
    net: &mut RoadNetwork,
    reader: R,
) -> Result<usize, CoordinateError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut loaded = 0;
    for record in csv_reader.deserialize() {
        let record: CoordinateRecord = record?;
        match net.get_node_id(&record.name) {
            Ok(node) => {
                if net.set_coordinates(node, Point::new(record.x, record.y)).is_ok() {
                    loaded += 1;
                }
            }
            Err(e) => warn!("Skip the position of {}: {}", record.name, e),
        }
    }
    debug!("Loaded the position of {} nodes", loaded);
    Ok(loaded)
}

/// Read the node positions from a file, and store them in the network.
pub fn load_coordinates_file<P: AsRef<Path>>(
    net: &mut RoadNetwork,
    path: P,
) -> Result<usize, CoordinateError> {
    info!("Loading node positions from {}", path.as_ref().display());
    let file = std::fs::File::open(path)?;
    load_coordinates(net, file)
}
