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

//! # Grid Network

use super::*;
use crate::netsim::RegionId;

use rand::prelude::*;

/// # Grid
///
/// Junctions arranged in a grid of `rows` times `cols`, where each junction is connected to its
/// right and lower neighbour. The length of every connection is chosen randomly between 50 and
/// 500 meters. Every second junction (in a checkerboard pattern) has a centroid attached. The
/// left half of the columns forms region 1, the right half region 2.
///
/// Junctions are named `J<row>_<col>`, and centroids `C<row>_<col>`.
#[derive(Debug)]
pub struct GridNet {}

impl GridNet {
    /// Default number of rows and columns
    pub const SIZE: usize = 4;

    /// Build a grid network, with lengths drawn from a random number generator with the given
    /// seed.
    pub fn build(rows: usize, cols: usize, seed: u64) -> RoadNetwork {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut net = RoadNetwork::new();

        let mut grid: Vec<Vec<NodeId>> = Vec::with_capacity(rows);
        for r in 0..rows {
            grid.push((0..cols).map(|c| net.add_junction(format!("J{}_{}", r, c))).collect());
        }

        for r in 0..rows {
            for c in 0..cols {
                if c + 1 < cols {
                    let length = rng.gen_range(50.0, 500.0);
                    connect(&mut net, grid[r][c], grid[r][c + 1], length).unwrap();
                }
                if r + 1 < rows {
                    let length = rng.gen_range(50.0, 500.0);
                    connect(&mut net, grid[r][c], grid[r + 1][c], length).unwrap();
                }
                if (r + c) % 2 == 0 {
                    let centroid = net.add_centroid(format!("C{}_{}", r, c));
                    connect(&mut net, centroid, grid[r][c], CENTROID_LENGTH).unwrap();
                }
            }
        }

        add_all_turnings(&mut net).unwrap();

        net
    }

    /// Region mapping of a grid network built with `build(rows, cols, _)`.
    pub fn build_regions(net: &RoadNetwork, rows: usize, cols: usize) -> RegionMap {
        let mut regions = RegionMap::single();
        for r in 0..rows {
            for c in 0..cols {
                let region = if c < (cols + 1) / 2 { RegionId(1) } else { RegionId(2) };
                for name in &[format!("J{}_{}", r, c), format!("C{}_{}", r, c)] {
                    if let Ok(node) = net.get_node_id(name) {
                        regions.insert(node, region);
                    }
                }
            }
        }
        regions
    }
}

impl ExampleNetwork for GridNet {
    fn net() -> RoadNetwork {
        Self::build(Self::SIZE, Self::SIZE, 42)
    }

    fn regions(net: &RoadNetwork) -> RegionMap {
        Self::build_regions(net, Self::SIZE, Self::SIZE)
    }
}
