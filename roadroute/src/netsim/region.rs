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

//! # Region membership
//!
//! Maps junctions and centroids to regions. The mapping is read once from a CSV file with one
//! node per line, in the form `<node name>;<region id>`. Lines starting with `#` are ignored.
//!
//! ```text
//! # junctions
//! J1;1
//! J2;1
//! J3;2
//! # centroids
//! C1;1
//! C3;2
//! ```

use crate::netsim::{NetworkError, NodeId, RegionId, RoadNetwork};

use log::*;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Region used for every node not explicitly mapped, and for the single region fallback.
pub const DEFAULT_REGION: RegionId = RegionId(1);

/// Errors while reading the region mapping
#[derive(Error, Debug)]
pub enum RegionError {
    /// The file could not be opened or read
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is no valid region mapping
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    /// The mapping references an unknown node
    #[error("Network Error: {0}")]
    Network(#[from] NetworkError),
}

#[derive(Debug, Deserialize)]
struct RegionRecord {
    name: String,
    region: u32,
}

/// Mapping of nodes to regions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionMap {
    regions: HashMap<NodeId, RegionId>,
}

impl RegionMap {
    /// Create a mapping where every node belongs to [`DEFAULT_REGION`].
    pub fn single() -> Self {
        Self::default()
    }

    /// Read the mapping from a reader. All names must exist in the network.
    pub fn from_csv_reader<R: Read>(net: &RoadNetwork, reader: R) -> Result<Self, RegionError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut map = Self::single();
        for record in csv_reader.deserialize() {
            let record: RegionRecord = record?;
            let node = net.get_node_id(&record.name)?;
            map.insert(node, RegionId(record.region));
        }
        Ok(map)
    }

    /// Read the mapping from a file.
    pub fn from_file<P: AsRef<Path>>(net: &RoadNetwork, path: P) -> Result<Self, RegionError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(net, file)
    }

    /// Read the mapping from a file. If the file cannot be read, the problem is logged, and every
    /// node is placed in a single region.
    pub fn load_or_single<P: AsRef<Path>>(net: &RoadNetwork, path: P) -> Self {
        match Self::from_file(net, path.as_ref()) {
            Ok(map) => map,
            Err(e) => {
                error!(
                    "Cannot read the region mapping {}: {}. Using a single region!",
                    path.as_ref().display(),
                    e
                );
                Self::single()
            }
        }
    }

    /// Place a node in a region
    pub fn insert(&mut self, node: NodeId, region: RegionId) {
        self.regions.insert(node, region);
    }

    /// Returns the region of the node
    pub fn region_of(&self, node: NodeId) -> RegionId {
        self.regions.get(&node).copied().unwrap_or(DEFAULT_REGION)
    }

    /// Returns all centroids of the network that are located in the region, ordered by id.
    pub fn centroids_in(&self, net: &RoadNetwork, region: RegionId) -> Vec<NodeId> {
        net.centroids().into_iter().filter(|c| self.region_of(*c) == region).collect()
    }

    /// Returns the set of all regions of the network.
    pub fn regions(&self, net: &RoadNetwork) -> BTreeSet<RegionId> {
        net.junctions()
            .into_iter()
            .chain(net.centroids().into_iter())
            .map(|n| self.region_of(n))
            .collect()
    }
}
