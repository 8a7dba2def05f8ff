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

//! Module defining the available routing protocols

use crate::config::ConfigError;

use std::fmt;
use std::str::FromStr;

/// Routing protocol executed by the agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProtocolType {
    /// Routing is disabled
    None,
    /// Distance-vector routing on current costs (`DVR`)
    DistanceVector,
    /// Distance-vector routing on forecasted costs (`TDVR`)
    TemporalDistanceVector,
    /// Distance-vector routing with interior and border agents (`REGIONALDVR`)
    RegionalDistanceVector,
    /// Distance-vector routing with interior and border agents on forecasted costs
    /// (`REGIONALTDVR`)
    RegionalTemporalDistanceVector,
    /// Link-state routing on current costs (`LSR`)
    LinkState,
    /// Link-state routing on forecasted costs (`TLSR`)
    TemporalLinkState,
    /// Link-state routing with interior and border agents (`REGIONALLSR`)
    RegionalLinkState,
    /// Link-state routing with interior and border agents on forecasted costs (`REGIONALTLSR`)
    RegionalTemporalLinkState,
    /// Local choice of the cheapest outgoing section in the direction of the destination,
    /// without any communication (`GREEDY`)
    Greedy,
    /// Local A* search on a static map of the whole network, updated with the own measurements
    /// (`HEURISTIC`)
    Heuristic,
}

/// Alternative configuration names, mapped to the protocol they select
const ALIASES: [(&str, ProtocolType); 1] = [("TEMPORALDVR", ProtocolType::TemporalDistanceVector)];

impl ProtocolType {
    /// Returns all protocols, including `None`.
    pub fn all() -> [ProtocolType; 11] {
        [
            Self::None,
            Self::DistanceVector,
            Self::TemporalDistanceVector,
            Self::RegionalDistanceVector,
            Self::RegionalTemporalDistanceVector,
            Self::LinkState,
            Self::TemporalLinkState,
            Self::RegionalLinkState,
            Self::RegionalTemporalLinkState,
            Self::Greedy,
            Self::Heuristic,
        ]
    }

    /// Name of the protocol, as used in the configuration
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::DistanceVector => "DVR",
            Self::TemporalDistanceVector => "TDVR",
            Self::RegionalDistanceVector => "REGIONALDVR",
            Self::RegionalTemporalDistanceVector => "REGIONALTDVR",
            Self::LinkState => "LSR",
            Self::TemporalLinkState => "TLSR",
            Self::RegionalLinkState => "REGIONALLSR",
            Self::RegionalTemporalLinkState => "REGIONALTLSR",
            Self::Greedy => "GREEDY",
            Self::Heuristic => "HEURISTIC",
        }
    }

    /// Returns true for all distance-vector protocols
    pub fn is_distance_vector(&self) -> bool {
        matches!(
            self,
            Self::DistanceVector
                | Self::TemporalDistanceVector
                | Self::RegionalDistanceVector
                | Self::RegionalTemporalDistanceVector
        )
    }

    /// Returns true for all link-state protocols
    pub fn is_link_state(&self) -> bool {
        matches!(
            self,
            Self::LinkState
                | Self::TemporalLinkState
                | Self::RegionalLinkState
                | Self::RegionalTemporalLinkState
        )
    }

    /// Returns true for the protocols that use forecasted costs
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::TemporalDistanceVector
                | Self::RegionalTemporalDistanceVector
                | Self::TemporalLinkState
                | Self::RegionalTemporalLinkState
        )
    }

    /// Returns true for the protocols with interior and border agents
    pub fn is_regional(&self) -> bool {
        matches!(
            self,
            Self::RegionalDistanceVector
                | Self::RegionalTemporalDistanceVector
                | Self::RegionalLinkState
                | Self::RegionalTemporalLinkState
        )
    }

    /// Returns true for the protocols that need the positions of the nodes
    pub fn is_geometric(&self) -> bool {
        matches!(self, Self::Greedy | Self::Heuristic)
    }

    /// Returns the protocol of the same family, but without the regional extension.
    pub fn flat(&self) -> Self {
        match self {
            Self::RegionalDistanceVector => Self::DistanceVector,
            Self::RegionalTemporalDistanceVector => Self::TemporalDistanceVector,
            Self::RegionalLinkState => Self::LinkState,
            Self::RegionalTemporalLinkState => Self::TemporalLinkState,
            p => *p,
        }
    }
}

impl fmt::Display for ProtocolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ProtocolType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_uppercase();
        Self::all()
            .iter()
            .find(|p| p.name() == name)
            .copied()
            .or_else(|| ALIASES.iter().find(|(alias, _)| *alias == name).map(|(_, p)| *p))
            .ok_or_else(|| ConfigError::UnknownProtocol(s.to_string()))
    }
}
