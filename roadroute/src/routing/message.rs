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

//! Module for defining the messages exchanged between agents

use crate::netsim::{Cost, NodeId, RegionId, SectionId};
use crate::routing::forecast::ForecastHop;
use crate::routing::link_state::Advertisement;
use crate::routing::regional::{CooperationKind, RegionalRole};

use std::collections::VecDeque;
use std::rc::Rc;

/// Which neighbours a distance-vector update may be sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Non-regional protocol, all neighbours
    Flat,
    /// Only interior neighbours
    Interior,
    /// Information that has crossed a region boundary, all cooperating neighbours
    Border,
}

/// Cost information of a distance-vector update
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Current travel time from the entry of the receiving section to the destination
    Cost(Cost),
    /// Forecasted costs of all hops to the destination, ordered from the destination towards the
    /// sender.
    Path(Vec<ForecastHop>),
}

/// Update of a distance-vector agent for one destination
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceVectorUpdate {
    /// Sending agent
    pub from: NodeId,
    /// Receiving agent
    pub to: NodeId,
    /// Section from the receiver to the sender, for which the update is valid
    pub via: SectionId,
    /// Destination centroid
    pub destination: NodeId,
    /// Scope of the update
    pub scope: Scope,
    /// Cost to the destination
    pub payload: Payload,
}

/// Update of a regional distance-vector agent for one destination region
#[derive(Debug, Clone, PartialEq)]
pub struct RegionUpdate {
    /// Sending agent
    pub from: NodeId,
    /// Receiving agent
    pub to: NodeId,
    /// Section from the receiver to the sender, for which the update is valid
    pub via: SectionId,
    /// Destination region
    pub region: RegionId,
    /// Travel time from the entry of the section to the region
    pub cost: Cost,
}

/// Message to handle
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Distance-vector update
    DistanceVector(DistanceVectorUpdate),
    /// Distance-vector update for a region
    Region(RegionUpdate),
    /// Link-state advertisements, flooded from `from` to `to`.
    Flood {
        /// Sending agent
        from: NodeId,
        /// Receiving agent
        to: NodeId,
        /// Which neighbours take part in the flood
        scope: Scope,
        /// Advertisements to flood
        advertisements: Vec<Rc<Advertisement>>,
    },
    /// Regional cooperation handshake
    Cooperation {
        /// Sending agent
        from: NodeId,
        /// Receiving agent
        to: NodeId,
        /// Role that is negotiated
        role: RegionalRole,
        /// Handshake step
        kind: CooperationKind,
    },
}

impl Message {
    /// Returns the sender of the message
    pub fn from(&self) -> NodeId {
        match self {
            Message::DistanceVector(u) => u.from,
            Message::Region(u) => u.from,
            Message::Flood { from, .. } => *from,
            Message::Cooperation { from, .. } => *from,
        }
    }

    /// Returns the receiver of the message
    pub fn to(&self) -> NodeId {
        match self {
            Message::DistanceVector(u) => u.to,
            Message::Region(u) => u.to,
            Message::Flood { to, .. } => *to,
            Message::Cooperation { to, .. } => *to,
        }
    }
}

/// Message queue for enqueuing messages.
pub type MessageQueue = VecDeque<Message>;
