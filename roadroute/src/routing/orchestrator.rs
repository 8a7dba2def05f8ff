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

//! # Routing orchestrator
//!
//! The orchestrator owns the road network, one [`RoutingAgent`] for every junction, and the queue
//! of messages between them. The simulation calls [`RoutingOrchestrator::process`] on every tick.
//! Once the next scheduled run is reached, all agents reset their routing data and execute the
//! protocol, until no message is left. Afterwards, all routing table entries are published to the
//! registered observers. Only the updates of the last round are kept for
//! [`RoutingOrchestrator::take_updates`].

use crate::config::{ConfigError, RoutingConfig};
use crate::netsim::geometry::load_coordinates_file;
use crate::netsim::{printer, NodeId, RegionMap, RoadNetwork, SectionId};
use crate::routing::agent::{RoutingAgent, RoutingContext};
use crate::routing::link_state::RegionalPhase;
use crate::routing::message::MessageQueue;
use crate::routing::table::RouteEntry;
use crate::routing::ProtocolType;

use log::*;
use std::collections::BTreeMap;
use std::fmt;

/// Update of a single routing table entry, published after every round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableUpdate {
    /// Junction of the agent
    pub node: NodeId,
    /// Incoming section of the table
    pub in_section: SectionId,
    /// Section to take
    pub next_hop: SectionId,
    /// Destination centroid
    pub destination: NodeId,
    /// Expected travel time, rounded to whole seconds
    pub delay: i64,
}

/// Observer, called for every published table update
pub type UpdateCallback = Box<dyn FnMut(&TableUpdate)>;

/// Drives the routing agents of the whole network.
pub struct RoutingOrchestrator {
    net: RoadNetwork,
    config: RoutingConfig,
    protocol: ProtocolType,
    regions: RegionMap,
    agents: BTreeMap<NodeId, RoutingAgent>,
    peers: BTreeMap<NodeId, ProtocolType>,
    queue: MessageQueue,
    enabled: bool,
    next_run: f64,
    num_messages: usize,
    cooperation_done: bool,
    coordinates_loaded: bool,
    updates: Vec<TableUpdate>,
    subscribers: Vec<UpdateCallback>,
}

impl fmt::Debug for RoutingOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingOrchestrator")
            .field("protocol", &self.protocol)
            .field("agents", &self.agents.len())
            .field("enabled", &self.enabled)
            .field("next_run", &self.next_run)
            .field("num_messages", &self.num_messages)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl RoutingOrchestrator {
    /// Create the orchestrator, and bind an agent to every junction of the network. The region
    /// mapping is read from the configured file. If it cannot be read, a single region is used.
    ///
    /// Returns an error if the configuration is invalid, in particular if the protocol is not
    /// known.
    pub fn new(net: RoadNetwork, config: RoutingConfig) -> Result<Self, ConfigError> {
        let regions = match config.regional.region_file.as_ref() {
            Some(path) => RegionMap::load_or_single(&net, path),
            None => RegionMap::single(),
        };
        Self::with_regions(net, config, regions)
    }

    /// Create the orchestrator with the given region mapping.
    pub fn with_regions(
        net: RoadNetwork,
        config: RoutingConfig,
        regions: RegionMap,
    ) -> Result<Self, ConfigError> {
        let protocol = config.validate()?;
        let mut agents = BTreeMap::new();
        if protocol != ProtocolType::None {
            for node in net.junctions() {
                agents.insert(node, RoutingAgent::new(node, protocol, &net));
            }
        }
        let peers = agents.keys().map(|n| (*n, protocol)).collect();
        info!("Routing with {} on {} agents", protocol, agents.len());
        Ok(Self {
            next_run: config.warmup + config.interval,
            net,
            config,
            protocol,
            regions,
            agents,
            peers,
            queue: MessageQueue::new(),
            enabled: protocol != ProtocolType::None,
            num_messages: 0,
            cooperation_done: false,
            coordinates_loaded: false,
            updates: Vec::new(),
            subscribers: Vec::new(),
        })
    }

    /// Returns a reference to the road network
    pub fn network(&self) -> &RoadNetwork {
        &self.net
    }

    /// Returns a mutable reference to the road network, to update the measurements.
    pub fn network_mut(&mut self) -> &mut RoadNetwork {
        &mut self.net
    }

    /// Returns the configuration
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Returns the protocol of all agents
    pub fn protocol(&self) -> ProtocolType {
        self.protocol
    }

    /// Returns the region mapping
    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }

    /// Returns the agent bound to the junction
    pub fn agent(&self, node: NodeId) -> Option<&RoutingAgent> {
        self.agents.get(&node)
    }

    /// Iterate over all agents, ordered by junction
    pub fn agents(&self) -> impl Iterator<Item = &RoutingAgent> {
        self.agents.values()
    }

    /// Unbind the agent from the junction. Messages to the junction are dropped from now on.
    pub fn remove_agent(&mut self, node: NodeId) -> Option<RoutingAgent> {
        self.peers.remove(&node);
        self.agents.remove(&node)
    }

    /// Returns true if routing is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable routing
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Time of the next scheduled round
    pub fn next_run(&self) -> f64 {
        self.next_run
    }

    /// Total number of messages delivered between agents
    pub fn num_messages(&self) -> usize {
        self.num_messages
    }

    /// Route of the agent at `node` towards `destination`, for vehicles arriving through
    /// `in_section`.
    pub fn route(
        &self,
        node: NodeId,
        in_section: SectionId,
        destination: NodeId,
    ) -> Option<RouteEntry> {
        self.agents.get(&node).and_then(|a| a.route(in_section, destination))
    }

    /// Returns the table updates published by the last round, unless they were already taken.
    /// Older rounds are not kept.
    pub fn take_updates(&mut self) -> Vec<TableUpdate> {
        std::mem::take(&mut self.updates)
    }

    /// Register an observer, which is called for every table update after each round.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&TableUpdate) + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    /// Simulation tick. If the time is past the next scheduled run, a round is executed and the
    /// next run is scheduled one interval later. Returns true if a round was executed.
    pub fn process(&mut self, time: f64) -> bool {
        if !self.enabled || time <= self.next_run {
            return false;
        }
        self.next_run = time + self.config.interval;
        self.run_round();
        true
    }

    /// Execute a complete round of the protocol on all agents, and publish the tables.
    pub fn run_round(&mut self) {
        if !self.enabled {
            return;
        }
        self.load_coordinates();
        debug!("Start routing round with {}", self.protocol);
        let ctx = RoutingContext {
            net: &self.net,
            config: &self.config,
            regions: &self.regions,
            peers: &self.peers,
        };
        for agent in self.agents.values_mut() {
            agent.reset_routing_data(&ctx);
        }
        self.execute_protocol();
        self.publish();
    }

    /// Read the node positions before the first round of a geometric protocol. Without a
    /// coordinate file, or if it cannot be read, the agents work without positions.
    fn load_coordinates(&mut self) {
        if self.coordinates_loaded || !self.protocol.is_geometric() {
            return;
        }
        self.coordinates_loaded = true;
        let path = match self.config.coordinate_file.clone() {
            Some(path) => path,
            None => {
                warn!("{} is used without node positions", self.protocol);
                return;
            }
        };
        match load_coordinates_file(&mut self.net, &path) {
            Ok(n) => info!("Loaded the position of {} nodes", n),
            Err(e) => error!("Cannot read the node positions from {}: {}", path.display(), e),
        }
    }

    /// Execute the protocol on the current routing data of all agents, until all messages are
    /// delivered. The tables are neither cleared before nor published afterwards.
    pub(crate) fn execute_protocol(&mut self) {
        let messages_before = self.num_messages;
        let ctx = RoutingContext {
            net: &self.net,
            config: &self.config,
            regions: &self.regions,
            peers: &self.peers,
        };

        if self.protocol.is_regional() && !self.cooperation_done {
            for agent in self.agents.values_mut() {
                agent.propose_cooperations(&ctx);
            }
            for agent in self.agents.values_mut() {
                agent.ask_cooperations(&mut self.queue);
            }
            self.num_messages += Self::drain(&mut self.agents, &ctx, &mut self.queue);
            for agent in self.agents.values_mut() {
                agent.finish_cooperations();
            }
            self.cooperation_done = true;
        }

        for agent in self.agents.values_mut() {
            agent.perform_protocol(&ctx, &mut self.queue);
        }
        self.num_messages += Self::drain(&mut self.agents, &ctx, &mut self.queue);

        if self.protocol.is_regional() && self.protocol.is_link_state() {
            for phase in RegionalPhase::all().iter() {
                for agent in self.agents.values_mut() {
                    agent.run_regional_phase(&ctx, *phase, &mut self.queue);
                }
                self.num_messages += Self::drain(&mut self.agents, &ctx, &mut self.queue);
            }
        }

        for agent in self.agents.values_mut() {
            agent.finish_protocol(&ctx);
        }

        debug!("Routing round done with {} messages", self.num_messages - messages_before);
        if log_enabled!(Level::Debug) {
            match printer::all_tables(&self.net, self.agents.values()) {
                Ok(s) => debug!("{}", s),
                Err(e) => warn!("Cannot print the routing tables: {}", e),
            }
        }
    }

    /// Deliver all messages on the queue, including the ones that are created while handling
    /// them. Returns the number of delivered messages.
    fn drain(
        agents: &mut BTreeMap<NodeId, RoutingAgent>,
        ctx: &RoutingContext,
        queue: &mut MessageQueue,
    ) -> usize {
        let mut delivered = 0;
        while let Some(message) = queue.pop_front() {
            if log_enabled!(Level::Trace) {
                if let Ok(s) = printer::message(ctx.net, &message) {
                    trace!("{}", s);
                }
            }
            match agents.get_mut(&message.to()) {
                Some(agent) => {
                    delivered += 1;
                    agent.handle_message(ctx, message, queue);
                }
                None => warn!("Drop message to {:?}, which has no agent", message.to()),
            }
        }
        delivered
    }

    /// Publish all table entries to the observers
    fn publish(&mut self) {
        let mut updates = Vec::new();
        for agent in self.agents.values() {
            for table in agent.tables() {
                for entry in table.entries() {
                    updates.push(TableUpdate {
                        node: agent.node(),
                        in_section: table.in_section(),
                        next_hop: entry.next_hop,
                        destination: entry.destination,
                        delay: entry.cost.round() as i64,
                    });
                }
            }
        }
        for subscriber in self.subscribers.iter_mut() {
            for update in updates.iter() {
                subscriber(update);
            }
        }
        self.updates = updates;
    }
}
