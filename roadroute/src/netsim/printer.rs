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

//! # Helper (printer) functions for the routing tables
//! Module containing helper functions to get formatted strings and print the routing tables of
//! the agents, with the names of all nodes inserted.

use crate::netsim::{NetworkError, RoadNetwork, SectionId};
use crate::routing::link_state::{Target, TopologyDatabase};
use crate::routing::message::{Message, Payload};
use crate::routing::{RouteEntry, RoutingAgent, RoutingTable};

/// Returns the section formatted as `from->to`.
pub fn section(net: &RoadNetwork, section: SectionId) -> Result<String, NetworkError> {
    let s = net.section(section)?;
    Ok(format!("{}->{}", net.get_node_name(s.from)?, net.get_node_name(s.to)?))
}

/// Returns the formatted string for a route entry of the table with the given incoming section.
pub fn route_entry(
    net: &RoadNetwork,
    in_section: SectionId,
    entry: &RouteEntry,
) -> Result<String, NetworkError> {
    Ok(format!(
        "FROM {} TO {}, NEXT HOP {}, DELAY {:.2}",
        section(net, in_section)?,
        net.get_node_name(entry.destination)?,
        section(net, entry.next_hop)?,
        entry.cost
    ))
}

/// Get a vector of strings, which represent the routing table. Each `String` in the vector
/// represents one line (one destination), ordered by destination.
pub fn routing_table(net: &RoadNetwork, table: &RoutingTable) -> Result<Vec<String>, NetworkError> {
    table.entries().map(|e| route_entry(net, table.in_section(), e)).collect()
}

/// Get all tables of the agent, one line per entry.
pub fn agent_tables(net: &RoadNetwork, agent: &RoutingAgent) -> Result<Vec<String>, NetworkError> {
    let mut result = Vec::new();
    for table in agent.tables() {
        result.extend(routing_table(net, table)?);
    }
    Ok(result)
}

/// Returns the tables of all agents, with a heading for each agent.
pub fn all_tables<'a, I>(net: &RoadNetwork, agents: I) -> Result<String, NetworkError>
where
    I: IntoIterator<Item = &'a RoutingAgent>,
{
    let mut result = String::new();
    for agent in agents {
        result.push_str(&format!(
            "Routing tables of {} ({}):\n",
            net.get_node_name(agent.node())?,
            agent.protocol()
        ));
        for line in agent_tables(net, agent)? {
            result.push_str("  ");
            result.push_str(&line);
            result.push('\n');
        }
    }
    Ok(result)
}

/// Print the routing tables of the agent.
pub fn print_agent_tables(net: &RoadNetwork, agent: &RoutingAgent) -> Result<(), NetworkError> {
    println!("Routing tables of {}", net.get_node_name(agent.node())?);
    for line in agent_tables(net, agent)? {
        println!("{}", line);
    }
    Ok(())
}

/// Return a formatted string for a given message
pub fn message(net: &RoadNetwork, message: &Message) -> Result<String, NetworkError> {
    let from = net.get_node_name(message.from())?;
    let to = net.get_node_name(message.to())?;
    Ok(match message {
        Message::DistanceVector(u) => format!(
            "DV {} -> {}: {} via {}, {}",
            from,
            to,
            net.get_node_name(u.destination)?,
            section(net, u.via)?,
            match &u.payload {
                Payload::Cost(c) => format!("cost {:.2}", c),
                Payload::Path(p) => format!("path of {} hops", p.len()),
            }
        ),
        Message::Region(u) => format!(
            "Region {} -> {}: region {} via {}, cost {:.2}",
            from,
            to,
            u.region.0,
            section(net, u.via)?,
            u.cost
        ),
        Message::Flood { scope, advertisements, .. } => format!(
            "Flood {} -> {} ({:?}): {}",
            from,
            to,
            scope,
            advertisements
                .iter()
                .map(|a| net
                    .get_node_name(a.origin())
                    .map(|name| format!("{}#{}", name, a.sequence_number())))
                .collect::<Result<Vec<String>, NetworkError>>()?
                .join(", ")
        ),
        Message::Cooperation { role, kind, .. } => {
            format!("Cooperation {} -> {}: {:?} {:?}", from, to, kind, role)
        }
    })
}

/// Returns the target of a database entry, with the node name inserted.
pub fn target(net: &RoadNetwork, target: &Target) -> Result<String, NetworkError> {
    Ok(match target {
        Target::Agent(a) => format!("agent {}", net.get_node_name(*a)?),
        Target::Sink(s) => format!("sink {}", net.get_node_name(*s)?),
    })
}

/// Get a vector of strings, which represent all entries of the database.
pub fn database(net: &RoadNetwork, db: &TopologyDatabase) -> Result<Vec<String>, NetworkError> {
    db.entries()
        .map(|e| {
            Ok(format!(
                "{} [{}] -> {} via {}, cost {:.2}, seq {}",
                net.get_node_name(e.source)?,
                section(net, e.in_section)?,
                target(net, &e.target)?,
                section(net, e.first_hop())?,
                e.cost,
                e.sequence_number
            ))
        })
        .collect()
}
