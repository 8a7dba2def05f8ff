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

#[cfg(test)]
mod test_config;
#[cfg(test)]
mod test_distance_vector;
#[cfg(test)]
mod test_forecast;
#[cfg(test)]
mod test_greedy;
#[cfg(test)]
mod test_routing_table;
#[cfg(test)]
mod test_shortest_paths;
#[cfg(test)]
mod test_traffic;

#[cfg(test)]
pub(crate) mod helpers {
    use crate::config::{DelayMethod, ForecastConfig, RoutingConfig};
    use crate::example_networks::{DiamondNet, ExampleNetwork};
    use crate::netsim::{Cost, Forecast, NodeId, RoadNetwork, SectionId};
    use crate::routing::{ProtocolType, RoutingOrchestrator};

    use assert_approx_eq::assert_approx_eq;
    use std::collections::BTreeMap;

    /// All routes of all agents, indexed by (junction, incoming section, destination)
    pub type Routes = BTreeMap<(NodeId, SectionId, NodeId), (SectionId, Cost)>;

    pub fn init_logger() {
        let _ = pretty_env_logger::try_init();
    }

    /// Configuration with exact, measured turning delays
    pub fn stats_config(protocol: ProtocolType) -> RoutingConfig {
        RoutingConfig {
            delay_method: DelayMethod::Statistics,
            ..RoutingConfig::with_protocol(protocol)
        }
    }

    pub fn orchestrator<N: ExampleNetwork>(config: RoutingConfig) -> RoutingOrchestrator {
        init_logger();
        let net = N::net();
        let regions = N::regions(&net);
        RoutingOrchestrator::with_regions(net, config, regions).unwrap()
    }

    /// Run a single round of the protocol on the example network
    pub fn converged<N: ExampleNetwork>(protocol: ProtocolType) -> RoutingOrchestrator {
        let mut o = orchestrator::<N>(stats_config(protocol));
        o.run_round();
        o
    }

    /// Diamond network, where the section `J3->J4` is predicted to be congested 20 seconds from
    /// now. The congested section takes 199 seconds instead of 10.
    pub fn congested_diamond(protocol: ProtocolType) -> RoutingOrchestrator {
        init_logger();
        let mut config = stats_config(protocol);
        config.forecast = ForecastConfig { horizon: 100.0, step: 10.0, merge_threshold: 2.0 };
        let mut net = DiamondNet::net();
        let j3j4 = section(&net, "J3", "J4");
        let mut values = vec![1.0, 1.0];
        values.extend(std::iter::repeat(3_000_000.0).take(9));
        net.set_section_forecast(j3j4, Forecast::new(10.0, values)).unwrap();
        let mut o = RoutingOrchestrator::new(net, config).unwrap();
        o.run_round();
        o
    }

    pub fn node(net: &RoadNetwork, name: &str) -> NodeId {
        net.get_node_id(name).unwrap()
    }

    pub fn section(net: &RoadNetwork, from: &str, to: &str) -> SectionId {
        net.find_section(node(net, from), node(net, to)).unwrap()
    }

    /// Assert the cost and the next hop of a route. `(at, from)` names the junction and the
    /// node at the start of the incoming section.
    pub fn assert_route(
        o: &RoutingOrchestrator,
        (at, from): (&str, &str),
        destination: &str,
        next: &str,
        cost: Cost,
    ) {
        let net = o.network();
        let entry = o
            .route(node(net, at), section(net, from, at), node(net, destination))
            .unwrap_or_else(|| panic!("No route at {} from {} to {}", at, from, destination));
        assert_eq!(entry.next_hop, section(net, at, next), "wrong next hop at {}", at);
        assert_approx_eq!(entry.cost, cost, 1e-6);
    }

    pub fn routes(o: &RoutingOrchestrator) -> Routes {
        let mut result = Routes::new();
        for agent in o.agents() {
            for table in agent.tables() {
                for entry in table.entries() {
                    result.insert(
                        (agent.node(), table.in_section(), entry.destination),
                        (entry.next_hop, entry.cost),
                    );
                }
            }
        }
        result
    }

    pub fn assert_same_costs(a: &Routes, b: &Routes) {
        assert_eq!(
            a.keys().collect::<Vec<_>>(),
            b.keys().collect::<Vec<_>>(),
            "different destinations are known"
        );
        for (key, (_, cost)) in a.iter() {
            assert_approx_eq!(*cost, b[key].1, 1e-6);
        }
    }

    pub fn assert_same_routes(a: &Routes, b: &Routes) {
        assert_same_costs(a, b);
        for (key, (next_hop, _)) in a.iter() {
            assert_eq!(*next_hop, b[key].0, "different next hop for {:?}", key);
        }
    }
}
