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

use crate::config::{Classification, ConfigError, DelayMethod, RoutingConfig};
use crate::routing::ProtocolType;

use std::io::Write;

#[test]
fn test_defaults() {
    let config = RoutingConfig::from_json_str("{}").unwrap();
    assert_eq!(config, RoutingConfig::default());
    assert_eq!(config.protocol_type().unwrap(), ProtocolType::None);
    assert_eq!(config.interval, 300.0);
    assert_eq!(config.warmup, 300.0);
    assert_eq!(config.delay_method, DelayMethod::Webster);
    assert_eq!(config.forecast.merge_threshold, 2.0);
    assert_eq!(config.regional.threshold_factor, 1.1);
    assert!(config.regional.region_file.is_none());
    assert!(config.coordinate_file.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse() {
    let json = r#"{
        "protocol": "RegionalTLSR",
        "interval": 60,
        "delay_method": "Statistics",
        "forecast": { "horizon": 300, "step": 30 },
        "regional": { "classification": "RegionMap", "region_file": "regions.csv" }
    }"#;
    let config = RoutingConfig::from_json_str(json).unwrap();
    assert_eq!(config.validate().unwrap(), ProtocolType::RegionalTemporalLinkState);
    assert_eq!(config.interval, 60.0);
    assert_eq!(config.warmup, 300.0);
    assert_eq!(config.delay_method, DelayMethod::Statistics);
    assert_eq!(config.forecast.horizon, 300.0);
    assert_eq!(config.forecast.step, 30.0);
    assert_eq!(config.forecast.merge_threshold, 2.0);
    assert_eq!(config.regional.classification, Some(Classification::RegionMap));
    assert_eq!(config.regional.region_file.unwrap().to_str(), Some("regions.csv"));
}

#[test]
fn test_protocol_names() {
    for protocol in ProtocolType::all().iter() {
        assert_eq!(protocol.name().parse::<ProtocolType>().unwrap(), *protocol);
        assert_eq!(protocol.to_string(), protocol.name());
    }
    assert_eq!(" lsr ".parse::<ProtocolType>().unwrap(), ProtocolType::LinkState);
    assert_eq!(
        "regionaldvr".parse::<ProtocolType>().unwrap(),
        ProtocolType::RegionalDistanceVector
    );
    assert_eq!(
        "TemporalDVR".parse::<ProtocolType>().unwrap(),
        ProtocolType::TemporalDistanceVector
    );
    assert_eq!(ProtocolType::TemporalDistanceVector.name(), "TDVR");
    match "OSPF".parse::<ProtocolType>() {
        Err(ConfigError::UnknownProtocol(name)) => assert_eq!(name, "OSPF"),
        r => panic!("Unexpected result: {:?}", r),
    }
}

#[test]
fn test_protocol_families() {
    use ProtocolType::*;
    assert!(Greedy.is_geometric());
    assert!(Heuristic.is_geometric());
    assert!(!Heuristic.is_distance_vector());
    assert!(!Greedy.is_link_state());
    assert!(!LinkState.is_geometric());
    assert_eq!(Heuristic.flat(), Heuristic);
    assert!(TemporalDistanceVector.is_distance_vector());
    assert!(TemporalDistanceVector.is_temporal());
    assert!(!TemporalDistanceVector.is_regional());
    assert!(RegionalTemporalLinkState.is_link_state());
    assert!(RegionalTemporalLinkState.is_regional());
    assert!(!None.is_distance_vector());
    assert!(!None.is_link_state());
    assert_eq!(RegionalTemporalLinkState.flat(), TemporalLinkState);
    assert_eq!(RegionalDistanceVector.flat(), DistanceVector);
    assert_eq!(LinkState.flat(), LinkState);
}

#[test]
fn test_classification_default() {
    let config = RoutingConfig::default();
    assert_eq!(
        config.classification(ProtocolType::RegionalDistanceVector),
        Classification::RegionMap
    );
    assert_eq!(
        config.classification(ProtocolType::RegionalLinkState),
        Classification::CostThreshold
    );
    let mut config = RoutingConfig::default();
    config.regional.classification = Some(Classification::RegionMap);
    assert_eq!(config.classification(ProtocolType::RegionalLinkState), Classification::RegionMap);
}

#[test]
fn test_validate() {
    let mut config = RoutingConfig::with_protocol(ProtocolType::DistanceVector);
    assert_eq!(config.validate().unwrap(), ProtocolType::DistanceVector);

    config.interval = 0.0;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidValue("interval", _))));

    let mut config = RoutingConfig::with_protocol(ProtocolType::TemporalLinkState);
    config.forecast.step = 600.0;
    config.forecast.horizon = 300.0;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidValue("forecast.horizon", _))));

    let config = RoutingConfig { protocol: String::from("RIP"), ..Default::default() };
    assert!(matches!(config.validate(), Err(ConfigError::UnknownProtocol(_))));
}

#[test]
fn test_invalid_json() {
    assert!(matches!(RoutingConfig::from_json_str("{ protocol }"), Err(ConfigError::Json(_))));
    assert!(matches!(
        RoutingConfig::from_json_str(r#"{ "interval": "often" }"#),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn test_from_file() {
    let path = std::env::temp_dir().join("roadroute_test_config.json");
    {
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, r#"{{ "protocol": "TDVR", "warmup": 0 }}"#).unwrap();
    }
    let config = RoutingConfig::from_file(&path).unwrap();
    assert_eq!(config.protocol_type().unwrap(), ProtocolType::TemporalDistanceVector);
    assert_eq!(config.warmup, 0.0);
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(RoutingConfig::from_file(&path), Err(ConfigError::Io(_))));
}

#[test]
fn test_parse_geometric() {
    let json = r#"{ "protocol": "greedy", "coordinate_file": "positions.csv" }"#;
    let config = RoutingConfig::from_json_str(json).unwrap();
    assert_eq!(config.validate().unwrap(), ProtocolType::Greedy);
    assert_eq!(config.coordinate_file.unwrap().to_str(), Some("positions.csv"));

    let config = RoutingConfig::from_json_str(r#"{ "protocol": "HEURISTIC" }"#).unwrap();
    assert_eq!(config.validate().unwrap(), ProtocolType::Heuristic);
    assert!(config.coordinate_file.is_none());
}
