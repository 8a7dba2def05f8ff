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

//! # Routing configuration
//!
//! All parameters of the routing engine. The configuration is usually read from a JSON file, where
//! every field is optional:
//!
//! ```rust
//! use roadroute::config::{DelayMethod, RoutingConfig};
//! use roadroute::routing::ProtocolType;
//!
//! let config = RoutingConfig::from_json_str(r#"{ "protocol": "lsr", "interval": 120 }"#).unwrap();
//! assert_eq!(config.protocol_type().unwrap(), ProtocolType::LinkState);
//! assert_eq!(config.interval, 120.0);
//! assert_eq!(config.delay_method, DelayMethod::Webster);
//! ```

use crate::routing::ProtocolType;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration Error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The routing protocol is not known. This error is fatal, routing cannot be started.
    #[error("Unknown routing protocol: {0}")]
    UnknownProtocol(String),
    /// A numerical parameter is out of its domain
    #[error("Invalid configuration value for {0}: {1}")]
    InvalidValue(&'static str, f64),
    /// The configuration file could not be read
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is no valid JSON
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How the delay of a turning is estimated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelayMethod {
    /// Analytic estimation with the Webster formula from flow and signal timing
    Webster,
    /// Measured delay, provided by the traffic statistics of the simulation
    Statistics,
}

/// How the regional agents propose their neighbours as interior or border neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Neighbours that are cheaper than `threshold_factor` times the average static cost to all
    /// neighbours are proposed as interior, all others as border.
    CostThreshold,
    /// Neighbours in the same region (of the region mapping) are proposed as interior, all others
    /// as border.
    RegionMap,
}

/// Parameters of the forecast based (temporal) protocols
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Time window (in seconds) covered by the sampled forecasts
    pub horizon: f64,
    /// Time between two samples (in seconds)
    pub step: f64,
    /// Consecutive samples which differ less than this threshold (in seconds) are merged before
    /// they are advertised.
    pub merge_threshold: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self { horizon: 900.0, step: 90.0, merge_threshold: 2.0 }
    }
}

/// Parameters of the regional protocols
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionalConfig {
    /// Factor of the average static neighbour cost, below which a neighbour is proposed as
    /// interior neighbour.
    pub threshold_factor: f64,
    /// How neighbours are proposed. If not set, regional distance-vector uses the region mapping,
    /// and regional link-state uses the cost threshold.
    pub classification: Option<Classification>,
    /// CSV file with the region mapping
    pub region_file: Option<PathBuf>,
}

impl Default for RegionalConfig {
    fn default() -> Self {
        Self { threshold_factor: 1.1, classification: None, region_file: None }
    }
}

/// Configuration of the routing engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Name of the routing protocol (see [`ProtocolType`])
    pub protocol: String,
    /// Time between two protocol rounds, in seconds
    pub interval: f64,
    /// Time after the start of the simulation, during which no routing is performed
    pub warmup: f64,
    /// How the delay of a turning is estimated
    pub delay_method: DelayMethod,
    /// Parameters for the temporal protocols
    pub forecast: ForecastConfig,
    /// Parameters for the regional protocols
    pub regional: RegionalConfig,
    /// CSV file with the node positions, loaded before the first round of the geometric
    /// protocols
    pub coordinate_file: Option<PathBuf>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            protocol: String::from("NONE"),
            interval: 300.0,
            warmup: 300.0,
            delay_method: DelayMethod::Webster,
            forecast: ForecastConfig::default(),
            regional: RegionalConfig::default(),
            coordinate_file: None,
        }
    }
}

impl RoutingConfig {
    /// Create the default configuration for the given protocol
    pub fn with_protocol(protocol: ProtocolType) -> Self {
        Self { protocol: protocol.name().to_string(), ..Default::default() }
    }

    /// Parse the configuration from a JSON string
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read the configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Returns the configured protocol, or an error if the name is unknown.
    pub fn protocol_type(&self) -> Result<ProtocolType, ConfigError> {
        self.protocol.parse()
    }

    /// Returns the neighbour classification used by the given (regional) protocol.
    pub fn classification(&self, protocol: ProtocolType) -> Classification {
        match self.regional.classification {
            Some(c) => c,
            None if protocol.is_link_state() => Classification::CostThreshold,
            None => Classification::RegionMap,
        }
    }

    /// Check that all parameters are in their domain, and that the protocol is known.
    pub fn validate(&self) -> Result<ProtocolType, ConfigError> {
        let protocol = self.protocol_type()?;
        if self.interval.is_nan() || self.interval <= 0.0 {
            return Err(ConfigError::InvalidValue("interval", self.interval));
        }
        if self.warmup.is_nan() || self.warmup < 0.0 {
            return Err(ConfigError::InvalidValue("warmup", self.warmup));
        }
        if self.forecast.step.is_nan() || self.forecast.step <= 0.0 {
            return Err(ConfigError::InvalidValue("forecast.step", self.forecast.step));
        }
        if self.forecast.horizon.is_nan() || self.forecast.horizon < self.forecast.step {
            return Err(ConfigError::InvalidValue("forecast.horizon", self.forecast.horizon));
        }
        if self.regional.threshold_factor.is_nan() || self.regional.threshold_factor <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "regional.threshold_factor",
                self.regional.threshold_factor,
            ));
        }
        Ok(protocol)
    }
}
