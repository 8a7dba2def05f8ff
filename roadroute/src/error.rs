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

//! Module containing all error types

use crate::config::ConfigError;
use crate::netsim::{CoordinateError, NetworkError, RegionError};
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error propagated from `netsim`
    #[error("Network Error: {0}")]
    NetworkError(#[from] NetworkError),
    /// Invalid routing configuration
    #[error("Configuration Error: {0}")]
    ConfigError(#[from] ConfigError),
    /// The region mapping could not be read
    #[error("Region Error: {0}")]
    RegionError(#[from] RegionError),
    /// The node positions could not be read
    #[error("Coordinate Error: {0}")]
    CoordinateError(#[from] CoordinateError),
}
