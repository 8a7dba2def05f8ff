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

use crate::netsim::{is_valid_cost, webster_delay, Forecast, RoadNetwork, INVALID_COST};
use assert_approx_eq::assert_approx_eq;

fn single_section(flow: f64) -> (RoadNetwork, crate::netsim::SectionId) {
    let mut net = RoadNetwork::new();
    let a = net.add_junction("A");
    let b = net.add_junction("B");
    let ab = net.add_section(a, b, 100.0, 36.0, 1800.0).unwrap();
    net.set_section_flow(ab, flow).unwrap();
    (net, ab)
}

#[test]
fn test_webster() {
    assert_approx_eq!(webster_delay(300.0, 30.0, 90.0, 1), 24.3);
    // more lanes, less delay
    assert!(webster_delay(300.0, 30.0, 90.0, 2) < webster_delay(300.0, 30.0, 90.0, 1));
    // zero flow is counted as a single vehicle
    assert!(is_valid_cost(webster_delay(0.0, 30.0, 90.0, 1)));
}

#[test]
fn test_webster_invalid() {
    assert_eq!(webster_delay(300.0, 0.0, 90.0, 1), INVALID_COST);
    assert_eq!(webster_delay(300.0, 30.0, 0.0, 1), INVALID_COST);
    assert_eq!(webster_delay(300.0, 30.0, 90.0, 0), INVALID_COST);
    assert_eq!(webster_delay(f64::NAN, 30.0, 90.0, 1), INVALID_COST);
    assert_eq!(webster_delay(-1.0, 30.0, 90.0, 1), INVALID_COST);
}

#[test]
fn test_section_delay() {
    let (net, ab) = single_section(900.0);
    let section = net.section(ab).unwrap();
    assert_approx_eq!(section.free_flow_time(), 10.0);
    assert_approx_eq!(section.current_delay(), 10.875);
    assert_approx_eq!(section.delay_for_flow(1800.0), 17.0);
}

#[test]
fn test_section_without_flow() {
    let (net, ab) = single_section(0.0);
    let section = net.section(ab).unwrap();
    assert_eq!(section.current_delay(), INVALID_COST);
    assert_eq!(section.delay_for_flow(f64::NAN), INVALID_COST);
    assert_eq!(section.forecast_delay(100.0), INVALID_COST);
}

#[test]
fn test_disturbance() {
    let (mut net, ab) = single_section(900.0);
    net.add_disturbance(ab, 0.5).unwrap();
    assert_approx_eq!(net.section(ab).unwrap().current_delay(), 16.3125);
    net.clear_disturbances(ab).unwrap();
    assert_approx_eq!(net.section(ab).unwrap().current_delay(), 10.875);
}

#[test]
fn test_forecast() {
    let forecast = Forecast::new(300.0, vec![900.0, 1800.0]);
    assert_eq!(forecast.step(), 300.0);
    assert_eq!(forecast.value_at(0.0), 900.0);
    assert_eq!(forecast.value_at(140.0), 900.0);
    assert_eq!(forecast.value_at(160.0), 1800.0);
    assert!(forecast.value_at(600.0).is_nan());
    assert!(forecast.value_at(-10.0).is_nan());

    let (mut net, ab) = single_section(900.0);
    net.set_section_forecast(ab, forecast).unwrap();
    let section = net.section(ab).unwrap();
    assert_approx_eq!(section.forecast_delay(300.0), 17.0);
    assert_eq!(section.forecast_delay(900.0), INVALID_COST);
}
