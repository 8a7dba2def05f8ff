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

use crate::netsim::INVALID_COST;
use crate::routing::forecast::{path_travel_time, ForecastHop, ForecastProfile};

use assert_approx_eq::assert_approx_eq;

fn profile(costs: &[f64]) -> ForecastProfile {
    let step = 10.0;
    let horizon = step * costs.len() as f64;
    ForecastProfile::sample(horizon, step, |t| costs[(t / step).round() as usize]).unwrap()
}

#[test]
fn test_sample() {
    let p = ForecastProfile::sample(100.0, 10.0, |t| 5.0 + t).unwrap();
    assert_eq!(p.len(), 10);
    assert_eq!(p.samples()[0], (0.0, 5.0));
    assert_eq!(p.samples()[9], (90.0, 95.0));

    // a single invalid sample invalidates the profile
    assert!(ForecastProfile::sample(100.0, 10.0, |t| if t > 50.0 { INVALID_COST } else { 5.0 })
        .is_none());
    assert!(ForecastProfile::sample(100.0, 0.0, |_| 5.0).is_none());
    // at least one sample, even for a short horizon
    assert_eq!(ForecastProfile::sample(1.0, 10.0, |_| 5.0).unwrap().len(), 1);
}

#[test]
fn test_at() {
    let p = profile(&[10.0, 20.0]);
    assert_eq!(p.at(0.0), 10.0);
    // on a tie, the earlier sample wins
    assert_eq!(p.at(5.0), 10.0);
    assert_eq!(p.at(7.0), 20.0);
    assert_eq!(p.at(1000.0), 20.0);
    assert_eq!(ForecastProfile::constant(3.0).at(500.0), 3.0);
}

#[test]
fn test_compress() {
    let mut p = profile(&[10.0, 10.5, 30.0, 31.0]);
    p.compress(2.0);
    assert_eq!(p.samples(), &[(0.0, 10.25), (20.0, 30.5)]);

    let mut p = profile(&[10.0, 20.0, 30.0]);
    p.compress(2.0);
    assert_eq!(p.len(), 3);

    // runs are detected between consecutive samples
    let mut p = profile(&[10.0, 11.5, 13.0, 14.5]);
    p.compress(2.0);
    assert_eq!(p.len(), 1);
    assert_approx_eq!(p.samples()[0].1, 12.25);
    assert_eq!(p.samples()[0].0, 0.0);
}

#[test]
fn test_hop_cost() {
    let hop = ForecastHop {
        turning: ForecastProfile::constant(5.0),
        section: profile(&[10.0, 10.0, 50.0]),
    };
    assert_eq!(hop.cost_at(0.0), 15.0);
    // the section is entered after the turning
    assert_eq!(hop.cost_at(20.0), 55.0);
}

#[test]
fn test_path_travel_time() {
    let congested = ForecastHop {
        turning: ForecastProfile::constant(5.0),
        section: profile(&[10.0, 10.0, 100.0, 100.0]),
    };
    let free = ForecastHop {
        turning: ForecastProfile::constant(5.0),
        section: ForecastProfile::constant(10.0),
    };
    assert_eq!(path_travel_time(&[]), 0.0);
    assert_eq!(path_travel_time(&[free.clone()]), 15.0);
    // the last hop is the first one that is driven
    assert_eq!(path_travel_time(&[congested.clone(), free.clone()]), 15.0 + 105.0);
    assert_eq!(path_travel_time(&[free, congested]), 15.0 + 15.0);
}
