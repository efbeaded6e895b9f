// Copyright (c) 2016-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//


//! Helpers shared by the integration tests.

#![allow(dead_code)]

use bimdf::{BiMdf, CostFunction, EdgeInfo, Flow, SolverConfig};

use rand::Rng;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn rng(seed: u64) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

/// Default configuration without log output.
pub fn config() -> SolverConfig {
    let mut config = SolverConfig::default();
    config.verbosity = 0;
    config.double_cover.verbosity = 0;
    config
}

fn random_cost<R: Rng>(rng: &mut R) -> CostFunction {
    let target = f64::from(rng.gen_range(0..=4));
    let weight = f64::from(rng.gen_range(1..=3));
    match rng.gen_range(0..4) {
        0 => CostFunction::Zero,
        1 => CostFunction::abs_deviation(target, weight),
        2 => CostFunction::quad_deviation(target, weight),
        _ => CostFunction::sum(vec![
            CostFunction::abs_deviation(target, weight),
            CostFunction::quad_deviation(f64::from(rng.gen_range(0..=4)), 1.0),
        ]),
    }
}

/// A random circulation problem with integral cost data.
///
/// All lower bounds are 0 and all upper bounds at most 4, so the zero
/// flow is feasible and the instance can be solved by enumeration.
pub fn random_bimdf<R: Rng>(rng: &mut R, max_nodes: usize, max_edges: usize) -> BiMdf {
    random_instance(rng, max_nodes, max_edges, false)
}

/// Like [`random_bimdf`] but every edge goes from its tail to its head.
pub fn random_directed_bimdf<R: Rng>(rng: &mut R, max_nodes: usize, max_edges: usize) -> BiMdf {
    random_instance(rng, max_nodes, max_edges, true)
}

fn random_instance<R: Rng>(rng: &mut R, max_nodes: usize, max_edges: usize, directed: bool) -> BiMdf {
    let mut bimdf = BiMdf::new();
    let n = rng.gen_range(1..=max_nodes);
    for _ in 0..n {
        bimdf.add_node(0);
    }
    let m = rng.gen_range(1..=max_edges);
    for _ in 0..m {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        let (u_head, v_head) = if directed {
            (false, true)
        } else {
            (rng.gen_bool(0.5), rng.gen_bool(0.5))
        };
        bimdf.add(EdgeInfo {
            cost_function: random_cost(rng),
            upper: rng.gen_range(2..=4),
            ..EdgeInfo::new(u, v, u_head, v_head)
        });
    }
    bimdf
}

/// Solve a BiMDF with finite bounds by enumerating all flows.
///
/// Returns `None` if the problem is infeasible.
pub fn brute_force(bimdf: &BiMdf) -> Option<(f64, Vec<Flow>)> {
    assert!(bimdf.edges().all(|e| bimdf.upper(e) < 16));
    let mut x: Vec<Flow> = bimdf.edges().map(|e| bimdf.lower(e)).collect();
    let mut best: Option<(f64, Vec<Flow>)> = None;
    loop {
        if bimdf.is_valid(&x) {
            let cost = bimdf.total_cost(&x);
            if best.as_ref().map_or(true, |(c, _)| cost < *c) {
                best = Some((cost, x.clone()));
            }
        }

        // next flow vector
        let mut e = 0;
        loop {
            if e == x.len() {
                return best;
            }
            if x[e] < bimdf.upper(e) {
                x[e] += 1;
                break;
            }
            x[e] = bimdf.lower(e);
            e += 1;
        }
    }
}

/// The triangle with a boundary node.
///
/// Node `x` is connected to the triangle `a, b, c` by a head-head edge
/// and carries a tail-tail loop. The optimal cost is `4.7`.
pub fn triangle() -> BiMdf {
    let mut bimdf = BiMdf::new();
    let x = bimdf.add_node(0);
    let a = bimdf.add_node(0);
    let b = bimdf.add_node(0);
    let c = bimdf.add_node(0);
    bimdf.add(EdgeInfo::new(x, x, false, false));
    bimdf.add(EdgeInfo {
        cost_function: CostFunction::quad_deviation(4.0, 1.0),
        lower: 1,
        ..EdgeInfo::new(x, a, true, true)
    });
    bimdf.add(EdgeInfo {
        cost_function: CostFunction::abs_deviation(0.7, 1.0),
        ..EdgeInfo::new(a, b, false, false)
    });
    bimdf.add(EdgeInfo {
        cost_function: CostFunction::abs_deviation(0.4, 1.0),
        ..EdgeInfo::new(a, c, false, false)
    });
    bimdf.add(EdgeInfo {
        cost_function: CostFunction::abs_deviation(0.2, 1.0),
        ..EdgeInfo::new(b, c, true, true)
    });
    bimdf
}
