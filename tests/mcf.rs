/*
 * Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

use std::error::Error;

use bimdf::mcf::{solve_mcf, NetworkSimplex, SolutionState};
use bimdf::problems::Mcf;

use rand::Rng;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Two sources and two sinks, the optimal value is 8.
fn transportation() -> Mcf {
    let mut mcf = Mcf::new();
    let s1 = mcf.add_node(3);
    let s2 = mcf.add_node(2);
    let t1 = mcf.add_node(-2);
    let t2 = mcf.add_node(-3);
    mcf.add_arc(s1, t1, 0, Mcf::INF, 1);
    mcf.add_arc(s1, t2, 0, Mcf::INF, 4);
    mcf.add_arc(s2, t1, 0, Mcf::INF, 2);
    mcf.add_arc(s2, t2, 0, Mcf::INF, 1);
    mcf
}

/// Return `true` if the residual graph of `flow` has a negative cycle.
fn has_negative_cycle(mcf: &Mcf, flow: &[i64]) -> bool {
    let g = &mcf.graph;
    let mut residual = vec![];
    for a in g.edges() {
        let (u, v) = (g.src(a), g.snk(a));
        if flow[a] < mcf.upper[a] {
            residual.push((u, v, mcf.cost[a]));
        }
        if flow[a] > mcf.lower[a] {
            residual.push((v, u, -mcf.cost[a]));
        }
    }
    let mut dist = vec![0i64; g.num_nodes()];
    for _ in 0..=g.num_nodes() {
        let mut changed = false;
        for &(u, v, c) in &residual {
            if dist[u] + c < dist[v] {
                dist[v] = dist[u] + c;
                changed = true;
            }
        }
        if !changed {
            return false;
        }
    }
    true
}

#[test]
fn test_network_simplex() {
    let mcf = transportation();
    let mut spx = NetworkSimplex::new(&mcf);
    assert_eq!(spx.solve(), SolutionState::Optimal);
    assert_eq!(spx.value(), 8);
    assert!(!has_negative_cycle(&mcf, &spx.flows()));
}

#[test]
fn test_solve_mcf() -> Result<(), Box<dyn Error>> {
    let res = solve_mcf(&transportation())?;
    assert_eq!(res.solution, vec![2, 1, 0, 2]);
    assert_eq!(res.cost, 8);
    Ok(())
}

#[test]
fn test_lower_bounds() -> Result<(), Box<dyn Error>> {
    let mut mcf = Mcf::new();
    let a = mcf.add_node(0);
    let b = mcf.add_node(0);
    mcf.add_arc(a, b, 2, 5, 3);
    mcf.add_arc(b, a, 0, Mcf::INF, 1);
    let res = solve_mcf(&mcf)?;
    assert_eq!(res.solution, vec![2, 2]);
    assert_eq!(res.cost, 8);
    Ok(())
}

#[test]
fn test_infeasible() {
    let mut mcf = Mcf::new();
    let s = mcf.add_node(2);
    let t = mcf.add_node(-2);
    mcf.add_arc(s, t, 0, 1, 1);
    let err = solve_mcf(&mcf).unwrap_err();
    assert!(err.is_infeasible());
}

#[test]
fn test_unbounded() {
    let mut mcf = Mcf::new();
    let a = mcf.add_node(0);
    let b = mcf.add_node(0);
    mcf.add_arc(a, b, 0, Mcf::INF, -1);
    mcf.add_arc(b, a, 0, Mcf::INF, 0);
    match solve_mcf(&mcf) {
        Err(bimdf::Error::Unbounded(_)) => {}
        res => panic!("expected unbounded problem, got {:?}", res),
    }
}

#[test]
fn test_random_optimality() -> Result<(), Box<dyn Error>> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    for _ in 0..50 {
        let n = rng.gen_range(2..12);
        let mut mcf = Mcf::new();
        let mut total = 0;
        for u in 0..n {
            let b = if u + 1 < n { rng.gen_range(-5..=5) } else { -total };
            total += b;
            mcf.add_node(b);
        }
        // an expensive uncapacitated ring keeps the instance feasible
        for u in 0..n {
            mcf.add_arc(u, (u + 1) % n, 0, Mcf::INF, 100);
            mcf.add_arc((u + 1) % n, u, 0, Mcf::INF, 100);
        }
        for _ in 0..3 * n {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            if u == v {
                continue;
            }
            let lower = rng.gen_range(0..=1);
            mcf.add_arc(u, v, lower, lower + rng.gen_range(0..=4), rng.gen_range(0..=20));
        }

        let res = solve_mcf(&mcf)?;
        assert!(mcf.is_valid(&res.solution));
        assert!(!has_negative_cycle(&mcf, &res.solution));
    }
    Ok(())
}
