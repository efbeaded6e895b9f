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


mod common;

use std::error::Error;

use bimdf::config::{DeviationLimitKind, MatchingSolverKind};
use bimdf::reductions::{ConnectedComponents, Simplification};
use bimdf::solvers::refine_with_matching;
use bimdf::{BiMdf, BiMdfResult, CostFunction, EdgeInfo};

use common::{brute_force, random_bimdf, rng};

#[test]
fn test_components() -> Result<(), Box<dyn Error>> {
    let mut bimdf = BiMdf::new();
    let a = bimdf.add_node(0);
    let b = bimdf.add_node(0);
    let c = bimdf.add_node(0);
    let d = bimdf.add_node(0);
    bimdf.add(EdgeInfo::new(c, d, false, true));
    bimdf.add(EdgeInfo::new(a, b, false, true));
    bimdf.add(EdgeInfo::new(d, c, false, true));
    bimdf.add(EdgeInfo::new(b, a, false, true));

    let cc = ConnectedComponents::new(&bimdf);
    assert_eq!(cc.num_components(), 2);
    assert_eq!(cc.node_component[a], cc.node_component[b]);
    assert_eq!(cc.node_component[c], cc.node_component[d]);
    assert_ne!(cc.node_component[a], cc.node_component[c]);
    for comp in cc.components() {
        assert_eq!((comp.num_nodes(), comp.num_edges()), (2, 2));
    }

    let results: Vec<_> = cc
        .components()
        .iter()
        .enumerate()
        .map(|(i, comp)| BiMdfResult {
            solution: vec![i as i32 + 1; comp.num_edges()],
            cost: 1.0,
        })
        .collect();
    let res = cc.translate_solutions(&results)?;
    assert_eq!(res.cost, 2.0);
    assert_eq!(res.solution[0], res.solution[2]);
    assert_eq!(res.solution[1], res.solution[3]);
    assert_ne!(res.solution[0], res.solution[1]);
    Ok(())
}

#[test]
fn test_components_wrong_count() {
    let mut bimdf = BiMdf::new();
    bimdf.add_node(0);
    bimdf.add_node(0);
    let cc = ConnectedComponents::new(&bimdf);
    assert_eq!(cc.num_components(), 2);
    assert!(cc.translate_solutions(&[]).is_err());
}

#[test]
fn test_simplified_chain_costs() -> Result<(), Box<dyn Error>> {
    // a -> x -> y -> a, only one node survives
    let mut bimdf = BiMdf::new();
    let a = bimdf.add_node(0);
    let x = bimdf.add_node(0);
    let y = bimdf.add_node(0);
    for &(u, v, target) in &[(a, x, 1.0), (x, y, 2.0), (y, a, 6.0)] {
        bimdf.add(EdgeInfo {
            cost_function: CostFunction::abs_deviation(target, 1.0),
            upper: 8,
            ..EdgeInfo::new(u, v, false, true)
        });
    }

    let simp = Simplification::new(&bimdf)?;
    assert_eq!(simp.num_collapsed_nodes(), 2);
    let simplified = simp.simplified();
    assert_eq!((simplified.num_nodes(), simplified.num_edges()), (1, 1));
    assert_eq!(simplified.evaluate(0, 2), bimdf.total_cost(&[2, 2, 2]));

    let (cost, sol) = brute_force(simplified).ok_or("simplified problem is infeasible")?;
    assert_eq!(cost, 5.0);
    let res = simp.translate_solution(&BiMdfResult { solution: sol, cost })?;
    assert_eq!(bimdf.total_cost(&res.solution), 5.0);
    Ok(())
}

#[test]
fn test_simplification_preserves_optimum() -> Result<(), Box<dyn Error>> {
    common::init_logger();
    let mut rng = rng(7);
    for _ in 0..40 {
        let bimdf = random_bimdf(&mut rng, 5, 6);
        let (opt, _) = brute_force(&bimdf).ok_or("random circulation is infeasible")?;

        let cc = ConnectedComponents::new(&bimdf);
        let mut results = vec![];
        for comp in cc.components() {
            let simp = Simplification::new(comp)?;
            let (cost, solution) = brute_force(simp.simplified()).ok_or("component is infeasible")?;
            results.push(simp.translate_solution(&BiMdfResult { solution, cost })?);
        }
        let res = cc.translate_solutions(&results)?;
        assert!(bimdf.is_valid(&res.solution));
        assert!((res.cost - opt).abs() < 1e-9, "{} != {}", res.cost, opt);
        assert!((bimdf.total_cost(&res.solution) - opt).abs() < 1e-9);
    }
    Ok(())
}

#[test]
fn test_matching_chain_is_exact() -> Result<(), Box<dyn Error>> {
    // With a window covering all bounds the refinement from the zero flow
    // finds a global optimum.
    common::init_logger();
    let mut rng = rng(11);
    for _ in 0..30 {
        let bimdf = random_bimdf(&mut rng, 4, 5);
        let (opt, _) = brute_force(&bimdf).ok_or("random circulation is infeasible")?;

        let f0 = vec![0; bimdf.num_edges()];
        let res = refine_with_matching(
            &bimdf,
            &f0,
            4,
            DeviationLimitKind::EdgeFlow,
            MatchingSolverKind::Blossom,
        )?;
        assert!(bimdf.is_valid(&res.solution));
        let cost = bimdf.total_cost(&res.solution);
        assert!((cost - opt).abs() < 1e-6, "{} != {}", cost, opt);
        assert!((bimdf.total_cost(&f0) + res.cost_change - cost).abs() < 1e-6);
    }
    Ok(())
}
