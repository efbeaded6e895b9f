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


//! Making a guess flow even.
//!
//! The double cover reduction needs an even demand at every node of
//! the linearized problem, i.e. the signed flow of the guess minus the
//! node demand must be even everywhere.

use crate::config::EveningMode;
use crate::error::{Error, Result};
use crate::graph::{Edge, Flow, Graph};
use crate::problems::{BiMdf, TJoin};
use crate::solvers::tjoin::solve_tjoin_mst;

use log::debug;
use num_integer::Integer;

/// An even guess.
#[derive(Clone, Debug)]
pub struct EveningResult {
    /// The guess, within the bounds of every edge.
    pub solution: Vec<Flow>,
    /// Cost increase caused by the parity adjustments.
    pub cost: f64,
    /// Number of edges changed by one unit.
    pub n_adjustments: usize,
    /// Number of edges whose rounded guess was clamped to a bound.
    pub n_bound_adjustments: usize,
}

/// Compute an even guess with the given method.
pub fn even_guess(bimdf: &BiMdf, mode: EveningMode, verbosity: u32) -> Result<EveningResult> {
    let result = match mode {
        EveningMode::Mst => even_by_tjoin(bimdf)?,
        EveningMode::RoundToEven => round_to_even(bimdf)?,
    };
    if verbosity >= 2 {
        debug!(
            "performed {} adjustments for even rhs ({} bound adjustments, cost {})",
            result.n_adjustments, result.n_bound_adjustments, result.cost
        );
    }
    Ok(result)
}

/// Round the guess of `e` and clamp it to the bounds.
///
/// Returns the value and whether it had to be clamped.
fn rounded_guess(bimdf: &BiMdf, e: Edge) -> (i64, bool) {
    let x = bimdf.guess(e).round() as i64;
    let lower = i64::from(bimdf.lower(e));
    let upper = i64::from(bimdf.upper(e));
    if x < lower {
        (lower, true)
    } else if x > upper {
        (upper, true)
    } else {
        (x, false)
    }
}

/// The cheaper of `x - 1` and `x + 1` within the bounds of `e`.
///
/// Returns the new value and the change in cost.
fn best_adjustment(bimdf: &BiMdf, e: Edge, x: i64) -> Option<(i64, f64)> {
    let lower = i64::from(bimdf.lower(e));
    let upper = i64::from(bimdf.upper(e));
    let base = bimdf.cost(e).evaluate(x as f64);
    let mut best: Option<(i64, f64)> = None;
    for &y in &[x - 1, x + 1] {
        if y < lower || y > upper {
            continue;
        }
        let change = bimdf.cost(e).evaluate(y as f64) - base;
        if best.map_or(true, |(_, c)| change < c) {
            best = Some((y, change));
        }
    }
    best
}

/// Return the first node whose linearized demand would be odd.
fn odd_node(bimdf: &BiMdf, guess: &[Flow]) -> Option<usize> {
    bimdf.apply_flow(guess).iter().position(|r| r.is_odd())
}

/// Fix all parities with a T-join on the non-fixed edges.
///
/// Each edge starts at its rounded guess. The T-join selects the edges
/// moved by one unit, each with the cost of its best adjustment.
/// Fails with `Error::Infeasible` if some part of the graph connected
/// by non-fixed edges has odd total parity.
pub fn even_by_tjoin(bimdf: &BiMdf) -> Result<EveningResult> {
    let mut solution = Vec::with_capacity(bimdf.num_edges());
    let mut n_bound_adjustments = 0;
    let mut graph = Graph::with_nodes(bimdf.num_nodes());
    let mut cost = vec![];
    let mut adjusted = vec![];
    let mut mdf_edge = vec![];

    for e in bimdf.edges() {
        let (x, clamped) = rounded_guess(bimdf, e);
        if clamped {
            n_bound_adjustments += 1;
        }
        solution.push(x as Flow);
        if bimdf.u(e) == bimdf.v(e) {
            // changes the parity of its node twice
            continue;
        }
        if let Some((y, change)) = best_adjustment(bimdf, e, x) {
            graph.add_edge(bimdf.u(e), bimdf.v(e));
            cost.push(change);
            adjusted.push(y as Flow);
            mdf_edge.push(e);
        }
    }

    let t = bimdf.apply_flow(&solution).iter().map(|r| r.is_odd()).collect();
    let tjoin = TJoin {
        graph: &graph,
        t,
        cost,
    };
    let res = solve_tjoin_mst(&tjoin)?;

    let mut n_adjustments = 0;
    for te in graph.edges().filter(|&te| res.solution[te]) {
        solution[mdf_edge[te]] = adjusted[te];
        n_adjustments += 1;
    }

    if let Some(u) = odd_node(bimdf, &solution) {
        return Err(Error::internal(format!("node {} is still odd after evening", u)));
    }

    Ok(EveningResult {
        solution,
        cost: res.cost,
        n_adjustments,
        n_bound_adjustments,
    })
}

/// Round every edge to an even value on its own.
///
/// Fails with `Error::Internal` if an edge admits no even value next to
/// its guess or if some node demand is odd.
pub fn round_to_even(bimdf: &BiMdf) -> Result<EveningResult> {
    let mut solution = Vec::with_capacity(bimdf.num_edges());
    let mut cost = 0.0;
    let mut n_adjustments = 0;
    let mut n_bound_adjustments = 0;

    for e in bimdf.edges() {
        let (mut x, clamped) = rounded_guess(bimdf, e);
        if clamped {
            n_bound_adjustments += 1;
        }
        if x.is_odd() {
            let (y, change) = best_adjustment(bimdf, e, x).ok_or_else(|| {
                Error::internal(format!(
                    "no even value for edge {} with lower = {}, upper = {}, guess = {}",
                    e,
                    bimdf.lower(e),
                    bimdf.upper(e),
                    x
                ))
            })?;
            x = y;
            cost += change;
            n_adjustments += 1;
        }
        solution.push(x as Flow);
    }

    if let Some(u) = odd_node(bimdf, &solution) {
        return Err(Error::internal(format!("node {} has an odd demand", u)));
    }

    Ok(EveningResult {
        solution,
        cost,
        n_adjustments,
        n_bound_adjustments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostFunction;
    use crate::problems::EdgeInfo;

    fn cycle() -> BiMdf {
        let mut bimdf = BiMdf::new();
        let a = bimdf.add_node(0);
        let b = bimdf.add_node(0);
        let c = bimdf.add_node(0);
        for &(u, v, target) in &[(a, b, 1.0), (b, c, 0.0), (c, a, 0.0)] {
            bimdf.add(EdgeInfo {
                cost_function: CostFunction::abs_deviation(target, 1.0),
                ..EdgeInfo::new(u, v, false, true)
            });
        }
        bimdf
    }

    #[test]
    fn test_tjoin() {
        let bimdf = cycle();
        let res = even_by_tjoin(&bimdf).unwrap();
        assert_eq!(res.solution, vec![0, 0, 0]);
        assert_eq!(res.cost, 1.0);
        assert_eq!(res.n_adjustments, 1);
        assert_eq!(res.n_bound_adjustments, 0);
    }

    #[test]
    fn test_round_to_even() {
        let bimdf = cycle();
        let res = round_to_even(&bimdf).unwrap();
        assert_eq!(res.solution, vec![0, 0, 0]);
        assert_eq!(res.n_adjustments, 1);
        assert!(res.solution.iter().all(|x| x % 2 == 0));
    }

    #[test]
    fn test_fixed_edges() {
        let mut bimdf = BiMdf::new();
        let a = bimdf.add_node(0);
        let b = bimdf.add_node(0);
        bimdf.add(EdgeInfo {
            lower: 1,
            upper: 1,
            ..EdgeInfo::new(a, b, false, true)
        });
        assert!(even_by_tjoin(&bimdf).unwrap_err().is_infeasible());
        match round_to_even(&bimdf) {
            Err(Error::Internal(_)) => (),
            res => panic!("unexpected result {:?}", res),
        }
    }

    #[test]
    fn test_demand() {
        let mut bimdf = BiMdf::new();
        let a = bimdf.add_node(1);
        let b = bimdf.add_node(-1);
        bimdf.add(EdgeInfo {
            cost_function: CostFunction::quad_deviation(4.0, 1.0),
            ..EdgeInfo::new(a, b, true, false)
        });
        bimdf.add(EdgeInfo {
            cost_function: CostFunction::abs_deviation(-2.0, 1.0),
            upper: 3,
            ..EdgeInfo::new(a, b, true, false)
        });

        let res = even_guess(&bimdf, EveningMode::Mst, 0).unwrap();
        assert_eq!(res.n_bound_adjustments, 1);
        assert_eq!(res.n_adjustments, 1);
        assert_eq!(res.solution, vec![3, 0]);
        assert!(bimdf.apply_flow(&res.solution).iter().all(|r| r % 2 == 0));
    }
}
