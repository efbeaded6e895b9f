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


//! Exact improvement of a BiMDF solution within a small window.

use crate::config::{DeviationLimitKind, MatchingSolverKind};
use crate::error::Result;
use crate::graph::Flow;
use crate::matching::solve_matching;
use crate::problems::BiMdf;
use crate::reductions::{BMatchingToMatching, BiMcfToBMatching, BiMdfToBiMcf, BiMdfToBiMcfConfig};

/// An improved solution.
#[derive(Clone, Debug)]
pub struct RefinementResult {
    pub solution: Vec<Flow>,
    /// Cost of the new solution minus cost of the old one, at most 0.
    pub cost_change: f64,
}

/// Find the best solution that deviates from `f0` by at most
/// `max_deviation` units.
///
/// The difference to `f0` is a circulation, which is computed as a
/// maximum weight perfect matching. `f0` must be feasible.
///
/// # Example
///
/// ```
/// use bimdf::{BiMdf, CostFunction, EdgeInfo};
/// use bimdf::config::{DeviationLimitKind, MatchingSolverKind};
/// use bimdf::solvers::refine_with_matching;
///
/// let mut bimdf = BiMdf::new();
/// let a = bimdf.add_node(0);
/// let b = bimdf.add_node(0);
/// bimdf.add(EdgeInfo {
///     cost_function: CostFunction::abs_deviation(3.0, 1.0),
///     ..EdgeInfo::new(a, b, false, true)
/// });
/// bimdf.add(EdgeInfo {
///     cost_function: CostFunction::abs_deviation(2.0, 1.0),
///     ..EdgeInfo::new(b, a, false, true)
/// });
///
/// let res = refine_with_matching(
///     &bimdf,
///     &[0, 0],
///     2,
///     DeviationLimitKind::NodeThroughflow,
///     MatchingSolverKind::Blossom,
/// )
/// .unwrap();
/// assert_eq!(res.solution, vec![2, 2]);
/// assert_eq!(res.cost_change, -4.0);
/// ```
pub fn refine_with_matching(
    bimdf: &BiMdf,
    f0: &[Flow],
    max_deviation: Flow,
    deviation_limit: DeviationLimitKind,
    matching_solver: MatchingSolverKind,
) -> Result<RefinementResult> {
    // matching needs bounded capacities
    let red_bimcf = BiMdfToBiMcf::new(
        bimdf,
        f0,
        &BiMdfToBiMcfConfig {
            max_deviation,
            last_arc_uncapacitated: false,
            even: false,
            consolidate: true,
        },
    )?;
    let red_bmatching = BiMcfToBMatching::new(red_bimcf.bimcf(), max_deviation, deviation_limit)?;
    let red_matching = BMatchingToMatching::new(red_bmatching.bmatching())?;

    let sol_matching = solve_matching(red_matching.matching(), matching_solver)?;
    let sol_bmatching = red_matching.translate_solution(&sol_matching)?;
    let sol_bimcf = red_bmatching.translate_solution(&sol_bmatching)?;
    let sol_bimdf = red_bimcf.translate_solution(&sol_bimcf, false)?;

    // rounded matching weights may miss the exact optimum
    if sol_bimcf.cost > 0.0 {
        return Ok(RefinementResult {
            solution: f0.to_vec(),
            cost_change: 0.0,
        });
    }

    Ok(RefinementResult {
        solution: sol_bimdf.solution,
        cost_change: sol_bimcf.cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostFunction;
    use crate::problems::EdgeInfo;

    #[test]
    fn test_optimal_stays() {
        let mut bimdf = BiMdf::new();
        let a = bimdf.add_node(0);
        let b = bimdf.add_node(0);
        let c = bimdf.add_node(0);
        for &(u, v, target) in &[(a, b, 2.0), (b, c, 2.0), (c, a, 2.0)] {
            bimdf.add(EdgeInfo {
                cost_function: CostFunction::quad_deviation(target, 1.0),
                ..EdgeInfo::new(u, v, false, true)
            });
        }

        for &solver in &[MatchingSolverKind::Blossom, MatchingSolverKind::Bipartite] {
            for &limit in &[DeviationLimitKind::EdgeFlow, DeviationLimitKind::NodeThroughflow] {
                let res = refine_with_matching(&bimdf, &[2, 2, 2], 2, limit, solver).unwrap();
                assert_eq!(res.solution, vec![2, 2, 2]);
                assert_eq!(res.cost_change, 0.0);
            }
        }
    }

    #[test]
    fn test_window() {
        let mut bimdf = BiMdf::new();
        let a = bimdf.add_node(0);
        bimdf.add(EdgeInfo {
            cost_function: CostFunction::abs_deviation(6.0, 1.0),
            ..EdgeInfo::new(a, a, true, false)
        });

        let res = refine_with_matching(
            &bimdf,
            &[0],
            2,
            DeviationLimitKind::NodeThroughflow,
            MatchingSolverKind::Blossom,
        )
        .unwrap();
        assert_eq!(res.solution, vec![2]);
        assert_eq!(res.cost_change, -2.0);
    }
}
