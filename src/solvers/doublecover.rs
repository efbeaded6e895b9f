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


//! Approximation of a BiMDF by a double cover min-cost flow.

use crate::config::DoubleCoverConfig;
use crate::error::{Error, Result};
use crate::graph::Flow;
use crate::mcf::solve_mcf;
use crate::problems::BiMdf;
use crate::reductions::{BiMcfToMcf, BiMdfToBiMcf, BiMdfToBiMcfConfig};
use crate::solvers::evening::even_guess;

use log::debug;
use time::OffsetDateTime;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Statistics of a double cover approximation.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct DoubleCoverInfo {
    pub evening_cost: f64,
    pub evening_n_adjustments: usize,
    pub evening_n_bound_adjustments: usize,
    /// Cost of the approximate solution.
    pub cost: f64,
    /// The configured deviation window.
    pub max_deviation_problem: Flow,
    /// Largest flow on any linearized edge in the solution.
    pub max_deviation_solution: Flow,
    /// Wall clock time in seconds.
    pub time: f64,
}

/// An approximate BiMDF solution.
#[derive(Clone, Debug)]
pub struct DoubleCoverResult {
    pub solution: Vec<Flow>,
    pub info: DoubleCoverInfo,
}

/// Compute a feasible BiMDF solution via the double cover.
///
/// The guess is made even, the costs are linearized around it in
/// windows of two units and the resulting BiMCF is solved as min-cost
/// flow on the double cover.
///
/// # Example
///
/// ```
/// use bimdf::{BiMdf, CostFunction, EdgeInfo};
/// use bimdf::config::DoubleCoverConfig;
/// use bimdf::solvers::approximate_bimdf_doublecover;
///
/// let mut bimdf = BiMdf::new();
/// let a = bimdf.add_node(0);
/// let b = bimdf.add_node(0);
/// bimdf.add(EdgeInfo {
///     cost_function: CostFunction::abs_deviation(3.0, 1.0),
///     ..EdgeInfo::new(a, b, false, true)
/// });
/// bimdf.add(EdgeInfo {
///     cost_function: CostFunction::abs_deviation(5.0, 2.0),
///     ..EdgeInfo::new(b, a, false, true)
/// });
///
/// let res = approximate_bimdf_doublecover(&bimdf, &DoubleCoverConfig::default()).unwrap();
/// assert!(bimdf.is_valid(&res.solution));
/// assert_eq!(res.solution, vec![5, 5]);
/// assert_eq!(res.info.cost, 2.0);
/// ```
pub fn approximate_bimdf_doublecover(bimdf: &BiMdf, config: &DoubleCoverConfig) -> Result<DoubleCoverResult> {
    let start = OffsetDateTime::now_utc();

    let evening = even_guess(bimdf, config.evening_mode, config.verbosity)?;

    let red_bimcf = BiMdfToBiMcf::new(
        bimdf,
        &evening.solution,
        &BiMdfToBiMcfConfig {
            max_deviation: config.max_deviation,
            last_arc_uncapacitated: true,
            even: true,
            consolidate: true,
        },
    )?;
    let red_mcf = BiMcfToMcf::new(red_bimcf.bimcf(), config.method)?;

    let sol_mcf = solve_mcf(red_mcf.mcf())?;
    let sol_bimcf = red_mcf.translate_solution(&sol_mcf)?;
    let sol_bimdf = red_bimcf.translate_solution(&sol_bimcf, false)?;
    if !bimdf.is_valid(&sol_bimdf.solution) {
        return Err(Error::internal("approximation result infeasible"));
    }

    let info = DoubleCoverInfo {
        evening_cost: evening.cost,
        evening_n_adjustments: evening.n_adjustments,
        evening_n_bound_adjustments: evening.n_bound_adjustments,
        cost: sol_bimdf.cost,
        max_deviation_problem: config.max_deviation,
        max_deviation_solution: sol_bimcf.max_flow,
        time: (OffsetDateTime::now_utc() - start).as_seconds_f64(),
    };
    if config.verbosity >= 2 {
        debug!(
            "double cover: cost {}, deviation {} of {}",
            info.cost, info.max_deviation_solution, info.max_deviation_problem
        );
    }

    Ok(DoubleCoverResult {
        solution: sol_bimdf.solution,
        info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DoubleCoverMethod, EveningMode};
    use crate::cost::CostFunction;
    use crate::problems::EdgeInfo;

    #[test]
    fn test_methods() {
        // a bidirected triangle with two tails at one edge
        let mut bimdf = BiMdf::new();
        let a = bimdf.add_node(0);
        let b = bimdf.add_node(0);
        let c = bimdf.add_node(0);
        bimdf.add(EdgeInfo {
            cost_function: CostFunction::quad_deviation(3.0, 1.0),
            ..EdgeInfo::new(a, b, false, false)
        });
        bimdf.add(EdgeInfo {
            cost_function: CostFunction::quad_deviation(3.0, 1.0),
            ..EdgeInfo::new(b, c, true, false)
        });
        bimdf.add(EdgeInfo {
            cost_function: CostFunction::quad_deviation(3.0, 1.0),
            ..EdgeInfo::new(c, a, true, true)
        });

        for &method in &[
            DoubleCoverMethod::HalfSymmetric,
            DoubleCoverMethod::HalfAsymmetric,
            DoubleCoverMethod::FullSymmetric,
        ] {
            for &evening_mode in &[EveningMode::Mst, EveningMode::RoundToEven] {
                let config = DoubleCoverConfig {
                    method,
                    evening_mode,
                    verbosity: 0,
                    ..DoubleCoverConfig::default()
                };
                let res = approximate_bimdf_doublecover(&bimdf, &config).unwrap();
                assert!(bimdf.is_valid(&res.solution));
                assert_eq!(res.info.cost, bimdf.total_cost(&res.solution));
                assert_eq!(res.info.max_deviation_problem, 5);
            }
        }
    }
}
