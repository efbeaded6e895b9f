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


//! Complete BiMDF solver.
//!
//! The problem is split into its connected components, chains of
//! nodes are collapsed and each remaining problem is approximated by
//! the double cover and then refined with matchings.

use crate::config::SolverConfig;
use crate::error::{Error, Result};
use crate::graph::Flow;
use crate::problems::{BiMdf, BiMdfResult};
use crate::reductions::{ConnectedComponents, Simplification};
use crate::solvers::doublecover::{approximate_bimdf_doublecover, DoubleCoverInfo};
use crate::solvers::refinement::refine_with_matching;

use log::{debug, info, trace};
use time::OffsetDateTime;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Cost changes below this value are improvements.
const IMPROVEMENT_EPS: f64 = -1e-20;

/// Statistics of the matching refinement.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct MatchingInfo {
    /// Cost of the final solution.
    pub cost: f64,
    /// Cost change of every refinement step, including the last
    /// non-improving one of each window.
    pub cost_changes: Vec<f64>,
    /// Largest change of an edge flow relative to the double cover
    /// solution.
    pub max_refinement_change: Flow,
    /// Wall clock time of all refinement steps in seconds.
    pub time: f64,
}

/// Solution of [`solve_bimdf_matching`].
#[derive(Clone, Debug)]
pub struct MatchingSolveResult {
    pub result: BiMdfResult,
    pub double_cover: DoubleCoverInfo,
    pub info: MatchingInfo,
}

/// Statistics of a single connected component.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ComponentInfo {
    pub n_nodes: usize,
    pub n_edges: usize,
    /// Number of nodes removed by the simplification.
    pub n_collapsed_nodes: usize,
    pub double_cover: DoubleCoverInfo,
    pub matching: MatchingInfo,
}

/// Wall clock times of [`solve_bimdf`] in seconds.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SolveTiming {
    pub components: f64,
    pub simplification: f64,
    pub total: f64,
}

/// Solution of [`solve_bimdf`].
#[derive(Clone, Debug)]
pub struct SolveResult {
    pub solution: Vec<Flow>,
    pub cost: f64,
    pub components: Vec<ComponentInfo>,
    pub timing: SolveTiming,
}

fn seconds_since(start: OffsetDateTime) -> f64 {
    (OffsetDateTime::now_utc() - start).as_seconds_f64()
}

/// Solve a BiMDF by double cover approximation and refinement.
///
/// The refinement is repeated for every deviation window between
/// `refinement_maxdev_min` and `refinement_maxdev_max` until it does
/// not improve the solution anymore.
pub fn solve_bimdf_matching(bimdf: &BiMdf, config: &SolverConfig) -> Result<MatchingSolveResult> {
    let dc = approximate_bimdf_doublecover(bimdf, &config.double_cover)?;
    if config.verbosity >= 3 {
        trace!(
            "double cover approximation: cost = {}, max dev {}",
            dc.info.cost,
            dc.info.max_deviation_solution
        );
    }

    if !config.refine_with_matching {
        let cost = dc.info.cost;
        return Ok(MatchingSolveResult {
            result: BiMdfResult {
                solution: dc.solution,
                cost,
            },
            double_cover: dc.info,
            info: MatchingInfo {
                cost,
                ..MatchingInfo::default()
            },
        });
    }

    let start = OffsetDateTime::now_utc();
    let mut sol = dc.solution.clone();
    let mut cost_changes = vec![];
    for maxdev in config.refinement_maxdev_min..=config.refinement_maxdev_max {
        let first = cost_changes.len();
        loop {
            let res = refine_with_matching(bimdf, &sol, maxdev, config.deviation_limit, config.matching_solver)?;
            cost_changes.push(res.cost_change);
            if res.cost_change > IMPROVEMENT_EPS {
                break;
            }
            sol = res.solution;
        }
        if config.verbosity >= 1 {
            info!(
                "refinement max deviation = {}: cost changes {:?}",
                maxdev,
                &cost_changes[first..]
            );
        }
    }
    let time = seconds_since(start);

    let max_refinement_change = sol
        .iter()
        .zip(&dc.solution)
        .map(|(&x, &y)| (i64::from(x) - i64::from(y)).abs())
        .max()
        .unwrap_or(0);
    if config.verbosity >= 3 {
        trace!("maximal edge change in refinement: {}", max_refinement_change);
    }

    if !bimdf.is_valid(&sol) {
        return Err(Error::internal("refinement result infeasible"));
    }
    let cost = bimdf.total_cost(&sol);

    Ok(MatchingSolveResult {
        result: BiMdfResult { solution: sol, cost },
        double_cover: dc.info,
        info: MatchingInfo {
            cost,
            cost_changes,
            max_refinement_change: max_refinement_change.min(i64::from(Flow::MAX)) as Flow,
            time,
        },
    })
}

/// Solve a BiMDF.
///
/// This is the main entry point. Every connected component is
/// simplified and solved on its own by [`solve_bimdf_matching`].
///
/// # Example
///
/// ```
/// use bimdf::{solve_bimdf, BiMdf, CostFunction, EdgeInfo, SolverConfig};
///
/// let mut bimdf = BiMdf::new();
/// let a = bimdf.add_node(0);
/// let b = bimdf.add_node(0);
/// let c = bimdf.add_node(0);
/// // a cycle with one tail-tail and one head-head edge
/// bimdf.add(EdgeInfo {
///     cost_function: CostFunction::abs_deviation(2.0, 1.0),
///     ..EdgeInfo::new(a, b, false, false)
/// });
/// bimdf.add(EdgeInfo {
///     cost_function: CostFunction::abs_deviation(3.0, 1.0),
///     ..EdgeInfo::new(b, c, true, false)
/// });
/// bimdf.add(EdgeInfo {
///     cost_function: CostFunction::abs_deviation(3.0, 2.0),
///     ..EdgeInfo::new(c, a, true, true)
/// });
///
/// let config = SolverConfig {
///     verbosity: 0,
///     ..SolverConfig::default()
/// };
/// let res = solve_bimdf(&bimdf, &config).unwrap();
/// assert!(bimdf.is_valid(&res.solution));
/// assert_eq!(res.solution, vec![3, 3, 3]);
/// assert_eq!(res.cost, 1.0);
/// ```
pub fn solve_bimdf(bimdf: &BiMdf, config: &SolverConfig) -> Result<SolveResult> {
    let start = OffsetDateTime::now_utc();

    let cc = ConnectedComponents::new(bimdf);
    let mut timing = SolveTiming {
        components: seconds_since(start),
        ..SolveTiming::default()
    };
    if config.verbosity >= 2 {
        debug!("{} connected components", cc.num_components());
    }

    let mut results = Vec::with_capacity(cc.num_components());
    let mut components = Vec::with_capacity(cc.num_components());
    for sub in cc.components() {
        let simp_start = OffsetDateTime::now_utc();
        let simp = Simplification::new(sub)?;
        timing.simplification += seconds_since(simp_start);
        if config.verbosity >= 2 {
            debug!(
                "component with {} nodes and {} edges, {} nodes collapsed",
                sub.num_nodes(),
                sub.num_edges(),
                simp.num_collapsed_nodes()
            );
        }

        let simp_sol = solve_bimdf_matching(simp.simplified(), config)?;
        if config.verbosity >= 3 {
            trace!("simplified component, cost = {}", simp_sol.result.cost);
        }

        let simp_start = OffsetDateTime::now_utc();
        results.push(simp.translate_solution(&simp_sol.result)?);
        timing.simplification += seconds_since(simp_start);

        components.push(ComponentInfo {
            n_nodes: sub.num_nodes(),
            n_edges: sub.num_edges(),
            n_collapsed_nodes: simp.num_collapsed_nodes(),
            double_cover: simp_sol.double_cover,
            matching: simp_sol.info,
        });
    }

    let cc_start = OffsetDateTime::now_utc();
    let result = cc.translate_solutions(&results)?;
    timing.components += seconds_since(cc_start);

    if config.verbosity >= 1 {
        info!("solved BiMDF, cost = {}", result.cost);
    }
    timing.total = seconds_since(start);

    Ok(SolveResult {
        solution: result.solution,
        cost: result.cost,
        components,
        timing,
    })
}
