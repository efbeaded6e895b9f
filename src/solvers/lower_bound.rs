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


//! Lower bounds from the half-integral relaxation.

use crate::config::DoubleCoverMethod;
use crate::error::{Error, Result};
use crate::graph::Flow;
use crate::mcf::solve_mcf;
use crate::problems::BiMdf;
use crate::reductions::{BiMcfToMcf, BiMdfToBiMcf, BiMdfToBiMcfConfig};
use crate::solvers::guess::make_guess;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A lower bound on the optimal BiMDF cost.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct LowerBoundResult {
    pub cost: f64,
    /// Largest linearized flow in the final relaxation.
    pub max_deviation: Flow,
}

/// Compute a lower bound by solving the relaxation that allows
/// half-integral flows.
///
/// The costs are linearized around the unconstrained guess. The window
/// starts at `initial_maxdev` and is doubled until the integral
/// min-cost-flow cost no longer changes.
///
/// # Example
///
/// ```
/// use bimdf::{BiMdf, CostFunction, EdgeInfo};
/// use bimdf::solvers::bimdf_lower_bound;
///
/// // a single odd cycle of tail-tail, head-head and directed edges
/// let mut bimdf = BiMdf::new();
/// let a = bimdf.add_node(0);
/// let b = bimdf.add_node(0);
/// let c = bimdf.add_node(0);
/// for &(u, v, uh, vh) in &[(a, b, false, false), (b, c, true, false), (c, a, true, true)] {
///     bimdf.add(EdgeInfo {
///         cost_function: CostFunction::abs_deviation(1.0, 1.0),
///         ..EdgeInfo::new(u, v, uh, vh)
///     });
/// }
///
/// let lb = bimdf_lower_bound(&bimdf, 2).unwrap();
/// assert_eq!(lb.cost, 0.0);
/// ```
pub fn bimdf_lower_bound(bimdf: &BiMdf, initial_maxdev: Flow) -> Result<LowerBoundResult> {
    if initial_maxdev <= 1 {
        return Err(Error::internal("initial deviation window must be larger than 1"));
    }
    let guess = make_guess(bimdf);

    let mut max_dev = initial_maxdev;
    let mut best_cost = None;
    loop {
        let red_bimcf = BiMdfToBiMcf::new(
            bimdf,
            &guess,
            &BiMdfToBiMcfConfig {
                max_deviation: max_dev,
                last_arc_uncapacitated: true,
                even: false,
                consolidate: true,
            },
        )?;
        let red_mcf = BiMcfToMcf::new(red_bimcf.bimcf(), DoubleCoverMethod::NotEven)?;

        let sol_mcf = solve_mcf(red_mcf.mcf())?;
        let sol_bimcf = red_mcf.translate_solution(&sol_mcf)?;
        let sol_bimdf = red_bimcf.translate_solution(&sol_bimcf, true)?;

        if best_cost == Some(sol_mcf.cost) {
            return Ok(LowerBoundResult {
                cost: sol_bimdf.cost,
                max_deviation: sol_bimcf.max_flow,
            });
        }
        best_cost = Some(sol_mcf.cost);
        max_dev = max_dev
            .checked_mul(2)
            .ok_or_else(|| Error::internal("deviation window of the lower bound overflows"))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostFunction;
    use crate::problems::EdgeInfo;

    #[test]
    fn test_far_target() {
        let mut bimdf = BiMdf::new();
        let a = bimdf.add_node(0);
        let b = bimdf.add_node(0);
        bimdf.add(EdgeInfo {
            cost_function: CostFunction::quad_deviation(40.0, 1.0),
            ..EdgeInfo::new(a, b, false, true)
        });
        bimdf.add(EdgeInfo {
            cost_function: CostFunction::quad_deviation(0.0, 1.0),
            ..EdgeInfo::new(b, a, false, true)
        });

        let lb = bimdf_lower_bound(&bimdf, 2).unwrap();
        assert!(lb.cost <= 800.0 + 1e-9);
        assert!(lb.cost > 0.0);
    }

    #[test]
    fn test_window_too_small() {
        let bimdf = BiMdf::new();
        assert!(bimdf_lower_bound(&bimdf, 1).is_err());
        assert_eq!(bimdf_lower_bound(&bimdf, 2).unwrap().cost, 0.0);
    }
}
