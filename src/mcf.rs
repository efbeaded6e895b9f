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

//! Minimum Cost Flow algorithms.

pub mod simplex;
pub use simplex::NetworkSimplex;

use crate::error::{Error, Result};
use crate::problems::{Mcf, McfResult};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SolutionState {
    /// The problem has been solved to optimality
    Optimal,
    /// The problem is infeasible
    Infeasible,
    /// The problem is unbounded
    Unbounded,
}

/// Solve a min-cost-flow instance with the network simplex.
///
/// Returns an optimal integral flow. Upper bounds equal to `Mcf::INF`
/// are unbounded.
///
/// # Example
///
/// ```
/// use bimdf::mcf::solve_mcf;
/// use bimdf::problems::Mcf;
///
/// let mut mcf = Mcf::new();
/// let s = mcf.add_node(2);
/// let t = mcf.add_node(-2);
/// mcf.add_arc(s, t, 0, 1, 1);
/// mcf.add_arc(s, t, 0, Mcf::INF, 3);
///
/// let res = solve_mcf(&mcf).unwrap();
/// assert_eq!(res.solution, vec![1, 1]);
/// assert_eq!(res.cost, 4);
/// ```
pub fn solve_mcf(mcf: &Mcf) -> Result<McfResult> {
    let mut spx = NetworkSimplex::new(mcf);
    match spx.solve() {
        SolutionState::Optimal => {
            let solution = spx.flows();
            let cost = mcf.compute_cost(&solution);
            if !mcf.is_valid(&solution) {
                return Err(Error::internal("network simplex returned an invalid flow"));
            }
            Ok(McfResult { solution, cost })
        }
        SolutionState::Infeasible => Err(Error::Infeasible("min-cost-flow problem has no feasible flow".into())),
        SolutionState::Unbounded => Err(Error::Unbounded("min-cost-flow problem has a negative cycle".into())),
    }
}
