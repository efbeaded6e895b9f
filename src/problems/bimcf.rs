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

//! Bidirected minimum cost flow problems.

use crate::graph::{Flow, FlowGraph};

/// A bidirected flow graph with a linear cost per unit of flow.
pub type BiMcf = FlowGraph<f64>;

/// A BiMCF solution.
#[derive(Clone, Debug)]
pub struct BiMcfResult {
    pub solution: Vec<Flow>,
    pub cost: f64,
    /// The largest flow value on any edge.
    pub max_flow: Flow,
}

impl FlowGraph<f64> {
    pub fn compute_cost(&self, sol: &[Flow]) -> f64 {
        self.edges().map(|e| *self.cost(e) * f64::from(sol[e])).sum()
    }
}

/// Return the largest entry of a solution, at least 0.
pub(crate) fn max_flow(sol: &[Flow]) -> Flow {
    sol.iter().copied().fold(0, Flow::max)
}
