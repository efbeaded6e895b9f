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

//! Directed minimum cost flow problems.

use crate::graph::{Digraph, Edge, Node};

/// Flow and cost scalar of directed problems.
pub type Scalar = i64;

/// A min-cost-flow instance.
///
/// Supplies are positive at nodes where flow leaves the network and
/// negative where it must arrive.
#[derive(Clone, Debug, Default)]
pub struct Mcf {
    pub graph: Digraph,
    pub supply: Vec<Scalar>,
    pub lower: Vec<Scalar>,
    pub upper: Vec<Scalar>,
    pub cost: Vec<Scalar>,
}

/// A min-cost-flow solution.
#[derive(Clone, Debug)]
pub struct McfResult {
    pub solution: Vec<Scalar>,
    pub cost: Scalar,
}

impl Mcf {
    /// The infinite capacity.
    pub const INF: Scalar = Scalar::MAX;

    pub fn new() -> Self {
        Mcf::default()
    }

    pub fn add_node(&mut self, supply: Scalar) -> Node {
        self.supply.push(supply);
        self.graph.add_node()
    }

    pub fn add_arc(&mut self, src: Node, snk: Node, lower: Scalar, upper: Scalar, cost: Scalar) -> Edge {
        self.lower.push(lower);
        self.upper.push(upper);
        self.cost.push(cost);
        self.graph.add_arc(src, snk)
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.num_edges()
    }

    pub fn compute_cost(&self, sol: &[Scalar]) -> Scalar {
        self.graph.edges().map(|a| self.cost[a] * sol[a]).sum()
    }

    /// Check bounds and flow conservation.
    pub fn is_valid(&self, sol: &[Scalar]) -> bool {
        if sol.len() != self.num_edges() {
            return false;
        }
        let mut excess = self.supply.clone();
        for a in self.graph.edges() {
            if sol[a] < self.lower[a] || sol[a] > self.upper[a] {
                return false;
            }
            excess[self.graph.src(a)] -= sol[a];
            excess[self.graph.snk(a)] += sol[a];
        }
        excess.iter().all(|&x| x == 0)
    }
}
