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

//! Perfect b-matching problems.

use crate::graph::{Edge, Flow, Graph, Node, INF};

/// A b-matching instance.
///
/// Every node `u` must be covered exactly `degree[u]` times, each edge
/// can be used up to `capacity` times. Self-loops cover their node
/// twice.
#[derive(Clone, Debug, Default)]
pub struct BMatching {
    pub graph: Graph,
    pub degree: Vec<Flow>,
    pub capacity: Vec<Flow>,
    pub weight: Vec<f64>,
}

/// A b-matching solution.
#[derive(Clone, Debug)]
pub struct BMatchingResult {
    pub solution: Vec<Flow>,
    pub weight: f64,
}

impl BMatching {
    /// The infinite capacity.
    pub const INF: Flow = INF;

    pub fn new() -> Self {
        BMatching::default()
    }

    pub fn add_node(&mut self, degree: Flow) -> Node {
        self.degree.push(degree);
        self.graph.add_node()
    }

    pub fn add_edge(&mut self, u: Node, v: Node, capacity: Flow, weight: f64) -> Edge {
        self.capacity.push(capacity);
        self.weight.push(weight);
        self.graph.add_edge(u, v)
    }

    /// Check that every node is covered exactly `degree` times.
    pub fn is_valid(&self, sol: &[Flow]) -> bool {
        if sol.len() != self.graph.num_edges() {
            return false;
        }
        let mut sum = vec![0i64; self.graph.num_nodes()];
        for e in self.graph.edges() {
            if sol[e] < 0 || sol[e] > self.capacity[e] {
                return false;
            }
            let (u, v) = self.graph.enodes(e);
            sum[u] += i64::from(sol[e]);
            sum[v] += i64::from(sol[e]);
        }
        self.graph.nodes().all(|u| sum[u] == i64::from(self.degree[u]))
    }

    pub fn weight_of(&self, sol: &[Flow]) -> f64 {
        self.graph.edges().map(|e| self.weight[e] * f64::from(sol[e])).sum()
    }
}
