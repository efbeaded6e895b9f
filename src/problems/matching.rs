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

//! Maximum weight perfect matching problems.

use crate::graph::{Edge, Graph, Node};

/// Integral edge weight.
pub type Weight = i64;

/// A perfect matching instance with integral weights.
#[derive(Clone, Debug, Default)]
pub struct Matching {
    pub graph: Graph,
    pub weight: Vec<Weight>,
}

/// A perfect matching.
#[derive(Clone, Debug)]
pub struct MatchingResult {
    pub solution: Vec<bool>,
    pub weight: Weight,
}

impl Matching {
    pub fn new() -> Self {
        Matching::default()
    }

    pub fn add_node(&mut self) -> Node {
        self.graph.add_node()
    }

    pub fn add_edge(&mut self, u: Node, v: Node, weight: Weight) -> Edge {
        self.weight.push(weight);
        self.graph.add_edge(u, v)
    }

    /// Total weight of the selected edges.
    pub fn cost(&self, sol: &[bool]) -> Weight {
        self.graph.edges().filter(|&e| sol[e]).map(|e| self.weight[e]).sum()
    }

    /// Return `true` if every node is covered by exactly one selected edge.
    pub fn is_perfect(&self, sol: &[bool]) -> bool {
        if sol.len() != self.graph.num_edges() {
            return false;
        }
        let mut count = vec![0usize; self.graph.num_nodes()];
        for e in self.graph.edges().filter(|&e| sol[e]) {
            let (u, v) = self.graph.enodes(e);
            count[u] += 1;
            count[v] += 1;
        }
        count.iter().all(|&c| c == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect() {
        let mut m = Matching::new();
        let a = m.add_node();
        let b = m.add_node();
        let c = m.add_node();
        let d = m.add_node();
        m.add_edge(a, b, 3);
        m.add_edge(b, c, 5);
        m.add_edge(c, d, -1);
        assert!(m.is_perfect(&[true, false, true]));
        assert!(!m.is_perfect(&[false, true, false]));
        assert_eq!(m.cost(&[true, false, true]), 2);
    }
}
