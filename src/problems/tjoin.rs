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

//! T-join problems.

use crate::graph::Graph;

/// A T-join instance.
///
/// A solution is a set of edges whose odd-degree nodes are exactly the
/// nodes with `t[u] == true`.
#[derive(Clone, Debug)]
pub struct TJoin<'a> {
    pub graph: &'a Graph,
    pub t: Vec<bool>,
    pub cost: Vec<f64>,
}

/// A T-join solution.
#[derive(Clone, Debug)]
pub struct TJoinResult {
    pub solution: Vec<bool>,
    pub cost: f64,
}

impl<'a> TJoin<'a> {
    /// Return `true` if the odd-degree nodes of `sol` are exactly `t`.
    pub fn is_valid(&self, sol: &[bool]) -> bool {
        let mut odd = vec![false; self.graph.num_nodes()];
        for e in self.graph.edges().filter(|&e| sol[e]) {
            let (u, v) = self.graph.enodes(e);
            odd[u] = !odd[u];
            odd[v] = !odd[v];
        }
        odd == self.t
    }
}
