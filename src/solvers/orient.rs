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


//! Orientable bidirected graphs.

use crate::error::{Error, Result};
use crate::graph::BidirectedGraph;
use crate::mcf::solve_mcf;
use crate::problems::{BiMcf, BiMcfResult};
use crate::reductions::OrientedBiMcf;

/// Find node flips that give every edge exactly one head.
///
/// Returns `None` if the graph is not orientable, i.e. if some cycle
/// contains an odd number of edges with equal head flags.
///
/// # Example
///
/// ```
/// use bimdf::graph::BidirectedGraph;
/// use bimdf::solvers::try_orient;
///
/// let mut g = BidirectedGraph::new();
/// let a = g.add_node();
/// let b = g.add_node();
/// let c = g.add_node();
/// g.add_edge(a, b, false, false);
/// g.add_edge(b, c, true, false);
/// assert_eq!(try_orient(&g), Some(vec![false, true, true]));
///
/// g.add_edge(c, a, false, true);
/// assert_eq!(try_orient(&g), None);
/// ```
pub fn try_orient(g: &BidirectedGraph) -> Option<Vec<bool>> {
    let graph = g.graph();
    let mut ori: Vec<Option<bool>> = vec![None; g.num_nodes()];
    let mut stack = vec![];
    for root in g.nodes() {
        if ori[root].is_some() {
            continue;
        }
        ori[root] = Some(false);
        stack.push(root);
        while let Some(u) = stack.pop() {
            let flip = ori[u]?;
            for &e in graph.incident(u) {
                let v = graph.opposite(e, u);
                let want = flip ^ (g.u_head(e) == g.v_head(e));
                match ori[v] {
                    Some(x) if x != want => return None,
                    Some(_) => (),
                    None => {
                        ori[v] = Some(want);
                        stack.push(v);
                    }
                }
            }
        }
    }
    ori.into_iter().collect()
}

/// Solve a BiMCF on an orientable graph as an ordinary min-cost flow.
///
/// Fails with `Error::Internal` if the graph is not orientable.
pub fn solve_bimcf_oriented(bimcf: &BiMcf) -> Result<BiMcfResult> {
    let ori = try_orient(bimcf.graph()).ok_or_else(|| Error::internal("bidirected graph is not orientable"))?;
    let red = OrientedBiMcf::new(bimcf, &ori)?;
    let sol = solve_mcf(red.mcf())?;
    red.translate_solution(&sol)
}
