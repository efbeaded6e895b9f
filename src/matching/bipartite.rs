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

//! Bipartite graphs via a transportation problem.

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::mcf::solve_mcf;
use crate::problems::{Matching, Mcf};

/// Two-colour the nodes of `g`.
///
/// Returns `None` if the graph contains an odd cycle (a self-loop
/// included).
pub fn bipartition(g: &Graph) -> Option<Vec<bool>> {
    let mut side: Vec<Option<bool>> = vec![None; g.num_nodes()];
    let mut stack = vec![];
    for s in g.nodes() {
        if side[s].is_some() {
            continue;
        }
        side[s] = Some(false);
        stack.push(s);
        while let Some(u) = stack.pop() {
            let su = side[u]?;
            for &e in g.incident(u) {
                let v = g.opposite(e, u);
                match side[v] {
                    None => {
                        side[v] = Some(!su);
                        stack.push(v);
                    }
                    Some(sv) if sv == su => return None,
                    Some(_) => (),
                }
            }
        }
    }
    side.into_iter().collect()
}

/// Solve a bipartite instance as min-cost flow from the left to the
/// right side.
pub fn solve(matching: &Matching) -> Result<Vec<bool>> {
    let g = &matching.graph;
    let side = bipartition(g).ok_or_else(|| Error::internal("bipartite matching solver called on non-bipartite graph"))?;

    let mut mcf = Mcf::new();
    for u in g.nodes() {
        mcf.add_node(if side[u] { -1 } else { 1 });
    }
    for e in g.edges() {
        let (u, v) = g.enodes(e);
        let (src, snk) = if side[u] { (v, u) } else { (u, v) };
        mcf.add_arc(src, snk, 0, 1, -matching.weight[e]);
    }

    let res = solve_mcf(&mcf)?;
    Ok(res.solution.iter().map(|&x| x == 1).collect())
}
