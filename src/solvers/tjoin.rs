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


//! T-joins on a minimum spanning forest.

use crate::error::{Error, Result};
use crate::graph::{Edge, Node};
use crate::mst::kruskal;
use crate::problems::{TJoin, TJoinResult};

use ordered_float::OrderedFloat;

/// Compute a T-join using only edges of a minimum spanning forest.
///
/// The forest is traversed from the leaves upwards. Whenever a node
/// still has the wrong parity, the edge to its parent is selected and
/// the parity of the parent flips. The result is a valid T-join but
/// not necessarily a cheapest one.
///
/// Fails with `Error::Infeasible` if some connected component contains
/// an odd number of `t` nodes.
///
/// # Example
///
/// ```
/// use bimdf::graph::Graph;
/// use bimdf::problems::TJoin;
/// use bimdf::solvers::solve_tjoin_mst;
///
/// let mut g = Graph::with_nodes(4);
/// g.add_edge(0, 1);
/// g.add_edge(1, 2);
/// g.add_edge(2, 3);
/// g.add_edge(0, 3);
///
/// let tjoin = TJoin {
///     graph: &g,
///     t: vec![true, false, false, true],
///     cost: vec![1.0, 1.0, 1.0, 5.0],
/// };
/// let res = solve_tjoin_mst(&tjoin).unwrap();
/// assert_eq!(res.solution, vec![true, true, true, false]);
/// assert_eq!(res.cost, 3.0);
/// ```
pub fn solve_tjoin_mst(tjoin: &TJoin) -> Result<TJoinResult> {
    let g = tjoin.graph;
    if tjoin.t.len() != g.num_nodes() || tjoin.cost.len() != g.num_edges() {
        return Err(Error::internal("T-join data has wrong size"));
    }

    let mut tree_adj: Vec<Vec<(Edge, Node)>> = vec![vec![]; g.num_nodes()];
    for e in kruskal(g, |e| OrderedFloat(tjoin.cost[e])) {
        let (u, v) = g.enodes(e);
        tree_adj[u].push((e, v));
        tree_adj[v].push((e, u));
    }

    // preorder of every tree with the edge to the parent
    let mut order: Vec<(Node, Option<(Edge, Node)>)> = Vec::with_capacity(g.num_nodes());
    let mut seen = vec![false; g.num_nodes()];
    let mut stack = vec![];
    for root in g.nodes() {
        if seen[root] {
            continue;
        }
        seen[root] = true;
        stack.push((root, None));
        while let Some((u, parent)) = stack.pop() {
            order.push((u, parent));
            for &(e, v) in &tree_adj[u] {
                if !seen[v] {
                    seen[v] = true;
                    stack.push((v, Some((e, u))));
                }
            }
        }
    }

    let mut parity = tjoin.t.clone();
    let mut solution = vec![false; g.num_edges()];
    let mut cost = 0.0;
    for &(u, parent) in order.iter().rev() {
        if !parity[u] {
            continue;
        }
        match parent {
            Some((e, p)) => {
                solution[e] = true;
                cost += tjoin.cost[e];
                parity[u] = false;
                parity[p] = !parity[p];
            }
            None => {
                return Err(Error::Infeasible(format!(
                    "component of node {} has an odd number of T-nodes",
                    u
                )))
            }
        }
    }

    debug_assert!(tjoin.is_valid(&solution));
    Ok(TJoinResult { solution, cost })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn test_forest() {
        // two triangles, the second one with an isolated node
        let mut g = Graph::with_nodes(7);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(0, 2);
        g.add_edge(3, 4);
        g.add_edge(4, 5);
        g.add_edge(3, 5);
        g.add_edge(3, 3);

        let tjoin = TJoin {
            graph: &g,
            t: vec![true, true, false, false, true, true, false],
            cost: vec![4.0, 1.0, 1.0, 1.0, 1.0, 0.5, 0.0],
        };
        let res = solve_tjoin_mst(&tjoin).unwrap();
        assert!(tjoin.is_valid(&res.solution));
        assert_eq!(res.solution, vec![false, true, true, true, false, true, false]);
        assert_eq!(res.cost, 3.5);
    }

    #[test]
    fn test_empty_t() {
        let mut g = Graph::with_nodes(3);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        let tjoin = TJoin {
            graph: &g,
            t: vec![false; 3],
            cost: vec![1.0; 2],
        };
        let res = solve_tjoin_mst(&tjoin).unwrap();
        assert_eq!(res.solution, vec![false; 2]);
        assert_eq!(res.cost, 0.0);
    }

    #[test]
    fn test_odd_component() {
        let mut g = Graph::with_nodes(3);
        g.add_edge(0, 1);
        let tjoin = TJoin {
            graph: &g,
            t: vec![true, false, true],
            cost: vec![1.0],
        };
        assert!(solve_tjoin_mst(&tjoin).unwrap_err().is_infeasible());
    }
}
