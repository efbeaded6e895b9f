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

//! Expanding a b-matching into a perfect matching.
//!
//! A node of degree `d` becomes `d` copies. An edge whose capacity
//! does not restrict it becomes a complete bipartite block between the
//! copies of its ends. An edge with smaller capacity `c` becomes `c`
//! gadgets, each a pair of nodes joined by a zero weight edge: if the
//! gadget is used, its left node is matched to a copy of `u` and its
//! right node to a copy of `v`.

use super::COST_MULTIPLIER;
use crate::error::{Error, Result};
use crate::graph::{Edge, Flow, Node};
use crate::problems::{BMatching, BMatchingResult, Matching, MatchingResult};

/// The perfect matching instance of a b-matching.
///
/// # Example
///
/// ```
/// use bimdf::matching::{solve_matching, MatchingSolverKind};
/// use bimdf::problems::BMatching;
/// use bimdf::reductions::BMatchingToMatching;
///
/// let mut bm = BMatching::new();
/// let a = bm.add_node(2);
/// let b = bm.add_node(2);
/// let c = bm.add_node(2);
/// bm.add_edge(a, b, 1, 3.0);
/// bm.add_edge(b, c, 1, 3.0);
/// bm.add_edge(a, c, 2, 1.0);
///
/// let red = BMatchingToMatching::new(&bm).unwrap();
/// let res = solve_matching(red.matching(), MatchingSolverKind::Blossom).unwrap();
/// let res = red.translate_solution(&res).unwrap();
/// assert_eq!(res.solution, vec![1, 1, 1]);
/// assert_eq!(res.weight, 7.0);
/// ```
pub struct BMatchingToMatching<'a> {
    bmatching: &'a BMatching,
    matching: Matching,
    /// The b-matching edge of every matching edge, `None` for gadget
    /// internals and spokes on the `v` side.
    pub orig_edge: Vec<Option<Edge>>,
    /// The b-matching node of every copy, `None` for gadget nodes.
    pub orig_node: Vec<Option<Node>>,
    /// The number of a copy among the copies of its node, or of a
    /// gadget node among the nodes of its edge.
    pub node_num: Vec<usize>,
    /// The b-matching edge of every gadget node.
    pub internode_edge: Vec<Option<Edge>>,
}

impl<'a> BMatchingToMatching<'a> {
    pub fn new(bmatching: &'a BMatching) -> Result<Self> {
        let g = &bmatching.graph;
        let degree = |u: Node| -> Result<usize> {
            let d = bmatching.degree[u];
            if d < 0 {
                Err(Error::internal(format!("negative degree at node {}", u)))
            } else {
                Ok(d as usize)
            }
        };

        // effective capacity of every edge
        let mut caps = Vec::with_capacity(g.num_edges());
        let mut first_node = Vec::with_capacity(g.num_nodes());
        let mut n_nodes = 0usize;
        let mut n_edges = 0usize;
        for u in g.nodes() {
            first_node.push(n_nodes);
            n_nodes += degree(u)?;
        }
        for e in g.edges() {
            let (du, dv) = (degree(g.u(e))?, degree(g.v(e))?);
            let cap = bmatching.capacity[e];
            let cap = if cap == BMatching::INF { du.max(dv) } else { cap.max(0) as usize };
            if cap < du.min(dv) {
                n_nodes += 2 * cap;
                n_edges += cap * (du + dv + 1);
            } else {
                n_edges += du * dv;
            }
            caps.push(cap);
        }
        if n_nodes > Flow::MAX as usize || n_edges > Flow::MAX as usize {
            return Err(Error::internal("matching instance too large"));
        }

        let mut matching = Matching::new();
        let mut orig_node = Vec::with_capacity(n_nodes);
        let mut node_num = Vec::with_capacity(n_nodes);
        let mut internode_edge = Vec::with_capacity(n_nodes);
        let mut orig_edge = Vec::with_capacity(n_edges);
        for u in g.nodes() {
            for i in 0..degree(u)? {
                matching.add_node();
                orig_node.push(Some(u));
                node_num.push(i);
                internode_edge.push(None);
            }
        }

        for e in g.edges() {
            let (u, v) = g.enodes(e);
            let (du, dv) = (degree(u)?, degree(v)?);
            let weight = (COST_MULTIPLIER * bmatching.weight[e]).round() as i64;
            let cap = caps[e];

            if cap < du.min(dv) {
                for i in 0..cap {
                    let left = matching.add_node();
                    let right = matching.add_node();
                    orig_node.extend(&[None, None]);
                    node_num.extend(&[2 * i, 2 * i + 1]);
                    internode_edge.extend(&[Some(e), Some(e)]);

                    matching.add_edge(left, right, 0);
                    orig_edge.push(None);
                    for j in 0..du {
                        matching.add_edge(first_node[u] + j, left, weight);
                        orig_edge.push(Some(e));
                    }
                    for j in 0..dv {
                        matching.add_edge(first_node[v] + j, right, 0);
                        orig_edge.push(None);
                    }
                }
            } else {
                for i in 0..du {
                    let mu = first_node[u] + i;
                    for j in 0..dv {
                        let mv = first_node[v] + j;
                        if mu == mv {
                            continue;
                        }
                        matching.add_edge(mu, mv, weight);
                        orig_edge.push(Some(e));
                    }
                }
            }
        }

        Ok(BMatchingToMatching {
            bmatching,
            matching,
            orig_edge,
            orig_node,
            node_num,
            internode_edge,
        })
    }

    pub fn matching(&self) -> &Matching {
        &self.matching
    }

    /// Count the selected copies of every b-matching edge.
    pub fn translate_solution(&self, result: &MatchingResult) -> Result<BMatchingResult> {
        let mut solution: Vec<Flow> = vec![0; self.bmatching.graph.num_edges()];
        for (e, &selected) in result.solution.iter().enumerate() {
            if let (true, Some(Some(f))) = (selected, self.orig_edge.get(e)) {
                solution[*f] += 1;
            }
        }
        if !self.bmatching.is_valid(&solution) {
            return Err(Error::internal("matching solution is infeasible for the b-matching"));
        }
        Ok(BMatchingResult {
            solution,
            weight: result.weight as f64 / COST_MULTIPLIER,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{solve_matching, MatchingSolverKind};

    #[test]
    fn test_gadget() {
        // capacity 1 between two degree-2 nodes needs a gadget
        let mut bm = BMatching::new();
        let a = bm.add_node(2);
        let b = bm.add_node(2);
        let c = bm.add_node(1);
        let d = bm.add_node(1);
        bm.add_edge(a, b, 1, 5.0);
        bm.add_edge(a, c, BMatching::INF, 1.0);
        bm.add_edge(b, d, BMatching::INF, 1.0);
        bm.add_edge(a, b, BMatching::INF, -1.0);

        let red = BMatchingToMatching::new(&bm).unwrap();
        let m = red.matching();
        // 6 copies and one gadget
        assert_eq!(m.graph.num_nodes(), 8);
        assert_eq!(red.internode_edge[6], Some(0));
        assert_eq!(red.orig_node[6], None);

        for &kind in &[MatchingSolverKind::Blossom, MatchingSolverKind::Bipartite] {
            let res = solve_matching(m, kind).unwrap();
            let res = red.translate_solution(&res).unwrap();
            assert_eq!(res.solution, vec![1, 1, 1, 0]);
            assert_eq!(res.weight, 7.0);
        }
    }

    #[test]
    fn test_self_loop() {
        // a loop covers its node twice
        let mut bm = BMatching::new();
        let a = bm.add_node(2);
        bm.add_edge(a, a, BMatching::INF, 2.5);
        let red = BMatchingToMatching::new(&bm).unwrap();
        assert_eq!(red.matching().graph.num_edges(), 2);
        let res = solve_matching(red.matching(), MatchingSolverKind::Blossom).unwrap();
        let res = red.translate_solution(&res).unwrap();
        assert_eq!(res.solution, vec![1]);
        assert_eq!(res.weight, 2.5);
    }
}
