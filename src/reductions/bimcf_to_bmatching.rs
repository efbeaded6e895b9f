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

//! A bounded BiMCF circulation as b-matching.
//!
//! Every node `u` is split into an in copy `2u` collecting the head
//! ends and an out copy `2u + 1` collecting the tail ends. Both copies
//! must be covered `d` times, where `d` bounds the flow through `u`;
//! the internal edge between them absorbs the unused part.

use crate::config::DeviationLimitKind;
use crate::error::{Error, Result};
use crate::graph::{Edge, Flow, Node, INF};
use crate::problems::{BMatching, BMatchingResult, BiMcf, BiMcfResult};

/// The b-matching of a BiMCF with zero demands.
///
/// # Example
///
/// ```
/// use bimdf::config::DeviationLimitKind;
/// use bimdf::problems::{BMatchingResult, BiMcf};
/// use bimdf::reductions::BiMcfToBMatching;
///
/// let mut bimcf = BiMcf::new();
/// let a = bimcf.add_node(0);
/// let b = bimcf.add_node(0);
/// bimcf.add_edge(a, b, false, true, 0, 1, -2.0);
/// bimcf.add_edge(b, a, false, true, 0, 1, 1.0);
///
/// let red = BiMcfToBMatching::new(&bimcf, 2, DeviationLimitKind::NodeThroughflow).unwrap();
/// assert_eq!(red.bmatching().degree, vec![2, 2, 2, 2]);
///
/// // use the cycle once
/// let res = red
///     .translate_solution(&BMatchingResult { solution: vec![1, 1, 1, 1], weight: 1.0 })
///     .unwrap();
/// assert_eq!(res.solution, vec![1, 1]);
/// assert_eq!(res.cost, -1.0);
/// ```
pub struct BiMcfToBMatching<'a> {
    bimcf: &'a BiMcf,
    bmatching: BMatching,
    /// The b-matching edge of every BiMCF edge.
    pub bm_edge: Vec<Edge>,
    /// The BiMCF node of every b-matching node.
    pub orig_node: Vec<Node>,
    /// Whether a b-matching node is the in copy of its node.
    pub is_in_node: Vec<bool>,
    /// The BiMCF edge of every b-matching edge, `None` for internal
    /// edges.
    pub orig_edge: Vec<Option<Edge>>,
}

fn node_in(u: Node) -> Node {
    2 * u
}

fn node_out(u: Node) -> Node {
    2 * u + 1
}

impl<'a> BiMcfToBMatching<'a> {
    pub fn new(bimcf: &'a BiMcf, max_deviation: Flow, limit: DeviationLimitKind) -> Result<Self> {
        let n = bimcf.num_nodes();

        let (mut max_in, mut max_out) = (vec![0i64; n], vec![0i64; n]);
        if limit == DeviationLimitKind::EdgeFlow {
            for e in bimcf.edges() {
                let max_inc = i64::from(bimcf.upper(e).min(max_deviation));
                for &(u, head) in &[(bimcf.u(e), bimcf.u_head(e)), (bimcf.v(e), bimcf.v_head(e))] {
                    if head {
                        max_in[u] += max_inc;
                    } else {
                        max_out[u] += max_inc;
                    }
                }
            }
        }

        let mut bmatching = BMatching::new();
        let mut orig_node = Vec::with_capacity(2 * n);
        let mut is_in_node = Vec::with_capacity(2 * n);
        let mut orig_edge = Vec::with_capacity(n + bimcf.num_edges());
        for u in bimcf.nodes() {
            if bimcf.demand(u) != 0 {
                return Err(Error::internal("non-zero demands currently not supported"));
            }
            let max_node_flow = match limit {
                DeviationLimitKind::NodeThroughflow => max_deviation,
                DeviationLimitKind::EdgeFlow => {
                    let m = max_in[u].min(max_out[u]);
                    if m >= i64::from(INF) {
                        return Err(Error::internal("node throughflow bound too large"));
                    }
                    m as Flow
                }
            };
            let u_in = bmatching.add_node(max_node_flow);
            let u_out = bmatching.add_node(max_node_flow);
            debug_assert_eq!((u_in, u_out), (node_in(u), node_out(u)));
            bmatching.add_edge(u_in, u_out, max_node_flow, 0.0);
            orig_node.push(u);
            orig_node.push(u);
            is_in_node.push(true);
            is_in_node.push(false);
            orig_edge.push(None);
        }

        let bm_edge = bimcf
            .edges()
            .map(|e| {
                let u = if bimcf.u_head(e) { node_in(bimcf.u(e)) } else { node_out(bimcf.u(e)) };
                let v = if bimcf.v_head(e) { node_in(bimcf.v(e)) } else { node_out(bimcf.v(e)) };
                orig_edge.push(Some(e));
                bmatching.add_edge(u, v, bimcf.upper(e), -*bimcf.cost(e))
            })
            .collect();

        Ok(BiMcfToBMatching {
            bimcf,
            bmatching,
            bm_edge,
            orig_node,
            is_in_node,
            orig_edge,
        })
    }

    pub fn bmatching(&self) -> &BMatching {
        &self.bmatching
    }

    /// Read the flow of every BiMCF edge from its b-matching edge.
    pub fn translate_solution(&self, result: &BMatchingResult) -> Result<BiMcfResult> {
        let mut solution = Vec::with_capacity(self.bimcf.num_edges());
        for e in self.bimcf.edges() {
            match result.solution.get(self.bm_edge[e]) {
                Some(&x) => solution.push(x),
                None => return Err(Error::internal("b-matching solution has too few entries")),
            }
        }
        if !self.bimcf.is_valid(&solution) {
            return Err(Error::internal("b-matching solution is infeasible for the BiMCF"));
        }
        let max_flow = crate::problems::bimcf::max_flow(&solution);
        Ok(BiMcfResult {
            solution,
            cost: -result.weight,
            max_flow,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_flow_limit() {
        let mut bimcf = BiMcf::new();
        let a = bimcf.add_node(0);
        let b = bimcf.add_node(0);
        bimcf.add_edge(a, b, false, true, 0, 1, 1.0);
        bimcf.add_edge(a, b, false, true, 0, INF, 1.0);
        bimcf.add_edge(b, a, false, true, 0, INF, 1.0);

        let red = BiMcfToBMatching::new(&bimcf, 3, DeviationLimitKind::EdgeFlow).unwrap();
        // a: out 1 + 3, in 3; b: in 1 + 3, out 3
        assert_eq!(red.bmatching().degree, vec![3, 3, 3, 3]);
        assert_eq!(red.orig_edge[..2], [None::<Edge>, None]);
        assert_eq!(red.orig_edge[2], Some(0));
        assert_eq!(red.bmatching().graph.enodes(2), (1, 2));
    }

    #[test]
    fn test_demand_rejected() {
        let mut bimcf = BiMcf::new();
        let a = bimcf.add_node(1);
        bimcf.add_edge(a, a, true, true, 0, 1, 1.0);
        assert!(matches!(
            BiMcfToBMatching::new(&bimcf, 2, DeviationLimitKind::NodeThroughflow),
            Err(Error::Internal(_))
        ));
    }
}
