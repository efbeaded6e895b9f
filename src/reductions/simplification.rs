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

//! Collapsing chains of degree-two nodes.
//!
//! A node is collapsible if its demand is zero and it has exactly one
//! head end and one tail end. Flow conservation forces both incident
//! edges to carry the same flow, so a maximal chain of such nodes is
//! replaced by a single edge with the sum of the chain's cost functions
//! and the intersection of its bounds.

use crate::cost::CostFunction;
use crate::error::{Error, Result};
use crate::graph::{Edge, Node};
use crate::problems::{BiMdf, BiMdfResult, EdgeInfo};

/// A BiMDF with all collapsible chains replaced by single edges.
///
/// # Example
///
/// ```
/// use bimdf::{BiMdf, BiMdfResult, EdgeInfo};
/// use bimdf::reductions::Simplification;
///
/// // s -> a -> b -> t with two intermediate collapsible nodes
/// let mut bimdf = BiMdf::new();
/// let s = bimdf.add_node(-3);
/// let a = bimdf.add_node(0);
/// let b = bimdf.add_node(0);
/// let t = bimdf.add_node(3);
/// bimdf.add(EdgeInfo { upper: 5, ..EdgeInfo::new(s, a, false, true) });
/// bimdf.add(EdgeInfo { lower: 1, ..EdgeInfo::new(a, b, false, true) });
/// bimdf.add(EdgeInfo::new(t, b, true, false));
///
/// let simp = Simplification::new(&bimdf).unwrap();
/// let simplified = simp.simplified();
/// assert_eq!(simplified.num_nodes(), 2);
/// assert_eq!(simplified.num_edges(), 1);
/// assert_eq!((simplified.lower(0), simplified.upper(0)), (1, 5));
///
/// let res = simp.translate_solution(&BiMdfResult { solution: vec![3], cost: 0.0 }).unwrap();
/// assert_eq!(res.solution, vec![3, 3, 3]);
/// ```
pub struct Simplification<'a> {
    orig: &'a BiMdf,
    simplified: BiMdf,
    /// The simplified edge of every original edge.
    pub simp_edge: Vec<Edge>,
    /// The simplified node of every original node that is kept.
    pub simp_node: Vec<Option<Node>>,
    n_collapsed: usize,
}

impl<'a> Simplification<'a> {
    pub fn new(orig: &'a BiMdf) -> Result<Self> {
        let g = orig.graph();
        let mut collapse_node: Vec<bool> = orig
            .nodes()
            .map(|u| {
                if orig.demand(u) != 0 {
                    return false;
                }
                let (mut heads, mut tails) = (0, 0);
                for (_, head) in g.ends_at(u) {
                    if head {
                        heads += 1;
                    } else {
                        tails += 1;
                    }
                }
                heads == 1 && tails == 1
            })
            .collect();

        // A component consisting only of collapsible nodes is a cycle,
        // keep its last node.
        let (ncomps, comp) = g.graph().components();
        let mut all_collapsible = vec![true; ncomps];
        let mut last_node = vec![None; ncomps];
        for u in orig.nodes() {
            all_collapsible[comp[u]] &= collapse_node[u];
            last_node[comp[u]] = Some(u);
        }
        for c in 0..ncomps {
            if let (true, Some(u)) = (all_collapsible[c], last_node[c]) {
                collapse_node[u] = false;
            }
        }
        let n_collapsed = collapse_node.iter().filter(|&&c| c).count();

        let mut simplified = BiMdf::new();
        let simp_node: Vec<Option<Node>> = orig
            .nodes()
            .map(|u| {
                if collapse_node[u] {
                    None
                } else {
                    Some(simplified.add_node(orig.demand(u)))
                }
            })
            .collect();

        let mut simp_edge = vec![usize::MAX; orig.num_edges()];
        let mut edge_added = vec![false; orig.num_edges()];
        let mut chain = vec![];

        // Walk from `e` through `u` until a kept node is reached.
        // Returns that node and the head flag of the chain at it.
        let extend_chain = |e: Edge, u: Node, chain: &mut Vec<Edge>, edge_added: &mut Vec<bool>| -> Result<(Node, bool)> {
            let mut cur_e = e;
            let mut cur_n = u;
            while collapse_node[cur_n] {
                let next = g
                    .graph()
                    .incident(cur_n)
                    .iter()
                    .copied()
                    .find(|&f| f != cur_e)
                    .ok_or_else(|| Error::internal("chain ends in a collapsible node"))?;
                if edge_added[next] {
                    return Err(Error::internal("found edge twice while extending chain"));
                }
                edge_added[next] = true;
                chain.push(next);
                cur_n = g.graph().opposite(next, cur_n);
                cur_e = next;
            }
            let head = if orig.u(cur_e) == cur_n {
                orig.u_head(cur_e)
            } else {
                orig.v_head(cur_e)
            };
            Ok((cur_n, head))
        };

        for e in orig.edges() {
            if edge_added[e] {
                continue;
            }
            edge_added[e] = true;
            let (u, v) = (orig.u(e), orig.v(e));
            if !collapse_node[u] && !collapse_node[v] {
                let mut info = orig.edge_info(e);
                info.u = simp_node[u].ok_or_else(|| Error::internal("kept node missing"))?;
                info.v = simp_node[v].ok_or_else(|| Error::internal("kept node missing"))?;
                simp_edge[e] = simplified.add(info);
                continue;
            }

            chain.clear();
            chain.push(e);
            let (cu, u_head) = extend_chain(e, u, &mut chain, &mut edge_added)?;
            let (cv, v_head) = extend_chain(e, v, &mut chain, &mut edge_added)?;
            let (su, sv) = match (simp_node[cu], simp_node[cv]) {
                (Some(su), Some(sv)) => (su, sv),
                _ => return Err(Error::internal("chain end is not part of the simplified problem")),
            };

            let mut lower = orig.lower(e);
            let mut upper = orig.upper(e);
            for &f in &chain {
                lower = lower.max(orig.lower(f));
                upper = upper.min(orig.upper(f));
            }
            let se = simplified.add(EdgeInfo {
                cost_function: CostFunction::sum(chain.iter().map(|&f| orig.cost(f).clone())),
                lower,
                upper,
                ..EdgeInfo::new(su, sv, u_head, v_head)
            });
            for &f in &chain {
                simp_edge[f] = se;
            }
        }

        Ok(Simplification {
            orig,
            simplified,
            simp_edge,
            simp_node,
            n_collapsed,
        })
    }

    /// The simplified problem.
    pub fn simplified(&self) -> &BiMdf {
        &self.simplified
    }

    /// Number of nodes removed by collapsing chains.
    pub fn num_collapsed_nodes(&self) -> usize {
        self.n_collapsed
    }

    /// Copy the flow of every simplified edge to all edges of its chain.
    pub fn translate_solution(&self, result: &BiMdfResult) -> Result<BiMdfResult> {
        let mut solution = Vec::with_capacity(self.orig.num_edges());
        for e in self.orig.edges() {
            match result.solution.get(self.simp_edge[e]) {
                Some(&x) => solution.push(x),
                None => return Err(Error::internal("simplified solution has too few entries")),
            }
        }
        if !self.orig.is_valid(&solution) {
            return Err(Error::internal("translated simplified solution is infeasible"));
        }
        Ok(BiMdfResult {
            solution,
            cost: result.cost,
        })
    }
}
