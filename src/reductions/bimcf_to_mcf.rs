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

//! The double cover of a BiMCF.
//!
//! Every node `u` becomes a plus copy `2u` and a minus copy `2u + 1`.
//! Every edge becomes up to two directed arcs between these copies,
//! one for each way of walking the edge. A directed flow on the double
//! cover sums up to twice a bidirected flow (or exactly one, if
//! demands and capacities are halved).

use num_integer::Integer;

use super::COST_MULTIPLIER;
use crate::config::DoubleCoverMethod;
use crate::error::{Error, Result};
use crate::graph::{Edge, Flow, Node, INF};
use crate::problems::{BiMcf, BiMcfResult, McfResult, Mcf};

/// Largest sum of absolute costs that is scaled to integers.
const MAX_ABS_COST_SUM: f64 = (1u64 << 40) as f64;

/// The double cover of a BiMCF as a directed min-cost-flow problem.
///
/// # Example
///
/// ```
/// use bimdf::config::DoubleCoverMethod;
/// use bimdf::mcf::solve_mcf;
/// use bimdf::problems::BiMcf;
/// use bimdf::reductions::BiMcfToMcf;
///
/// // two nodes that both want to receive two units via a head-head edge
/// let mut bimcf = BiMcf::new();
/// let a = bimcf.add_node(2);
/// let b = bimcf.add_node(2);
/// bimcf.add_edge(a, b, true, true, 0, 10, 1.5);
///
/// let dc = BiMcfToMcf::new(&bimcf, DoubleCoverMethod::HalfAsymmetric).unwrap();
/// let res = dc.translate_solution(&solve_mcf(dc.mcf()).unwrap()).unwrap();
/// assert_eq!(res.solution, vec![2]);
/// assert_eq!(res.cost, 3.0);
/// assert_eq!(res.max_flow, 2);
/// ```
pub struct BiMcfToMcf<'a> {
    bimcf: &'a BiMcf,
    method: DoubleCoverMethod,
    mcf: Mcf,
    /// The BiMCF node of every MCF node.
    pub orig_node: Vec<Node>,
    /// Whether an MCF node is the plus copy of its BiMCF node.
    pub node_is_plus: Vec<bool>,
    /// The BiMCF edge of every MCF arc.
    pub orig_edge: Vec<Edge>,
}

fn plus(u: Node) -> Node {
    2 * u
}

fn minus(u: Node) -> Node {
    2 * u + 1
}

fn scalar(x: Flow) -> i64 {
    if x == INF {
        Mcf::INF
    } else {
        i64::from(x)
    }
}

impl<'a> BiMcfToMcf<'a> {
    pub fn new(bimcf: &'a BiMcf, method: DoubleCoverMethod) -> Result<Self> {
        use DoubleCoverMethod::*;

        let abs_cost_sum: f64 = bimcf.edges().map(|e| bimcf.cost(e).abs()).sum();
        if !(abs_cost_sum <= MAX_ABS_COST_SUM) {
            return Err(Error::internal(format!(
                "sum of absolute costs {} too large for integer scaling",
                abs_cost_sum
            )));
        }

        let halve = matches!(method, HalfSymmetric | HalfAsymmetric);
        let mut mcf = Mcf::new();
        let mut orig_node = Vec::with_capacity(2 * bimcf.num_nodes());
        let mut node_is_plus = Vec::with_capacity(2 * bimcf.num_nodes());
        for u in bimcf.nodes() {
            let mut demand = i64::from(bimcf.demand(u));
            if method != NotEven && demand.is_odd() {
                return Err(Error::internal(format!("odd demand {} at node {}", demand, u)));
            }
            if halve {
                demand /= 2;
            }
            mcf.add_node(-demand);
            mcf.add_node(demand);
            orig_node.push(u);
            orig_node.push(u);
            node_is_plus.push(true);
            node_is_plus.push(false);
        }

        let mut orig_edge = Vec::with_capacity(2 * bimcf.num_edges());
        for e in bimcf.edges() {
            if bimcf.lower(e) != 0 {
                return Err(Error::internal(format!("edge {} has a non-zero lower bound", e)));
            }
            let (u, v) = (bimcf.u(e), bimcf.v(e));
            let (u_head, v_head) = (bimcf.u_head(e), bimcf.v_head(e));

            let src0 = if u_head { minus(u) } else { plus(u) };
            let dst0 = if v_head { plus(v) } else { minus(v) };
            let src1 = if v_head { minus(v) } else { plus(v) };
            let dst1 = if u_head { plus(u) } else { minus(u) };

            let cost = (bimcf.cost(e) * COST_MULTIPLIER).round() as i64;
            let upper = bimcf.upper(e);

            if u == v {
                // both walks use the same arc
                let cap = if upper == INF {
                    Mcf::INF
                } else if halve {
                    i64::from(upper)
                } else {
                    2 * i64::from(upper)
                };
                mcf.add_arc(src0, dst0, 0, cap, cost);
                orig_edge.push(e);
                continue;
            }

            let (up0, up1) = if upper == INF {
                (Mcf::INF, Mcf::INF)
            } else {
                let mut upper = i64::from(upper);
                if matches!(method, FullSymmetric | HalfSymmetric) && upper.is_odd() {
                    upper -= 1;
                }
                if halve {
                    let up0 = upper / 2;
                    (up0, upper - up0)
                } else {
                    (upper, upper)
                }
            };
            if up0 > 0 {
                mcf.add_arc(src0, dst0, 0, up0, cost);
                orig_edge.push(e);
            }
            if up1 > 0 {
                mcf.add_arc(src1, dst1, 0, up1, cost);
                orig_edge.push(e);
            }
        }

        Ok(BiMcfToMcf {
            bimcf,
            method,
            mcf,
            orig_node,
            node_is_plus,
            orig_edge,
        })
    }

    /// The directed problem.
    pub fn mcf(&self) -> &Mcf {
        &self.mcf
    }

    pub fn method(&self) -> DoubleCoverMethod {
        self.method
    }

    /// Sum the flow of both arcs of every edge.
    ///
    /// For `NotEven` the result is twice a (possibly half-integral)
    /// BiMCF flow and is not validated.
    pub fn translate_solution(&self, result: &McfResult) -> Result<BiMcfResult> {
        use DoubleCoverMethod::*;

        if result.solution.len() != self.mcf.num_edges() {
            return Err(Error::internal("MCF solution has wrong length"));
        }
        let mut sums = vec![0i64; self.bimcf.num_edges()];
        let mut cost = 0.0;
        for (a, &x) in result.solution.iter().enumerate() {
            let e = self.orig_edge[a];
            sums[e] += x;
            cost += *self.bimcf.cost(e) * x as f64;
        }

        let mut solution = Vec::with_capacity(sums.len());
        for x in sums {
            let x = if self.method == FullSymmetric {
                if x.is_odd() {
                    return Err(Error::internal("odd flow sum in double cover, MCF solution is not basic"));
                }
                x / 2
            } else {
                x
            };
            if x < 0 || x > i64::from(INF) {
                return Err(Error::internal("double cover flow out of range"));
            }
            solution.push(x as Flow);
        }
        if matches!(self.method, FullSymmetric | NotEven) {
            cost *= 0.5;
        }
        if self.method != NotEven && !self.bimcf.is_valid(&solution) {
            return Err(Error::internal("double cover solution is infeasible for the BiMCF"));
        }

        let max_flow = crate::problems::bimcf::max_flow(&solution);
        Ok(BiMcfResult {
            solution,
            cost,
            max_flow,
        })
    }
}
