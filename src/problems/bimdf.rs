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

//! Bidirected minimum deviation flow problems.

use crate::cost::CostFunction;
use crate::graph::{Edge, Flow, FlowGraph, Node, INF};

/// A bidirected flow graph with a convex cost function per edge.
pub type BiMdf = FlowGraph<CostFunction>;

/// All attributes of a single BiMDF edge.
///
/// # Example
///
/// ```
/// use bimdf::{BiMdf, EdgeInfo, CostFunction};
///
/// let mut bimdf = BiMdf::new();
/// let a = bimdf.add_node(0);
/// let b = bimdf.add_node(0);
/// let e = bimdf.add(EdgeInfo {
///     cost_function: CostFunction::abs_deviation(3.0, 1.0),
///     ..EdgeInfo::new(a, b, false, true)
/// });
/// assert_eq!(bimdf.edge_info(e).upper, bimdf::INF);
/// assert_eq!(bimdf.evaluate(e, 1), 2.0);
/// ```
#[derive(Clone, Debug)]
pub struct EdgeInfo {
    pub u: Node,
    pub v: Node,
    pub u_head: bool,
    pub v_head: bool,
    pub cost_function: CostFunction,
    pub lower: Flow,
    pub upper: Flow,
}

impl EdgeInfo {
    /// An edge with zero cost and bounds `[0, INF]`.
    pub fn new(u: Node, v: Node, u_head: bool, v_head: bool) -> Self {
        EdgeInfo {
            u,
            v,
            u_head,
            v_head,
            cost_function: CostFunction::Zero,
            lower: 0,
            upper: INF,
        }
    }
}

/// A BiMDF solution together with its cost.
#[derive(Clone, Debug)]
pub struct BiMdfResult {
    pub solution: Vec<Flow>,
    pub cost: f64,
}

impl FlowGraph<CostFunction> {
    /// Add an edge from its attributes.
    pub fn add(&mut self, info: EdgeInfo) -> Edge {
        self.add_edge(
            info.u,
            info.v,
            info.u_head,
            info.v_head,
            info.lower,
            info.upper,
            info.cost_function,
        )
    }

    /// Return all attributes of edge `e`.
    pub fn edge_info(&self, e: Edge) -> EdgeInfo {
        EdgeInfo {
            u: self.u(e),
            v: self.v(e),
            u_head: self.u_head(e),
            v_head: self.v_head(e),
            cost_function: self.cost(e).clone(),
            lower: self.lower(e),
            upper: self.upper(e),
        }
    }

    /// Cost of flow value `x` on edge `e`.
    pub fn evaluate(&self, e: Edge, x: Flow) -> f64 {
        self.cost(e).evaluate(f64::from(x))
    }

    /// The unconstrained guess of the cost function of `e`.
    pub fn guess(&self, e: Edge) -> f64 {
        self.cost(e).guess()
    }

    /// Total cost of a solution.
    pub fn total_cost(&self, sol: &[Flow]) -> f64 {
        self.edges().map(|e| self.evaluate(e, sol[e])).sum()
    }

    /// Total cost of half the flow of a (doubled) solution.
    pub fn cost_half(&self, sol: &[Flow]) -> f64 {
        self.edges().map(|e| self.cost(e).evaluate(0.5 * f64::from(sol[e]))).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_costs() {
        let mut bimdf = BiMdf::new();
        let a = bimdf.add_node(0);
        let b = bimdf.add_node(0);
        bimdf.add(EdgeInfo {
            cost_function: CostFunction::quad_deviation(2.0, 1.0),
            ..EdgeInfo::new(a, b, false, true)
        });
        bimdf.add(EdgeInfo {
            cost_function: CostFunction::abs_deviation(1.0, 2.0),
            ..EdgeInfo::new(b, a, false, true)
        });
        assert_eq!(bimdf.total_cost(&[3, 3]), 5.0);
        assert_eq!(bimdf.cost_half(&[6, 2]), 1.0);
        assert!(bimdf.is_valid(&[3, 3]));
        assert!(!bimdf.is_valid(&[3, 2]));
    }
}
