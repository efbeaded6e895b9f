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

//! BiMCF on an orientable graph as ordinary MCF.
//!
//! Flipping all head flags at a node negates its conservation
//! constraint. If some set of flips leaves every edge with exactly one
//! head, the BiMCF is a directed min-cost-flow problem on the same
//! nodes.

use crate::error::{Error, Result};
use crate::graph::{Edge, Flow, INF};
use crate::problems::{BiMcf, BiMcfResult, Mcf, McfResult};

/// Cost multiplier of the oriented reduction.
const COST_MULTIPLIER: f64 = 1000.0;

/// The directed problem of an oriented BiMCF.
pub struct OrientedBiMcf<'a> {
    bimcf: &'a BiMcf,
    mcf: Mcf,
    /// The BiMCF edge of every arc.
    pub orig_edge: Vec<Edge>,
}

impl<'a> OrientedBiMcf<'a> {
    /// Build the MCF for the node flips `ori`.
    ///
    /// Fails if some edge does not have exactly one head after
    /// flipping.
    pub fn new(bimcf: &'a BiMcf, ori: &[bool]) -> Result<Self> {
        if ori.len() != bimcf.num_nodes() {
            return Err(Error::internal("orientation must have one value per node"));
        }
        let mut mcf = Mcf::new();
        for u in bimcf.nodes() {
            let d = i64::from(bimcf.demand(u));
            mcf.add_node(if ori[u] { d } else { -d });
        }
        let mut orig_edge = Vec::with_capacity(bimcf.num_edges());
        for e in bimcf.edges() {
            let (u, v) = (bimcf.u(e), bimcf.v(e));
            let u_head = bimcf.u_head(e) ^ ori[u];
            let v_head = bimcf.v_head(e) ^ ori[v];
            if u_head == v_head {
                return Err(Error::internal(format!("invalid orientation for edge {}", e)));
            }
            let (src, snk) = if v_head { (u, v) } else { (v, u) };
            let upper = if bimcf.upper(e) == INF {
                Mcf::INF
            } else {
                i64::from(bimcf.upper(e))
            };
            let cost = (bimcf.cost(e) * COST_MULTIPLIER).round() as i64;
            mcf.add_arc(src, snk, i64::from(bimcf.lower(e)), upper, cost);
            orig_edge.push(e);
        }
        Ok(OrientedBiMcf { bimcf, mcf, orig_edge })
    }

    pub fn mcf(&self) -> &Mcf {
        &self.mcf
    }

    pub fn translate_solution(&self, result: &McfResult) -> Result<BiMcfResult> {
        let mut solution: Vec<Flow> = vec![0; self.bimcf.num_edges()];
        for (a, &x) in result.solution.iter().enumerate() {
            if x < i64::from(Flow::MIN) || x > i64::from(INF) {
                return Err(Error::internal("oriented flow out of range"));
            }
            solution[self.orig_edge[a]] = x as Flow;
        }
        if !self.bimcf.is_valid(&solution) {
            return Err(Error::internal("oriented solution is infeasible for the BiMCF"));
        }
        let max_flow = crate::problems::bimcf::max_flow(&solution);
        Ok(BiMcfResult {
            solution,
            cost: result.cost as f64 / COST_MULTIPLIER,
            max_flow,
        })
    }
}
