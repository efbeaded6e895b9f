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

//! Splitting a BiMDF into its connected components.

use crate::error::{Error, Result};
use crate::graph::{Edge, Node};
use crate::problems::{BiMdf, BiMdfResult};

/// One independent sub-problem per connected component.
///
/// # Example
///
/// ```
/// use bimdf::{BiMdf, BiMdfResult, EdgeInfo};
/// use bimdf::reductions::ConnectedComponents;
///
/// let mut bimdf = BiMdf::new();
/// let a = bimdf.add_node(0);
/// let b = bimdf.add_node(0);
/// let c = bimdf.add_node(0);
/// bimdf.add(EdgeInfo::new(c, c, true, false));
/// bimdf.add(EdgeInfo::new(a, b, false, true));
///
/// let cc = ConnectedComponents::new(&bimdf);
/// assert_eq!(cc.num_components(), 2);
/// let results: Vec<_> = cc
///     .components()
///     .iter()
///     .map(|sub| BiMdfResult { solution: vec![0; sub.num_edges()], cost: 1.0 })
///     .collect();
/// let res = cc.translate_solutions(&results).unwrap();
/// assert_eq!(res.solution, vec![0, 0]);
/// assert_eq!(res.cost, 2.0);
/// ```
pub struct ConnectedComponents<'a> {
    orig: &'a BiMdf,
    bimdfs: Vec<BiMdf>,
    /// Component of every original node.
    pub node_component: Vec<usize>,
    /// Index of every original node in its component.
    pub sub_node: Vec<Node>,
    /// Index of every original edge in its component.
    pub sub_edge: Vec<Edge>,
}

impl<'a> ConnectedComponents<'a> {
    pub fn new(orig: &'a BiMdf) -> Self {
        let (ncomps, node_component) = orig.graph().graph().components();
        let mut bimdfs = vec![BiMdf::new(); ncomps];
        let sub_node = orig
            .nodes()
            .map(|u| bimdfs[node_component[u]].add_node(orig.demand(u)))
            .collect::<Vec<_>>();
        let sub_edge = orig
            .edges()
            .map(|e| {
                let mut info = orig.edge_info(e);
                let c = node_component[info.u];
                debug_assert_eq!(c, node_component[info.v]);
                info.u = sub_node[info.u];
                info.v = sub_node[info.v];
                bimdfs[c].add(info)
            })
            .collect();

        ConnectedComponents {
            orig,
            bimdfs,
            node_component,
            sub_node,
            sub_edge,
        }
    }

    pub fn num_components(&self) -> usize {
        self.bimdfs.len()
    }

    pub fn component(&self, i: usize) -> &BiMdf {
        &self.bimdfs[i]
    }

    pub fn components(&self) -> &[BiMdf] {
        &self.bimdfs
    }

    /// Combine one solution per component into a solution of the
    /// original problem.
    pub fn translate_solutions(&self, results: &[BiMdfResult]) -> Result<BiMdfResult> {
        if results.len() != self.bimdfs.len() {
            return Err(Error::internal(format!(
                "got {} solutions for {} components",
                results.len(),
                self.bimdfs.len()
            )));
        }
        let cost = results.iter().map(|r| r.cost).sum();
        let mut solution = Vec::with_capacity(self.orig.num_edges());
        for e in self.orig.edges() {
            let sub = &results[self.node_component[self.orig.u(e)]].solution;
            match sub.get(self.sub_edge[e]) {
                Some(&x) => solution.push(x),
                None => return Err(Error::internal("component solution has too few entries")),
            }
        }
        if !self.orig.is_valid(&solution) {
            return Err(Error::internal("combined component solutions are infeasible"));
        }
        Ok(BiMdfResult { solution, cost })
    }
}
