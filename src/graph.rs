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

//! Arena based graphs.
//!
//! Nodes and edges are plain indices into the arena of the graph that
//! created them. Reductions never share handles between graphs, they
//! keep side tables mapping their indices back to the source problem.

/// A node index.
pub type Node = usize;

/// An edge index.
pub type Edge = usize;

/// Scalar type of flows, demands and bounds.
pub type Flow = i32;

/// The infinite flow value.
///
/// Upper bounds equal to this value are unbounded.
pub const INF: Flow = Flow::MAX;

/// Add two capacities, treating `INF` as absorbing.
pub fn add_capacities(a: Flow, b: Flow) -> Flow {
    if a == INF || b == INF {
        INF
    } else {
        a.saturating_add(b).min(INF)
    }
}

/// An undirected multigraph.
///
/// Self-loops appear twice in the incidence list of their node.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    ends: Vec<(Node, Node)>,
    incidence: Vec<Vec<Edge>>,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    pub fn with_nodes(n: usize) -> Self {
        Graph {
            ends: vec![],
            incidence: vec![vec![]; n],
        }
    }

    pub fn add_node(&mut self) -> Node {
        self.incidence.push(vec![]);
        self.incidence.len() - 1
    }

    pub fn add_edge(&mut self, u: Node, v: Node) -> Edge {
        let e = self.ends.len();
        self.ends.push((u, v));
        self.incidence[u].push(e);
        self.incidence[v].push(e);
        e
    }

    pub fn num_nodes(&self) -> usize {
        self.incidence.len()
    }

    pub fn num_edges(&self) -> usize {
        self.ends.len()
    }

    pub fn nodes(&self) -> std::ops::Range<Node> {
        0..self.num_nodes()
    }

    pub fn edges(&self) -> std::ops::Range<Edge> {
        0..self.num_edges()
    }

    pub fn u(&self, e: Edge) -> Node {
        self.ends[e].0
    }

    pub fn v(&self, e: Edge) -> Node {
        self.ends[e].1
    }

    pub fn enodes(&self, e: Edge) -> (Node, Node) {
        self.ends[e]
    }

    /// The edges incident to `u`.
    pub fn incident(&self, u: Node) -> &[Edge] {
        &self.incidence[u]
    }

    /// The end of `e` that is not `u`.
    pub fn opposite(&self, e: Edge, u: Node) -> Node {
        let (a, b) = self.ends[e];
        if a == u {
            b
        } else {
            a
        }
    }

    /// Compute the connected components.
    ///
    /// Returns the number of components and the component index of each
    /// node.
    pub fn components(&self) -> (usize, Vec<usize>) {
        let n = self.num_nodes();
        let mut components = vec![usize::MAX; n];
        let mut q = vec![];
        let mut ncomponents = 0;

        for s in self.nodes() {
            if components[s] != usize::MAX {
                continue;
            }
            components[s] = ncomponents;
            q.push(s);
            while let Some(u) = q.pop() {
                for &e in self.incident(u) {
                    let v = self.opposite(e, u);
                    if components[v] != ncomponents {
                        components[v] = ncomponents;
                        q.push(v);
                    }
                }
            }
            ncomponents += 1;
        }

        (ncomponents, components)
    }
}

/// An undirected graph with a head flag at each end of every edge.
///
/// Flow on an edge counts positive at an end with head flag `true` and
/// negative at an end with head flag `false`.
#[derive(Clone, Debug, Default)]
pub struct BidirectedGraph {
    graph: Graph,
    u_head: Vec<bool>,
    v_head: Vec<bool>,
}

impl BidirectedGraph {
    pub fn new() -> Self {
        BidirectedGraph::default()
    }

    pub fn add_node(&mut self) -> Node {
        self.graph.add_node()
    }

    pub fn add_edge(&mut self, u: Node, v: Node, u_head: bool, v_head: bool) -> Edge {
        self.u_head.push(u_head);
        self.v_head.push(v_head);
        self.graph.add_edge(u, v)
    }

    /// The underlying undirected graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.num_edges()
    }

    pub fn nodes(&self) -> std::ops::Range<Node> {
        self.graph.nodes()
    }

    pub fn edges(&self) -> std::ops::Range<Edge> {
        self.graph.edges()
    }

    pub fn u(&self, e: Edge) -> Node {
        self.graph.u(e)
    }

    pub fn v(&self, e: Edge) -> Node {
        self.graph.v(e)
    }

    pub fn u_head(&self, e: Edge) -> bool {
        self.u_head[e]
    }

    pub fn v_head(&self, e: Edge) -> bool {
        self.v_head[e]
    }

    /// Iterate over the ends `(edge, is_head)` at node `u`.
    ///
    /// A self-loop yields both of its ends.
    pub fn ends_at(&self, u: Node) -> impl Iterator<Item = (Edge, bool)> + '_ {
        let mut last = None;
        self.graph.incident(u).iter().map(move |&e| {
            let (a, b) = self.graph.enodes(e);
            let head = if a == b {
                // first occurrence is the u-end, second the v-end
                let second = last == Some(e);
                last = Some(e);
                if second {
                    self.v_head[e]
                } else {
                    self.u_head[e]
                }
            } else if a == u {
                self.u_head[e]
            } else {
                self.v_head[e]
            };
            (e, head)
        })
    }

    /// Signed contribution of a flow value at the `u` and `v` end.
    pub fn signed(&self, e: Edge, x: Flow) -> (Flow, Flow) {
        (
            if self.u_head[e] { x } else { -x },
            if self.v_head[e] { x } else { -x },
        )
    }
}

/// A bidirected graph with node demands, edge bounds and edge costs.
///
/// A solution assigns an integer to each edge. It is valid if it is
/// within the edge bounds and, at each node, the signed sum of incident
/// edge values equals the demand.
#[derive(Clone, Debug, Default)]
pub struct FlowGraph<C> {
    graph: BidirectedGraph,
    demand: Vec<Flow>,
    lower: Vec<Flow>,
    upper: Vec<Flow>,
    cost: Vec<C>,
}

impl<C> FlowGraph<C> {
    pub fn new() -> Self {
        FlowGraph {
            graph: BidirectedGraph::new(),
            demand: vec![],
            lower: vec![],
            upper: vec![],
            cost: vec![],
        }
    }

    pub fn add_node(&mut self, demand: Flow) -> Node {
        self.demand.push(demand);
        self.graph.add_node()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_edge(
        &mut self,
        u: Node,
        v: Node,
        u_head: bool,
        v_head: bool,
        lower: Flow,
        upper: Flow,
        cost: C,
    ) -> Edge {
        self.lower.push(lower);
        self.upper.push(upper);
        self.cost.push(cost);
        self.graph.add_edge(u, v, u_head, v_head)
    }

    /// The underlying bidirected graph.
    pub fn graph(&self) -> &BidirectedGraph {
        &self.graph
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.num_edges()
    }

    pub fn nodes(&self) -> std::ops::Range<Node> {
        self.graph.nodes()
    }

    pub fn edges(&self) -> std::ops::Range<Edge> {
        self.graph.edges()
    }

    pub fn u(&self, e: Edge) -> Node {
        self.graph.u(e)
    }

    pub fn v(&self, e: Edge) -> Node {
        self.graph.v(e)
    }

    pub fn u_head(&self, e: Edge) -> bool {
        self.graph.u_head(e)
    }

    pub fn v_head(&self, e: Edge) -> bool {
        self.graph.v_head(e)
    }

    pub fn demand(&self, u: Node) -> Flow {
        self.demand[u]
    }

    pub fn set_demand(&mut self, u: Node, demand: Flow) {
        self.demand[u] = demand;
    }

    pub fn lower(&self, e: Edge) -> Flow {
        self.lower[e]
    }

    pub fn upper(&self, e: Edge) -> Flow {
        self.upper[e]
    }

    pub fn set_upper(&mut self, e: Edge, upper: Flow) {
        self.upper[e] = upper;
    }

    pub fn cost(&self, e: Edge) -> &C {
        &self.cost[e]
    }

    /// Check bounds and flow conservation of a solution.
    pub fn is_valid(&self, sol: &[Flow]) -> bool {
        if sol.len() != self.num_edges() {
            return false;
        }
        let mut sum = vec![0i64; self.num_nodes()];
        for e in self.edges() {
            let x = sol[e];
            if x < self.lower[e] || x > self.upper[e] {
                return false;
            }
            let (su, sv) = self.graph.signed(e, x);
            sum[self.u(e)] += i64::from(su);
            sum[self.v(e)] += i64::from(sv);
        }
        self.nodes().all(|u| sum[u] == i64::from(self.demand[u]))
    }

    /// Net flow minus demand at each node for a guess.
    ///
    /// All entries are zero if and only if `flow` satisfies flow
    /// conservation.
    pub fn apply_flow(&self, flow: &[Flow]) -> Vec<i64> {
        let mut out: Vec<i64> = self.demand.iter().map(|&d| -i64::from(d)).collect();
        for e in self.edges() {
            debug_assert!(flow[e] >= self.lower[e] && flow[e] <= self.upper[e]);
            let (su, sv) = self.graph.signed(e, flow[e]);
            out[self.u(e)] += i64::from(su);
            out[self.v(e)] += i64::from(sv);
        }
        out
    }
}

/// A directed graph.
#[derive(Clone, Debug, Default)]
pub struct Digraph {
    arcs: Vec<(Node, Node)>,
    outarcs: Vec<Vec<Edge>>,
    inarcs: Vec<Vec<Edge>>,
}

impl Digraph {
    pub fn new() -> Self {
        Digraph::default()
    }

    pub fn add_node(&mut self) -> Node {
        self.outarcs.push(vec![]);
        self.inarcs.push(vec![]);
        self.outarcs.len() - 1
    }

    pub fn add_arc(&mut self, src: Node, snk: Node) -> Edge {
        let a = self.arcs.len();
        self.arcs.push((src, snk));
        self.outarcs[src].push(a);
        self.inarcs[snk].push(a);
        a
    }

    pub fn num_nodes(&self) -> usize {
        self.outarcs.len()
    }

    pub fn num_edges(&self) -> usize {
        self.arcs.len()
    }

    pub fn nodes(&self) -> std::ops::Range<Node> {
        0..self.num_nodes()
    }

    pub fn edges(&self) -> std::ops::Range<Edge> {
        0..self.num_edges()
    }

    pub fn src(&self, a: Edge) -> Node {
        self.arcs[a].0
    }

    pub fn snk(&self, a: Edge) -> Node {
        self.arcs[a].1
    }

    pub fn outarcs(&self, u: Node) -> &[Edge] {
        &self.outarcs[u]
    }

    pub fn inarcs(&self, u: Node) -> &[Edge] {
        &self.inarcs[u]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        let mut g = Graph::with_nodes(6);
        g.add_edge(0, 1);
        g.add_edge(2, 1);
        g.add_edge(3, 3);
        g.add_edge(4, 5);
        let (n, comps) = g.components();
        assert_eq!(n, 3);
        assert_eq!(comps[0], comps[1]);
        assert_eq!(comps[1], comps[2]);
        assert_eq!(comps[4], comps[5]);
        assert_ne!(comps[0], comps[3]);
        assert_ne!(comps[3], comps[4]);
    }

    #[test]
    fn test_ends_at_self_loop() {
        let mut g = BidirectedGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let l = g.add_edge(a, a, true, false);
        let e = g.add_edge(b, a, false, true);
        let ends: Vec<_> = g.ends_at(a).collect();
        assert_eq!(ends, vec![(l, true), (l, false), (e, true)]);
    }

    #[test]
    fn test_validity() {
        let mut g = FlowGraph::<()>::new();
        let a = g.add_node(-2);
        let b = g.add_node(2);
        let c = g.add_node(0);
        g.add_edge(a, b, false, true, 0, INF, ());
        g.add_edge(c, c, false, false, 0, 3, ());
        assert!(g.is_valid(&[2, 0]));
        assert!(!g.is_valid(&[1, 0]));
        assert!(!g.is_valid(&[2, 1]));
        assert!(!g.is_valid(&[2]));
        assert_eq!(g.apply_flow(&[1, 0]), vec![1, -1, 0]);
    }

    #[test]
    fn test_add_capacities() {
        assert_eq!(add_capacities(1, 2), 3);
        assert_eq!(add_capacities(INF, 2), INF);
        assert_eq!(add_capacities(INF - 1, 5), INF);
    }
}
