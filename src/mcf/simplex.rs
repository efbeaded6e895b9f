/*
 * Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */
//! A primal network simplex on spanning tree bases.
//!
//! Lower bounds are shifted away before the first pivot. An artificial
//! root is joined to every node by an uncapacitated arc of high cost and
//! these arcs form the initial basis. The tree is kept as parent links
//! with explicit child lists; after a pivot only the subtree that was
//! moved gets new depths and potentials.
//!
//! Ties in the ratio test are broken so that the basis stays strongly
//! feasible (every node can send a positive amount to the root), which
//! excludes cycling on degenerate pivots.

use super::SolutionState;
use crate::graph::{Edge, Node};
use crate::problems::mcf::{Mcf, Scalar};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ArcState {
    Tree,
    Lower,
    Upper,
}

/// Network simplex solver for a borrowed [`Mcf`] instance.
///
/// # Example
///
/// ```
/// use bimdf::mcf::{NetworkSimplex, SolutionState};
/// use bimdf::problems::Mcf;
///
/// let mut mcf = Mcf::new();
/// let s = mcf.add_node(3);
/// let a = mcf.add_node(0);
/// let t = mcf.add_node(-3);
/// mcf.add_arc(s, a, 0, 5, 2);
/// mcf.add_arc(a, t, 0, 5, 2);
/// mcf.add_arc(s, t, 0, 1, 1);
///
/// let mut spx = NetworkSimplex::new(&mcf);
/// assert_eq!(spx.solve(), SolutionState::Optimal);
/// assert_eq!(spx.value(), 9);
/// assert_eq!(spx.flows(), vec![2, 2, 1]);
/// ```
pub struct NetworkSimplex<'a> {
    mcf: &'a Mcf,
    root: Node,

    // real arcs first, then one artificial arc per node
    tail: Vec<Node>,
    head: Vec<Node>,
    cost: Vec<Scalar>,
    cap: Vec<Scalar>,
    flow: Vec<Scalar>,
    state: Vec<ArcState>,

    parent: Vec<Node>,
    parent_arc: Vec<Edge>,
    /// `true` if the parent arc points from the node to its parent.
    upward: Vec<bool>,
    depth: Vec<usize>,
    potential: Vec<Scalar>,
    children: Vec<Vec<Node>>,

    next_arc: usize,
    block_size: usize,
    niter: usize,
}

impl<'a> NetworkSimplex<'a> {
    pub fn new(mcf: &'a Mcf) -> Self {
        NetworkSimplex {
            mcf,
            root: mcf.num_nodes(),
            tail: vec![],
            head: vec![],
            cost: vec![],
            cap: vec![],
            flow: vec![],
            state: vec![],
            parent: vec![],
            parent_arc: vec![],
            upward: vec![],
            depth: vec![],
            potential: vec![],
            children: vec![],
            next_arc: 0,
            block_size: 0,
            niter: 0,
        }
    }

    /// Run the simplex from the artificial basis.
    pub fn solve(&mut self) -> SolutionState {
        if !self.init() {
            return SolutionState::Infeasible;
        }
        while let Some(a) = self.find_entering_arc() {
            self.niter += 1;
            if !self.pivot(a) {
                return SolutionState::Unbounded;
            }
        }
        let m = self.mcf.num_edges();
        if self.flow[m..].iter().any(|&x| x != 0) {
            SolutionState::Infeasible
        } else {
            SolutionState::Optimal
        }
    }

    /// The flow on every arc of the instance.
    pub fn flows(&self) -> Vec<Scalar> {
        self.mcf
            .graph
            .edges()
            .map(|a| self.flow.get(a).copied().unwrap_or(0) + self.mcf.lower[a])
            .collect()
    }

    /// The cost of the current flow.
    pub fn value(&self) -> Scalar {
        self.mcf.compute_cost(&self.flows())
    }

    pub fn num_iterations(&self) -> usize {
        self.niter
    }

    fn init(&mut self) -> bool {
        let mcf = self.mcf;
        let n = mcf.num_nodes();
        let m = mcf.num_edges();
        let root = self.root;

        self.tail = Vec::with_capacity(m + n);
        self.head = Vec::with_capacity(m + n);
        self.cost = Vec::with_capacity(m + n);
        self.cap = Vec::with_capacity(m + n);
        self.flow = vec![0; m + n];
        self.state = Vec::with_capacity(m + n);
        self.niter = 0;

        let mut excess = mcf.supply.clone();
        let mut art_cost: Scalar = 1;
        for a in mcf.graph.edges() {
            let (lb, ub) = (mcf.lower[a], mcf.upper[a]);
            if lb > ub {
                return false;
            }
            let (u, v) = (mcf.graph.src(a), mcf.graph.snk(a));
            excess[u] -= lb;
            excess[v] += lb;
            self.tail.push(u);
            self.head.push(v);
            self.cost.push(mcf.cost[a]);
            self.cap.push(if ub == Mcf::INF { Mcf::INF } else { ub - lb });
            self.state.push(ArcState::Lower);
            art_cost = art_cost.saturating_add(mcf.cost[a].saturating_abs());
        }
        // potentials stay within twice the artificial cost
        let art_cost = art_cost.min(Scalar::MAX / 8);

        self.parent = vec![root; n + 1];
        self.parent_arc = vec![m + n; n + 1];
        self.upward = vec![false; n + 1];
        self.depth = vec![0; n + 1];
        self.potential = vec![0; n + 1];
        self.children = vec![vec![]; n + 1];
        self.children[root] = (0..n).collect();

        for u in 0..n {
            let a = m + u;
            if excess[u] >= 0 {
                self.tail.push(u);
                self.head.push(root);
                self.flow[a] = excess[u];
                self.upward[u] = true;
                self.potential[u] = art_cost;
            } else {
                self.tail.push(root);
                self.head.push(u);
                self.flow[a] = -excess[u];
                self.potential[u] = -art_cost;
            }
            self.cost.push(art_cost);
            self.cap.push(Mcf::INF);
            self.state.push(ArcState::Tree);
            self.parent_arc[u] = a;
            self.depth[u] = 1;
        }

        self.next_arc = 0;
        self.block_size = (((m + n) as f64).sqrt() as usize).max(10);
        true
    }

    fn reduced_cost(&self, a: Edge) -> Scalar {
        self.cost[a] - self.potential[self.tail[a]] + self.potential[self.head[a]]
    }

    fn residual(&self, a: Edge) -> Scalar {
        if self.cap[a] == Mcf::INF {
            Mcf::INF
        } else {
            self.cap[a] - self.flow[a]
        }
    }

    /// Block search: the most violating arc of the first block that
    /// contains one.
    fn find_entering_arc(&mut self) -> Option<Edge> {
        let total = self.cost.len();
        let mut best = None;
        let mut best_violation = 0;
        let mut count = 0;
        for k in 0..total {
            let a = (self.next_arc + k) % total;
            let violation = match self.state[a] {
                ArcState::Lower => -self.reduced_cost(a),
                ArcState::Upper => self.reduced_cost(a),
                ArcState::Tree => 0,
            };
            if violation > best_violation {
                best_violation = violation;
                best = Some(a);
            }
            count += 1;
            if count == self.block_size {
                if best.is_some() {
                    self.next_arc = (a + 1) % total;
                    return best;
                }
                count = 0;
            }
        }
        best
    }

    fn join(&self, mut u: Node, mut v: Node) -> Node {
        while u != v {
            if self.depth[u] >= self.depth[v] {
                u = self.parent[u];
            } else {
                v = self.parent[v];
            }
        }
        u
    }

    /// Push flow around the cycle of `a` and exchange the leaving arc.
    ///
    /// Returns `false` if the cycle has unbounded capacity.
    fn pivot(&mut self, a: Edge) -> bool {
        let increase = self.state[a] == ArcState::Lower;
        let (first, second) = if increase {
            (self.tail[a], self.head[a])
        } else {
            (self.head[a], self.tail[a])
        };
        let join = self.join(first, second);

        // flow runs down from `join` to `first`, through `a` and up
        // from `second` back to `join`
        let mut delta = if increase { self.residual(a) } else { self.flow[a] };
        let mut leaving: Option<(Node, bool)> = None;
        let mut u = first;
        while u != join {
            let e = self.parent_arc[u];
            let d = if self.upward[u] { self.flow[e] } else { self.residual(e) };
            if d < delta {
                delta = d;
                leaving = Some((u, true));
            }
            u = self.parent[u];
        }
        let mut u = second;
        while u != join {
            let e = self.parent_arc[u];
            let d = if self.upward[u] { self.residual(e) } else { self.flow[e] };
            if d <= delta {
                delta = d;
                leaving = Some((u, false));
            }
            u = self.parent[u];
        }
        if delta == Mcf::INF {
            return false;
        }

        if delta != 0 {
            if increase {
                self.flow[a] += delta;
            } else {
                self.flow[a] -= delta;
            }
            let mut u = first;
            while u != join {
                let e = self.parent_arc[u];
                if self.upward[u] {
                    self.flow[e] -= delta;
                } else {
                    self.flow[e] += delta;
                }
                u = self.parent[u];
            }
            let mut u = second;
            while u != join {
                let e = self.parent_arc[u];
                if self.upward[u] {
                    self.flow[e] += delta;
                } else {
                    self.flow[e] -= delta;
                }
                u = self.parent[u];
            }
        }

        match leaving {
            None => {
                self.state[a] = if increase { ArcState::Upper } else { ArcState::Lower };
            }
            Some((out, on_first)) => {
                let out_arc = self.parent_arc[out];
                self.state[out_arc] = if self.flow[out_arc] == 0 {
                    ArcState::Lower
                } else {
                    ArcState::Upper
                };
                self.state[a] = ArcState::Tree;
                let (inner, outer) = if on_first { (first, second) } else { (second, first) };
                self.reroot(inner, out, outer, a);
            }
        }
        true
    }

    /// Cut the parent arc of `out` and hang its subtree below `outer`
    /// via `a`, with `inner` as the new subtree root.
    fn reroot(&mut self, inner: Node, out: Node, outer: Node, a: Edge) {
        let p = self.parent[out];
        self.remove_child(p, out);

        let mut child = inner;
        let mut new_parent = outer;
        let mut new_arc = a;
        let mut new_upward = self.tail[a] == inner;
        loop {
            let old_parent = self.parent[child];
            let old_arc = self.parent_arc[child];
            let old_upward = self.upward[child];
            self.parent[child] = new_parent;
            self.parent_arc[child] = new_arc;
            self.upward[child] = new_upward;
            self.children[new_parent].push(child);
            if child == out {
                break;
            }
            self.remove_child(old_parent, child);
            new_parent = child;
            child = old_parent;
            new_arc = old_arc;
            new_upward = !old_upward;
        }

        let mut stack = vec![inner];
        while let Some(u) = stack.pop() {
            let p = self.parent[u];
            let e = self.parent_arc[u];
            self.depth[u] = self.depth[p] + 1;
            self.potential[u] = if self.upward[u] {
                self.potential[p] + self.cost[e]
            } else {
                self.potential[p] - self.cost[e]
            };
            stack.extend_from_slice(&self.children[u]);
        }
    }

    fn remove_child(&mut self, p: Node, c: Node) {
        if let Some(i) = self.children[p].iter().position(|&x| x == c) {
            self.children[p].swap_remove(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transportation() {
        // two sources, two sinks, cheapest assignment crosses over
        let mut mcf = Mcf::new();
        let s1 = mcf.add_node(2);
        let s2 = mcf.add_node(2);
        let t1 = mcf.add_node(-2);
        let t2 = mcf.add_node(-2);
        mcf.add_arc(s1, t1, 0, Mcf::INF, 4);
        mcf.add_arc(s1, t2, 0, Mcf::INF, 1);
        mcf.add_arc(s2, t1, 0, Mcf::INF, 2);
        mcf.add_arc(s2, t2, 0, Mcf::INF, 5);

        let mut spx = NetworkSimplex::new(&mcf);
        assert_eq!(spx.solve(), SolutionState::Optimal);
        assert_eq!(spx.value(), 6);
        assert_eq!(spx.flows(), vec![0, 2, 2, 0]);
    }

    #[test]
    fn test_negative_cycle() {
        let mut mcf = Mcf::new();
        let a = mcf.add_node(0);
        let b = mcf.add_node(0);
        mcf.add_arc(a, b, 0, 3, -2);
        mcf.add_arc(b, a, 0, Mcf::INF, 1);
        let mut spx = NetworkSimplex::new(&mcf);
        assert_eq!(spx.solve(), SolutionState::Optimal);
        assert_eq!(spx.value(), -3);

        mcf.upper[0] = Mcf::INF;
        let mut spx = NetworkSimplex::new(&mcf);
        assert_eq!(spx.solve(), SolutionState::Unbounded);
    }

    #[test]
    fn test_self_loop() {
        let mut mcf = Mcf::new();
        let a = mcf.add_node(0);
        mcf.add_arc(a, a, 0, 4, -1);
        let mut spx = NetworkSimplex::new(&mcf);
        assert_eq!(spx.solve(), SolutionState::Optimal);
        assert_eq!(spx.flows(), vec![4]);
    }

    #[test]
    fn test_infeasible() {
        let mut mcf = Mcf::new();
        let a = mcf.add_node(2);
        let b = mcf.add_node(-2);
        mcf.add_arc(a, b, 0, 1, 0);
        let mut spx = NetworkSimplex::new(&mcf);
        assert_eq!(spx.solve(), SolutionState::Infeasible);

        let mut mcf = Mcf::new();
        let a = mcf.add_node(0);
        let b = mcf.add_node(0);
        mcf.add_arc(a, b, 3, 2, 0);
        let mut spx = NetworkSimplex::new(&mcf);
        assert_eq!(spx.solve(), SolutionState::Infeasible);
    }
}
