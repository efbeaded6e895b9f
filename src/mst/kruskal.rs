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

//! Implementation of Kruskal's algorithm

use crate::graph::{Edge, Graph};

/// Run Kruskal's algorithm on an undirected multigraph.
///
/// * `g` is the undirected graph, `weights` the edge weights
///
/// Returns the edges of a minimum spanning *forest*, one tree per
/// connected component. Self-loops are never selected.
///
/// # Example
///
/// ```
/// use bimdf::graph::Graph;
/// use bimdf::mst::kruskal;
/// use ordered_float::OrderedFloat;
///
/// let mut g = Graph::with_nodes(5);
/// let weights = [1.5, 0.5, 2.0, 0.25, 3.0, 1.0];
/// g.add_edge(0, 1);
/// g.add_edge(1, 2);
/// g.add_edge(0, 2);
/// g.add_edge(3, 4);
/// g.add_edge(3, 3);
/// g.add_edge(4, 3);
///
/// let mut tree = kruskal(&g, |e| OrderedFloat(weights[e]));
/// tree.sort();
/// assert_eq!(tree, vec![0, 1, 3]);
/// ```
pub fn kruskal<W, F>(g: &Graph, weights: F) -> Vec<Edge>
where
    W: Ord,
    F: Fn(Edge) -> W,
{
    let mut edges: Vec<_> = g.edges().collect();
    edges.sort_by_key(|&e| weights(e));

    // parent map for finding
    let mut comps = vec![Component::Root(0); g.num_nodes()];
    let mut tree = Vec::with_capacity(g.num_nodes().saturating_sub(1));

    for e in edges {
        let (u, v) = g.enodes(e);
        let (uroot, udepth) = find_root(&comps, u);
        let (vroot, vdepth) = find_root(&comps, v);
        if uroot != vroot {
            tree.push(e);
            if g.num_nodes() - 1 == tree.len() {
                break;
            }
            if udepth < vdepth {
                comps[uroot] = Component::Node(vroot);
            } else {
                comps[vroot] = Component::Node(uroot);
                if udepth == vdepth {
                    comps[uroot] = Component::Root(udepth + 1);
                }
            }
        }
    }

    tree
}

/// Union-Find data-structure for Kruskal.
#[derive(Clone, Copy)]
enum Component {
    /// The root element with the tree's depth.
    Root(usize),
    /// An inner node with the parent node.
    Node(usize),
}

/// Return the root node and the tree's depth of node `u`.
fn find_root(comps: &[Component], u: usize) -> (usize, usize) {
    let mut v = u;
    loop {
        match comps[v] {
            Component::Node(parent) => v = parent,
            Component::Root(depth) => return (v, depth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forest() {
        let mut g = Graph::with_nodes(6);
        let w = [4, 1, 3, 2, 7, 5, 1];
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(2, 0);
        g.add_edge(0, 2);
        g.add_edge(3, 4);
        g.add_edge(4, 5);
        g.add_edge(5, 3);

        let tree = kruskal(&g, |e| w[e]);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.iter().map(|&e| w[e]).sum::<i32>(), 9);
        assert!(tree.contains(&1) && tree.contains(&3) && tree.contains(&6));
    }

    #[test]
    fn test_empty() {
        let g = Graph::new();
        assert!(kruskal(&g, |e| e).is_empty());
    }
}
