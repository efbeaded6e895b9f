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

//! General graphs via Edmonds' blossom algorithm.

use std::collections::HashMap;

use log::debug;
use num_integer::Integer;
use num_traits::NumCast;

use crate::error::{Error, Result};
use crate::graph::{Edge, Node};
use crate::problems::Matching;

/// Largest absolute weight handed to the `i32` blossom solver.
pub const MAX_WEIGHT: i64 = 1 << 28;

/// Solve with the `mwmatching` blossom implementation.
///
/// Parallel edges are reduced to the heaviest one, self-loops are
/// dropped. Weights are shifted to be positive, which does not change
/// the optimal perfect matching because every perfect matching has the
/// same number of edges.
///
/// If some weight exceeds [`MAX_WEIGHT`] in magnitude, all weights are
/// divided by the smallest integer factor that brings them into range
/// and rounded. The result is then optimal for the rounded weights
/// only.
pub fn solve(matching: &Matching) -> Result<Vec<bool>> {
    let g = &matching.graph;
    let n = g.num_nodes();
    let mut solution = vec![false; g.num_edges()];

    if n == 0 {
        return Ok(solution);
    }
    if n % 2 == 1 {
        return Err(Error::Infeasible("odd number of nodes".into()));
    }

    let mut best: HashMap<(Node, Node), Edge> = HashMap::new();
    for e in g.edges() {
        let (u, v) = g.enodes(e);
        if u == v {
            continue;
        }
        let key = (u.min(v), u.max(v));
        let f = best.entry(key).or_insert(e);
        if matching.weight[e] > matching.weight[*f] {
            *f = e;
        }
    }

    if best.is_empty() {
        return Err(Error::Infeasible("no edges to match".into()));
    }

    // sort for deterministic results
    let mut pairs: Vec<_> = best.into_iter().collect();
    pairs.sort_unstable();

    let max_abs = pairs
        .iter()
        .map(|&(_, e)| matching.weight[e].saturating_abs())
        .max()
        .unwrap_or(0);
    let scale = if max_abs > MAX_WEIGHT {
        Integer::div_ceil(&max_abs, &MAX_WEIGHT)
    } else {
        1
    };
    if scale > 1 {
        debug!("blossom weights divided by {} (max |weight| = {})", scale, max_abs);
    }

    let shift = MAX_WEIGHT + 1;
    let mut edges: mwmatching::Edges = Vec::with_capacity(pairs.len());
    for &((u, v), e) in &pairs {
        let w = (matching.weight[e] as f64 / scale as f64).round() as i64 + shift;
        let w: mwmatching::Weight = NumCast::from(w)
            .ok_or_else(|| Error::internal(format!("scaled matching weight {} out of range", w)))?;
        edges.push((u, v, w));
    }

    let mate = mwmatching::Matching::new(edges).max_cardinality().solve();
    if mate.len() != n || mate.iter().any(|&v| v == mwmatching::SENTINEL) {
        return Err(Error::Infeasible("graph has no perfect matching".into()));
    }

    let lookup: HashMap<(Node, Node), Edge> = pairs.into_iter().collect();
    for u in 0..n {
        let v = mate[u];
        if u < v {
            match lookup.get(&(u, v)) {
                Some(&e) => solution[e] = true,
                None => return Err(Error::internal("blossom solver matched a non-edge")),
            }
        }
    }

    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_edges() {
        let mut m = Matching::new();
        let a = m.add_node();
        let b = m.add_node();
        m.add_edge(a, b, -5);
        m.add_edge(a, b, -2);
        m.add_edge(a, a, 100);
        assert_eq!(solve(&m).unwrap(), vec![false, true, false]);
    }

    #[test]
    fn test_negative_weights() {
        // the perfect matching must be chosen although it is expensive
        let mut m = Matching::new();
        for _ in 0..4 {
            m.add_node();
        }
        m.add_edge(0, 1, -10);
        m.add_edge(2, 3, -10);
        m.add_edge(1, 2, 5);
        assert_eq!(solve(&m).unwrap(), vec![true, true, false]);
    }

    #[test]
    fn test_infeasible() {
        let mut m = Matching::new();
        for _ in 0..4 {
            m.add_node();
        }
        m.add_edge(0, 1, 1);
        m.add_edge(0, 2, 1);
        m.add_edge(0, 3, 1);
        assert!(solve(&m).unwrap_err().is_infeasible());

        let mut m = Matching::new();
        m.add_node();
        assert!(solve(&m).unwrap_err().is_infeasible());
    }

    #[test]
    fn test_large_weights() {
        // heavy weights are scaled into range, the optimum survives
        let mut m = Matching::new();
        for _ in 0..4 {
            m.add_node();
        }
        let big = 300 * (1 << 20);
        m.add_edge(0, 1, -big);
        m.add_edge(2, 3, -big);
        m.add_edge(0, 2, -2 * big - 5);
        m.add_edge(1, 3, 40 * MAX_WEIGHT);
        assert_eq!(solve(&m).unwrap(), vec![false, false, true, true]);

        let mut m = Matching::new();
        m.add_node();
        m.add_node();
        m.add_edge(0, 1, i64::MAX);
        m.add_edge(0, 1, i64::MIN + 1);
        assert_eq!(solve(&m).unwrap(), vec![true, false]);
    }
}
