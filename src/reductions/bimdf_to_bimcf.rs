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

//! Linearizing the costs of a BiMDF around a guess.
//!
//! Every BiMDF edge becomes a bundle of BiMCF edges. Forward edges
//! increase the flow above the guess, backward edges (with both head
//! flags inverted) decrease it. Each of them covers a window of one or
//! two units and costs the average marginal cost of that window. A zero
//! BiMCF flow corresponds to the guess itself.

use crate::error::{Error, Result};
use crate::graph::{add_capacities, Edge, Flow, Node, INF};
use crate::problems::{BiMcf, BiMcfResult, BiMdf, BiMdfResult};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Offset of the finite difference estimating the slope of the
/// unbounded tail edges.
const LAST_ARC_DX: i64 = 10;

/// Relative tolerance for merging windows of equal marginal cost.
const CONSOLIDATE_EPS: f64 = 1e-6;

/// Parameters of the linearization.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BiMdfToBiMcfConfig {
    /// Number of units linearized on each side of the guess.
    pub max_deviation: Flow,
    /// Add one edge per direction for all deviations beyond the window.
    pub last_arc_uncapacitated: bool,
    /// Use windows of two units.
    pub even: bool,
    /// Merge adjacent windows with equal marginal cost.
    pub consolidate: bool,
}

impl Default for BiMdfToBiMcfConfig {
    fn default() -> Self {
        BiMdfToBiMcfConfig {
            max_deviation: 2,
            last_arc_uncapacitated: true,
            even: false,
            consolidate: true,
        }
    }
}

/// The edge emitted last, candidate for consolidation.
struct LastArc {
    mdf_edge: Edge,
    forward: bool,
    cost: f64,
    edge: Edge,
}

/// Accumulates the BiMCF edges of all BiMDF edges.
struct Builder {
    bimcf: BiMcf,
    is_forward: Vec<bool>,
    mdf_edge: Vec<Edge>,
    last: Option<LastArc>,
    consolidate: bool,
}

impl Builder {
    #[allow(clippy::too_many_arguments)]
    fn add_arc(
        &mut self,
        mdf_edge: Edge,
        (u, v): (Node, Node),
        (u_head, v_head): (bool, bool),
        forward: bool,
        cost: f64,
        upper: i64,
    ) {
        if upper <= 0 {
            return;
        }
        let upper = if upper >= i64::from(INF) { INF } else { upper as Flow };

        if self.consolidate {
            if let Some(last) = &self.last {
                if last.mdf_edge == mdf_edge
                    && last.forward == forward
                    && (last.cost - cost).abs() <= (CONSOLIDATE_EPS * cost).abs()
                {
                    let cap = add_capacities(self.bimcf.upper(last.edge), upper);
                    self.bimcf.set_upper(last.edge, cap);
                    return;
                }
            }
        }

        let e = self
            .bimcf
            .add_edge(u, v, u_head ^ !forward, v_head ^ !forward, 0, upper, cost);
        self.is_forward.push(forward);
        self.mdf_edge.push(mdf_edge);
        self.last = Some(LastArc {
            mdf_edge,
            forward,
            cost,
            edge: e,
        });
    }
}

/// The linearization of a BiMDF around a guess.
///
/// # Example
///
/// ```
/// use bimdf::{BiMdf, CostFunction, EdgeInfo};
/// use bimdf::problems::BiMcfResult;
/// use bimdf::reductions::{BiMdfToBiMcf, BiMdfToBiMcfConfig};
///
/// let mut bimdf = BiMdf::new();
/// let a = bimdf.add_node(0);
/// bimdf.add(EdgeInfo {
///     cost_function: CostFunction::quad_deviation(4.0, 1.0),
///     ..EdgeInfo::new(a, a, false, true)
/// });
///
/// let config = BiMdfToBiMcfConfig { last_arc_uncapacitated: false, ..Default::default() };
/// let lin = BiMdfToBiMcf::new(&bimdf, &[4], &config).unwrap();
/// // two forward and two backward unit windows, each costing 1 and 3
/// let costs: Vec<f64> = lin.bimcf().edges().map(|e| *lin.bimcf().cost(e)).collect();
/// assert_eq!(costs, vec![1.0, 3.0, 1.0, 3.0]);
///
/// let res = lin
///     .translate_solution(&BiMcfResult { solution: vec![0, 0, 1, 0], cost: 1.0, max_flow: 1 }, false)
///     .unwrap();
/// assert_eq!(res.solution, vec![3]);
/// ```
pub struct BiMdfToBiMcf<'a> {
    bimdf: &'a BiMdf,
    guess: Vec<Flow>,
    bimcf: BiMcf,
    /// Whether a BiMCF edge increases the flow of its BiMDF edge.
    pub is_forward: Vec<bool>,
    /// The BiMDF edge of every BiMCF edge.
    pub mdf_edge: Vec<Edge>,
    /// The BiMDF node of every BiMCF node (the identity).
    pub orig_node: Vec<Node>,
}

impl<'a> BiMdfToBiMcf<'a> {
    pub fn new(bimdf: &'a BiMdf, guess: &[Flow], config: &BiMdfToBiMcfConfig) -> Result<Self> {
        if guess.len() != bimdf.num_edges() {
            return Err(Error::internal("guess must have one value per edge"));
        }

        let mut demand: Vec<i64> = bimdf.nodes().map(|u| i64::from(bimdf.demand(u))).collect();
        let mut bimcf = BiMcf::new();
        for _ in bimdf.nodes() {
            bimcf.add_node(0);
        }
        let mut builder = Builder {
            bimcf,
            is_forward: vec![],
            mdf_edge: vec![],
            last: None,
            consolidate: config.consolidate,
        };
        let cap: i64 = if config.even { 2 } else { 1 };
        let max_dev = i64::from(config.max_deviation);

        for e in bimdf.edges() {
            let g = i64::from(guess[e]);
            let lower = i64::from(bimdf.lower(e));
            let upper = bimdf.upper(e);
            let uncapped = upper == INF;
            let upper = i64::from(upper);
            if g < lower || (!uncapped && g > upper) {
                return Err(Error::internal(format!("guess {} of edge {} violates its bounds", g, e)));
            }

            let (u, v) = (bimdf.u(e), bimdf.v(e));
            let heads = (bimdf.u_head(e), bimdf.v_head(e));
            demand[u] -= if heads.0 { g } else { -g };
            demand[v] -= if heads.1 { g } else { -g };

            let energy = |x: i64| bimdf.cost(e).evaluate(x as f64);
            let guess_cost = energy(g);

            // forward windows
            let mut ecost = guess_cost;
            let mut dev = 0;
            let mut i = cap;
            while i <= max_dev {
                let remain = if uncapped { cap } else { upper - g - (i - cap) };
                let remcap = cap.min(remain);
                if remcap <= 0 {
                    break;
                }
                let last_cost = ecost;
                dev = i - cap + remcap;
                ecost = energy(g + dev);
                builder.add_arc(e, (u, v), heads, true, (ecost - last_cost) / remcap as f64, remcap);
                i += cap;
            }
            if config.last_arc_uncapacitated {
                let cost = (energy(g + dev + LAST_ARC_DX) - energy(g + dev)) / LAST_ARC_DX as f64;
                // an unbounded edge must not have negative cost
                let cost = cost.max(0.0);
                let remain = if uncapped { i64::from(INF) } else { upper - g - dev };
                builder.add_arc(e, (u, v), heads, true, cost, remain);
            }

            // backward windows
            let mut ecost = guess_cost;
            let mut dev = 0;
            let mut i = cap;
            while i <= max_dev {
                let remain = g - lower - (i - cap);
                let remcap = cap.min(remain);
                if remcap <= 0 {
                    break;
                }
                let last_cost = ecost;
                dev = i - cap + remcap;
                ecost = energy(g - dev);
                builder.add_arc(e, (u, v), heads, false, (ecost - last_cost) / remcap as f64, remcap);
                i += cap;
            }
            let remain = g - lower - dev;
            if config.last_arc_uncapacitated && remain > 0 {
                let cost = (energy(g - dev - remain) - energy(g - dev)) / remain as f64;
                builder.add_arc(e, (u, v), heads, false, cost, remain);
            }
        }

        let mut bimcf = builder.bimcf;
        let orig_node = bimdf.nodes().collect();
        for u in bimdf.nodes() {
            if demand[u] < i64::from(Flow::MIN) || demand[u] >= i64::from(INF) {
                return Err(Error::internal(format!("linearized demand of node {} out of range", u)));
            }
            bimcf.set_demand(u, demand[u] as Flow);
        }

        Ok(BiMdfToBiMcf {
            bimdf,
            guess: guess.to_vec(),
            bimcf,
            is_forward: builder.is_forward,
            mdf_edge: builder.mdf_edge,
            orig_node,
        })
    }

    /// The linearized problem.
    pub fn bimcf(&self) -> &BiMcf {
        &self.bimcf
    }

    pub fn guess(&self) -> &[Flow] {
        &self.guess
    }

    /// Map a BiMCF flow back to `guess + forward - backward`.
    ///
    /// If `double_guess` is set the guess is doubled first. This is
    /// used when the BiMCF flow is a doubled half-integral flow, the
    /// result is then doubled as well and is not validated against the
    /// original bounds. Its cost is the cost of half the flow.
    pub fn translate_solution(&self, result: &BiMcfResult, double_guess: bool) -> Result<BiMdfResult> {
        if result.solution.len() != self.bimcf.num_edges() {
            return Err(Error::internal("BiMCF solution has wrong length"));
        }
        let mut solution: Vec<i64> = self
            .guess
            .iter()
            .map(|&g| if double_guess { 2 * i64::from(g) } else { i64::from(g) })
            .collect();
        for e in self.bimcf.edges() {
            let x = i64::from(result.solution[e]);
            solution[self.mdf_edge[e]] += if self.is_forward[e] { x } else { -x };
        }
        let solution = solution
            .into_iter()
            .map(|x| {
                if x < i64::from(Flow::MIN) || x > i64::from(INF) {
                    Err(Error::internal("translated flow out of range"))
                } else {
                    Ok(x as Flow)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        if double_guess {
            let cost = self.bimdf.cost_half(&solution);
            return Ok(BiMdfResult { solution, cost });
        }
        if !self.bimdf.is_valid(&solution) {
            return Err(Error::internal("linearized solution is infeasible for the BiMDF"));
        }
        let cost = self.bimdf.total_cost(&solution);
        Ok(BiMdfResult { solution, cost })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostFunction;
    use crate::problems::EdgeInfo;

    fn single_edge(lower: Flow, upper: Flow) -> BiMdf {
        let mut bimdf = BiMdf::new();
        let a = bimdf.add_node(0);
        let b = bimdf.add_node(0);
        bimdf.add(EdgeInfo {
            cost_function: CostFunction::abs_deviation(3.0, 2.0),
            lower,
            upper,
            ..EdgeInfo::new(a, b, false, true)
        });
        bimdf
    }

    #[test]
    fn test_demand_recentered() {
        let bimdf = single_edge(0, INF);
        let lin = BiMdfToBiMcf::new(&bimdf, &[3], &BiMdfToBiMcfConfig::default()).unwrap();
        assert_eq!(lin.bimcf().demand(0), 3);
        assert_eq!(lin.bimcf().demand(1), -3);
    }

    #[test]
    fn test_consolidation() {
        let bimdf = single_edge(0, INF);
        let config = BiMdfToBiMcfConfig {
            max_deviation: 4,
            ..Default::default()
        };
        let lin = BiMdfToBiMcf::new(&bimdf, &[3], &config).unwrap();
        let b = lin.bimcf();
        // all forward windows and the tail have slope 2
        assert_eq!(b.num_edges(), 2);
        assert_eq!(b.upper(0), INF);
        assert_eq!(*b.cost(0), 2.0);
        assert!(lin.is_forward[0]);
        // backward: 3 units down to the lower bound
        assert_eq!(b.upper(1), 3);
        assert!(!lin.is_forward[1]);
        assert!(b.u_head(1) && !b.v_head(1));

        let config = BiMdfToBiMcfConfig {
            max_deviation: 4,
            consolidate: false,
            ..Default::default()
        };
        let lin = BiMdfToBiMcf::new(&bimdf, &[3], &config).unwrap();
        assert_eq!(lin.bimcf().num_edges(), 5 + 3);
    }

    #[test]
    fn test_bounds() {
        let bimdf = single_edge(2, 5);
        let config = BiMdfToBiMcfConfig {
            max_deviation: 4,
            even: true,
            consolidate: false,
            last_arc_uncapacitated: true,
        };
        let lin = BiMdfToBiMcf::new(&bimdf, &[4], &config).unwrap();
        let b = lin.bimcf();
        let fwd: Vec<_> = b.edges().filter(|&e| lin.is_forward[e]).map(|e| b.upper(e)).collect();
        let bwd: Vec<_> = b.edges().filter(|&e| !lin.is_forward[e]).map(|e| b.upper(e)).collect();
        assert_eq!(fwd, vec![1]);
        assert_eq!(bwd, vec![2]);

        assert!(BiMdfToBiMcf::new(&bimdf, &[6], &config).is_err());
    }

    #[test]
    fn test_translate_double() {
        let bimdf = single_edge(0, INF);
        let lin = BiMdfToBiMcf::new(&bimdf, &[3], &BiMdfToBiMcfConfig::default()).unwrap();
        let n = lin.bimcf().num_edges();
        let res = lin
            .translate_solution(
                &BiMcfResult {
                    solution: vec![0; n],
                    cost: 0.0,
                    max_flow: 0,
                },
                true,
            )
            .unwrap();
        assert_eq!(res.solution, vec![6]);
        assert_eq!(res.cost, 0.0);
    }
}
