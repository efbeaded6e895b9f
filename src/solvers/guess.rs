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


//! Unconstrained integer guesses.

use crate::graph::Flow;
use crate::problems::BiMdf;

/// Compute the best integer flow value of every edge on its own.
///
/// The real guess of each cost function is rounded down and up, both
/// values are clamped to the bounds of the edge and the cheaper one is
/// chosen. The result respects all bounds but not conservation.
///
/// # Example
///
/// ```
/// use bimdf::{BiMdf, CostFunction, EdgeInfo};
/// use bimdf::solvers::make_guess;
///
/// let mut bimdf = BiMdf::new();
/// let a = bimdf.add_node(0);
/// let b = bimdf.add_node(0);
/// bimdf.add(EdgeInfo {
///     cost_function: CostFunction::quad_deviation(2.7, 1.0),
///     ..EdgeInfo::new(a, b, false, true)
/// });
/// bimdf.add(EdgeInfo {
///     cost_function: CostFunction::abs_deviation(8.0, 1.0),
///     upper: 5,
///     ..EdgeInfo::new(a, b, false, true)
/// });
/// assert_eq!(make_guess(&bimdf), vec![3, 5]);
/// ```
pub fn make_guess(bimdf: &BiMdf) -> Vec<Flow> {
    bimdf
        .edges()
        .map(|e| {
            let target = bimdf.guess(e);
            let lower = i64::from(bimdf.lower(e));
            let upper = i64::from(bimdf.upper(e));
            let floor = (target.floor() as i64).max(lower).min(upper);
            let ceil = (target.ceil() as i64).max(lower).min(upper);

            let mut best = floor;
            let mut best_cost = f64::INFINITY;
            let mut last_cost = f64::INFINITY;
            for x in floor..=ceil {
                let cost = bimdf.cost(e).evaluate(x as f64);
                if cost > last_cost {
                    break;
                }
                last_cost = cost;
                if cost < best_cost {
                    best_cost = cost;
                    best = x;
                }
            }
            best as Flow
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostFunction;
    use crate::problems::EdgeInfo;

    #[test]
    fn test_bounds() {
        let mut bimdf = BiMdf::new();
        let a = bimdf.add_node(0);
        bimdf.add(EdgeInfo {
            cost_function: CostFunction::abs_deviation(-3.5, 1.0),
            lower: 1,
            upper: 4,
            ..EdgeInfo::new(a, a, true, false)
        });
        bimdf.add(EdgeInfo {
            cost_function: CostFunction::scale_factor(0.4, 1.0, 0.1),
            ..EdgeInfo::new(a, a, true, false)
        });
        bimdf.add(EdgeInfo::new(a, a, false, true));

        let guess = make_guess(&bimdf);
        assert_eq!(guess, vec![1, 1, 0]);
        for e in bimdf.edges() {
            assert!(bimdf.lower(e) <= guess[e] && guess[e] <= bimdf.upper(e));
        }
    }
}
