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

//! Maximum weight perfect matching backends.
//!
//! Both backends return the same optimal weight on every instance they
//! accept, the choice only affects speed and the set of accepted
//! instances.

pub mod bipartite;
pub mod blossom;

pub use crate::config::MatchingSolverKind;

use crate::error::{Error, Result};
use crate::problems::{Matching, MatchingResult};

/// Compute a maximum weight perfect matching.
///
/// Fails with `Error::Infeasible` if the graph has no perfect matching.
///
/// # Example
///
/// ```
/// use bimdf::matching::{solve_matching, MatchingSolverKind};
/// use bimdf::problems::Matching;
///
/// let mut m = Matching::new();
/// let a = m.add_node();
/// let b = m.add_node();
/// let c = m.add_node();
/// let d = m.add_node();
/// m.add_edge(a, b, 2);
/// m.add_edge(c, d, 2);
/// m.add_edge(a, c, 3);
/// m.add_edge(b, d, 3);
///
/// for &kind in &[MatchingSolverKind::Blossom, MatchingSolverKind::Bipartite] {
///     let res = solve_matching(&m, kind).unwrap();
///     assert_eq!(res.weight, 6);
///     assert_eq!(res.solution, vec![false, false, true, true]);
/// }
/// ```
pub fn solve_matching(matching: &Matching, kind: MatchingSolverKind) -> Result<MatchingResult> {
    let solution = match kind {
        MatchingSolverKind::Blossom => blossom::solve(matching)?,
        MatchingSolverKind::Bipartite => bipartite::solve(matching)?,
    };
    if !matching.is_perfect(&solution) {
        return Err(Error::internal("matching backend returned an imperfect matching"));
    }
    let weight = matching.cost(&solution);
    Ok(MatchingResult { solution, weight })
}
