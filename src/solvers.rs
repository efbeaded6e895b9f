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


//! Solvers for BiMDF problems and their sub-problems.
//!
//! The main entry point is [`solve_bimdf`]. The other functions are
//! the stages it is built from and can be used on their own.

pub mod doublecover;
pub mod evening;
pub mod guess;
pub mod highlevel;
pub mod lower_bound;
pub mod orient;
pub mod refinement;
pub mod tjoin;

pub use self::doublecover::{approximate_bimdf_doublecover, DoubleCoverInfo, DoubleCoverResult};
pub use self::evening::{even_by_tjoin, even_guess, round_to_even, EveningResult};
pub use self::guess::make_guess;
pub use self::highlevel::{
    solve_bimdf, solve_bimdf_matching, ComponentInfo, MatchingInfo, MatchingSolveResult, SolveResult, SolveTiming,
};
pub use self::lower_bound::{bimdf_lower_bound, LowerBoundResult};
pub use self::orient::{solve_bimcf_oriented, try_orient};
pub use self::refinement::{refine_with_matching, RefinementResult};
pub use self::tjoin::solve_tjoin_mst;
