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

//! Reductions between the problem types.
//!
//! Every reduction borrows its source problem, owns the derived
//! problem and keeps side tables from derived indices back to source
//! indices. `translate_solution` maps a solution of the derived problem
//! back and checks it against the source problem, an invalid result is
//! reported as `Error::Internal`.

pub mod bimcf_to_bmatching;
pub mod bimcf_to_mcf;
pub mod bimdf_to_bimcf;
pub mod bmatching_to_matching;
pub mod components;
pub mod oriented;
pub mod simplification;

pub use self::bimcf_to_bmatching::BiMcfToBMatching;
pub use self::bimcf_to_mcf::BiMcfToMcf;
pub use self::bimdf_to_bimcf::{BiMdfToBiMcf, BiMdfToBiMcfConfig};
pub use self::bmatching_to_matching::BMatchingToMatching;
pub use self::components::ConnectedComponents;
pub use self::oriented::OrientedBiMcf;
pub use self::simplification::Simplification;

/// Multiplier turning real costs into integers.
pub const COST_MULTIPLIER: f64 = (1u64 << 20) as f64;
