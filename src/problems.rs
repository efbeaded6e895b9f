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

//! Problem types connected by the reductions.

pub mod bimcf;
pub mod bimdf;
pub mod bmatching;
pub mod matching;
pub mod mcf;
pub mod tjoin;

pub use self::bimcf::{BiMcf, BiMcfResult};
pub use self::bimdf::{BiMdf, BiMdfResult, EdgeInfo};
pub use self::bmatching::{BMatching, BMatchingResult};
pub use self::matching::{Matching, MatchingResult};
pub use self::mcf::{Mcf, McfResult};
pub use self::tjoin::{TJoin, TJoinResult};
