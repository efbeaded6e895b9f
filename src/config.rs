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

//! Solver configuration.
//!
//! All structs implement `Default` with the values used by
//! [`solve_bimdf`](crate::solve_bimdf) when nothing else is requested.
//!
//! ```
//! use bimdf::config::{EveningMode, SolverConfig};
//!
//! let mut config = SolverConfig::default();
//! config.double_cover.evening_mode = EveningMode::RoundToEven;
//! config.refinement_maxdev_max = 4;
//! config.verbosity = 0;
//! assert_eq!(config.double_cover.max_deviation, 5);
//! ```

use crate::graph::Flow;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// How the initial guess is made even.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum EveningMode {
    /// Fix all parities with a T-join on a minimum spanning forest.
    Mst,
    /// Round every edge to an even value independently.
    RoundToEven,
}

impl Default for EveningMode {
    fn default() -> Self {
        EveningMode::Mst
    }
}

/// Encoding of a BiMCF in the doubled directed graph.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum DoubleCoverMethod {
    /// Halve demands and round odd capacities down.
    HalfSymmetric,
    /// Halve demands and split capacities between both arcs.
    HalfAsymmetric,
    /// Keep demands and round odd capacities down, halve the result.
    FullSymmetric,
    /// Keep demands, parity is not required.
    NotEven,
}

impl Default for DoubleCoverMethod {
    fn default() -> Self {
        DoubleCoverMethod::HalfAsymmetric
    }
}

/// Bound on the deviation in the b-matching reduction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum DeviationLimitKind {
    /// Limit the flow change per edge.
    EdgeFlow,
    /// Limit the flow change through each node.
    NodeThroughflow,
}

impl Default for DeviationLimitKind {
    fn default() -> Self {
        DeviationLimitKind::NodeThroughflow
    }
}

/// The perfect matching backend.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum MatchingSolverKind {
    /// Edmonds' blossom algorithm for general graphs.
    Blossom,
    /// Min-cost flow on bipartite instances.
    Bipartite,
}

impl Default for MatchingSolverKind {
    fn default() -> Self {
        MatchingSolverKind::Blossom
    }
}

/// Parameters of the double cover approximation.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct DoubleCoverConfig {
    /// Number of linearized units on each side of the guess.
    pub max_deviation: Flow,
    pub evening_mode: EveningMode,
    pub verbosity: u32,
    pub method: DoubleCoverMethod,
}

impl Default for DoubleCoverConfig {
    fn default() -> Self {
        DoubleCoverConfig {
            max_deviation: 5,
            evening_mode: EveningMode::Mst,
            verbosity: 2,
            method: DoubleCoverMethod::HalfAsymmetric,
        }
    }
}

/// Parameters of [`solve_bimdf`](crate::solve_bimdf).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    pub double_cover: DoubleCoverConfig,
    pub matching_solver: MatchingSolverKind,
    /// Improve the approximation with matching based refinement.
    pub refine_with_matching: bool,
    pub refinement_maxdev_min: Flow,
    pub refinement_maxdev_max: Flow,
    pub deviation_limit: DeviationLimitKind,
    pub verbosity: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            double_cover: DoubleCoverConfig::default(),
            matching_solver: MatchingSolverKind::Blossom,
            refine_with_matching: true,
            refinement_maxdev_min: 2,
            refinement_maxdev_max: 2,
            deviation_limit: DeviationLimitKind::NodeThroughflow,
            verbosity: 2,
        }
    }
}
