// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Bidirected minimum deviation flow.
//!
//! A BiMDF is a flow problem on a bidirected graph: every edge has a
//! head or a tail at each of its two ends. An integer flow must respect
//! the edge bounds and the demand of every node, its cost is a sum of
//! convex functions of the edge flows.
//!
//! The problem is solved by a chain of reductions. The costs are
//! linearized around an even guess, the resulting bidirected min-cost
//! flow problem is solved on a double cover by a network simplex and
//! the approximate solution is refined to optimality with perfect
//! matchings.
//!
//! # Example
//!
//! ```
//! use bimdf::{solve_bimdf, BiMdf, CostFunction, EdgeInfo, SolverConfig};
//!
//! let mut bimdf = BiMdf::new();
//! let x = bimdf.add_node(0);
//! let a = bimdf.add_node(0);
//! let b = bimdf.add_node(0);
//! let c = bimdf.add_node(0);
//! bimdf.add(EdgeInfo::new(x, x, false, false));
//! bimdf.add(EdgeInfo {
//!     cost_function: CostFunction::quad_deviation(4.0, 1.0),
//!     lower: 1,
//!     ..EdgeInfo::new(x, a, true, true)
//! });
//! for &(u, v, head, target) in &[(a, b, false, 0.7), (a, c, false, 0.4), (b, c, true, 0.2)] {
//!     bimdf.add(EdgeInfo {
//!         cost_function: CostFunction::abs_deviation(target, 1.0),
//!         ..EdgeInfo::new(u, v, head, head)
//!     });
//! }
//!
//! let config = SolverConfig {
//!     verbosity: 0,
//!     ..SolverConfig::default()
//! };
//! let res = solve_bimdf(&bimdf, &config).unwrap();
//! assert!(bimdf.is_valid(&res.solution));
//! assert_eq!(res.solution, vec![2, 4, 2, 2, 2]);
//! assert!((res.cost - 4.7).abs() < 1e-9);
//! ```

pub mod error;
pub use self::error::{Error, Result};

// # Problems

pub mod cost;
pub use self::cost::{CostFunction, Objective};

pub mod graph;
pub use self::graph::{Edge, Flow, Node, INF};

pub mod problems;
pub use self::problems::{BiMdf, BiMdfResult, EdgeInfo};

pub mod config;
pub use self::config::SolverConfig;

// # Algorithms

pub mod matching;
pub mod mcf;
pub mod mst;
pub mod reductions;

pub mod solvers;
pub use self::solvers::{solve_bimdf, SolveResult};

// # File format

#[cfg(feature = "format")]
pub mod format;
