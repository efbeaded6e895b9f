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

//! Errors raised by reductions and solvers.

use std::error;
use std::fmt;
use std::result;

/// Error of a solver or reduction.
///
/// `Infeasible` and `Unbounded` are regular outcomes of the exact
/// sub-solvers and describe the input problem. `Internal` signals a
/// violated reduction invariant or an input outside the numeric range
/// the reductions can represent exactly.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The problem has no feasible solution.
    Infeasible(String),
    /// The objective is unbounded from below.
    Unbounded(String),
    /// A reduction produced an inconsistent result.
    Internal(String),
}

/// Type of values with optional error.
pub type Result<T> = result::Result<T, Error>;

impl Error {
    pub(crate) fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// Return `true` if the error describes an infeasible problem.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Error::Infeasible(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            Infeasible(msg) => write!(fmt, "Problem is infeasible: {}", msg),
            Unbounded(msg) => write!(fmt, "Problem is unbounded: {}", msg),
            Internal(msg) => write!(fmt, "Internal error: {}", msg),
        }
    }
}

impl error::Error for Error {}
