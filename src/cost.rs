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

//! Convex per-edge cost functions.
//!
//! A [`CostFunction`] maps a flow value to its cost. All variants must be
//! convex in their argument, the reductions rely on it when they
//! linearize the cost around a guess.
//!
//! # Example
//!
//! ```
//! use bimdf::cost::CostFunction;
//!
//! let f = CostFunction::sum(vec![
//!     CostFunction::abs_deviation(2.0, 1.0),
//!     CostFunction::quad_deviation(4.0, 0.5),
//! ]);
//! assert_eq!(f.evaluate(2.0), 2.0);
//! assert_eq!(f.evaluate(4.0), 2.0);
//! assert_eq!(f.evaluate(3.0), 1.5);
//! assert_eq!(f.guess(), 3.0);
//! ```

use either::Either;

use std::fmt;
use std::iter;
use std::rc::Rc;

/// A user defined convex objective.
pub trait Objective {
    /// Evaluate `f(x)`.
    fn evaluate(&self, x: f64) -> f64;

    /// Return the minimizer or another decent initial value.
    fn guess(&self) -> f64;
}

/// `f(x) = weight * |x - target|`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbsDeviation {
    pub target: f64,
    pub weight: f64,
}

/// `f(x) = weight * (x - target)^2`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadDeviation {
    pub target: f64,
    pub weight: f64,
}

/// `f(x) = weight * max((x + eps) / (target + eps), (target + eps) / (x + eps))`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactor {
    pub target: f64,
    pub weight: f64,
    pub eps: f64,
}

impl ScaleFactor {
    /// The default `eps`.
    pub const DEFAULT_EPS: f64 = 0.1;
}

/// A shared handle to a user defined objective.
#[derive(Clone)]
pub struct VirtualObjective(pub Rc<dyn Objective>);

impl fmt::Debug for VirtualObjective {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "VirtualObjective(guess = {})", self.0.guess())
    }
}

/// A flat sum of cost functions.
///
/// The sum precomputes its own integral guess.
#[derive(Clone, Debug)]
pub struct Sum {
    components: Vec<CostFunction>,
    guess: f64,
}

/// A convex cost function of a single flow value.
#[derive(Clone, Debug)]
pub enum CostFunction {
    Zero,
    AbsDeviation(AbsDeviation),
    QuadDeviation(QuadDeviation),
    ScaleFactor(ScaleFactor),
    Virtual(VirtualObjective),
    Sum(Sum),
}

impl Default for CostFunction {
    fn default() -> Self {
        CostFunction::Zero
    }
}

impl CostFunction {
    pub fn abs_deviation(target: f64, weight: f64) -> Self {
        CostFunction::AbsDeviation(AbsDeviation { target, weight })
    }

    pub fn quad_deviation(target: f64, weight: f64) -> Self {
        CostFunction::QuadDeviation(QuadDeviation { target, weight })
    }

    pub fn scale_factor(target: f64, weight: f64, eps: f64) -> Self {
        CostFunction::ScaleFactor(ScaleFactor { target, weight, eps })
    }

    /// Wrap a user defined objective.
    pub fn objective<O: Objective + 'static>(obj: O) -> Self {
        CostFunction::Virtual(VirtualObjective(Rc::new(obj)))
    }

    /// Create the sum of several cost functions.
    ///
    /// Zero functions are dropped and nested sums are flattened.
    pub fn sum<I>(functions: I) -> Self
    where
        I: IntoIterator<Item = CostFunction>,
    {
        CostFunction::Sum(Sum::new(functions))
    }

    /// Evaluate the function at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            CostFunction::Zero => 0.0,
            CostFunction::AbsDeviation(f) => f.weight * (x - f.target).abs(),
            CostFunction::QuadDeviation(f) => f.weight * (x - f.target) * (x - f.target),
            CostFunction::ScaleFactor(f) => {
                let adj_target = f.target + f.eps;
                let adj_x = x + f.eps;
                f.weight * (adj_x / adj_target).max(adj_target / adj_x)
            }
            CostFunction::Virtual(obj) => obj.0.evaluate(x),
            CostFunction::Sum(sum) => sum.evaluate(x),
        }
    }

    /// The unconstrained minimizer (or a representative point).
    pub fn guess(&self) -> f64 {
        match self {
            CostFunction::Zero => 0.0,
            CostFunction::AbsDeviation(f) => f.target,
            CostFunction::QuadDeviation(f) => f.target,
            CostFunction::ScaleFactor(f) => f.target,
            CostFunction::Virtual(obj) => obj.0.guess(),
            CostFunction::Sum(sum) => sum.guess,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, CostFunction::Zero)
    }

    /// Iterate over the summands of this function.
    ///
    /// This is the list of components for a sum and the function itself
    /// otherwise.
    pub fn components(&self) -> impl Iterator<Item = &CostFunction> {
        match self {
            CostFunction::Sum(sum) => Either::Left(sum.components.iter()),
            f => Either::Right(iter::once(f)),
        }
    }
}

impl Sum {
    pub fn new<I>(functions: I) -> Self
    where
        I: IntoIterator<Item = CostFunction>,
    {
        let mut components = Vec::new();
        let mut min_guess = f64::INFINITY;
        let mut max_guess = f64::NEG_INFINITY;
        for f in functions {
            if f.is_zero() {
                continue;
            }
            let g = f.guess();
            min_guess = min_guess.min(g);
            max_guess = max_guess.max(g);
            components.extend(f.components().cloned());
        }

        let mut sum = Sum { components, guess: 0.0 };
        if !sum.components.is_empty() {
            sum.guess = sum.scan_guess(min_guess.floor() as i64, max_guess.ceil() as i64);
        }
        sum
    }

    /// Find the best integer guess in `[from, to]`.
    ///
    /// Stops as soon as the cost increases, which is only correct for
    /// convex sums.
    fn scan_guess(&self, from: i64, to: i64) -> f64 {
        let mut best = from as f64;
        let mut best_cost = f64::INFINITY;
        let mut last_cost = f64::INFINITY;
        for g in from..=to {
            let c = self.evaluate(g as f64);
            if c > last_cost {
                break;
            }
            last_cost = c;
            if c < best_cost {
                best_cost = c;
                best = g as f64;
            }
        }
        best
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.components.iter().map(|f| f.evaluate(x)).sum()
    }

    pub fn guess(&self) -> f64 {
        self.guess
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CostFunction> {
        self.components.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Shifted(f64);

    impl Objective for Shifted {
        fn evaluate(&self, x: f64) -> f64 {
            (x - self.0).abs() * 3.0
        }

        fn guess(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_variants() {
        assert_eq!(CostFunction::Zero.evaluate(17.0), 0.0);
        assert_eq!(CostFunction::Zero.guess(), 0.0);
        assert_eq!(CostFunction::abs_deviation(1.5, 2.0).evaluate(3.0), 3.0);
        assert_eq!(CostFunction::quad_deviation(1.0, 2.0).evaluate(4.0), 18.0);

        let sf = CostFunction::scale_factor(3.9, 1.0, 0.1);
        assert!((sf.evaluate(1.9) - 2.0).abs() < 1e-12);
        assert!((sf.evaluate(7.9) - 2.0).abs() < 1e-12);
        assert!((sf.evaluate(3.9) - 1.0).abs() < 1e-12);

        let obj = CostFunction::objective(Shifted(2.0));
        assert_eq!(obj.evaluate(4.0), 6.0);
        assert_eq!(obj.guess(), 2.0);
    }

    #[test]
    fn test_sum_flattens() {
        let inner = CostFunction::sum(vec![
            CostFunction::abs_deviation(0.0, 1.0),
            CostFunction::Zero,
            CostFunction::abs_deviation(5.0, 1.0),
        ]);
        let outer = CostFunction::sum(vec![inner, CostFunction::quad_deviation(2.0, 1.0)]);
        match &outer {
            CostFunction::Sum(s) => {
                assert_eq!(s.len(), 3);
                assert!(s.iter().all(|f| !matches!(f, CostFunction::Sum(_))));
            }
            _ => panic!("expected a sum"),
        }
        // 5 + 0 at x = 2
        assert_eq!(outer.evaluate(2.0), 5.0);
        assert_eq!(outer.guess(), 2.0);
    }

    #[test]
    fn test_sum_guess() {
        let f = CostFunction::sum(vec![
            CostFunction::abs_deviation(0.2, 1.0),
            CostFunction::abs_deviation(0.4, 1.0),
            CostFunction::abs_deviation(0.7, 1.0),
        ]);
        assert_eq!(f.guess(), 0.0);

        let f = CostFunction::sum(vec![
            CostFunction::quad_deviation(1.0, 1.0),
            CostFunction::quad_deviation(6.0, 1.0),
        ]);
        assert_eq!(f.guess(), 3.0);
    }

    #[test]
    fn test_empty_sum() {
        let f = CostFunction::sum(vec![CostFunction::Zero, CostFunction::Zero]);
        assert_eq!(f.guess(), 0.0);
        assert_eq!(f.evaluate(3.0), 0.0);
        assert_eq!(f.components().count(), 0);
    }
}
