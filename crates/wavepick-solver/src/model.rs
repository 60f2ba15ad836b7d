//! Backend-neutral linear model pieces.
//!
//! [`LinearExpr`] is generic over its variable key so the same type serves
//! subproblem construction (keyed by [`DecisionVar`](crate::DecisionVar))
//! and adapter registration (keyed by [`VarId`]).

use std::fmt;

/// Handle to a variable declared on a [`SolverAdapter`](crate::SolverAdapter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Relation between a linear expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// `expr <= rhs`
    Le,
    /// `expr >= rhs`
    Ge,
    /// `expr == rhs`
    Eq,
}

impl Comparator {
    /// Returns true if `lhs <cmp> rhs` holds within `tolerance`.
    pub fn holds(self, lhs: f64, rhs: f64, tolerance: f64) -> bool {
        match self {
            Comparator::Le => lhs <= rhs + tolerance,
            Comparator::Ge => lhs >= rhs - tolerance,
            Comparator::Eq => (lhs - rhs).abs() <= tolerance,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Comparator::Le => "<=",
            Comparator::Ge => ">=",
            Comparator::Eq => "==",
        })
    }
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Maximize,
    Minimize,
}

/// A sum of weighted variables plus a constant.
///
/// # Example
///
/// ```
/// use wavepick_solver::{LinearExpr, VarId};
///
/// let x = VarId::new(0);
/// let y = VarId::new(1);
/// let mut expr = LinearExpr::new();
/// expr.add_term(x, 2.0);
/// expr.add_term(y, -1.0);
/// expr.add_constant(3.0);
///
/// let value = expr.evaluate(|v| if v == x { 1.0 } else { 4.0 });
/// assert_eq!(value, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearExpr<V = VarId> {
    terms: Vec<(V, f64)>,
    constant: f64,
}

impl<V> Default for LinearExpr<V> {
    fn default() -> Self {
        Self {
            terms: Vec::new(),
            constant: 0.0,
        }
    }
}

impl<V: Copy> LinearExpr<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds `Σ coefficient · var` from an iterator of terms.
    pub fn from_terms(terms: impl IntoIterator<Item = (V, f64)>) -> Self {
        let mut expr = Self::new();
        for (var, coefficient) in terms {
            expr.add_term(var, coefficient);
        }
        expr
    }

    /// Adds `coefficient · var`. Zero coefficients are skipped.
    pub fn add_term(&mut self, var: V, coefficient: f64) {
        if coefficient != 0.0 {
            self.terms.push((var, coefficient));
        }
    }

    pub fn add_constant(&mut self, constant: f64) {
        self.constant += constant;
    }

    /// Appends all terms of `other`, scaled by `factor`.
    pub fn add_scaled(&mut self, other: &LinearExpr<V>, factor: f64) {
        for &(var, coefficient) in &other.terms {
            self.add_term(var, coefficient * factor);
        }
        self.constant += other.constant * factor;
    }

    pub fn terms(&self) -> &[(V, f64)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluates the expression with variable values from `value_of`.
    pub fn evaluate(&self, mut value_of: impl FnMut(V) -> f64) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coefficient)| coefficient * value_of(var))
            .sum::<f64>()
            + self.constant
    }

    /// Re-keys the expression's variables.
    pub fn map_vars<W: Copy>(&self, mut f: impl FnMut(V) -> W) -> LinearExpr<W> {
        LinearExpr {
            terms: self.terms.iter().map(|&(var, c)| (f(var), c)).collect(),
            constant: self.constant,
        }
    }
}

/// `expr <cmp> rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint<V = VarId> {
    pub expr: LinearExpr<V>,
    pub comparator: Comparator,
    pub rhs: f64,
}

impl<V: Copy> LinearConstraint<V> {
    pub fn new(expr: LinearExpr<V>, comparator: Comparator, rhs: f64) -> Self {
        Self {
            expr,
            comparator,
            rhs,
        }
    }

    pub fn le(expr: LinearExpr<V>, rhs: f64) -> Self {
        Self::new(expr, Comparator::Le, rhs)
    }

    pub fn ge(expr: LinearExpr<V>, rhs: f64) -> Self {
        Self::new(expr, Comparator::Ge, rhs)
    }

    pub fn eq(expr: LinearExpr<V>, rhs: f64) -> Self {
        Self::new(expr, Comparator::Eq, rhs)
    }

    /// Returns true if the constraint holds for the given values.
    pub fn is_satisfied(&self, value_of: impl FnMut(V) -> f64, tolerance: f64) -> bool {
        self.comparator
            .holds(self.expr.evaluate(value_of), self.rhs, tolerance)
    }
}
