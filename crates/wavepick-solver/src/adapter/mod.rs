//! The contract between the parametric search and a MIP backend.
//!
//! A backend registers binary variables, linear constraints and one
//! objective, solves, and reports status and values. Between two subproblems
//! it must be cleared with [`SolverAdapter::reset_for_next_model`]; the
//! search never calls that directly but opens a [`ModelScope`], whose `Drop`
//! performs the reset on every exit path.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::error::SolverError;
use crate::model::{Comparator, LinearExpr, Sense, VarId};

#[cfg(feature = "good_lp")]
mod lp;

#[cfg(feature = "good_lp")]
pub use lp::GoodLpAdapter;

/// Terminal status of one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Proven optimal within the requested gap.
    Optimal,
    /// Stopped early (gap or time limit) with an incumbent.
    Feasible,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The objective is unbounded.
    Unbounded,
}

impl SolveStatus {
    /// Returns true if objective and variable values are available.
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Feasible => "feasible",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
        })
    }
}

/// A generic MIP solver, seen one model at a time.
///
/// Implementations accumulate one model between resets. Handles returned by
/// [`declare_binary`](Self::declare_binary) are only valid until the next
/// reset.
pub trait SolverAdapter {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Declares a 0/1 variable.
    fn declare_binary(&mut self, name: &str) -> VarId;

    /// Adds `expr <comparator> rhs`.
    fn add_constraint(&mut self, expr: LinearExpr, comparator: Comparator, rhs: f64);

    /// Sets the objective, replacing any previous one.
    fn set_objective(&mut self, expr: LinearExpr, sense: Sense);

    /// Solves the current model to within `gap_tolerance`.
    ///
    /// Infeasibility is a status, not an error. Errors are reserved for
    /// backend failures.
    fn solve(&mut self, gap_tolerance: f64) -> Result<SolveStatus, SolverError>;

    /// Objective value of the last solve, if it produced a solution.
    fn objective_value(&self) -> Option<f64>;

    /// Value of a binary variable in the last solution.
    fn variable_value(&self, var: VarId) -> Option<bool>;

    /// Clears variables, constraints, objective and solution.
    fn reset_for_next_model(&mut self);
}

impl<A: SolverAdapter + ?Sized> SolverAdapter for &mut A {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn declare_binary(&mut self, name: &str) -> VarId {
        (**self).declare_binary(name)
    }

    fn add_constraint(&mut self, expr: LinearExpr, comparator: Comparator, rhs: f64) {
        (**self).add_constraint(expr, comparator, rhs)
    }

    fn set_objective(&mut self, expr: LinearExpr, sense: Sense) {
        (**self).set_objective(expr, sense)
    }

    fn solve(&mut self, gap_tolerance: f64) -> Result<SolveStatus, SolverError> {
        (**self).solve(gap_tolerance)
    }

    fn objective_value(&self) -> Option<f64> {
        (**self).objective_value()
    }

    fn variable_value(&self, var: VarId) -> Option<bool> {
        (**self).variable_value(var)
    }

    fn reset_for_next_model(&mut self) {
        (**self).reset_for_next_model()
    }
}

impl<A: SolverAdapter + ?Sized> SolverAdapter for Box<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn declare_binary(&mut self, name: &str) -> VarId {
        (**self).declare_binary(name)
    }

    fn add_constraint(&mut self, expr: LinearExpr, comparator: Comparator, rhs: f64) {
        (**self).add_constraint(expr, comparator, rhs)
    }

    fn set_objective(&mut self, expr: LinearExpr, sense: Sense) {
        (**self).set_objective(expr, sense)
    }

    fn solve(&mut self, gap_tolerance: f64) -> Result<SolveStatus, SolverError> {
        (**self).solve(gap_tolerance)
    }

    fn objective_value(&self) -> Option<f64> {
        (**self).objective_value()
    }

    fn variable_value(&self, var: VarId) -> Option<bool> {
        (**self).variable_value(var)
    }

    fn reset_for_next_model(&mut self) {
        (**self).reset_for_next_model()
    }
}

/// Exclusive use of an adapter for exactly one model.
///
/// Dropping the scope resets the adapter, whether the solve succeeded,
/// was infeasible, or returned an error.
///
/// # Example
///
/// ```
/// use wavepick_solver::{ModelScope, SolverAdapter};
/// # use wavepick_solver::{Comparator, LinearExpr, Sense, SolveStatus, SolverError, VarId};
/// # #[derive(Default)]
/// # struct Counter { vars: usize, resets: usize }
/// # impl SolverAdapter for Counter {
/// #     fn name(&self) -> &'static str { "counter" }
/// #     fn declare_binary(&mut self, _: &str) -> VarId { self.vars += 1; VarId::new(self.vars - 1) }
/// #     fn add_constraint(&mut self, _: LinearExpr, _: Comparator, _: f64) {}
/// #     fn set_objective(&mut self, _: LinearExpr, _: Sense) {}
/// #     fn solve(&mut self, _: f64) -> Result<SolveStatus, SolverError> { Ok(SolveStatus::Infeasible) }
/// #     fn objective_value(&self) -> Option<f64> { None }
/// #     fn variable_value(&self, _: VarId) -> Option<bool> { None }
/// #     fn reset_for_next_model(&mut self) { self.vars = 0; self.resets += 1; }
/// # }
///
/// let mut adapter = Counter::default();
/// {
///     let mut scope = ModelScope::open(&mut adapter);
///     scope.declare_binary("x");
/// }
/// assert_eq!(adapter.resets, 1);
/// assert_eq!(adapter.vars, 0);
/// ```
pub struct ModelScope<'a, A: SolverAdapter + ?Sized> {
    adapter: &'a mut A,
}

impl<'a, A: SolverAdapter + ?Sized> ModelScope<'a, A> {
    pub fn open(adapter: &'a mut A) -> Self {
        Self { adapter }
    }
}

impl<A: SolverAdapter + ?Sized> Deref for ModelScope<'_, A> {
    type Target = A;

    fn deref(&self) -> &A {
        self.adapter
    }
}

impl<A: SolverAdapter + ?Sized> DerefMut for ModelScope<'_, A> {
    fn deref_mut(&mut self) -> &mut A {
        self.adapter
    }
}

impl<A: SolverAdapter + ?Sized> Drop for ModelScope<'_, A> {
    fn drop(&mut self) {
        self.adapter.reset_for_next_model();
    }
}
