//! Test utilities for wavepick-solver
//!
//! Re-exports instance fixtures from wavepick-test and adds adapters that
//! script or observe the backend.

use std::collections::VecDeque;

use crate::adapter::{SolveStatus, SolverAdapter};
use crate::error::SolverError;
use crate::model::{Comparator, LinearExpr, Sense, VarId};

pub use wavepick_test::{
    brute_force_best, brute_force_best_per_order, infeasible_instance, mixed_instance,
    point_bounds_instance, scenario_instance,
};

/// Wraps an adapter and counts calls to it.
#[derive(Debug, Default)]
pub struct ResetCounter<A> {
    pub inner: A,
    pub resets: usize,
    pub solves: usize,
    /// Variables declared since the last reset.
    pub live_variables: usize,
}

impl<A> ResetCounter<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            resets: 0,
            solves: 0,
            live_variables: 0,
        }
    }
}

impl<A: SolverAdapter> SolverAdapter for ResetCounter<A> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn declare_binary(&mut self, name: &str) -> VarId {
        self.live_variables += 1;
        self.inner.declare_binary(name)
    }

    fn add_constraint(&mut self, expr: LinearExpr, comparator: Comparator, rhs: f64) {
        self.inner.add_constraint(expr, comparator, rhs)
    }

    fn set_objective(&mut self, expr: LinearExpr, sense: Sense) {
        self.inner.set_objective(expr, sense)
    }

    fn solve(&mut self, gap_tolerance: f64) -> Result<SolveStatus, SolverError> {
        self.solves += 1;
        self.inner.solve(gap_tolerance)
    }

    fn objective_value(&self) -> Option<f64> {
        self.inner.objective_value()
    }

    fn variable_value(&self, var: VarId) -> Option<bool> {
        self.inner.variable_value(var)
    }

    fn reset_for_next_model(&mut self) {
        self.resets += 1;
        self.live_variables = 0;
        self.inner.reset_for_next_model()
    }
}

/// One canned answer of a [`ScriptedAdapter`].
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Optimal, with the named variables set to 1.
    Optimal {
        objective: f64,
        selected: Vec<&'static str>,
    },
    /// Feasible but not proven optimal, with the named variables set to 1.
    Feasible {
        objective: f64,
        selected: Vec<&'static str>,
    },
    /// Optimal status but no values.
    Empty,
    Infeasible,
    Unbounded,
    Fail(&'static str),
}

/// Replays a fixed sequence of answers, one per solve.
///
/// Once the script runs out every solve is infeasible.
#[derive(Debug, Default)]
pub struct ScriptedAdapter {
    script: VecDeque<Scripted>,
    names: Vec<String>,
    answer: Option<(f64, Vec<&'static str>)>,
    pub resets: usize,
}

impl ScriptedAdapter {
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl SolverAdapter for ScriptedAdapter {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn declare_binary(&mut self, name: &str) -> VarId {
        self.names.push(name.to_owned());
        VarId::new(self.names.len() - 1)
    }

    fn add_constraint(&mut self, _expr: LinearExpr, _comparator: Comparator, _rhs: f64) {}

    fn set_objective(&mut self, _expr: LinearExpr, _sense: Sense) {}

    fn solve(&mut self, _gap_tolerance: f64) -> Result<SolveStatus, SolverError> {
        self.answer = None;
        match self.script.pop_front().unwrap_or(Scripted::Infeasible) {
            Scripted::Optimal {
                objective,
                selected,
            } => {
                self.answer = Some((objective, selected));
                Ok(SolveStatus::Optimal)
            }
            Scripted::Feasible {
                objective,
                selected,
            } => {
                self.answer = Some((objective, selected));
                Ok(SolveStatus::Feasible)
            }
            Scripted::Empty => Ok(SolveStatus::Optimal),
            Scripted::Infeasible => Ok(SolveStatus::Infeasible),
            Scripted::Unbounded => Ok(SolveStatus::Unbounded),
            Scripted::Fail(message) => Err(SolverError::Backend(message.to_owned())),
        }
    }

    fn objective_value(&self) -> Option<f64> {
        self.answer.as_ref().map(|(objective, _)| *objective)
    }

    fn variable_value(&self, var: VarId) -> Option<bool> {
        let (_, selected) = self.answer.as_ref()?;
        let name = self.names.get(var.index())?;
        Some(selected.iter().any(|s| *s == name.as_str()))
    }

    fn reset_for_next_model(&mut self) {
        self.resets += 1;
        self.names.clear();
        self.answer = None;
    }
}
