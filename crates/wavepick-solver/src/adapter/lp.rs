//! `good_lp` backend using the pure-Rust `microlp` engine.

use ::good_lp::{
    microlp, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};
use tracing::trace;

use super::{SolveStatus, SolverAdapter};
use crate::error::SolverError;
use crate::model::{Comparator, LinearConstraint, LinearExpr, Sense, VarId};

/// Buffers one model and solves it with `good_lp`.
///
/// Registration calls only record the model. Each [`solve`](SolverAdapter::solve)
/// builds a fresh `good_lp` problem from the buffer, so nothing survives a
/// reset. `microlp` proves optimality, which satisfies any gap tolerance.
///
/// # Example
///
/// ```
/// use wavepick_solver::{Comparator, GoodLpAdapter, LinearExpr, Sense, SolveStatus, SolverAdapter};
///
/// let mut lp = GoodLpAdapter::new();
/// let x = lp.declare_binary("x");
/// let y = lp.declare_binary("y");
/// lp.add_constraint(LinearExpr::from_terms([(x, 1.0), (y, 1.0)]), Comparator::Le, 1.0);
/// lp.set_objective(LinearExpr::from_terms([(x, 2.0), (y, 3.0)]), Sense::Maximize);
///
/// assert_eq!(lp.solve(0.0).unwrap(), SolveStatus::Optimal);
/// assert_eq!(lp.objective_value(), Some(3.0));
/// assert_eq!(lp.variable_value(y), Some(true));
/// ```
#[derive(Debug, Default)]
pub struct GoodLpAdapter {
    names: Vec<String>,
    constraints: Vec<LinearConstraint>,
    objective: Option<(LinearExpr, Sense)>,
    solution: Option<Solved>,
}

#[derive(Debug)]
struct Solved {
    values: Vec<bool>,
    objective: f64,
}

impl GoodLpAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of variables declared in the current model.
    pub fn variable_count(&self) -> usize {
        self.names.len()
    }

    /// Number of constraints in the current model.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}

fn to_expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    let mut out = Expression::with_capacity(expr.terms().len());
    for &(var, coefficient) in expr.terms() {
        out.add_mul(coefficient, handles[var.index()]);
    }
    out += expr.constant();
    out
}

impl SolverAdapter for GoodLpAdapter {
    fn name(&self) -> &'static str {
        "good_lp/microlp"
    }

    fn declare_binary(&mut self, name: &str) -> VarId {
        self.names.push(name.to_owned());
        VarId::new(self.names.len() - 1)
    }

    fn add_constraint(&mut self, expr: LinearExpr, comparator: Comparator, rhs: f64) {
        self.constraints
            .push(LinearConstraint::new(expr, comparator, rhs));
    }

    fn set_objective(&mut self, expr: LinearExpr, sense: Sense) {
        self.objective = Some((expr, sense));
    }

    fn solve(&mut self, gap_tolerance: f64) -> Result<SolveStatus, SolverError> {
        self.solution = None;
        let (objective, sense) = self
            .objective
            .clone()
            .unwrap_or_else(|| (LinearExpr::new(), Sense::Minimize));

        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = self
            .names
            .iter()
            .map(|name| vars.add(variable().binary().name(name.clone())))
            .collect();

        let goal = to_expression(&objective, &handles);
        let unsolved = match sense {
            Sense::Maximize => vars.maximise(goal),
            Sense::Minimize => vars.minimise(goal),
        };
        let mut problem = unsolved.using(microlp);
        for constraint in &self.constraints {
            let lhs = to_expression(&constraint.expr, &handles);
            problem = problem.with(match constraint.comparator {
                Comparator::Le => lhs.leq(constraint.rhs),
                Comparator::Ge => lhs.geq(constraint.rhs),
                Comparator::Eq => lhs.eq(constraint.rhs),
            });
        }

        trace!(
            variables = self.names.len(),
            constraints = self.constraints.len(),
            gap_tolerance,
            "solving with microlp"
        );

        match problem.solve() {
            Ok(solution) => {
                let values: Vec<bool> = handles.iter().map(|&h| solution.value(h) > 0.5).collect();
                let objective = objective.evaluate(|v| f64::from(u8::from(values[v.index()])));
                self.solution = Some(Solved { values, objective });
                Ok(SolveStatus::Optimal)
            }
            Err(ResolutionError::Infeasible) => Ok(SolveStatus::Infeasible),
            Err(ResolutionError::Unbounded) => Ok(SolveStatus::Unbounded),
            Err(other) => Err(SolverError::Backend(other.to_string())),
        }
    }

    fn objective_value(&self) -> Option<f64> {
        self.solution.as_ref().map(|s| s.objective)
    }

    fn variable_value(&self, var: VarId) -> Option<bool> {
        self.solution
            .as_ref()
            .and_then(|s| s.values.get(var.index()).copied())
    }

    fn reset_for_next_model(&mut self) {
        self.names.clear();
        self.constraints.clear();
        self.objective = None;
        self.solution = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maximize_knapsack() {
        let mut lp = GoodLpAdapter::new();
        let a = lp.declare_binary("a");
        let b = lp.declare_binary("b");
        let c = lp.declare_binary("c");
        lp.add_constraint(
            LinearExpr::from_terms([(a, 3.0), (b, 4.0), (c, 2.0)]),
            Comparator::Le,
            5.0,
        );
        lp.set_objective(
            LinearExpr::from_terms([(a, 4.0), (b, 5.0), (c, 3.0)]),
            Sense::Maximize,
        );

        assert_eq!(lp.solve(0.0).unwrap(), SolveStatus::Optimal);
        assert_eq!(lp.objective_value(), Some(7.0));
        assert_eq!(lp.variable_value(a), Some(true));
        assert_eq!(lp.variable_value(b), Some(false));
        assert_eq!(lp.variable_value(c), Some(true));
    }

    #[test]
    fn test_equality_and_minimize() {
        let mut lp = GoodLpAdapter::new();
        let x = lp.declare_binary("x");
        let y = lp.declare_binary("y");
        lp.add_constraint(
            LinearExpr::from_terms([(x, 1.0), (y, 1.0)]),
            Comparator::Eq,
            1.0,
        );
        let mut objective = LinearExpr::from_terms([(x, 2.0), (y, 1.0)]);
        objective.add_constant(10.0);
        lp.set_objective(objective, Sense::Minimize);

        assert_eq!(lp.solve(0.0).unwrap(), SolveStatus::Optimal);
        assert_eq!(lp.objective_value(), Some(11.0));
        assert_eq!(lp.variable_value(y), Some(true));
    }

    #[test]
    fn test_infeasible_is_status() {
        let mut lp = GoodLpAdapter::new();
        let x = lp.declare_binary("x");
        lp.add_constraint(LinearExpr::from_terms([(x, 1.0)]), Comparator::Ge, 2.0);
        lp.set_objective(LinearExpr::from_terms([(x, 1.0)]), Sense::Maximize);

        assert_eq!(lp.solve(0.0).unwrap(), SolveStatus::Infeasible);
        assert_eq!(lp.objective_value(), None);
        assert_eq!(lp.variable_value(x), None);
    }

    #[test]
    fn test_reset_clears_model() {
        let mut lp = GoodLpAdapter::new();
        let x = lp.declare_binary("x");
        lp.add_constraint(LinearExpr::from_terms([(x, 1.0)]), Comparator::Le, 1.0);
        lp.set_objective(LinearExpr::from_terms([(x, 1.0)]), Sense::Maximize);
        lp.solve(0.0).unwrap();

        lp.reset_for_next_model();
        assert_eq!(lp.variable_count(), 0);
        assert_eq!(lp.constraint_count(), 0);
        assert_eq!(lp.objective_value(), None);
        assert_eq!(lp.declare_binary("fresh"), VarId::new(0));
    }
}
