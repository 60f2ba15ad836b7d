//! Error types for the search engine.

use thiserror::Error;
use wavepick_core::WavePickError;

/// Failure reported by a MIP backend.
///
/// The search cannot continue without a working solver, so these abort the
/// run.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The backend failed for numerical or resource reasons.
    #[error("Solver backend failure: {0}")]
    Backend(String),

    /// The backend claimed the model is unbounded.
    #[error("Solver reported an unbounded model")]
    Unbounded,

    /// A solved status came without objective or variable values.
    #[error("Solver returned no solution values")]
    MissingSolution,

    /// The returned solution violates the instance.
    #[error("Numerical failure: {0}")]
    Numerical(String),
}

/// Error returned by [`ParametricSearch::solve`](crate::ParametricSearch::solve).
#[derive(Debug, Error)]
pub enum SearchError {
    /// The instance is inconsistent; raised before any solve.
    #[error(transparent)]
    Instance(#[from] WavePickError),

    /// A subproblem parameter lies outside its domain.
    #[error("Invalid subproblem parameter: {0}")]
    InvalidParameter(String),

    /// The MIP backend failed.
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    /// Every parameter value tried was infeasible.
    #[error("No feasible wave found after {subproblems} subproblems")]
    NoFeasibleWave { subproblems: u64 },
}
