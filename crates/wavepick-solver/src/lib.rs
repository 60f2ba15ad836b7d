//! wavepick Solver Engine
//!
//! This crate turns the fractional wave objective (units picked per aisle
//! visited) into a sequence of linear integer subproblems:
//! - Subproblem construction for a fixed aisle count or a ratio threshold
//! - The `SolverAdapter` contract for MIP backends, with a `good_lp` backend
//! - `ParametricSearch`, which enumerates aisle counts or bisects the ratio
//! - Strategy selection, termination conditions, events and statistics

pub mod adapter;
pub mod error;
pub mod event;
pub mod model;
pub mod search;
pub mod state;
pub mod stats;
pub mod strategy;
pub mod subproblem;
pub mod termination;

#[cfg(test)]
pub(crate) mod test_utils;

#[cfg(feature = "good_lp")]
pub use adapter::GoodLpAdapter;
pub use adapter::{ModelScope, SolveStatus, SolverAdapter};
pub use error::{SearchError, SolverError};
pub use event::{CountingListener, LoggingListener, SearchEventSupport, SearchListener};
pub use model::{Comparator, LinearConstraint, LinearExpr, Sense, VarId};
pub use search::{ParametricSearch, RecordStatus, SearchOutcome, SubproblemRecord};
pub use state::{Incumbent, RatioBounds, SearchState};
pub use stats::SearchStats;
pub use strategy::{
    bisection_steps, range_estimate, selector_for, BisectionCountSelector, FixedStrategy,
    LogRangeSelector, Strategy, StrategySelector,
};
pub use subproblem::{
    DecisionVar, InstalledSubproblem, Parameter, Subproblem, SubproblemBuilder, SubproblemOutcome,
};
pub use termination::{
    termination_from_config, ConfiguredTermination, NoTermination, OrTermination,
    SubproblemCountTermination, Termination, TimeTermination,
};
