//! Subproblem count termination.

use super::Termination;
use crate::stats::SearchStats;

/// Terminates once a number of subproblems has been solved.
///
/// # Example
///
/// ```
/// use wavepick_solver::SubproblemCountTermination;
///
/// let term = SubproblemCountTermination::new(20);
/// ```
#[derive(Debug, Clone)]
pub struct SubproblemCountTermination {
    limit: u64,
}

impl SubproblemCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for SubproblemCountTermination {
    fn is_terminated(&self, stats: &SearchStats) -> bool {
        stats.subproblem_count() >= self.limit
    }
}
