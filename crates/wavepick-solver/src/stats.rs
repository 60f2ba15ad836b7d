//! Search statistics.
//!
//! Counters for one run of the parametric search.

use std::time::{Duration, Instant};

/// Run-level statistics.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use wavepick_solver::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_subproblem(true, Duration::from_millis(4));
/// stats.record_subproblem(false, Duration::from_millis(2));
/// stats.record_improvement();
///
/// assert_eq!(stats.subproblem_count(), 2);
/// assert_eq!(stats.infeasible_subproblems, 1);
/// assert_eq!(stats.solver_time, Duration::from_millis(6));
/// ```
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    start_time: Option<Instant>,
    /// Subproblems that returned a solution.
    pub feasible_subproblems: u64,
    /// Subproblems proven infeasible.
    pub infeasible_subproblems: u64,
    /// Times the incumbent ratio improved.
    pub improvements: u64,
    /// Wall time spent inside the backend.
    pub solver_time: Duration,
}

impl SearchStats {
    /// Marks the start of the search.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Returns the elapsed time since the search started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Records one finished subproblem.
    pub fn record_subproblem(&mut self, feasible: bool, duration: Duration) {
        if feasible {
            self.feasible_subproblems += 1;
        } else {
            self.infeasible_subproblems += 1;
        }
        self.solver_time += duration;
    }

    pub fn record_improvement(&mut self) {
        self.improvements += 1;
    }

    /// Total subproblems solved, feasible or not.
    pub fn subproblem_count(&self) -> u64 {
        self.feasible_subproblems + self.infeasible_subproblems
    }

    /// Returns the subproblems per second rate.
    pub fn subproblems_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.subproblem_count() as f64 / secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_is_zero_before_start() {
        let mut stats = SearchStats::default();
        stats.record_subproblem(true, Duration::from_millis(1));
        assert_eq!(stats.elapsed(), Duration::ZERO);
        assert_eq!(stats.subproblems_per_second(), 0.0);
    }

    #[test]
    fn test_rate_counts_every_subproblem() {
        let mut stats = SearchStats::default();
        stats.start();
        stats.record_subproblem(true, Duration::ZERO);
        stats.record_subproblem(false, Duration::ZERO);
        std::thread::sleep(Duration::from_millis(5));
        let rate = stats.subproblems_per_second();
        assert!(rate > 0.0 && rate <= 2.0 / 0.005);
    }
}
