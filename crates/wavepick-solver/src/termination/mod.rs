//! Termination conditions for the parametric search.
//!
//! Checked before every subproblem. When one fires, the search stops and
//! returns the best wave found so far.

mod composite;
mod subproblem_count;
mod time;

use std::fmt::Debug;

use wavepick_config::SearchConfig;

use crate::stats::SearchStats;

pub use composite::OrTermination;
pub use subproblem_count::SubproblemCountTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop searching.
pub trait Termination: Send + Debug {
    /// Returns true if the search should stop.
    fn is_terminated(&self, stats: &SearchStats) -> bool;
}

/// Never terminates; the search runs its strategy to completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl Termination for NoTermination {
    fn is_terminated(&self, _stats: &SearchStats) -> bool {
        false
    }
}

/// An absent condition never fires.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, stats: &SearchStats) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(stats))
    }
}

/// Termination assembled from a [`SearchConfig`].
pub type ConfiguredTermination =
    OrTermination<(Option<TimeTermination>, Option<SubproblemCountTermination>)>;

/// Builds the termination described by `config.termination`.
pub fn termination_from_config(config: &SearchConfig) -> ConfiguredTermination {
    OrTermination((
        config.time_limit().map(TimeTermination::new),
        config.subproblem_limit().map(SubproblemCountTermination::new),
    ))
}

#[cfg(test)]
mod tests;
