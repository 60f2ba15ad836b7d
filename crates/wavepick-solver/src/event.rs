//! Event system for monitoring the parametric search.
//!
//! Listeners registered on a [`SearchEventSupport`] are notified when the
//! search starts and ends, after every subproblem, and whenever the best
//! wave improves.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use wavepick_solver::{Incumbent, SearchEventSupport, SearchListener};
//!
//! #[derive(Debug)]
//! struct PrintBest;
//! impl SearchListener for PrintBest {
//!     fn on_best_improved(&self, incumbent: &Incumbent) {
//!         println!("new best ratio {:.3}", incumbent.ratio);
//!     }
//! }
//!
//! let mut support = SearchEventSupport::new();
//! support.add_listener(Arc::new(PrintBest));
//! assert_eq!(support.listener_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{debug, info};
use wavepick_core::ProblemInstance;

use crate::search::{RecordStatus, SubproblemRecord};
use crate::state::Incumbent;
use crate::strategy::Strategy;

/// Listener for search lifecycle events.
pub trait SearchListener: Send + Sync + Debug {
    /// Called when a new best wave is found.
    fn on_best_improved(&self, incumbent: &Incumbent);

    /// Called once the strategy is chosen, before the first subproblem.
    fn on_search_started(&self, _instance: &ProblemInstance, _strategy: Strategy) {}

    /// Called after every subproblem, feasible or not.
    fn on_subproblem_solved(&self, _record: &SubproblemRecord) {}

    /// Called when the search stops, with the final incumbent if any.
    fn on_search_ended(&self, _best: Option<&Incumbent>, _terminated_early: bool) {}
}

/// Central event broadcaster for search events.
///
/// Listeners are called synchronously in registration order.
#[derive(Default)]
pub struct SearchEventSupport {
    listeners: Vec<Arc<dyn SearchListener>>,
}

impl SearchEventSupport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn SearchListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn fire_best_improved(&self, incumbent: &Incumbent) {
        for listener in &self.listeners {
            listener.on_best_improved(incumbent);
        }
    }

    pub fn fire_search_started(&self, instance: &ProblemInstance, strategy: Strategy) {
        for listener in &self.listeners {
            listener.on_search_started(instance, strategy);
        }
    }

    pub fn fire_subproblem_solved(&self, record: &SubproblemRecord) {
        for listener in &self.listeners {
            listener.on_subproblem_solved(record);
        }
    }

    pub fn fire_search_ended(&self, best: Option<&Incumbent>, terminated_early: bool) {
        for listener in &self.listeners {
            listener.on_search_ended(best, terminated_early);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }
}

impl Debug for SearchEventSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// A listener that forwards events to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LoggingListener {
    prefix: String,
}

impl LoggingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a logging listener with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl SearchListener for LoggingListener {
    fn on_best_improved(&self, incumbent: &Incumbent) {
        info!(
            "{}New best wave: ratio {:.4} ({} units over {} aisles, {})",
            self.prefix,
            incumbent.ratio,
            incumbent.evaluation.units_picked,
            incumbent.evaluation.aisles_visited,
            incumbent.parameter
        );
    }

    fn on_search_started(&self, instance: &ProblemInstance, strategy: Strategy) {
        info!(
            "{}Search started: {} orders, {} aisles, strategy {}",
            self.prefix,
            instance.order_count(),
            instance.aisle_count(),
            strategy
        );
    }

    fn on_subproblem_solved(&self, record: &SubproblemRecord) {
        match record.status {
            RecordStatus::Solved { objective } => debug!(
                "{}Subproblem {} ({}) solved, objective {:.4}",
                self.prefix, record.index, record.parameter, objective
            ),
            RecordStatus::Infeasible => debug!(
                "{}Subproblem {} ({}) infeasible",
                self.prefix, record.index, record.parameter
            ),
        }
    }

    fn on_search_ended(&self, best: Option<&Incumbent>, terminated_early: bool) {
        let suffix = if terminated_early {
            " (terminated early)"
        } else {
            ""
        };
        match best {
            Some(b) => info!("{}Search ended{}: ratio {:.4}", self.prefix, suffix, b.ratio),
            None => info!("{}Search ended{}: no feasible wave", self.prefix, suffix),
        }
    }
}

/// A listener that counts event occurrences.
#[derive(Debug, Default)]
pub struct CountingListener {
    best_improved_count: AtomicUsize,
    search_started_count: AtomicUsize,
    subproblem_count: AtomicUsize,
    search_ended_count: AtomicUsize,
}

impl CountingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best_improved_count(&self) -> usize {
        self.best_improved_count.load(Ordering::SeqCst)
    }

    pub fn search_started_count(&self) -> usize {
        self.search_started_count.load(Ordering::SeqCst)
    }

    pub fn subproblem_count(&self) -> usize {
        self.subproblem_count.load(Ordering::SeqCst)
    }

    pub fn search_ended_count(&self) -> usize {
        self.search_ended_count.load(Ordering::SeqCst)
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.best_improved_count.store(0, Ordering::SeqCst);
        self.search_started_count.store(0, Ordering::SeqCst);
        self.subproblem_count.store(0, Ordering::SeqCst);
        self.search_ended_count.store(0, Ordering::SeqCst);
    }
}

impl SearchListener for CountingListener {
    fn on_best_improved(&self, _incumbent: &Incumbent) {
        self.best_improved_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_search_started(&self, _instance: &ProblemInstance, _strategy: Strategy) {
        self.search_started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_subproblem_solved(&self, _record: &SubproblemRecord) {
        self.subproblem_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_search_ended(&self, _best: Option<&Incumbent>, _terminated_early: bool) {
        self.search_ended_count.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
