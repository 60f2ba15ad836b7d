//! Mutable state of one parametric search run.

use wavepick_core::{WaveEvaluation, WaveSelection};

use crate::subproblem::Parameter;

/// The best wave seen so far.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    pub selection: WaveSelection,
    pub evaluation: WaveEvaluation,
    /// Ratio used for comparison: `objective / a*` in enumeration, the
    /// evaluated ratio in bisection.
    pub ratio: f64,
    /// Objective value of the subproblem that produced it.
    pub objective: f64,
    pub parameter: Parameter,
}

/// Bisection interval over the ratio threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioBounds {
    pub low: f64,
    pub high: f64,
}

impl RatioBounds {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    /// Returns true once the interval is no wider than `epsilon`.
    pub fn is_converged(&self, epsilon: f64) -> bool {
        self.width() <= epsilon
    }

    /// A wave with ratio at least `k` exists.
    pub fn raise_low(&mut self, k: f64) {
        self.low = k;
    }

    /// No wave with ratio at least `k` exists.
    pub fn lower_high(&mut self, k: f64) {
        self.high = k;
    }
}

/// Search state owned by [`ParametricSearch`](crate::ParametricSearch).
///
/// # Example
///
/// ```
/// use wavepick_core::{WaveEvaluation, WaveSelection};
/// use wavepick_solver::{Incumbent, Parameter, SearchState};
///
/// let mut state = SearchState::new();
/// assert_eq!(state.best_ratio(), f64::NEG_INFINITY);
///
/// let candidate = Incumbent {
///     selection: WaveSelection::new([0], [1]),
///     evaluation: WaveEvaluation { units_picked: 4, aisles_visited: 1, ratio: 4.0 },
///     ratio: 4.0,
///     objective: 4.0,
///     parameter: Parameter::AisleCount(1),
/// };
/// assert!(state.offer(candidate.clone()));
/// assert!(!state.offer(candidate));
/// assert_eq!(state.best_ratio(), 4.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    best: Option<Incumbent>,
    bounds: Option<RatioBounds>,
    last_objective: Option<f64>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best(&self) -> Option<&Incumbent> {
        self.best.as_ref()
    }

    pub fn take_best(&mut self) -> Option<Incumbent> {
        self.best.take()
    }

    /// Ratio of the incumbent, or negative infinity if there is none.
    pub fn best_ratio(&self) -> f64 {
        self.best.as_ref().map_or(f64::NEG_INFINITY, |b| b.ratio)
    }

    /// Replaces the incumbent if `candidate` has a strictly higher ratio.
    ///
    /// Selections without orders are never accepted. Returns true on
    /// improvement.
    pub fn offer(&mut self, candidate: Incumbent) -> bool {
        if candidate.selection.orders().is_empty() || candidate.ratio <= self.best_ratio() {
            return false;
        }
        self.best = Some(candidate);
        true
    }

    pub fn bounds(&self) -> Option<RatioBounds> {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: RatioBounds) {
        self.bounds = Some(bounds);
    }

    /// Objective value of the most recent solved subproblem.
    pub fn last_objective(&self) -> Option<f64> {
        self.last_objective
    }

    pub fn record_objective(&mut self, objective: f64) {
        self.last_objective = Some(objective);
    }
}
