//! The parametric search driver.
//!
//! [`ParametricSearch`] owns the adapter for the duration of a run. It picks
//! a [`Strategy`], then solves one subproblem at a time: build, install,
//! solve, read back, reset. Only the incumbent and the bisection interval
//! survive between subproblems.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use wavepick_config::SearchConfig;
use wavepick_core::{ProblemInstance, WaveEvaluation, WaveSelection};

use crate::adapter::{ModelScope, SolveStatus, SolverAdapter};
use crate::error::{SearchError, SolverError};
use crate::event::{SearchEventSupport, SearchListener};
use crate::state::{Incumbent, RatioBounds, SearchState};
use crate::stats::SearchStats;
use crate::strategy::{selector_for, Strategy, StrategySelector};
use crate::subproblem::{Parameter, SubproblemBuilder, SubproblemOutcome};
use crate::termination::{
    termination_from_config, ConfiguredTermination, NoTermination, Termination,
};

/// Dinkelbach values at or below this count as non-positive.
const SIGN_TOLERANCE: f64 = 1e-9;

/// What one subproblem returned, as kept in the trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordStatus {
    Solved { objective: f64 },
    Infeasible,
}

/// One entry of the per-parameter trace.
#[derive(Debug, Clone, PartialEq)]
pub struct SubproblemRecord {
    /// 0-based position in the run.
    pub index: u64,
    pub parameter: Parameter,
    pub status: RecordStatus,
    /// Time spent building, solving and reading back.
    pub duration: Duration,
}

/// Result of a successful search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub strategy: Strategy,
    pub selection: WaveSelection,
    pub evaluation: WaveEvaluation,
    /// Ratio of the final wave.
    pub ratio: f64,
    /// Parameter of the subproblem that produced the final wave.
    pub parameter: Parameter,
    /// Objective value of the last subproblem that was solved.
    pub final_objective: Option<f64>,
    /// Final bisection interval; `None` when aisle counts were enumerated.
    pub ratio_bounds: Option<RatioBounds>,
    pub stats: SearchStats,
    pub trace: Vec<SubproblemRecord>,
    /// True if a termination condition or an inconclusive subproblem
    /// stopped the search.
    pub terminated_early: bool,
}

struct Run {
    state: SearchState,
    stats: SearchStats,
    trace: Vec<SubproblemRecord>,
    terminated_early: bool,
}

/// Maximizes units picked per aisle visited through a sequence of MIP
/// subproblems.
///
/// # Type Parameters
/// * `A` - The MIP backend
/// * `T` - Termination condition checked before every subproblem
///
/// # Example
///
/// ```
/// use wavepick_config::SearchConfig;
/// use wavepick_core::ProblemInstance;
/// use wavepick_solver::{GoodLpAdapter, ParametricSearch};
///
/// let instance = ProblemInstance::builder(2)
///     .order([(0, 2)])
///     .order([(0, 2)])
///     .order([(1, 1)])
///     .aisle([(0, 4)])
///     .aisle([(1, 1)])
///     .bounds(1, 5)
///     .build()
///     .unwrap();
///
/// let mut search = ParametricSearch::new(&instance, GoodLpAdapter::new())
///     .with_config(SearchConfig::default());
/// let outcome = search.solve().unwrap();
///
/// assert_eq!(outcome.ratio, 4.0);
/// assert_eq!(outcome.selection.orders(), &[0, 1]);
/// assert_eq!(outcome.selection.aisles(), &[0]);
/// ```
pub struct ParametricSearch<'a, A, T = NoTermination> {
    instance: &'a ProblemInstance,
    adapter: A,
    config: SearchConfig,
    selector: Box<dyn StrategySelector>,
    termination: T,
    events: SearchEventSupport,
}

impl<A, T: std::fmt::Debug> std::fmt::Debug for ParametricSearch<'_, A, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParametricSearch")
            .field("config", &self.config)
            .field("selector", &self.selector)
            .field("termination", &self.termination)
            .field("events", &self.events)
            .finish()
    }
}

impl<'a, A: SolverAdapter> ParametricSearch<'a, A, NoTermination> {
    /// Creates a search with the default configuration and no termination.
    pub fn new(instance: &'a ProblemInstance, adapter: A) -> Self {
        let config = SearchConfig::default();
        Self {
            instance,
            adapter,
            selector: selector_for(&config),
            config,
            termination: NoTermination,
            events: SearchEventSupport::new(),
        }
    }

    /// Creates a search whose strategy and termination both come from `config`.
    pub fn configured(
        instance: &'a ProblemInstance,
        adapter: A,
        config: SearchConfig,
    ) -> ParametricSearch<'a, A, ConfiguredTermination> {
        let termination = termination_from_config(&config);
        Self::new(instance, adapter)
            .with_config(config)
            .with_termination(termination)
    }
}

impl<'a, A: SolverAdapter, T: Termination> ParametricSearch<'a, A, T> {
    /// Replaces the configuration and the strategy selector it names.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.selector = selector_for(&config);
        self.config = config;
        self
    }

    /// Overrides the strategy selector.
    pub fn with_selector(mut self, selector: impl StrategySelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    pub fn with_termination<T2: Termination>(self, termination: T2) -> ParametricSearch<'a, A, T2> {
        ParametricSearch {
            instance: self.instance,
            adapter: self.adapter,
            config: self.config,
            selector: self.selector,
            termination,
            events: self.events,
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn SearchListener>) -> Self {
        self.events.add_listener(listener);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn into_adapter(self) -> A {
        self.adapter
    }

    /// The strategy this search would use for its instance.
    pub fn strategy(&self) -> Strategy {
        self.selector.select(self.instance, self.config.epsilon)
    }

    /// Runs the search to completion or until the termination fires.
    ///
    /// Bisection also stops early when the backend returns a positive value
    /// it has not proven optimal; the wave it found is still offered.
    ///
    /// # Errors
    ///
    /// - `SearchError::Instance` if the instance is inconsistent
    /// - `SearchError::Solver` if the backend fails, reports an unbounded
    ///   model, or the final wave violates the instance
    /// - `SearchError::NoFeasibleWave` if no subproblem produced a wave
    pub fn solve(&mut self) -> Result<SearchOutcome, SearchError> {
        let builder = SubproblemBuilder::new(self.instance, &self.config)?;
        let strategy = self.strategy();

        let mut run = Run {
            state: SearchState::new(),
            stats: SearchStats::default(),
            trace: Vec::new(),
            terminated_early: false,
        };
        run.stats.start();

        info!(
            event = "search_start",
            strategy = %strategy,
            backend = self.adapter.name(),
            order_count = self.instance.order_count(),
            aisle_count = self.instance.aisle_count(),
            lower_bound = self.instance.lower_bound(),
            upper_bound = self.instance.upper_bound(),
            epsilon = self.config.epsilon,
        );
        self.events.fire_search_started(self.instance, strategy);

        match strategy {
            Strategy::EnumerateAisles => self.enumerate_aisles(&builder, &mut run)?,
            Strategy::BisectRatio => self.bisect_ratio(&builder, &mut run)?,
        }

        self.finish(strategy, run)
    }

    fn enumerate_aisles(
        &mut self,
        builder: &SubproblemBuilder<'_>,
        run: &mut Run,
    ) -> Result<(), SearchError> {
        for aisles in 1..=self.instance.aisle_count() {
            if self.should_stop(run) {
                break;
            }
            let parameter = Parameter::AisleCount(aisles);
            if let SubproblemOutcome::Solved {
                objective,
                selection,
                ..
            } = self.solve_subproblem(builder, parameter, run)?
            {
                let evaluation = self.instance.evaluate(&selection);
                self.offer(
                    run,
                    Incumbent {
                        selection,
                        evaluation,
                        ratio: objective / aisles as f64,
                        objective,
                        parameter,
                    },
                );
            }
        }
        Ok(())
    }

    fn bisect_ratio(
        &mut self,
        builder: &SubproblemBuilder<'_>,
        run: &mut Run,
    ) -> Result<(), SearchError> {
        let epsilon = self.config.epsilon;
        let mut bounds = RatioBounds::new(self.instance.min_ratio(), self.instance.max_ratio());
        run.state.set_bounds(bounds);

        while !bounds.is_converged(epsilon) {
            if self.should_stop(run) {
                break;
            }
            let k = bounds.midpoint();
            let parameter = Parameter::RatioThreshold(k);
            match self.solve_subproblem(builder, parameter, run)? {
                SubproblemOutcome::Solved {
                    objective,
                    selection,
                    ..
                } if objective <= SIGN_TOLERANCE => {
                    bounds.raise_low(k);
                    self.offer_evaluated(run, selection, objective, parameter);
                }
                SubproblemOutcome::Solved {
                    objective,
                    selection,
                    proven_optimal: false,
                } => {
                    // A positive value without an optimality proof does not
                    // rule out ratio k, so neither side of the interval moves.
                    warn!(
                        parameter = %parameter,
                        objective,
                        "unproven subproblem is inconclusive, stopping bisection"
                    );
                    self.offer_evaluated(run, selection, objective, parameter);
                    run.terminated_early = true;
                    break;
                }
                SubproblemOutcome::Solved { .. } | SubproblemOutcome::Infeasible => {
                    bounds.lower_high(k)
                }
            }
            run.state.set_bounds(bounds);
        }

        if run.state.best().is_none() && !run.terminated_early {
            let parameter = Parameter::RatioThreshold(bounds.low);
            if let SubproblemOutcome::Solved {
                objective,
                selection,
                ..
            } = self.solve_subproblem(builder, parameter, run)?
            {
                self.offer_evaluated(run, selection, objective, parameter);
            }
        }
        Ok(())
    }

    fn should_stop(&self, run: &mut Run) -> bool {
        if self.termination.is_terminated(&run.stats) {
            run.terminated_early = true;
        }
        run.terminated_early
    }

    /// Builds, installs and solves one subproblem. The adapter is reset on
    /// every exit path by the model scope.
    fn solve_subproblem(
        &mut self,
        builder: &SubproblemBuilder<'_>,
        parameter: Parameter,
        run: &mut Run,
    ) -> Result<SubproblemOutcome, SearchError> {
        let subproblem = builder.build(parameter)?;
        let gap_tolerance = self.config.gap_tolerance;
        let started = Instant::now();

        let outcome = {
            let mut scope = ModelScope::open(&mut self.adapter);
            let installed = subproblem.install(&mut *scope);
            match scope.solve(gap_tolerance)? {
                status if status.has_solution() => {
                    let objective = scope
                        .objective_value()
                        .ok_or(SolverError::MissingSolution)?;
                    let selection = installed.read_selection(&*scope)?;
                    SubproblemOutcome::Solved {
                        objective,
                        selection,
                        proven_optimal: status == SolveStatus::Optimal,
                    }
                }
                SolveStatus::Unbounded => return Err(SolverError::Unbounded.into()),
                _ => SubproblemOutcome::Infeasible,
            }
        };

        let duration = started.elapsed();
        let status = match &outcome {
            SubproblemOutcome::Solved { objective, .. } => {
                run.state.record_objective(*objective);
                RecordStatus::Solved {
                    objective: *objective,
                }
            }
            SubproblemOutcome::Infeasible => RecordStatus::Infeasible,
        };
        run.stats
            .record_subproblem(matches!(status, RecordStatus::Solved { .. }), duration);

        let record = SubproblemRecord {
            index: run.trace.len() as u64,
            parameter,
            status,
            duration,
        };
        debug!(
            event = "subproblem",
            index = record.index,
            parameter = %parameter,
            feasible = matches!(status, RecordStatus::Solved { .. }),
            objective = match status {
                RecordStatus::Solved { objective } => objective,
                RecordStatus::Infeasible => f64::NAN,
            },
            duration_ms = duration.as_millis() as u64,
        );
        self.events.fire_subproblem_solved(&record);
        run.trace.push(record);

        Ok(outcome)
    }

    fn offer_evaluated(
        &self,
        run: &mut Run,
        selection: WaveSelection,
        objective: f64,
        parameter: Parameter,
    ) {
        let evaluation = self.instance.evaluate(&selection);
        self.offer(
            run,
            Incumbent {
                selection,
                evaluation,
                ratio: evaluation.ratio,
                objective,
                parameter,
            },
        );
    }

    fn offer(&self, run: &mut Run, candidate: Incumbent) {
        if run.state.offer(candidate) {
            run.stats.record_improvement();
            if let Some(best) = run.state.best() {
                info!(
                    event = "best_improved",
                    ratio = best.ratio,
                    units = best.evaluation.units_picked,
                    aisles = best.evaluation.aisles_visited,
                    orders = best.selection.orders().len(),
                    parameter = %best.parameter,
                );
                self.events.fire_best_improved(best);
            }
        }
    }

    fn finish(&self, strategy: Strategy, mut run: Run) -> Result<SearchOutcome, SearchError> {
        let subproblems = run.stats.subproblem_count();
        info!(
            event = "search_end",
            strategy = %strategy,
            subproblems,
            infeasible = run.stats.infeasible_subproblems,
            ratio = run.state.best_ratio(),
            terminated_early = run.terminated_early,
            duration_ms = run.stats.elapsed().as_millis() as u64,
        );
        self.events
            .fire_search_ended(run.state.best(), run.terminated_early);

        let best = run
            .state
            .take_best()
            .ok_or(SearchError::NoFeasibleWave { subproblems })?;
        self.instance
            .check_feasibility(&best.selection)
            .map_err(|violation| {
                SolverError::Numerical(format!("final wave is not feasible: {}", violation))
            })?;

        Ok(SearchOutcome {
            strategy,
            selection: best.selection,
            evaluation: best.evaluation,
            ratio: best.ratio,
            parameter: best.parameter,
            final_objective: run.state.last_objective(),
            ratio_bounds: run.state.bounds(),
            stats: run.stats,
            trace: run.trace,
            terminated_early: run.terminated_early,
        })
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
