//! Choosing between aisle-count enumeration and ratio bisection.
//!
//! Enumeration solves one subproblem per aisle count; bisection solves about
//! `log2(range / epsilon)` subproblems. A [`StrategySelector`] compares the
//! two from instance size alone, before any solve.

use std::fmt::{self, Debug};

use wavepick_config::{SearchConfig, StrategyConfig};
use wavepick_core::ProblemInstance;

/// How the parametric search walks the parameter space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Mode A: solve for every aisle count `1..=aisle_count`.
    EnumerateAisles,
    /// Mode B: bisect the ratio threshold with the Dinkelbach objective.
    BisectRatio,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::EnumerateAisles => "enumerate-aisles",
            Strategy::BisectRatio => "bisect-ratio",
        })
    }
}

/// Picks a [`Strategy`] for an instance.
pub trait StrategySelector: Send + Debug {
    fn select(&self, instance: &ProblemInstance, epsilon: f64) -> Strategy;
}

/// Width of the ratio domain, `upper_bound - lower_bound / aisle_count`.
fn ratio_range(instance: &ProblemInstance) -> f64 {
    instance.max_ratio() - instance.min_ratio()
}

/// `ln(upper_bound - lower_bound / aisle_count) + ln(1 / epsilon)`.
///
/// The first term counts as zero when its argument is not positive.
///
/// # Example
///
/// ```
/// use wavepick_core::ProblemInstance;
/// use wavepick_solver::range_estimate;
///
/// let instance = ProblemInstance::builder(1)
///     .order([(0, 1)])
///     .aisle([(0, 1)])
///     .bounds(1, 1)
///     .build()
///     .unwrap();
///
/// // zero-width range: only the epsilon term remains
/// assert!((range_estimate(&instance, 0.01) - 100f64.ln()).abs() < 1e-12);
/// ```
pub fn range_estimate(instance: &ProblemInstance, epsilon: f64) -> f64 {
    let range = ratio_range(instance);
    let range_term = if range > 0.0 { range.ln() } else { 0.0 };
    range_term + (1.0 / epsilon).ln()
}

/// Number of halvings bisection needs to shrink the ratio domain to `epsilon`.
pub fn bisection_steps(instance: &ProblemInstance, epsilon: f64) -> u64 {
    let range = ratio_range(instance);
    if range <= epsilon {
        0
    } else {
        (range / epsilon).log2().ceil() as u64
    }
}

/// Enumerates when `aisle_count <= range_estimate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRangeSelector;

impl StrategySelector for LogRangeSelector {
    fn select(&self, instance: &ProblemInstance, epsilon: f64) -> Strategy {
        if instance.aisle_count() as f64 <= range_estimate(instance, epsilon) {
            Strategy::EnumerateAisles
        } else {
            Strategy::BisectRatio
        }
    }
}

/// Enumerates when `aisle_count` does not exceed the exact bisection step count.
#[derive(Debug, Clone, Copy, Default)]
pub struct BisectionCountSelector;

impl StrategySelector for BisectionCountSelector {
    fn select(&self, instance: &ProblemInstance, epsilon: f64) -> Strategy {
        if instance.aisle_count() as u64 <= bisection_steps(instance, epsilon) {
            Strategy::EnumerateAisles
        } else {
            Strategy::BisectRatio
        }
    }
}

/// Always returns the same strategy.
#[derive(Debug, Clone, Copy)]
pub struct FixedStrategy(pub Strategy);

impl StrategySelector for FixedStrategy {
    fn select(&self, _instance: &ProblemInstance, _epsilon: f64) -> Strategy {
        self.0
    }
}

/// The selector named by `config.strategy`.
pub fn selector_for(config: &SearchConfig) -> Box<dyn StrategySelector> {
    match config.strategy {
        StrategyConfig::Auto => Box::new(LogRangeSelector),
        StrategyConfig::ExactCount => Box::new(BisectionCountSelector),
        StrategyConfig::EnumerateAisles => Box::new(FixedStrategy(Strategy::EnumerateAisles)),
        StrategyConfig::BisectRatio => Box::new(FixedStrategy(Strategy::BisectRatio)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance_with_aisles(aisles: usize, lower: u64, upper: u64) -> ProblemInstance {
        let mut builder = ProblemInstance::builder(1).order([(0, 1)]);
        for _ in 0..aisles {
            builder = builder.aisle([(0, 1)]);
        }
        builder.bounds(lower, upper).build().unwrap()
    }

    #[test]
    fn test_range_estimate_scenario() {
        // bounds [1, 5] over 2 aisles: ln(4.5) + ln(1000)
        let instance = instance_with_aisles(2, 1, 5);
        let estimate = range_estimate(&instance, 1e-3);
        assert!((estimate - (4.5f64.ln() + 1000f64.ln())).abs() < 1e-9);
        assert_eq!(
            LogRangeSelector.select(&instance, 1e-3),
            Strategy::EnumerateAisles
        );
    }

    #[test]
    fn test_many_aisles_bisect() {
        let instance = instance_with_aisles(40, 1, 5);
        assert_eq!(LogRangeSelector.select(&instance, 1e-3), Strategy::BisectRatio);
        assert_eq!(
            BisectionCountSelector.select(&instance, 1e-3),
            Strategy::BisectRatio
        );
    }

    #[test]
    fn test_bisection_steps() {
        let instance = instance_with_aisles(2, 1, 5);
        // 4.5 / 0.001 = 4500, log2 = 12.13
        assert_eq!(bisection_steps(&instance, 1e-3), 13);

        let point = instance_with_aisles(1, 3, 3);
        assert_eq!(bisection_steps(&point, 1e-3), 0);
    }

    #[test]
    fn test_selector_for_config() {
        let instance = instance_with_aisles(2, 1, 5);
        let forced = SearchConfig::new().with_strategy(StrategyConfig::BisectRatio);
        assert_eq!(
            selector_for(&forced).select(&instance, 1e-3),
            Strategy::BisectRatio
        );
        assert_eq!(
            selector_for(&SearchConfig::default()).select(&instance, 1e-3),
            Strategy::EnumerateAisles
        );
    }
}
