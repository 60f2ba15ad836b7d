//! Configuration system for wavepick.
//!
//! Load search configuration from TOML or YAML files to control the ratio
//! tolerance, the strategy choice and termination without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use wavepick_config::{SearchConfig, StrategyConfig};
//! use std::time::Duration;
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     epsilon = 0.01
//!     strategy = "bisect_ratio"
//!
//!     [termination]
//!     seconds_spent_limit = 600
//! "#).unwrap();
//!
//! assert_eq!(config.strategy, StrategyConfig::BisectRatio);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(600)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use wavepick_config::SearchConfig;
//!
//! let config = SearchConfig::load("wavepick.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default width at which the ratio bisection stops.
pub const DEFAULT_EPSILON: f64 = 1e-3;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main search configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Bisection stops once `high - low <= epsilon`; also the slack of the
    /// ratio band in threshold subproblems.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Relative optimality gap handed to the MIP solver on every solve.
    #[serde(default = "default_gap_tolerance")]
    pub gap_tolerance: f64,

    /// Big-M used by per-order wave size gating. Defaults to the
    /// instance's total demand.
    #[serde(default)]
    pub big_m: Option<f64>,

    /// How the wave size range is enforced.
    #[serde(default)]
    pub wave_size_rule: WaveSizeRule,

    /// Which parametrization to run.
    #[serde(default)]
    pub strategy: StrategyConfig,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

fn default_gap_tolerance() -> f64 {
    (-6.0f64).exp()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            gap_tolerance: default_gap_tolerance(),
            big_m: None,
            wave_size_rule: WaveSizeRule::default(),
            strategy: StrategyConfig::default(),
            termination: None,
        }
    }
}

impl SearchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a file, choosing YAML for `.yaml`/`.yml` and TOML otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Checks numeric fields for values the search cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "epsilon must be positive and finite, got {}",
                self.epsilon
            )));
        }
        if !(self.gap_tolerance.is_finite() && self.gap_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "gap_tolerance must be non-negative, got {}",
                self.gap_tolerance
            )));
        }
        if let Some(m) = self.big_m {
            if !(m.is_finite() && m > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "big_m must be positive and finite, got {}",
                    m
                )));
            }
        }
        Ok(())
    }

    /// Sets the bisection tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the solver gap tolerance.
    pub fn with_gap_tolerance(mut self, gap: f64) -> Self {
        self.gap_tolerance = gap;
        self
    }

    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: StrategyConfig) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the wave size rule.
    pub fn with_wave_size_rule(mut self, rule: WaveSizeRule) -> Self {
        self.wave_size_rule = rule;
        self
    }

    /// Sets the big-M constant for per-order gating.
    pub fn with_big_m(mut self, big_m: f64) -> Self {
        self.big_m = Some(big_m);
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the maximum number of subproblems to solve.
    pub fn with_subproblem_limit(mut self, count: u64) -> Self {
        self.termination = Some(TerminationConfig {
            subproblem_count_limit: Some(count),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the subproblem count limit, if configured.
    pub fn subproblem_limit(&self) -> Option<u64> {
        self.termination
            .as_ref()
            .and_then(|t| t.subproblem_count_limit)
    }
}

/// How the admissible wave size `[lower_bound, upper_bound]` is enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveSizeRule {
    /// The total units of the wave must lie within the bounds.
    #[default]
    Total,

    /// Additionally, each selected order must fit the bounds on its own,
    /// gated by its inclusion variable through a big-M term.
    PerOrder,
}

/// Strategy selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Choose by the logarithmic range estimate.
    #[default]
    Auto,

    /// Choose by comparing the aisle count with the exact bisection step count.
    ExactCount,

    /// Always enumerate fixed aisle counts.
    EnumerateAisles,

    /// Always bisect the ratio threshold.
    BisectRatio,
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend searching.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend searching.
    pub minutes_spent_limit: Option<u64>,

    /// Maximum number of subproblems to solve.
    pub subproblem_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests;
