//! wavepick - order wave selection in Rust
//!
//! Picks the subset of orders and the aisles to visit that maximize units
//! picked per aisle, subject to a wave size range and aisle stock.
//!
//! # Example
//!
//! ```
//! use wavepick::prelude::*;
//!
//! let instance = InstanceLoader::from_str("2 1 2\n1 0 3\n1 0 2\n1 0 5\n1 0 1\n2 5\n").unwrap();
//! let outcome = wavepick::solve_instance(&instance, &SearchConfig::default()).unwrap();
//!
//! assert_eq!(outcome.ratio, 5.0);
//! assert_eq!(outcome.selection.aisles(), &[0]);
//! ```

use std::path::Path;

use thiserror::Error;
use tracing::info;

pub use wavepick_config::{
    ConfigError, SearchConfig, StrategyConfig, TerminationConfig, WaveSizeRule,
};
pub use wavepick_core::{
    InstanceLoader, ProblemInstance, ProblemInstanceBuilder, WaveEvaluation, WavePickError,
    WaveSelection,
};
pub use wavepick_solver::{
    GoodLpAdapter, ParametricSearch, SearchError, SearchOutcome, SolverAdapter, SolverError,
    Strategy,
};

#[cfg(feature = "console")]
pub use wavepick_console as console;

/// Anything that can go wrong between reading an instance and writing a wave.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load instance: {0}")]
    Instance(#[from] WavePickError),

    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Solves `instance` with the `good_lp` backend, honoring the strategy and
/// termination in `config`.
pub fn solve_instance(
    instance: &ProblemInstance,
    config: &SearchConfig,
) -> Result<SearchOutcome, SearchError> {
    ParametricSearch::configured(instance, GoodLpAdapter::new(), config.clone()).solve()
}

/// Loads an instance file and solves it.
pub fn solve_file(
    path: impl AsRef<Path>,
    config: &SearchConfig,
) -> Result<(ProblemInstance, SearchOutcome), Error> {
    let path = path.as_ref();
    let instance = InstanceLoader::from_path(path)?;
    info!(
        event = "instance_loaded",
        path = %path.display(),
        order_count = instance.order_count(),
        item_count = instance.item_count(),
        aisle_count = instance.aisle_count(),
    );
    let outcome = solve_instance(&instance, config)?;
    Ok((instance, outcome))
}

pub mod prelude {
    pub use super::{
        InstanceLoader, ParametricSearch, ProblemInstance, SearchConfig, SearchOutcome,
        StrategyConfig, WaveSelection, WaveSizeRule,
    };
}
