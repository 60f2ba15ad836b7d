//! Shared test fixtures for wavepick crates.
//!
//! This crate provides instances and pure helper functions for testing.
//! It depends only on `wavepick-core`, so the solver crate can use it as a
//! dev-dependency without a cycle.
//!
//! - [`instances`] - Small hand-built instances with known optima
//! - [`brute`] - Exhaustive search over order and aisle subsets
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! wavepick-test = { workspace = true }
//! ```
//!
//! ```
//! use wavepick_test::{brute_force_best, scenario_instance};
//!
//! let best = brute_force_best(&scenario_instance()).unwrap();
//! assert_eq!(best.ratio, 4.0);
//! ```

pub mod brute;
pub mod instances;

pub use brute::{brute_force_best, brute_force_best_per_order, BruteForceBest};
pub use instances::{
    infeasible_instance, mixed_instance, point_bounds_instance, scenario_instance, SCENARIO_TEXT,
};
