//! wavepick Core - problem types for order-wave selection
//!
//! This crate provides the fundamental data model:
//! - `ProblemInstance` describing orders, aisles and the wave-size range
//! - `WaveSelection` and its feasibility and ratio evaluation
//! - `InstanceLoader` for the plain-text instance format
//! - Error types shared by the other crates

pub mod error;
pub mod instance;
pub mod loading;
pub mod wave;

pub use error::{Result, WavePickError};
pub use instance::{ItemQuantity, ProblemInstance, ProblemInstanceBuilder};
pub use loading::InstanceLoader;
pub use wave::{Infeasibility, WaveEvaluation, WaveSelection};
