//! StickHeat Common Utilities
//!
//! Shared infrastructure for all StickHeat crates:
//! - Error types and result aliases
//! - Tick clock and timing statistics for the sampling loop
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
