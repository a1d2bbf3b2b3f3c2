//! Builder API for ergonomic scenario construction.
//!
//! This module provides a fluent builder for a scenario's collaborators and
//! macros that remove the boilerplate of declaring custom events and input
//! maps.

pub mod macros;
pub mod scenario;

pub use scenario::ScenarioBuilder;
