//! The scenario engine.
//!
//! A [`Scenario`] owns its states in an arena, keeps a transition table
//! keyed by `(state, custom tag)`, and drives the lifecycle protocol:
//!
//! - `Switch`: look up the edge, `exit` the old state, `init` the new one
//! - `TryAgain`: `exit` then `init` the same state, no lookup
//! - `Request`: hand the payload to the requester, nothing else changes
//! - `Finish`: `exit` the active state and stop accepting input
//!
//! Events returned from `init` are routed the same way, so one input can
//! trigger a bounded chain of activations.

mod engine;
mod error;
pub(crate) mod registry;
mod setup;
pub(crate) mod table;


pub use engine::{Requester, Scenario};
pub use error::ScenarioError;
pub use registry::{ScenarioId, StateId, StateRef};
pub use setup::ScenarioSetup;
