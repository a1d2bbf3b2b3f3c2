//! Errors returned by scenario setup and dispatch.

use crate::validation::SetupIssue;
use thiserror::Error;

/// Errors that can occur while setting up or driving a scenario.
///
/// None of them leave the scenario in an inconsistent state: a rejected
/// setup call changes nothing, and a failed dispatch leaves the last
/// activated state active.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScenarioError {
    #[error("Cannot add state '{name}': state already exists")]
    DuplicateState { name: String },

    #[error("Unknown state '{name}'")]
    UnknownState { name: String },

    #[error("State handle #{index} is not registered in this scenario")]
    UnknownStateHandle { index: usize },

    #[error("Transfer ({from}) -{tag}-> is already registered to ({existing})")]
    DuplicateTransfer {
        from: String,
        tag: String,
        existing: String,
    },

    #[error("Scenario setup is closed once the scenario is initialized")]
    SetupClosed,

    #[error("Scenario is already initialized")]
    AlreadyInitialized,

    #[error("Scenario setup is invalid: {}", describe(.issues))]
    InvalidSetup { issues: Vec<SetupIssue> },

    #[error("No transition from ({from}) on {tag}")]
    NoTransition { from: String, tag: String },

    #[error("Event chain exceeded {limit} nested activations at ({state})")]
    ChainDepthExceeded { state: String, limit: usize },
}

fn describe(issues: &[SetupIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
