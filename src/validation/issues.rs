//! Problems found in a scenario's setup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A setup problem reported by validation.
///
/// Issues are advisory unless the scenario runs with `strict_setup`.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum SetupIssue {
    #[error("No states registered")]
    NoStates,

    #[error("No start state set")]
    MissingStartState,

    #[error("State '{name}' cannot be reached from the start state")]
    UnreachableState { name: String },
}
