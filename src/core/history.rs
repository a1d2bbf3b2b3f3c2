//! Record of the activation changes a scenario went through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// One `Switch`-driven move from one state to another.
///
/// # Example
///
/// ```rust
/// use scenarist::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "RequestOld".to_string(),
///     to: "Check".to_string(),
///     tag: Some("GotPassword".to_string()),
///     timestamp: Utc::now(),
///     attempt: 0,
/// };
/// assert_eq!(transition.to, "Check");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// Name of the state that was left
    pub from: String,
    /// Name of the state that became active
    pub to: String,
    /// Name of the custom tag that selected the edge, if any
    pub tag: Option<String>,
    /// When the transition happened
    pub timestamp: DateTime<Utc>,
    /// How many times `from` was restarted with `TryAgain` before leaving
    pub attempt: usize,
}

/// Ordered history of transitions, oldest first.
///
/// `record` returns a new history and leaves the original untouched. A
/// running scenario appends in place and keeps at most
/// `ScenarioConfig::max_history` entries, dropping the oldest.
///
/// # Example
///
/// ```rust
/// use scenarist::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let step = |from: &str, to: &str| StateTransition {
///     from: from.to_string(),
///     to: to.to_string(),
///     tag: None,
///     timestamp: Utc::now(),
///     attempt: 0,
/// };
///
/// let history = StateHistory::new()
///     .record(step("Start", "Middle"))
///     .record(step("Middle", "End"));
///
/// assert_eq!(history.get_path(), vec!["Start", "Middle", "End"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: VecDeque<StateTransition>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push_back(transition);
        Self { transitions }
    }

    /// Append in place, then drop the oldest entries beyond `limit`.
    pub(crate) fn push(&mut self, transition: StateTransition, limit: usize) {
        self.transitions.push_back(transition);
        while self.transitions.len() > limit {
            self.transitions.pop_front();
        }
    }

    /// State names in visiting order: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from.as_str());
        }
        path.extend(self.transitions.iter().map(|t| t.to.as_str()));
        path
    }

    /// Time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> &VecDeque<StateTransition> {
        &self.transitions
    }

    /// Number of retained transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
