//! Dispatch configuration for a scenario.
//!
//! `ScenarioConfig` derives `Deserialize` with defaults for every field, so
//! an embedding application can load it from whatever file format it already
//! uses.
//!
//! # Example
//!
//! ```rust
//! use scenarist::config::{MissingTransitionPolicy, ScenarioConfig};
//!
//! let config = ScenarioConfig::default()
//!     .with_max_chain_depth(4)
//!     .with_missing_transition(MissingTransitionPolicy::Error);
//!
//! assert_eq!(config.max_chain_depth, 4);
//! assert!(!config.strict_setup);
//! ```

use serde::{Deserialize, Serialize};

/// Default bound on activations chained from a single `init` or `update`.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 16;

/// Default number of transitions a scenario keeps in its history.
pub const DEFAULT_MAX_HISTORY: usize = 1024;

/// What to do when a `Switch` matches no registered transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTransitionPolicy {
    /// Report it and keep the active state
    #[default]
    Ignore,

    /// Keep the active state and return `ScenarioError::NoTransition`
    Error,
}

/// Tunables applied by the dispatch loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Maximum number of states activated by one chain of events
    pub max_chain_depth: usize,

    pub missing_transition: MissingTransitionPolicy,

    /// Refuse to initialize when setup validation reports any issue
    pub strict_setup: bool,

    /// Transitions kept in the history; the oldest are dropped first
    pub max_history: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
            missing_transition: MissingTransitionPolicy::Ignore,
            strict_setup: false,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl ScenarioConfig {
    pub fn with_max_chain_depth(mut self, depth: usize) -> Self {
        self.max_chain_depth = depth;
        self
    }

    pub fn with_missing_transition(mut self, policy: MissingTransitionPolicy) -> Self {
        self.missing_transition = policy;
        self
    }

    pub fn with_strict_setup(mut self, strict: bool) -> Self {
        self.strict_setup = strict;
        self
    }

    pub fn with_max_history(mut self, limit: usize) -> Self {
        self.max_history = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_lenient() {
        let config = ScenarioConfig::default();
        assert_eq!(config.max_chain_depth, DEFAULT_MAX_CHAIN_DEPTH);
        assert_eq!(config.missing_transition, MissingTransitionPolicy::Ignore);
        assert!(!config.strict_setup);
        assert_eq!(config.max_history, DEFAULT_MAX_HISTORY);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: ScenarioConfig =
            serde_json::from_str(r#"{ "missing_transition": "error" }"#).unwrap();

        assert_eq!(config.missing_transition, MissingTransitionPolicy::Error);
        assert_eq!(config.max_chain_depth, DEFAULT_MAX_CHAIN_DEPTH);
        assert_eq!(config.max_history, DEFAULT_MAX_HISTORY);
    }

    #[test]
    fn fluent_setters_chain() {
        let config = ScenarioConfig::default()
            .with_max_chain_depth(2)
            .with_strict_setup(true)
            .with_max_history(8);

        assert_eq!(config.max_chain_depth, 2);
        assert!(config.strict_setup);
        assert_eq!(config.max_history, 8);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = ScenarioConfig::default().with_missing_transition(MissingTransitionPolicy::Error);
        let json = serde_json::to_string(&config).unwrap();
        let back: ScenarioConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
