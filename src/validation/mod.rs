//! Setup validation that reports every problem at once.
//!
//! Uses Stillwater's `Validation` to accumulate all issues instead of
//! stopping at the first one, so a scenario author sees the whole picture
//! after a single `validate()` call.
//!
//! # Example
//!
//! ```rust
//! use scenarist::core::State;
//! use scenarist::validation::SetupIssue;
//! use scenarist::{custom_events, Scenario};
//! use stillwater::validation::Validation;
//!
//! custom_events! {
//!     enum Flow {
//!         Next,
//!     }
//! }
//!
//! struct Step(&'static str);
//!
//! impl State<Flow> for Step {
//!     fn name(&self) -> &str {
//!         self.0
//!     }
//! }
//!
//! let mut scenario = Scenario::<Flow>::new();
//! scenario.add_state(Step("A")).unwrap();
//! scenario.add_state(Step("B")).unwrap();
//!
//! match scenario.validate() {
//!     Validation::Failure(issues) => {
//!         assert!(issues.iter().any(|i| *i == SetupIssue::MissingStartState));
//!     }
//!     Validation::Success(_) => panic!("expected setup issues"),
//! }
//! ```

mod issues;

pub use issues::SetupIssue;

use crate::core::CustomEvent;
use crate::scenario::registry::{StateId, StateRegistry};
use crate::scenario::table::TransitionTable;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Check registered states and transfers, accumulating ALL issues.
pub(crate) fn validate_setup<E: CustomEvent>(
    states: &StateRegistry<E>,
    table: &TransitionTable<E>,
    start: Option<StateId>,
) -> Validation<(), NonEmptyVec<SetupIssue>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<SetupIssue>>> = Vec::new();

    if states.is_empty() {
        checks.push(Validation::fail(SetupIssue::NoStates));
    }

    match start {
        None => checks.push(Validation::fail(SetupIssue::MissingStartState)),
        Some(start) => {
            let reachable = reachable_from(start, table);
            for id in states.ids().filter(|id| !reachable.contains(id)) {
                let name = states.name(id).unwrap_or_default().to_string();
                checks.push(Validation::fail(SetupIssue::UnreachableState { name }));
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Flatten a validation result into the list of issues it carries.
pub(crate) fn issues(result: Validation<(), NonEmptyVec<SetupIssue>>) -> Vec<SetupIssue> {
    match result {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(issues) => issues.iter().cloned().collect(),
    }
}

fn reachable_from<E: CustomEvent>(start: StateId, table: &TransitionTable<E>) -> HashSet<StateId> {
    let mut seen = HashSet::from([start]);
    let mut frontier = vec![start];

    while let Some(current) = frontier.pop() {
        for (_, target) in table.outgoing(current) {
            if seen.insert(target) {
                frontier.push(target);
            }
        }
    }
    seen
}
