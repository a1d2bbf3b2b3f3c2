//! Property-based tests for scenario dispatch.
//!
//! These tests use proptest to drive scenarios with random input sequences
//! and check the engine against a simple model of where it should be.

use proptest::prelude::*;
use scenarist::core::{Event, Params, State};
use scenarist::{custom_events, params, EventType, Scenario, ScenarioError};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

custom_events! {
    enum Step {
        Forward,
        Backward,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Action {
    Nothing,
    Ask,
    Forward,
    Backward,
    Retry,
    Finish,
}

impl Action {
    fn as_str(self) -> &'static str {
        match self {
            Self::Nothing => "nothing",
            Self::Ask => "ask",
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Retry => "retry",
            Self::Finish => "finish",
        }
    }
}

/// Node of a ring whose `update` does whatever the input's `action` says.
struct Node {
    name: String,
    inits: Arc<AtomicUsize>,
}

impl State<Step> for Node {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, _params: &Params) -> Event<Step> {
        self.inits.fetch_add(1, Ordering::SeqCst);
        Event::none(self.name())
    }

    fn update(&mut self, params: &Params) -> Event<Step> {
        match params.get("action").map(String::as_str) {
            Some("ask") => Event::request(self.name(), params! { "from" => self.name }),
            Some("forward") => Event::switch(self.name(), Step::Forward, Params::new()),
            Some("backward") => Event::switch(self.name(), Step::Backward, Params::new()),
            Some("retry") => Event::try_again(self.name()),
            Some("finish") => Event::finish(self.name()),
            _ => Event::none(self.name()),
        }
    }
}

struct Ring {
    scenario: Scenario<Step>,
    requests: Arc<AtomicUsize>,
    inits: Arc<AtomicUsize>,
}

/// `size` nodes linked by `Forward`; `Backward` is never registered.
fn ring(size: usize) -> Ring {
    let requests = Arc::new(AtomicUsize::new(0));
    let inits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&requests);

    let mut scenario = Scenario::builder()
        .requester(move |_: &Params| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build();

    let ids: Vec<_> = (0..size)
        .map(|i| {
            scenario
                .add_state(Node {
                    name: format!("N{}", i),
                    inits: Arc::clone(&inits),
                })
                .unwrap()
        })
        .collect();
    for i in 0..size {
        scenario
            .add_transfer(ids[i], ids[(i + 1) % size], Step::Forward)
            .unwrap();
    }
    scenario.set_start_state(ids[0]).unwrap();
    scenario.init(&Params::new()).unwrap();

    Ring {
        scenario,
        requests,
        inits,
    }
}

fn arbitrary_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => Just(Action::Nothing),
        2 => Just(Action::Ask),
        4 => Just(Action::Forward),
        2 => Just(Action::Backward),
        2 => Just(Action::Retry),
        1 => Just(Action::Finish),
    ]
}

fn input(action: Action) -> Params {
    params! { "action" => action.as_str() }
}

proptest! {
    #[test]
    fn dispatch_follows_the_ring_model(
        size in 1usize..6,
        actions in prop::collection::vec(arbitrary_action(), 0..40),
    ) {
        let mut ring = ring(size);
        let mut position = 0usize;
        let mut finished = false;
        let mut transitions = 0usize;
        let mut requests = 0usize;

        for action in actions {
            let event = ring.scenario.update(&input(action)).unwrap();
            if finished {
                prop_assert_eq!(event, Event::idle());
                continue;
            }
            match action {
                Action::Forward => {
                    position = (position + 1) % size;
                    transitions += 1;
                }
                Action::Ask => requests += 1,
                Action::Finish => finished = true,
                Action::Nothing | Action::Backward | Action::Retry => {}
            }
        }

        prop_assert_eq!(ring.scenario.is_finished(), finished);
        prop_assert_eq!(ring.scenario.history().len(), transitions);
        prop_assert_eq!(ring.requests.load(Ordering::SeqCst), requests);
        if finished {
            prop_assert_eq!(ring.scenario.active_state(), None);
        } else {
            let expected = format!("N{}", position);
            prop_assert_eq!(ring.scenario.active_state_name(), Some(expected.as_str()));
        }
    }

    #[test]
    fn none_events_are_idempotent(size in 1usize..6, repeats in 0usize..20) {
        let mut ring = ring(size);
        let inits = ring.inits.load(Ordering::SeqCst);

        for _ in 0..repeats {
            let event = ring.scenario.update(&input(Action::Nothing)).unwrap();
            prop_assert!(event.is_none());
        }

        prop_assert_eq!(ring.scenario.active_state_name(), Some("N0"));
        prop_assert!(ring.scenario.history().is_empty());
        prop_assert_eq!(ring.inits.load(Ordering::SeqCst), inits);
        prop_assert_eq!(ring.scenario.state_count(), size);
        prop_assert_eq!(ring.scenario.transfer_count(), size);
    }

    #[test]
    fn try_again_reenters_without_moving(retries in 1usize..10) {
        let mut ring = ring(3);

        for _ in 0..retries {
            let event = ring.scenario.update(&input(Action::Retry)).unwrap();
            prop_assert_eq!(event.event_type(), EventType::TryAgain);
        }

        prop_assert_eq!(ring.scenario.active_state_name(), Some("N0"));
        prop_assert_eq!(ring.inits.load(Ordering::SeqCst), retries + 1);
        prop_assert!(ring.scenario.history().is_empty());
    }

    #[test]
    fn finish_is_terminal(
        before in prop::collection::vec(arbitrary_action(), 0..10),
        after in prop::collection::vec(arbitrary_action(), 0..20),
    ) {
        let mut ring = ring(4);
        for action in before.into_iter().filter(|a| *a != Action::Finish) {
            ring.scenario.update(&input(action)).unwrap();
        }
        ring.scenario.update(&input(Action::Finish)).unwrap();
        let inits = ring.inits.load(Ordering::SeqCst);
        let history = ring.scenario.history().len();
        let requests = ring.requests.load(Ordering::SeqCst);

        for action in after {
            prop_assert_eq!(ring.scenario.update(&input(action)).unwrap(), Event::idle());
        }

        prop_assert!(ring.scenario.is_finished());
        prop_assert_eq!(ring.inits.load(Ordering::SeqCst), inits);
        prop_assert_eq!(ring.scenario.history().len(), history);
        prop_assert_eq!(ring.requests.load(Ordering::SeqCst), requests);
    }

    #[test]
    fn requests_never_change_state(size in 1usize..6, asks in 1usize..10) {
        let mut ring = ring(size);

        for _ in 0..asks {
            ring.scenario.update(&input(Action::Ask)).unwrap();
        }

        prop_assert_eq!(ring.scenario.active_state_name(), Some("N0"));
        prop_assert_eq!(ring.requests.load(Ordering::SeqCst), asks);
    }

    #[test]
    fn state_names_stay_unique(names in prop::collection::vec("[a-d]{1,2}", 0..30)) {
        let inits = Arc::new(AtomicUsize::new(0));
        let mut scenario = Scenario::<Step>::new();
        let mut seen = HashSet::new();

        for name in names {
            let result = scenario.add_state(Node {
                name: name.clone(),
                inits: Arc::clone(&inits),
            });
            if seen.insert(name.clone()) {
                prop_assert!(result.is_ok());
            } else {
                prop_assert_eq!(result, Err(ScenarioError::DuplicateState { name }));
            }
        }

        prop_assert_eq!(scenario.state_count(), seen.len());
    }
}
