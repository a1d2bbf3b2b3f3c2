//! Structured diagnostics emitted by a scenario.
//!
//! The engine never prints. It reports every registration, rejection and
//! interpreted event as a [`LifecycleEvent`] to its [`ScenarioObserver`].
//! [`TracingObserver`] (the default) turns them into `tracing` events;
//! [`Recorder`] keeps them in memory.
//!
//! # Example
//!
//! ```rust
//! use scenarist::core::State;
//! use scenarist::observer::{LifecycleEvent, Recorder};
//! use scenarist::{custom_events, Scenario};
//!
//! custom_events! {
//!     enum Flow {
//!         Next,
//!     }
//! }
//!
//! struct Idle;
//!
//! impl State<Flow> for Idle {
//!     fn name(&self) -> &str {
//!         "Idle"
//!     }
//! }
//!
//! let recorder = Recorder::new();
//! let mut scenario = Scenario::<Flow>::builder()
//!     .observer(recorder.clone())
//!     .build();
//! scenario.add_state(Idle).unwrap();
//!
//! assert_eq!(
//!     recorder.events(),
//!     vec![LifecycleEvent::StateAdded { state: "Idle".to_string() }]
//! );
//! ```

mod log;

pub use log::TracingObserver;

use crate::core::EventType;
use crate::validation::SetupIssue;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

/// Why an `update` call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleReason {
    /// `init` has not activated a start state yet
    NotStarted,
    /// A state returned `Finish`
    Finished,
}

/// One diagnostic step of a scenario's life.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    StateAdded {
        state: String,
    },
    StateRejected {
        state: String,
        reason: String,
    },
    TransferAdded {
        from: String,
        to: String,
        tag: Option<String>,
    },
    TransferRejected {
        reason: String,
    },
    StartStateSet {
        state: String,
    },
    StartStateRejected {
        reason: String,
    },
    SetupWarning {
        issue: SetupIssue,
    },
    Initialized {
        start: String,
    },
    StateEntered {
        state: String,
    },
    StateExited {
        state: String,
    },
    EventInterpreted {
        sender: Option<String>,
        kind: EventType,
        tag: Option<String>,
    },
    Transitioned {
        from: String,
        to: String,
        tag: Option<String>,
    },
    NoTransition {
        from: String,
        tag: Option<String>,
    },
    Restarted {
        state: String,
        attempt: usize,
    },
    RequestForwarded {
        sender: Option<String>,
        delivered: bool,
    },
    IgnoredExitEvent {
        state: String,
        kind: EventType,
    },
    SenderMismatch {
        active: String,
        sender: String,
    },
    ChainDepthExceeded {
        state: String,
        limit: usize,
    },
    UpdateIgnored {
        reason: IdleReason,
    },
    Finished {
        state: String,
    },
    TornDown {
        state: String,
    },
}

/// Sink for a scenario's lifecycle diagnostics.
pub trait ScenarioObserver: Send {
    fn observe(&mut self, event: &LifecycleEvent);
}

impl<F> ScenarioObserver for F
where
    F: FnMut(&LifecycleEvent) + Send,
{
    fn observe(&mut self, event: &LifecycleEvent) {
        self(event)
    }
}

/// Observer that keeps every event in memory.
///
/// Clones share the same buffer, so one clone can be handed to a scenario
/// while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<LifecycleEvent>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl ScenarioObserver for Recorder {
    fn observe(&mut self, event: &LifecycleEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
