//! The scenario engine: state ownership, transition table and dispatch.

use crate::builder::ScenarioBuilder;
use crate::config::{MissingTransitionPolicy, ScenarioConfig};
use crate::core::{
    tag_label, CustomEvent, Event, EventKind, Params, State, StateHistory, StateTransition,
};
use crate::observer::{IdleReason, LifecycleEvent, ScenarioObserver};
use crate::scenario::error::ScenarioError;
use crate::scenario::registry::{ScenarioId, StateId, StateRef, StateRegistry};
use crate::scenario::setup::ScenarioSetup;
use crate::scenario::table::TransitionTable;
use crate::validation::{self, SetupIssue};
use chrono::Utc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::Span;

/// Sink invoked with the payload of every interpreted `Request` event.
pub type Requester = Box<dyn FnMut(&Params) + Send>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Setup,
    Running,
    Finished,
}

/// Orchestrator owning every state and transition of one state machine.
///
/// A scenario goes through three phases:
///
/// 1. **Setup**: register states with [`add_state`](Self::add_state),
///    edges with [`add_transfer`](Self::add_transfer) and designate the
///    start state with [`set_start_state`](Self::set_start_state).
/// 2. **Running**: [`init`](Self::init) activates the start state; each
///    [`update`](Self::update) feeds input to the active state and
///    interprets the event it returns.
/// 3. **Finished**: after a `Finish` event every update is a no-op.
///
/// Dropping a scenario runs `exit` on the state that is still active.
///
/// The scenario is synchronous and holds no locks; callers sharing one
/// across threads must serialize access themselves.
///
/// # Example
///
/// ```rust
/// use scenarist::core::{Event, Params, State};
/// use scenarist::{custom_events, params, Scenario};
///
/// custom_events! {
///     enum Door {
///         Push,
///     }
/// }
///
/// struct Closed;
/// struct Open;
///
/// impl State<Door> for Closed {
///     fn name(&self) -> &str {
///         "Closed"
///     }
///
///     fn update(&mut self, params: &Params) -> Event<Door> {
///         if params.contains_key("push") {
///             Event::switch(self.name(), Door::Push, Params::new())
///         } else {
///             Event::none(self.name())
///         }
///     }
/// }
///
/// impl State<Door> for Open {
///     fn name(&self) -> &str {
///         "Open"
///     }
/// }
///
/// let mut scenario = Scenario::new();
/// let closed = scenario.add_state(Closed).unwrap();
/// let open = scenario.add_state(Open).unwrap();
/// scenario.add_transfer(closed, open, Door::Push).unwrap();
/// scenario.set_start_state(closed).unwrap();
///
/// scenario.init(&Params::new()).unwrap();
/// scenario.update(&params! { "push" => "1" }).unwrap();
///
/// assert_eq!(scenario.active_state_name(), Some("Open"));
/// ```
pub struct Scenario<E: CustomEvent> {
    id: ScenarioId,
    states: StateRegistry<E>,
    table: TransitionTable<E>,
    start: Option<StateId>,
    active: Option<StateId>,
    phase: Phase,
    attempt: usize,
    history: StateHistory,
    requester: Option<Requester>,
    observer: Box<dyn ScenarioObserver>,
    config: ScenarioConfig,
    span: Span,
}

impl<E: CustomEvent> Scenario<E> {
    /// Create a scenario with default configuration, no requester and the
    /// tracing observer.
    pub fn new() -> Self {
        ScenarioBuilder::new().build()
    }

    /// Start a [`ScenarioBuilder`] to supply config, requester or observer.
    pub fn builder() -> ScenarioBuilder<E> {
        ScenarioBuilder::new()
    }

    pub(crate) fn from_parts(
        config: ScenarioConfig,
        requester: Option<Requester>,
        observer: Box<dyn ScenarioObserver>,
    ) -> Self {
        let id = ScenarioId::new();
        Self {
            id,
            states: StateRegistry::new(id),
            table: TransitionTable::new(),
            start: None,
            active: None,
            phase: Phase::Setup,
            attempt: 0,
            history: StateHistory::new(),
            requester,
            observer,
            config,
            span: tracing::debug_span!("scenario", id = %id),
        }
    }

    /// Take ownership of `state` and return its handle.
    ///
    /// A state whose name is already registered is rejected and the
    /// original registration is kept.
    pub fn add_state<S>(&mut self, state: S) -> Result<StateId, ScenarioError>
    where
        S: State<E> + 'static,
    {
        let _entered = self.span.clone().entered();
        let name = state.name().to_string();

        let result = self
            .ensure_setup()
            .and_then(|_| self.states.insert(Box::new(state)));

        match &result {
            Ok(_) => self.emit(LifecycleEvent::StateAdded { state: name }),
            Err(err) => self.emit(LifecycleEvent::StateRejected {
                state: name,
                reason: err.to_string(),
            }),
        }
        result
    }

    /// Register `from --tag--> to`.
    ///
    /// Both ends may be given by handle or by name. Unknown states and an
    /// already registered `(from, tag)` pair are rejected.
    pub fn add_transfer<'a>(
        &mut self,
        from: impl Into<StateRef<'a>>,
        to: impl Into<StateRef<'a>>,
        tag: E,
    ) -> Result<(), ScenarioError> {
        self.register_transfer(from.into(), to.into(), Some(tag))
    }

    /// Register the edge taken by a `Switch` that carries no tag.
    pub fn add_untagged_transfer<'a>(
        &mut self,
        from: impl Into<StateRef<'a>>,
        to: impl Into<StateRef<'a>>,
    ) -> Result<(), ScenarioError> {
        self.register_transfer(from.into(), to.into(), None)
    }

    /// Designate the state activated by [`init`](Self::init).
    ///
    /// This never runs the state's `init` hook itself.
    pub fn set_start_state<'a>(
        &mut self,
        state: impl Into<StateRef<'a>>,
    ) -> Result<StateId, ScenarioError> {
        let _entered = self.span.clone().entered();
        let state = state.into();

        let result = self
            .ensure_setup()
            .and_then(|_| self.states.resolve(state));

        match result {
            Ok(id) => {
                self.start = Some(id);
                let state = self.state_label(id);
                self.emit(LifecycleEvent::StartStateSet { state });
            }
            Err(ref err) => self.emit(LifecycleEvent::StartStateRejected {
                reason: err.to_string(),
            }),
        }
        result
    }

    /// Replace the sink that receives `Request` payloads.
    pub fn set_requester<F>(&mut self, requester: F)
    where
        F: FnMut(&Params) + Send + 'static,
    {
        self.requester = Some(Box::new(requester));
    }

    /// Check the current setup, accumulating every issue found.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<SetupIssue>> {
        validation::validate_setup(&self.states, &self.table, self.start)
    }

    /// Run `setup` then [`init`](Self::init).
    pub fn init_with<S>(&mut self, setup: &mut S, params: &Params) -> Result<Event<E>, ScenarioError>
    where
        S: ScenarioSetup<E> + ?Sized,
    {
        if self.phase != Phase::Setup {
            return Err(ScenarioError::AlreadyInitialized);
        }
        setup.setup(self, params)?;
        self.init(params)
    }

    /// Close setup and activate the start state.
    ///
    /// `params` is handed to the start state's `init`, whose event is routed
    /// like any other and returned. Without a start state the scenario stays
    /// in setup and `Event::idle()` is returned.
    pub fn init(&mut self, params: &Params) -> Result<Event<E>, ScenarioError> {
        let _entered = self.span.clone().entered();
        if self.phase != Phase::Setup {
            return Err(ScenarioError::AlreadyInitialized);
        }

        let issues = validation::issues(self.validate());
        for issue in &issues {
            self.emit(LifecycleEvent::SetupWarning {
                issue: issue.clone(),
            });
        }
        if self.config.strict_setup && !issues.is_empty() {
            return Err(ScenarioError::InvalidSetup { issues });
        }

        let Some(start) = self.start else {
            return Ok(Event::idle());
        };

        self.phase = Phase::Running;
        self.active = Some(start);
        let label = self.state_label(start);
        self.emit(LifecycleEvent::Initialized { start: label });
        self.enter(start, params, 0)
    }

    /// Deliver external input to the active state.
    ///
    /// Returns the event produced by the active state's `update`. Before a
    /// start state is active, and after `Finish`, this is a no-op returning
    /// `Event::idle()`.
    pub fn update(&mut self, params: &Params) -> Result<Event<E>, ScenarioError> {
        let _entered = self.span.clone().entered();

        let active = match (self.phase, self.active) {
            (Phase::Running, Some(active)) => active,
            (Phase::Finished, _) => return Ok(self.idle(IdleReason::Finished)),
            _ => return Ok(self.idle(IdleReason::NotStarted)),
        };

        let event = match self.states.get_mut(active).map(|state| state.update(params)) {
            Some(event) => event,
            None => return Ok(self.idle(IdleReason::NotStarted)),
        };
        self.interpret(&event, 0)?;
        Ok(event)
    }

    /// Identity shared by every handle this scenario issues.
    pub fn id(&self) -> ScenarioId {
        self.id
    }

    /// Handle of the state receiving `update`, if any.
    pub fn active_state(&self) -> Option<StateId> {
        self.active
    }

    /// Name of the state receiving `update`, if any.
    pub fn active_state_name(&self) -> Option<&str> {
        self.active.and_then(|id| self.states.name(id))
    }

    /// Handle of the designated start state, if any.
    pub fn start_state(&self) -> Option<StateId> {
        self.start
    }

    /// Name of a registered state; `None` for handles from elsewhere.
    pub fn state_name(&self, id: StateId) -> Option<&str> {
        self.states.name(id)
    }

    /// Look up a registered state by name.
    pub fn find_state(&self, name: &str) -> Option<StateId> {
        self.states.find(name)
    }

    /// Number of registered states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of registered transfers, tagged and untagged.
    pub fn transfer_count(&self) -> usize {
        self.table.len()
    }

    /// True between a successful `init` and `Finish`.
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// True once a state returned `Finish`.
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Transitions taken so far, bounded by `ScenarioConfig::max_history`.
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Configuration this scenario was built with.
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    fn interpret(&mut self, event: &Event<E>, depth: usize) -> Result<(), ScenarioError> {
        self.emit(LifecycleEvent::EventInterpreted {
            sender: event.sender().map(str::to_string),
            kind: event.event_type(),
            tag: event.tag().map(|tag| tag.name().to_string()),
        });

        let Some(active) = self.active else {
            return Ok(());
        };

        if let Some(sender) = event.sender() {
            let active_name = self.state_label(active);
            if sender != active_name {
                self.emit(LifecycleEvent::SenderMismatch {
                    active: active_name,
                    sender: sender.to_string(),
                });
                return Ok(());
            }
        }

        match event.kind() {
            EventKind::None => Ok(()),
            EventKind::Request { payload } => {
                self.forward(event.sender(), payload);
                Ok(())
            }
            EventKind::Switch { tag, payload } => self.switch(active, tag.as_ref(), payload, depth),
            EventKind::TryAgain => self.restart(active, depth),
            EventKind::Finish => {
                self.finish(active);
                Ok(())
            }
        }
    }

    fn switch(
        &mut self,
        from: StateId,
        tag: Option<&E>,
        payload: &Params,
        depth: usize,
    ) -> Result<(), ScenarioError> {
        let tag_name = tag.map(|tag| tag.name().to_string());

        let Some(to) = self.table.resolve(from, tag) else {
            let from_name = self.state_label(from);
            self.emit(LifecycleEvent::NoTransition {
                from: from_name.clone(),
                tag: tag_name,
            });
            return match self.config.missing_transition {
                MissingTransitionPolicy::Ignore => Ok(()),
                MissingTransitionPolicy::Error => Err(ScenarioError::NoTransition {
                    from: from_name,
                    tag: tag_label(tag),
                }),
            };
        };

        self.ensure_depth(from, depth + 1)?;
        self.leave(from);

        let (from_name, to_name) = (self.state_label(from), self.state_label(to));
        self.history.push(
            StateTransition {
                from: from_name.clone(),
                to: to_name.clone(),
                tag: tag_name.clone(),
                timestamp: Utc::now(),
                attempt: self.attempt,
            },
            self.config.max_history,
        );
        self.attempt = 0;
        self.active = Some(to);
        self.emit(LifecycleEvent::Transitioned {
            from: from_name,
            to: to_name,
            tag: tag_name,
        });

        self.enter(to, payload, depth + 1).map(|_| ())
    }

    fn restart(&mut self, id: StateId, depth: usize) -> Result<(), ScenarioError> {
        self.ensure_depth(id, depth + 1)?;
        self.leave(id);
        self.attempt += 1;
        let state = self.state_label(id);
        self.emit(LifecycleEvent::Restarted {
            state,
            attempt: self.attempt,
        });
        self.enter(id, &Params::new(), depth + 1).map(|_| ())
    }

    fn finish(&mut self, id: StateId) {
        self.phase = Phase::Finished;
        self.leave(id);
        self.active = None;
        let state = self.state_label(id);
        self.emit(LifecycleEvent::Finished { state });
    }

    /// Refuse an activation at `depth` while `current` is still active.
    fn ensure_depth(&mut self, current: StateId, depth: usize) -> Result<(), ScenarioError> {
        let limit = self.config.max_chain_depth;
        if depth <= limit {
            return Ok(());
        }
        let state = self.state_label(current);
        self.emit(LifecycleEvent::ChainDepthExceeded {
            state: state.clone(),
            limit,
        });
        Err(ScenarioError::ChainDepthExceeded { state, limit })
    }

    /// Run `init` on the (already active) state `id` and route its event.
    fn enter(&mut self, id: StateId, params: &Params, depth: usize) -> Result<Event<E>, ScenarioError> {
        let label = self.state_label(id);
        self.emit(LifecycleEvent::StateEntered { state: label });
        let Some(state) = self.states.get_mut(id) else {
            return Ok(Event::idle());
        };
        let event = state.init(params);
        self.interpret(&event, depth)?;
        Ok(event)
    }

    /// Run `exit` on `id` and settle what it returns without changing state.
    fn leave(&mut self, id: StateId) {
        let Some(state) = self.states.get_mut(id) else {
            return;
        };
        let event = state.exit(&Params::new());
        let label = self.state_label(id);
        self.emit(LifecycleEvent::StateExited {
            state: label.clone(),
        });

        match event.kind() {
            EventKind::None => {}
            EventKind::Request { payload } => self.forward(event.sender(), payload),
            _ => self.emit(LifecycleEvent::IgnoredExitEvent {
                state: label,
                kind: event.event_type(),
            }),
        }
    }

    fn forward(&mut self, sender: Option<&str>, payload: &Params) {
        let delivered = match self.requester.as_mut() {
            Some(requester) => {
                requester(payload);
                true
            }
            None => false,
        };
        self.emit(LifecycleEvent::RequestForwarded {
            sender: sender.map(str::to_string),
            delivered,
        });
    }

    fn register_transfer(
        &mut self,
        from: StateRef<'_>,
        to: StateRef<'_>,
        tag: Option<E>,
    ) -> Result<(), ScenarioError> {
        let _entered = self.span.clone().entered();

        match self.try_register_transfer(from, to, tag) {
            Ok(added) => {
                self.emit(added);
                Ok(())
            }
            Err(err) => {
                self.emit(LifecycleEvent::TransferRejected {
                    reason: err.to_string(),
                });
                Err(err)
            }
        }
    }

    fn try_register_transfer(
        &mut self,
        from: StateRef<'_>,
        to: StateRef<'_>,
        tag: Option<E>,
    ) -> Result<LifecycleEvent, ScenarioError> {
        self.ensure_setup()?;
        let from = self.states.resolve(from)?;
        let to = self.states.resolve(to)?;

        let tag_name = tag.as_ref().map(|tag| tag.name().to_string());
        let label = tag_label(tag.as_ref());
        if let Err(existing) = self.table.insert(from, tag, to) {
            return Err(ScenarioError::DuplicateTransfer {
                from: self.state_label(from),
                tag: label,
                existing: self.state_label(existing),
            });
        }

        Ok(LifecycleEvent::TransferAdded {
            from: self.state_label(from),
            to: self.state_label(to),
            tag: tag_name,
        })
    }

    fn ensure_setup(&self) -> Result<(), ScenarioError> {
        match self.phase {
            Phase::Setup => Ok(()),
            Phase::Running | Phase::Finished => Err(ScenarioError::SetupClosed),
        }
    }

    fn idle(&mut self, reason: IdleReason) -> Event<E> {
        self.emit(LifecycleEvent::UpdateIgnored { reason });
        Event::idle()
    }

    fn state_label(&self, id: StateId) -> String {
        self.states.name(id).unwrap_or_default().to_string()
    }

    fn emit(&mut self, event: LifecycleEvent) {
        self.observer.observe(&event);
    }
}

impl<E: CustomEvent> Default for Scenario<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CustomEvent> Drop for Scenario<E> {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            let _entered = self.span.clone().entered();
            self.leave(active);
            let state = self.state_label(active);
            self.emit(LifecycleEvent::TornDown { state });
        }
    }
}
