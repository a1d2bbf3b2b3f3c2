//! Arena of states owned by a scenario.

use crate::core::{CustomEvent, State};
use crate::scenario::error::ScenarioError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Identity of one scenario instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioId(Uuid);

impl ScenarioId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-owning handle to a registered state.
///
/// Handles are only valid in the scenario that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateId {
    scenario: ScenarioId,
    index: usize,
}

impl StateId {
    pub fn scenario(&self) -> ScenarioId {
        self.scenario
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// A state given either by handle or by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateRef<'a> {
    Id(StateId),
    Name(&'a str),
}

impl From<StateId> for StateRef<'_> {
    fn from(id: StateId) -> Self {
        StateRef::Id(id)
    }
}

impl<'a> From<&'a str> for StateRef<'a> {
    fn from(name: &'a str) -> Self {
        StateRef::Name(name)
    }
}

impl<'a> From<&'a String> for StateRef<'a> {
    fn from(name: &'a String) -> Self {
        StateRef::Name(name.as_str())
    }
}

struct Slot<E: CustomEvent> {
    name: String,
    state: Box<dyn State<E>>,
}

/// Owns every registered state; names are unique.
pub(crate) struct StateRegistry<E: CustomEvent> {
    scenario: ScenarioId,
    slots: Vec<Slot<E>>,
    by_name: HashMap<String, StateId>,
}

impl<E: CustomEvent> StateRegistry<E> {
    pub(crate) fn new(scenario: ScenarioId) -> Self {
        Self {
            scenario,
            slots: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Take ownership of `state`, rejecting a name already in use.
    pub(crate) fn insert(&mut self, state: Box<dyn State<E>>) -> Result<StateId, ScenarioError> {
        let name = state.name().to_string();
        if self.by_name.contains_key(&name) {
            return Err(ScenarioError::DuplicateState { name });
        }

        let id = StateId {
            scenario: self.scenario,
            index: self.slots.len(),
        };
        self.by_name.insert(name.clone(), id);
        self.slots.push(Slot { name, state });
        Ok(id)
    }

    pub(crate) fn contains(&self, id: StateId) -> bool {
        id.scenario == self.scenario && id.index < self.slots.len()
    }

    /// Resolve a handle or name to a handle registered here.
    pub(crate) fn resolve(&self, state: StateRef<'_>) -> Result<StateId, ScenarioError> {
        match state {
            StateRef::Id(id) if self.contains(id) => Ok(id),
            StateRef::Id(id) => Err(ScenarioError::UnknownStateHandle { index: id.index }),
            StateRef::Name(name) => self.find(name).ok_or_else(|| ScenarioError::UnknownState {
                name: name.to_string(),
            }),
        }
    }

    pub(crate) fn find(&self, name: &str) -> Option<StateId> {
        self.by_name.get(name).copied()
    }

    /// Name recorded at registration time.
    pub(crate) fn name(&self, id: StateId) -> Option<&str> {
        self.slot(id).map(|slot| slot.name.as_str())
    }

    pub(crate) fn get_mut(&mut self, id: StateId) -> Option<&mut (dyn State<E> + 'static)> {
        if id.scenario != self.scenario {
            return None;
        }
        self.slots.get_mut(id.index).map(|slot| slot.state.as_mut())
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.slots.len()).map(move |index| StateId {
            scenario: self.scenario,
            index,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, id: StateId) -> Option<&Slot<E>> {
        if id.scenario != self.scenario {
            return None;
        }
        self.slots.get(id.index)
    }
}
