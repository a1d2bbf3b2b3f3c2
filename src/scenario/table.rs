//! Transition table: `(source state, custom tag) -> target state`.

use crate::core::CustomEvent;
use crate::scenario::registry::StateId;
use std::collections::HashMap;

/// Registered edges of one scenario.
///
/// A `None` tag is the untagged edge of a state, used by `Switch` events
/// that carry no tag.
pub(crate) struct TransitionTable<E: CustomEvent> {
    edges: HashMap<(StateId, Option<E>), StateId>,
}

impl<E: CustomEvent> TransitionTable<E> {
    pub(crate) fn new() -> Self {
        Self {
            edges: HashMap::new(),
        }
    }

    /// Register an edge. An existing key is kept and its target returned
    /// as the error.
    pub(crate) fn insert(
        &mut self,
        from: StateId,
        tag: Option<E>,
        to: StateId,
    ) -> Result<(), StateId> {
        let key = (from, tag);
        if let Some(existing) = self.edges.get(&key) {
            return Err(*existing);
        }
        self.edges.insert(key, to);
        Ok(())
    }

    /// Find the target for a `Switch` sent by `from`.
    ///
    /// A tagged switch needs the exact key. An untagged switch takes the
    /// untagged edge, or failing that the only outgoing edge of `from`.
    pub(crate) fn resolve(&self, from: StateId, tag: Option<&E>) -> Option<StateId> {
        if let Some(tag) = tag {
            return self.edges.get(&(from, Some(tag.clone()))).copied();
        }

        if let Some(target) = self.edges.get(&(from, None)) {
            return Some(*target);
        }

        let mut outgoing = self.outgoing(from);
        match (outgoing.next(), outgoing.next()) {
            (Some((_, only)), None) => Some(only),
            _ => None,
        }
    }

    pub(crate) fn outgoing(
        &self,
        from: StateId,
    ) -> impl Iterator<Item = (Option<&E>, StateId)> + '_ {
        self.edges
            .iter()
            .filter(move |((source, _), _)| *source == from)
            .map(|((_, tag), target)| (tag.as_ref(), *target))
    }

    pub(crate) fn targets(&self) -> impl Iterator<Item = (StateId, StateId)> + '_ {
        self.edges.iter().map(|((from, _), to)| (*from, *to))
    }

    pub(crate) fn len(&self) -> usize {
        self.edges.len()
    }
}
