//! Events returned by states after every lifecycle call.
//!
//! An event is the only channel through which a state influences its
//! scenario. The engine-level outcome is fixed by [`EventKind`]; the
//! scenario-specific part is the optional custom tag carried by `Switch`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

/// External input and event payload: an unordered string-to-string mapping.
pub type Params = HashMap<String, String>;

/// Scenario-specific discriminator used on `Switch` events.
///
/// Usually implemented through the [`custom_events!`](crate::custom_events)
/// macro rather than by hand.
///
/// # Example
///
/// ```rust
/// use scenarist::core::CustomEvent;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum DoorEvent {
///     Opened,
///     Closed,
/// }
///
/// impl CustomEvent for DoorEvent {
///     fn name(&self) -> &str {
///         match self {
///             Self::Opened => "Opened",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(DoorEvent::Opened.name(), "Opened");
/// ```
pub trait CustomEvent:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Name used in diagnostics and error messages.
    fn name(&self) -> &str;
}

/// Engine-level outcome of a lifecycle call, without its data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    None,
    Request,
    Switch,
    TryAgain,
    Finish,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Request => "request",
            Self::Switch => "switch",
            Self::TryAgain => "try_again",
            Self::Finish => "finish",
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a state asks the scenario to do.
///
/// Only `Switch` carries a custom tag, so a tag on any other kind is
/// unrepresentable.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "", tag = "kind", rename_all = "snake_case")]
pub enum EventKind<E: CustomEvent> {
    /// Nothing happened.
    None,

    /// Emit `payload` to the requester without changing the active state.
    Request { payload: Params },

    /// Leave the current state. `tag` selects the transition; `None` means
    /// the sender's untagged (or only) outgoing edge.
    Switch { tag: Option<E>, payload: Params },

    /// Restart the active state in place.
    TryAgain,

    /// Terminate the scenario.
    Finish,
}

/// Immutable outcome handed back to the scenario by a state.
///
/// Two events are equal when their kind, tag and sender match. The payload
/// only carries data and takes no part in equality.
///
/// # Example
///
/// ```rust
/// use scenarist::core::{Event, EventType, Params};
/// use scenarist::custom_events;
///
/// custom_events! {
///     enum Login {
///         GotPassword,
///     }
/// }
///
/// let mut payload = Params::new();
/// payload.insert("password".to_string(), "123".to_string());
///
/// let event = Event::switch("AskPassword", Login::GotPassword, payload);
/// assert_eq!(event.event_type(), EventType::Switch);
/// assert_eq!(event.tag(), Some(&Login::GotPassword));
/// assert_eq!(event, Event::switch("AskPassword", Login::GotPassword, Params::new()));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Event<E: CustomEvent> {
    sender: Option<String>,
    kind: EventKind<E>,
}

impl<E: CustomEvent> Event<E> {
    fn from_parts(sender: Option<String>, kind: EventKind<E>) -> Self {
        Self { sender, kind }
    }

    /// Nothing happened.
    pub fn none(sender: impl Into<String>) -> Self {
        Self::from_parts(Some(sender.into()), EventKind::None)
    }

    /// `None` produced by the engine itself, with no sending state.
    pub fn idle() -> Self {
        Self::from_parts(None, EventKind::None)
    }

    /// Push `payload` outward through the scenario's requester.
    pub fn request(sender: impl Into<String>, payload: Params) -> Self {
        Self::from_parts(Some(sender.into()), EventKind::Request { payload })
    }

    /// Leave the current state through the edge registered for `tag`.
    pub fn switch(sender: impl Into<String>, tag: E, payload: Params) -> Self {
        Self::from_parts(
            Some(sender.into()),
            EventKind::Switch {
                tag: Some(tag),
                payload,
            },
        )
    }

    /// Leave the current state without naming a condition.
    pub fn switch_untagged(sender: impl Into<String>, payload: Params) -> Self {
        Self::from_parts(
            Some(sender.into()),
            EventKind::Switch { tag: None, payload },
        )
    }

    /// Re-run `exit` then `init` on the active state.
    pub fn try_again(sender: impl Into<String>) -> Self {
        Self::from_parts(Some(sender.into()), EventKind::TryAgain)
    }

    /// Terminate the scenario.
    pub fn finish(sender: impl Into<String>) -> Self {
        Self::from_parts(Some(sender.into()), EventKind::Finish)
    }

    /// Name of the state that produced the event.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    pub fn kind(&self) -> &EventKind<E> {
        &self.kind
    }

    pub fn event_type(&self) -> EventType {
        match &self.kind {
            EventKind::None => EventType::None,
            EventKind::Request { .. } => EventType::Request,
            EventKind::Switch { .. } => EventType::Switch,
            EventKind::TryAgain => EventType::TryAgain,
            EventKind::Finish => EventType::Finish,
        }
    }

    /// Custom tag, present only on tagged `Switch` events.
    pub fn tag(&self) -> Option<&E> {
        match &self.kind {
            EventKind::Switch { tag, .. } => tag.as_ref(),
            _ => None,
        }
    }

    /// Data carried by `Request` and `Switch` events.
    pub fn payload(&self) -> Option<&Params> {
        match &self.kind {
            EventKind::Request { payload } | EventKind::Switch { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self.kind, EventKind::None)
    }

    pub fn into_kind(self) -> EventKind<E> {
        self.kind
    }
}

impl<E: CustomEvent> PartialEq for Event<E> {
    fn eq(&self, other: &Self) -> bool {
        self.event_type() == other.event_type()
            && self.tag() == other.tag()
            && self.sender == other.sender
    }
}

impl<E: CustomEvent> Eq for Event<E> {}

/// Diagnostic label for an optional tag.
pub(crate) fn tag_label<E: CustomEvent>(tag: Option<&E>) -> String {
    match tag {
        Some(tag) => tag.name().to_string(),
        None => "<untagged>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Accepted,
        Rejected,
    }

    impl CustomEvent for TestEvent {
        fn name(&self) -> &str {
            match self {
                Self::Accepted => "Accepted",
                Self::Rejected => "Rejected",
            }
        }
    }

    fn payload(key: &str, value: &str) -> Params {
        let mut params = Params::new();
        params.insert(key.to_string(), value.to_string());
        params
    }

    #[test]
    fn constructors_pin_event_type() {
        assert_eq!(Event::<TestEvent>::none("A").event_type(), EventType::None);
        assert_eq!(
            Event::<TestEvent>::request("A", Params::new()).event_type(),
            EventType::Request
        );
        assert_eq!(
            Event::switch("A", TestEvent::Accepted, Params::new()).event_type(),
            EventType::Switch
        );
        assert_eq!(
            Event::<TestEvent>::try_again("A").event_type(),
            EventType::TryAgain
        );
        assert_eq!(Event::<TestEvent>::finish("A").event_type(), EventType::Finish);
    }

    #[test]
    fn only_tagged_switch_carries_a_tag() {
        let tagged = Event::switch("A", TestEvent::Rejected, Params::new());
        assert_eq!(tagged.tag(), Some(&TestEvent::Rejected));

        let untagged = Event::<TestEvent>::switch_untagged("A", Params::new());
        assert_eq!(untagged.event_type(), EventType::Switch);
        assert!(untagged.tag().is_none());

        assert!(Event::<TestEvent>::request("A", Params::new()).tag().is_none());
        assert!(Event::<TestEvent>::finish("A").tag().is_none());
    }

    #[test]
    fn equality_ignores_payload() {
        let first = Event::<TestEvent>::request("A", payload("k", "1"));
        let second = Event::<TestEvent>::request("A", payload("k", "2"));
        assert_eq!(first, second);
    }

    #[test]
    fn equality_compares_kind_tag_and_sender() {
        let base = Event::switch("A", TestEvent::Accepted, Params::new());

        assert_ne!(base, Event::switch("B", TestEvent::Accepted, Params::new()));
        assert_ne!(base, Event::switch("A", TestEvent::Rejected, Params::new()));
        assert_ne!(base, Event::switch_untagged("A", Params::new()));
        assert_ne!(base, Event::request("A", Params::new()));
    }

    #[test]
    fn idle_has_no_sender() {
        let event = Event::<TestEvent>::idle();
        assert!(event.is_none());
        assert!(event.sender().is_none());
        assert_ne!(event, Event::none("A"));
    }

    #[test]
    fn payload_is_exposed_for_request_and_switch() {
        let request = Event::<TestEvent>::request("A", payload("password", "123"));
        assert_eq!(
            request.payload().and_then(|p| p.get("password")).map(String::as_str),
            Some("123")
        );

        let switch = Event::switch("A", TestEvent::Accepted, payload("x", "y"));
        assert_eq!(switch.payload().map(|p| p.len()), Some(1));

        assert!(Event::<TestEvent>::try_again("A").payload().is_none());
    }

    #[test]
    fn event_serializes_with_kind_tag() {
        let event = Event::switch("A", TestEvent::Accepted, payload("k", "v"));
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["sender"], "A");
        assert_eq!(json["kind"]["kind"], "switch");
        assert_eq!(json["kind"]["tag"], "Accepted");

        let back: Event<TestEvent> = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
        assert_eq!(back.payload(), event.payload());
    }

    #[test]
    fn tag_label_names_untagged_switches() {
        assert_eq!(tag_label(Some(&TestEvent::Rejected)), "Rejected");
        assert_eq!(tag_label::<TestEvent>(None), "<untagged>");
    }
}
