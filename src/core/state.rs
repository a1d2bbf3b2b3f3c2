//! The `State` trait implemented by every unit of scenario behavior.

use super::event::{CustomEvent, Event, Params};

/// A named unit of behavior with lifecycle hooks.
///
/// A state is registered into exactly one scenario, which owns it for its
/// whole lifetime. `init` runs once each time the state becomes active,
/// `update` runs for every input delivered while it is active, and `exit`
/// runs once when it stops being active. Every hook defaults to a no-op
/// returning a `None` event.
///
/// States never touch sibling states or the transition table; everything
/// they want to happen is expressed through the returned [`Event`].
///
/// # Example
///
/// ```rust
/// use scenarist::core::{Event, Params, State};
/// use scenarist::custom_events;
///
/// custom_events! {
///     enum Prompt {
///         Answered,
///     }
/// }
///
/// struct AskName;
///
/// impl State<Prompt> for AskName {
///     fn name(&self) -> &str {
///         "AskName"
///     }
///
///     fn update(&mut self, params: &Params) -> Event<Prompt> {
///         match params.get("name") {
///             Some(name) if !name.is_empty() => {
///                 Event::switch(self.name(), Prompt::Answered, params.clone())
///             }
///             _ => Event::try_again(self.name()),
///         }
///     }
/// }
///
/// let mut state = AskName;
/// assert!(state.init(&Params::new()).is_none());
/// assert_eq!(state.update(&Params::new()), Event::try_again("AskName"));
/// ```
pub trait State<E: CustomEvent>: Send {
    /// Unique name within the owning scenario.
    fn name(&self) -> &str;

    /// Called when the state becomes active.
    fn init(&mut self, _params: &Params) -> Event<E> {
        Event::none(self.name())
    }

    /// Called for every external input while the state is active.
    fn update(&mut self, _params: &Params) -> Event<E> {
        Event::none(self.name())
    }

    /// Called when the state stops being active.
    fn exit(&mut self, _params: &Params) -> Event<E> {
        Event::none(self.name())
    }
}
