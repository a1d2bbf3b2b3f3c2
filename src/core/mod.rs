//! Core value types of a scenario.
//!
//! - Events returned by states, and the custom tag trait they carry
//! - The `State` trait with its `init`/`update`/`exit` hooks
//! - Timestamped history of activation changes
//!
//! Nothing in this module knows about transition tables or dispatch.

mod event;
mod history;
mod state;

pub use event::{CustomEvent, Event, EventKind, EventType, Params};
pub(crate) use event::tag_label;
pub use history::{StateHistory, StateTransition};
pub use state::State;
