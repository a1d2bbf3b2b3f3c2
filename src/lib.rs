//! Scenarist: a finite-state scenario engine
//!
//! A scenario is a set of named states, a table of allowed transitions keyed
//! by `(current state, custom event)`, and a driver that feeds external input
//! into the active state and acts on the event it returns.
//!
//! # Core Concepts
//!
//! - **State**: a named unit of behavior with `init`/`update`/`exit` hooks
//! - **Event**: what a state asks for: nothing, a request to the outside
//!   world, a switch to another state, a restart, or the end of the scenario
//! - **Transition table**: `(state, custom tag) -> state`, fixed after setup
//! - **Scenario**: owns all of the above and runs the lifecycle protocol
//!
//! The engine is synchronous and single-scenario: there are no background
//! tasks and nothing is persisted.
//!
//! # Example
//!
//! ```rust
//! use scenarist::core::{Event, Params, State};
//! use scenarist::{custom_events, params, Scenario};
//!
//! custom_events! {
//!     enum Login {
//!         GotPassword,
//!     }
//! }
//!
//! struct AskPassword;
//! struct Welcome;
//!
//! impl State<Login> for AskPassword {
//!     fn name(&self) -> &str {
//!         "AskPassword"
//!     }
//!
//!     fn update(&mut self, params: &Params) -> Event<Login> {
//!         match params.get("password") {
//!             Some(password) if !password.is_empty() => {
//!                 Event::switch(self.name(), Login::GotPassword, params.clone())
//!             }
//!             _ => Event::request(self.name(), params! { "prompt" => "password" }),
//!         }
//!     }
//! }
//!
//! impl State<Login> for Welcome {
//!     fn name(&self) -> &str {
//!         "Welcome"
//!     }
//!
//!     fn init(&mut self, _params: &Params) -> Event<Login> {
//!         Event::finish(self.name())
//!     }
//! }
//!
//! let mut scenario = Scenario::<Login>::builder()
//!     .requester(|request: &Params| println!("asking for {:?}", request))
//!     .build();
//!
//! let ask = scenario.add_state(AskPassword).unwrap();
//! let welcome = scenario.add_state(Welcome).unwrap();
//! scenario.add_transfer(ask, welcome, Login::GotPassword).unwrap();
//! scenario.set_start_state(ask).unwrap();
//!
//! scenario.init(&Params::new()).unwrap();
//! scenario.update(&Params::new()).unwrap();
//! scenario.update(&params! { "password" => "123" }).unwrap();
//!
//! assert!(scenario.is_finished());
//! assert_eq!(scenario.history().get_path(), vec!["AskPassword", "Welcome"]);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod observer;
pub mod scenario;
pub mod validation;

// Re-export commonly used types
pub use builder::ScenarioBuilder;
pub use config::{MissingTransitionPolicy, ScenarioConfig};
pub use core::{CustomEvent, Event, EventKind, EventType, Params, State};
pub use scenario::{Scenario, ScenarioError, ScenarioId, ScenarioSetup, StateId, StateRef};
