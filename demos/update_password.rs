//! Password Update Scenario
//!
//! This example walks a four-state scenario through a password change.
//!
//! Key concepts:
//! - States that validate their own input
//! - Switch payloads handed to the next state's `init`
//! - Requests routed to the application
//! - Lifecycle diagnostics through `tracing`
//!
//! Run with: RUST_LOG=debug cargo run --example update_password

use scenarist::core::{Event, Params, State};
use scenarist::{custom_events, params, Scenario, ScenarioError, ScenarioSetup};
use tracing_subscriber::EnvFilter;

custom_events! {
    enum PasswordEvent {
        GotPassword,
        PasswordIsCorrect,
        PasswordIsIncorrect,
        PasswordIsEmpty,
    }
}

const CURRENT_PASSWORD: &str = "123";

fn password(params: &Params) -> Option<&str> {
    params
        .get("password")
        .map(String::as_str)
        .filter(|password| !password.is_empty())
}

struct RequestOldPassword;

impl State<PasswordEvent> for RequestOldPassword {
    fn name(&self) -> &str {
        "RequestOldPassword"
    }

    fn update(&mut self, params: &Params) -> Event<PasswordEvent> {
        match password(params) {
            Some(_) => Event::switch(self.name(), PasswordEvent::GotPassword, params.clone()),
            None => Event::request(self.name(), params! { "prompt" => "current password" }),
        }
    }
}

struct CheckPassword;

impl State<PasswordEvent> for CheckPassword {
    fn name(&self) -> &str {
        "CheckPassword"
    }

    fn init(&mut self, params: &Params) -> Event<PasswordEvent> {
        let tag = if password(params) == Some(CURRENT_PASSWORD) {
            PasswordEvent::PasswordIsCorrect
        } else {
            PasswordEvent::PasswordIsIncorrect
        };
        Event::switch(self.name(), tag, Params::new())
    }
}

struct RequestNewPassword;

impl State<PasswordEvent> for RequestNewPassword {
    fn name(&self) -> &str {
        "RequestNewPassword"
    }

    fn init(&mut self, _params: &Params) -> Event<PasswordEvent> {
        Event::request(self.name(), params! { "prompt" => "new password" })
    }

    fn update(&mut self, params: &Params) -> Event<PasswordEvent> {
        match password(params) {
            Some(_) => Event::switch(self.name(), PasswordEvent::GotPassword, params.clone()),
            None => Event::try_again(self.name()),
        }
    }
}

struct SavePassword;

impl State<PasswordEvent> for SavePassword {
    fn name(&self) -> &str {
        "SavePassword"
    }

    fn init(&mut self, params: &Params) -> Event<PasswordEvent> {
        match password(params) {
            Some(new_password) => {
                println!("  [store] password set to {:?}", new_password);
                Event::finish(self.name())
            }
            None => Event::switch(self.name(), PasswordEvent::PasswordIsEmpty, Params::new()),
        }
    }
}

struct UpdatePassword;

impl ScenarioSetup<PasswordEvent> for UpdatePassword {
    fn setup(
        &mut self,
        scenario: &mut Scenario<PasswordEvent>,
        _params: &Params,
    ) -> Result<(), ScenarioError> {
        let check = scenario.add_state(CheckPassword)?;
        let request_new = scenario.add_state(RequestNewPassword)?;
        let request_old = scenario.add_state(RequestOldPassword)?;
        let save = scenario.add_state(SavePassword)?;

        scenario.add_transfer(request_old, check, PasswordEvent::GotPassword)?;
        scenario.add_transfer(check, request_old, PasswordEvent::PasswordIsIncorrect)?;
        scenario.add_transfer(check, request_new, PasswordEvent::PasswordIsCorrect)?;
        scenario.add_transfer(request_new, save, PasswordEvent::GotPassword)?;
        scenario.add_transfer(save, request_new, PasswordEvent::PasswordIsEmpty)?;

        scenario.set_start_state(request_old)?;
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    println!("=== Password Update Scenario ===\n");

    let mut scenario = Scenario::builder()
        .requester(|request: &Params| {
            if let Some(prompt) = request.get("prompt") {
                println!("  [app] please enter the {}", prompt);
            }
        })
        .build();
    scenario.init_with(&mut UpdatePassword, &Params::new())?;

    let inputs = vec![
        Params::new(),
        params! { "password" => "456" },
        Params::new(),
        params! { "password" => "123" },
        Params::new(),
        params! { "password" => "s3cret" },
        params! { "password" => "ignored" },
    ];

    for input in inputs {
        println!("input: {:?}", input);
        let event = scenario.update(&input)?;
        println!(
            "  -> {} (active: {})\n",
            event.event_type(),
            scenario.active_state_name().unwrap_or("none")
        );
    }

    println!("Visited: {}", scenario.history().get_path().join(" -> "));
    println!("Finished: {}", scenario.is_finished());

    println!("\n=== Example Complete ===");
    Ok(())
}
