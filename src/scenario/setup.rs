//! Application-supplied setup run by `Scenario::init_with`.

use crate::core::{CustomEvent, Params};
use crate::scenario::engine::Scenario;
use crate::scenario::error::ScenarioError;

/// The body of a scenario's `init`: registers states and transfers and
/// designates the start state.
///
/// Implemented for closures of the right shape, so small scenarios can be
/// set up inline.
///
/// # Example
///
/// ```rust
/// use scenarist::core::{Params, State};
/// use scenarist::{custom_events, Scenario, ScenarioError, ScenarioSetup};
///
/// custom_events! {
///     enum Flow {
///         Next,
///     }
/// }
///
/// struct Step(&'static str);
///
/// impl State<Flow> for Step {
///     fn name(&self) -> &str {
///         self.0
///     }
/// }
///
/// struct TwoSteps;
///
/// impl ScenarioSetup<Flow> for TwoSteps {
///     fn setup(&mut self, scenario: &mut Scenario<Flow>, _params: &Params) -> Result<(), ScenarioError> {
///         let first = scenario.add_state(Step("First"))?;
///         let second = scenario.add_state(Step("Second"))?;
///         scenario.add_transfer(first, second, Flow::Next)?;
///         scenario.set_start_state(first)?;
///         Ok(())
///     }
/// }
///
/// let mut scenario = Scenario::<Flow>::new();
/// scenario.init_with(&mut TwoSteps, &Params::new()).unwrap();
/// assert_eq!(scenario.active_state_name(), Some("First"));
/// ```
pub trait ScenarioSetup<E: CustomEvent> {
    fn setup(&mut self, scenario: &mut Scenario<E>, params: &Params) -> Result<(), ScenarioError>;
}

impl<E, F> ScenarioSetup<E> for F
where
    E: CustomEvent,
    F: FnMut(&mut Scenario<E>, &Params) -> Result<(), ScenarioError>,
{
    fn setup(&mut self, scenario: &mut Scenario<E>, params: &Params) -> Result<(), ScenarioError> {
        self(scenario, params)
    }
}
