//! Builder for constructing scenarios.

use crate::config::ScenarioConfig;
use crate::core::{CustomEvent, Params};
use crate::observer::{ScenarioObserver, TracingObserver};
use crate::scenario::{Requester, Scenario};
use std::marker::PhantomData;

/// Builder for a [`Scenario`]'s collaborators and configuration.
///
/// Every field is optional: the defaults are [`ScenarioConfig::default`],
/// no requester (request payloads are reported and dropped) and
/// [`TracingObserver`].
pub struct ScenarioBuilder<E: CustomEvent> {
    config: ScenarioConfig,
    requester: Option<Requester>,
    observer: Option<Box<dyn ScenarioObserver>>,
    _phantom: PhantomData<E>,
}

impl<E: CustomEvent> ScenarioBuilder<E> {
    pub fn new() -> Self {
        Self {
            config: ScenarioConfig::default(),
            requester: None,
            observer: None,
            _phantom: PhantomData,
        }
    }

    pub fn config(mut self, config: ScenarioConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the sink that receives every `Request` payload.
    pub fn requester<F>(mut self, requester: F) -> Self
    where
        F: FnMut(&Params) + Send + 'static,
    {
        self.requester = Some(Box::new(requester));
        self
    }

    /// Replace the default tracing observer.
    pub fn observer<O>(mut self, observer: O) -> Self
    where
        O: ScenarioObserver + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn build(self) -> Scenario<E> {
        let observer: Box<dyn ScenarioObserver> = match self.observer {
            Some(observer) => observer,
            None => Box::new(TracingObserver),
        };
        Scenario::from_parts(self.config, self.requester, observer)
    }
}

impl<E: CustomEvent> Default for ScenarioBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingTransitionPolicy;
    use crate::core::{Event, State};
    use crate::observer::{LifecycleEvent, Recorder};
    use serde::{Deserialize, Serialize};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Ping,
    }

    impl CustomEvent for TestEvent {
        fn name(&self) -> &str {
            "Ping"
        }
    }

    struct Pinger;

    impl State<TestEvent> for Pinger {
        fn name(&self) -> &str {
            "Pinger"
        }

        fn init(&mut self, _params: &Params) -> Event<TestEvent> {
            let mut payload = Params::new();
            payload.insert("ping".to_string(), "1".to_string());
            Event::request(self.name(), payload)
        }
    }

    #[test]
    fn defaults_build_an_empty_scenario() {
        let scenario = ScenarioBuilder::<TestEvent>::new().build();

        assert_eq!(scenario.state_count(), 0);
        assert_eq!(scenario.config(), &ScenarioConfig::default());
        assert!(!scenario.is_running());
    }

    #[test]
    fn config_is_applied() {
        let scenario = ScenarioBuilder::<TestEvent>::new()
            .config(
                ScenarioConfig::default()
                    .with_missing_transition(MissingTransitionPolicy::Error),
            )
            .build();

        assert_eq!(
            scenario.config().missing_transition,
            MissingTransitionPolicy::Error
        );
    }

    #[test]
    fn requester_and_observer_are_wired() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let recorder = Recorder::new();

        let mut scenario = ScenarioBuilder::<TestEvent>::new()
            .requester(move |params: &Params| sink.lock().unwrap().push(params.clone()))
            .observer(recorder.clone())
            .build();
        scenario.add_state(Pinger).unwrap();
        scenario.set_start_state("Pinger").unwrap();
        scenario.init(&Params::new()).unwrap();

        assert_eq!(received.lock().unwrap().len(), 1);
        assert!(recorder
            .events()
            .contains(&LifecycleEvent::RequestForwarded {
                sender: Some("Pinger".to_string()),
                delivered: true,
            }));
    }
}
