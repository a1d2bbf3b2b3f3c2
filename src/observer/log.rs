//! Observer that forwards lifecycle events to `tracing`.

use super::{LifecycleEvent, ScenarioObserver};
use tracing::{debug, info, warn};

/// Default observer: registration and interpretation at `debug`,
/// transitions and termination at `info`, rejections at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ScenarioObserver for TracingObserver {
    fn observe(&mut self, event: &LifecycleEvent) {
        match event {
            LifecycleEvent::StateAdded { state } => debug!(%state, "State added"),
            LifecycleEvent::StateRejected { state, reason } => {
                warn!(%state, %reason, "Cannot add state")
            }
            LifecycleEvent::TransferAdded { from, to, tag } => {
                debug!(%from, %to, tag = ?tag, "Added state transfer")
            }
            LifecycleEvent::TransferRejected { reason } => {
                warn!(%reason, "Cannot add state transfer")
            }
            LifecycleEvent::StartStateSet { state } => debug!(%state, "Start state set"),
            LifecycleEvent::StartStateRejected { reason } => {
                warn!(%reason, "Cannot set start state")
            }
            LifecycleEvent::SetupWarning { issue } => warn!(%issue, "Setup issue"),
            LifecycleEvent::Initialized { start } => info!(%start, "Scenario initialized"),
            LifecycleEvent::StateEntered { state } => debug!(%state, "State entered"),
            LifecycleEvent::StateExited { state } => debug!(%state, "State exited"),
            LifecycleEvent::EventInterpreted { sender, kind, tag } => {
                debug!(sender = ?sender, %kind, tag = ?tag, "Interpreting event")
            }
            LifecycleEvent::Transitioned { from, to, tag } => {
                info!(%from, %to, tag = ?tag, "State transition")
            }
            LifecycleEvent::NoTransition { from, tag } => {
                warn!(%from, tag = ?tag, "No transition found")
            }
            LifecycleEvent::Restarted { state, attempt } => {
                debug!(%state, attempt, "Restarting state")
            }
            LifecycleEvent::RequestForwarded { sender, delivered } => {
                debug!(sender = ?sender, delivered, "Request forwarded")
            }
            LifecycleEvent::IgnoredExitEvent { state, kind } => {
                warn!(%state, %kind, "Ignoring event returned from exit")
            }
            LifecycleEvent::SenderMismatch { active, sender } => {
                warn!(%active, %sender, "Event sender is not the active state")
            }
            LifecycleEvent::ChainDepthExceeded { state, limit } => {
                warn!(%state, limit, "Event chain too deep")
            }
            LifecycleEvent::UpdateIgnored { reason } => {
                debug!(reason = ?reason, "Update ignored")
            }
            LifecycleEvent::Finished { state } => info!(%state, "Scenario finished"),
            LifecycleEvent::TornDown { state } => debug!(%state, "Scenario torn down"),
        }
    }
}
