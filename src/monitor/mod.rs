// Author: Dustin Pilgrim
// License: MIT

mod actions;
mod handle;
mod host;
mod run;

#[cfg(test)]
mod monitor_tests;

pub use handle::{MonitorError, SessionHandle};
pub use host::{SessionHost, TracingHost};

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::auth::AuthProvider;
use crate::core::{
    action::Action,
    config::Config,
    error::Error,
    events::Event,
    manager::Manager,
    manager_msg::ManagerMsg,
    state::State,
    utils::Clock,
};
use crate::services::activity::{ActivityBus, ListenerGuard};

const CHANNEL_CAPACITY: usize = 256;

/// Resources that exist only while a user session is tracked.
///
/// Dropping this removes the activity listener and stops the validity poller.
struct Tracking {
    _listeners: ListenerGuard,
    poller: JoinHandle<()>,
}

impl Drop for Tracking {
    fn drop(&mut self) {
        self.poller.abort();
    }
}

/// Runtime around the session [`Manager`].
///
/// Owns the state, the clock, and the tracking resources; everything else
/// talks to it through a [`SessionHandle`].
pub struct SessionMonitor {
    manager: Manager,
    state: State,
    clock: Clock,

    auth: Arc<dyn AuthProvider>,
    host: Arc<dyn SessionHost>,
    bus: ActivityBus,

    tracking: Option<Tracking>,
}

impl SessionMonitor {
    pub fn new(
        cfg: Config,
        auth: Arc<dyn AuthProvider>,
        host: Arc<dyn SessionHost>,
        bus: ActivityBus,
    ) -> Result<Self, Error> {
        let manager = Manager::try_new(cfg)?;
        let clock = Clock::new();

        tracing::debug!(
            "monitor: inactivity_limit={}ms, warning_lead={}ms, debounce={}ms, validity_every={}ms, events={}",
            manager.cfg().inactivity_limit_ms,
            manager.cfg().warning_lead_ms,
            manager.cfg().activity_debounce_ms,
            manager.cfg().validity_check_interval_ms,
            manager.cfg().activity_events.len(),
        );

        Ok(Self {
            manager,
            state: State::new(clock.now_ms()),
            clock,
            auth,
            host,
            bus,
            tracking: None,
        })
    }

    /// Start the monitor task. Must be called inside a tokio runtime.
    pub fn spawn(self) -> (SessionHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel::<ManagerMsg>(CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = SessionHandle::new(tx.clone(), shutdown_tx);
        let task = tokio::spawn(self.run(rx, tx, shutdown_rx));

        (handle, task)
    }

    fn handle_one_event_scoped(&mut self, event: Event) -> Result<Vec<Action>, Error> {
        if matches!(event, Event::Tick { .. }) {
            return self.manager.handle_event(&mut self.state, event);
        }

        let span = tracing::debug_span!("event");
        let _enter = span.enter();

        tracing::debug!("incoming: {:?}", event);

        let res = self.manager.handle_event(&mut self.state, event);
        match &res {
            Ok(actions) if !actions.is_empty() => tracing::debug!("actions: {:?}", actions),
            Ok(_) => {}
            Err(e) => tracing::warn!("event rejected: {}", e),
        }
        res
    }

    /// Cancel timers and drop listeners. Safe to call more than once.
    fn teardown(&mut self) {
        if self.tracking.take().is_some() {
            tracing::info!("activity tracking stopped (teardown)");
        }
        self.state.go_dormant();
    }
}
