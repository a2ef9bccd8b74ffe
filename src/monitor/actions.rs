// Author: Dustin Pilgrim
// License: MIT

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Duration;

use crate::core::{action::Action, events::Event, manager_msg::ManagerMsg};
use crate::services::validity::run_validity_poller;

use super::{SessionMonitor, Tracking};

impl SessionMonitor {
    /// Execute one action. Every action is best-effort; none aborts the ones after it.
    pub(super) async fn exec_action(&mut self, action: Action, tx: &mpsc::Sender<ManagerMsg>) {
        match action {
            Action::StartTracking => {
                self.start_tracking(tx);
            }

            Action::StopTracking => {
                if self.tracking.take().is_some() {
                    tracing::info!("activity tracking stopped");
                }
            }

            Action::ShowWarning { remaining_seconds } => {
                self.host.show_warning(remaining_seconds);
            }

            Action::UpdateCountdown { remaining_seconds } => {
                self.host.update_countdown(remaining_seconds);
            }

            Action::HideWarning => {
                self.host.hide_warning();
            }

            Action::Notify { message } => {
                self.host.notify(&message);
            }

            Action::SignOut => match self.auth.sign_out().await {
                Ok(()) => tracing::info!("signed out"),
                Err(e) => tracing::error!("sign-out failed, clearing local session anyway: {}", e),
            },

            Action::ClearLocalSession => {
                self.host.clear_local_session();
            }

            Action::Redirect { route } => {
                self.host.redirect(&route);
            }

            Action::Expired { reason } => {
                self.host.on_expired(reason);
            }
        }
    }

    fn start_tracking(&mut self, tx: &mpsc::Sender<ManagerMsg>) {
        // Replacing drops the previous registration first.
        self.tracking = None;

        let sink = tx.clone();
        let clock = self.clock;
        let listeners = self.bus.register(&self.manager.cfg().activity_events, move |kind| {
            let ev = Event::UserActivity {
                kind,
                now_ms: clock.now_ms(),
            };
            // Full channel means a backlog of activity already; dropping is fine.
            let _ = sink.try_send(ManagerMsg::Event(ev));
        });

        let period = Duration::from_millis(self.manager.cfg().validity_check_interval_ms);
        let poller = tokio::spawn(run_validity_poller(
            Arc::clone(&self.auth),
            tx.clone(),
            self.clock,
            period,
            self.state.generation(),
        ));

        self.tracking = Some(Tracking {
            _listeners: listeners,
            poller,
        });

        tracing::info!("activity tracking started");
    }
}
