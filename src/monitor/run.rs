// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep_until};

use crate::core::{error::Error, events::Event, manager_msg::ManagerMsg};

use super::SessionMonitor;

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}

impl SessionMonitor {
    pub(super) async fn run(
        mut self,
        mut rx: mpsc::Receiver<ManagerMsg>,
        tx: mpsc::Sender<ManagerMsg>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        tracing::info!("session monitor starting");

        let user = self.auth.current_user().await;
        let now_ms = self.clock.now_ms();
        self.dispatch(Event::UserChanged { user, now_ms }, &tx).await;

        loop {
            // Recomputed every pass: a reset simply moves the deadline.
            let deadline = self
                .manager
                .next_deadline_ms(&self.state)
                .map(|ms| self.clock.instant_at(ms));

            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("session monitor stopping (shutdown requested)");
                        break;
                    }
                }

                _ = sleep_until_opt(deadline) => {
                    let now_ms = self.clock.now_ms();
                    self.dispatch(Event::Tick { now_ms }, &tx).await;
                }

                maybe = rx.recv() => {
                    let Some(msg) = maybe else {
                        tracing::info!("session monitor stopping (channel closed)");
                        break;
                    };

                    let now_ms = self.clock.now_ms();

                    match msg {
                        ManagerMsg::Event(event) => {
                            self.dispatch(event, &tx).await;
                        }

                        ManagerMsg::GetInfo { reply } => {
                            let _ = reply.send(self.manager.snapshot(&self.state, now_ms));
                        }

                        ManagerMsg::Extend { reply } => {
                            let res = self.process(Event::Extend { now_ms }, &tx).await;
                            let _ = reply.send(res);
                        }

                        ManagerMsg::Logout { reply } => {
                            let res = self.process(Event::ManualLogout { now_ms }, &tx).await;
                            let _ = reply.send(res);
                        }

                        ManagerMsg::SetUser { user, reply } => {
                            self.dispatch(Event::UserChanged { user, now_ms }, &tx).await;
                            let _ = reply.send(());
                        }

                        ManagerMsg::Teardown { reply } => {
                            self.teardown();
                            tracing::info!("session monitor stopping (teardown requested)");
                            let _ = reply.send(());
                            break;
                        }
                    }
                }
            }
        }

        self.teardown();
    }

    /// Handle one event and run its actions.
    async fn process(&mut self, event: Event, tx: &mpsc::Sender<ManagerMsg>) -> Result<(), Error> {
        let actions = self.handle_one_event_scoped(event)?;

        for action in actions {
            self.exec_action(action, tx).await;
        }

        Ok(())
    }

    /// Like `process`, for events nobody waits on.
    async fn dispatch(&mut self, event: Event, tx: &mpsc::Sender<ManagerMsg>) {
        // Rejections are already logged by the scoped handler.
        let _ = self.process(event, tx).await;
    }
}
