// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};

use crate::auth::User;
use crate::core::{error::Error, info::SessionInfo, manager_msg::ManagerMsg};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorError {
    /// The monitor task is gone (torn down or crashed).
    Closed,
    /// The monitor refused the operation in its current state.
    Rejected(Error),
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Closed => write!(f, "session monitor is not running"),
            MonitorError::Rejected(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for MonitorError {}

impl From<Error> for MonitorError {
    fn from(e: Error) -> Self {
        MonitorError::Rejected(e)
    }
}

/// In-process API to a running [`SessionMonitor`](super::SessionMonitor).
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<ManagerMsg>,
    shutdown: Arc<watch::Sender<bool>>,
}

impl SessionHandle {
    pub(super) fn new(tx: mpsc::Sender<ManagerMsg>, shutdown: watch::Sender<bool>) -> Self {
        Self {
            tx,
            shutdown: Arc::new(shutdown),
        }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> ManagerMsg,
    ) -> Result<T, MonitorError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| MonitorError::Closed)?;
        rx.await.map_err(|_| MonitorError::Closed)
    }

    pub async fn session_info(&self) -> Result<SessionInfo, MonitorError> {
        self.request(|reply| ManagerMsg::GetInfo { reply }).await
    }

    /// "Stay signed in": restart the idle window now.
    pub async fn extend_session(&self) -> Result<(), MonitorError> {
        self.request(|reply| ManagerMsg::Extend { reply }).await??;
        Ok(())
    }

    /// Sign out now. Calling it again after expiry is a no-op.
    pub async fn logout(&self) -> Result<(), MonitorError> {
        self.request(|reply| ManagerMsg::Logout { reply }).await??;
        Ok(())
    }

    /// Report a sign-in, user switch (`Some`) or sign-out elsewhere (`None`).
    pub async fn set_user(&self, user: Option<User>) -> Result<(), MonitorError> {
        self.request(|reply| ManagerMsg::SetUser { user, reply }).await
    }

    /// Stop the monitor: timers cancelled, listeners removed. Idempotent.
    pub async fn teardown(&self) -> Result<(), MonitorError> {
        match self.request(|reply| ManagerMsg::Teardown { reply }).await {
            Ok(()) | Err(MonitorError::Closed) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Non-async variant of [`teardown`](Self::teardown) for signal handlers.
    pub fn request_shutdown(&self) {
        let _ = self.shutdown.send(true);
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
