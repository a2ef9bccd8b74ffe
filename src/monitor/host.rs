// Author: Dustin Pilgrim
// License: MIT

use crate::core::action::ExpiryReason;

/// Callbacks into the embedding UI.
///
/// Called from the monitor task; implementations must not block.
pub trait SessionHost: Send + Sync {
    fn show_warning(&self, _remaining_seconds: u64) {}

    fn update_countdown(&self, _remaining_seconds: u64) {}

    fn hide_warning(&self) {}

    fn notify(&self, _message: &str) {}

    /// Drop cached records and any client-side session data.
    fn clear_local_session(&self) {}

    /// Navigate to the unauthenticated entry point.
    fn redirect(&self, _route: &str) {}

    fn on_expired(&self, _reason: ExpiryReason) {}
}

/// Host that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHost;

impl SessionHost for TracingHost {
    fn show_warning(&self, remaining_seconds: u64) {
        tracing::info!("warning: signing out in {}s unless you stay active", remaining_seconds);
    }

    fn update_countdown(&self, remaining_seconds: u64) {
        tracing::debug!("countdown: {}s", remaining_seconds);
    }

    fn hide_warning(&self) {
        tracing::info!("warning dismissed");
    }

    fn notify(&self, message: &str) {
        tracing::info!("notify: {}", message);
    }

    fn clear_local_session(&self) {
        tracing::info!("local session cleared");
    }

    fn redirect(&self, route: &str) {
        tracing::info!("redirect: {}", route);
    }

    fn on_expired(&self, reason: ExpiryReason) {
        tracing::info!("session expired: {:?}", reason);
    }
}
