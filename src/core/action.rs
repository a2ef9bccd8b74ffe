// Author: Dustin Pilgrim
// License: MIT

use serde::Serialize;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryReason {
    /// Idle limit reached (logout timer or countdown hit zero).
    IdleTimeout,
    /// Server side reported the session invalid.
    Revoked,
    /// User logged out from the UI.
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Register activity listeners and start the validity poller.
    StartTracking,

    /// Drop activity listeners and stop the validity poller.
    StopTracking,

    /// Warning window opened.
    ShowWarning {
        remaining_seconds: u64,
    },

    /// Countdown update while the warning is shown.
    UpdateCountdown {
        remaining_seconds: u64,
    },

    HideWarning,

    /// User-visible confirmation (runtime decides how).
    Notify {
        message: String,
    },

    /// Call the auth provider's sign-out. Failure must not block the actions after it.
    SignOut,

    ClearLocalSession,

    Redirect {
        route: String,
    },

    /// Outbound `on_expired` callback to the host.
    Expired {
        reason: ExpiryReason,
    },
}
