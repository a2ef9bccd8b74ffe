// Author: Dustin Pilgrim
// License: MIT

use serde::Serialize;

use crate::core::{action::ExpiryReason, state::Status};

/// Snapshot returned by `session_info`.
///
/// - every duration is computed on demand from the last activity stamp
/// - `pretty_text` is console-facing output and is not serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub status: Status,
    pub tracking: bool,
    pub user: Option<String>,

    pub time_since_last_activity_ms: Option<u64>,
    pub time_until_warning_ms: Option<u64>,
    pub time_until_logout_ms: Option<u64>,

    pub is_warning_active: bool,
    pub remaining_seconds: Option<u64>,

    pub expiry: Option<ExpiryReason>,

    #[serde(skip_serializing)]
    pub pretty_text: String,
}
