// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::error::ConfigError;
use crate::core::events::ActivityKind;

pub const DEFAULT_INACTIVITY_LIMIT_SECONDS: u64 = 30 * 60;
pub const DEFAULT_WARNING_LEAD_SECONDS: u64 = 5 * 60;
pub const DEFAULT_ACTIVITY_DEBOUNCE_SECONDS: u64 = 60;
pub const DEFAULT_VALIDITY_CHECK_SECONDS: u64 = 5 * 60;
pub const DEFAULT_COUNTDOWN_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_SIGNED_OUT_ROUTE: &str = "/login";
pub const DEFAULT_EXTEND_MESSAGE: &str = "Session extended";

/// Upper bound for every configured duration (one week).
pub const MAX_DURATION_MS: u64 = 7 * 24 * 60 * 60 * 1000;

/// What to do when the server-side validity check itself fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidityErrorPolicy {
    /// Log and keep the session; only an explicit "invalid" expires it.
    #[default]
    Ignore,
    /// Treat a failed check like an invalid session.
    Expire,
}

impl FromStr for ValidityErrorPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" | "keep" => Ok(ValidityErrorPolicy::Ignore),
            "expire" | "logout" => Ok(ValidityErrorPolicy::Expire),
            other => Err(ConfigError::UnknownValidityPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for ValidityErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidityErrorPolicy::Ignore => f.write_str("ignore"),
            ValidityErrorPolicy::Expire => f.write_str("expire"),
        }
    }
}

/// Effective session timing configuration.
///
/// All durations are milliseconds so the manager can do integer math on
/// event timestamps directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Idle time after which the session is force-terminated.
    pub inactivity_limit_ms: u64,

    /// How long before the logout deadline the warning opens.
    pub warning_lead_ms: u64,

    /// Activity closer than this to the last recorded activity is ignored.
    pub activity_debounce_ms: u64,

    pub validity_check_interval_ms: u64,
    pub countdown_interval_ms: u64,

    pub activity_events: Vec<ActivityKind>,
    pub validity_error_policy: ValidityErrorPolicy,

    pub signed_out_route: String,
    pub notify_on_extend: bool,
    pub extend_message: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inactivity_limit_ms: DEFAULT_INACTIVITY_LIMIT_SECONDS * 1000,
            warning_lead_ms: DEFAULT_WARNING_LEAD_SECONDS * 1000,
            activity_debounce_ms: DEFAULT_ACTIVITY_DEBOUNCE_SECONDS * 1000,
            validity_check_interval_ms: DEFAULT_VALIDITY_CHECK_SECONDS * 1000,
            countdown_interval_ms: DEFAULT_COUNTDOWN_INTERVAL_MS,
            activity_events: ActivityKind::ALL.to_vec(),
            validity_error_policy: ValidityErrorPolicy::default(),
            signed_out_route: DEFAULT_SIGNED_OUT_ROUTE.to_string(),
            notify_on_extend: true,
            extend_message: DEFAULT_EXTEND_MESSAGE.to_string(),
        }
    }
}

impl Config {
    /// Default config with the two headline durations replaced.
    pub fn with_limits(inactivity_limit_secs: u64, warning_lead_secs: u64) -> Self {
        Self {
            inactivity_limit_ms: inactivity_limit_secs * 1000,
            warning_lead_ms: warning_lead_secs * 1000,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inactivity_limit_ms == 0 {
            return Err(ConfigError::ZeroInactivityLimit);
        }
        for (name, ms) in [
            ("inactivity_limit", self.inactivity_limit_ms),
            ("activity_debounce", self.activity_debounce_ms),
            ("validity_check_interval", self.validity_check_interval_ms),
            ("countdown_interval", self.countdown_interval_ms),
        ] {
            if ms > MAX_DURATION_MS {
                return Err(ConfigError::DurationTooLong(name));
            }
        }
        if self.warning_lead_ms >= self.inactivity_limit_ms {
            return Err(ConfigError::WarningLeadTooLong);
        }
        if self.countdown_interval_ms == 0 {
            return Err(ConfigError::ZeroCountdownInterval);
        }
        if self.validity_check_interval_ms == 0 {
            return Err(ConfigError::ZeroValidityInterval);
        }
        if self.activity_events.is_empty() {
            return Err(ConfigError::NoActivityEvents);
        }
        Ok(())
    }

    /// Offset from the last reset at which the warning opens.
    pub fn warning_offset_ms(&self) -> u64 {
        self.inactivity_limit_ms.saturating_sub(self.warning_lead_ms)
    }

    pub fn tracks(&self, kind: ActivityKind) -> bool {
        self.activity_events.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
        assert_eq!(Config::default().warning_offset_ms(), 25 * 60 * 1000);
    }

    #[test]
    fn warning_lead_must_be_strictly_shorter() {
        let cfg = Config::with_limits(120, 120);
        assert_eq!(cfg.validate(), Err(ConfigError::WarningLeadTooLong));

        let cfg = Config::with_limits(120, 119);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_intervals_and_empty_event_set() {
        let mut cfg = Config::with_limits(0, 0);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroInactivityLimit));

        cfg = Config::with_limits(120, 30);
        cfg.countdown_interval_ms = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroCountdownInterval));

        cfg = Config::with_limits(120, 30);
        cfg.activity_events.clear();
        assert_eq!(cfg.validate(), Err(ConfigError::NoActivityEvents));
    }

    #[test]
    fn rejects_durations_longer_than_a_week() {
        let mut cfg = Config::with_limits(120, 30);
        cfg.inactivity_limit_ms = u64::MAX - 10;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::DurationTooLong("inactivity_limit"))
        );

        cfg = Config::with_limits(120, 30);
        cfg.validity_check_interval_ms = MAX_DURATION_MS + 1;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::DurationTooLong("validity_check_interval"))
        );

        cfg = Config::with_limits(120, 30);
        cfg.inactivity_limit_ms = MAX_DURATION_MS;
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn validity_policy_parses() {
        assert_eq!("Ignore".parse::<ValidityErrorPolicy>(), Ok(ValidityErrorPolicy::Ignore));
        assert_eq!("expire".parse::<ValidityErrorPolicy>(), Ok(ValidityErrorPolicy::Expire));
        assert_eq!(
            "retry".parse::<ValidityErrorPolicy>(),
            Err(ConfigError::UnknownValidityPolicy("retry".to_string()))
        );
    }
}
