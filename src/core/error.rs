// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration is unusable.
    ///
    /// Examples:
    /// - warning lead time not shorter than the inactivity limit
    /// - unknown activity kind in `activity_events`
    InvalidConfig(ConfigError),

    /// An operation was rejected because it is invalid in the current state.
    ///
    /// Examples:
    /// - extend while no user is tracked
    /// - extend after the session expired
    InvalidState(StateError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroInactivityLimit,

    /// `warning_lead` must be strictly shorter than `inactivity_limit`.
    WarningLeadTooLong,

    ZeroCountdownInterval,
    ZeroValidityInterval,

    /// A duration exceeds the supported maximum; carries the setting name.
    DurationTooLong(&'static str),

    NoActivityEvents,
    UnknownActivityKind(String),
    UnknownValidityPolicy(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    NotTracking,
    AlreadyExpired,
}

// ---------------- Display ----------------

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(e) => write!(f, "{e}"),
            Error::InvalidState(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroInactivityLimit =>
                write!(f, "inactivity limit must be greater than zero"),
            ConfigError::WarningLeadTooLong =>
                write!(f, "warning lead time must be shorter than the inactivity limit"),
            ConfigError::ZeroCountdownInterval =>
                write!(f, "countdown interval must be greater than zero"),
            ConfigError::ZeroValidityInterval =>
                write!(f, "validity check interval must be greater than zero"),
            ConfigError::DurationTooLong(name) =>
                write!(f, "{name} is longer than the supported maximum of one week"),
            ConfigError::NoActivityEvents =>
                write!(f, "at least one activity event must be tracked"),
            ConfigError::UnknownActivityKind(s) =>
                write!(f, "unknown activity event '{s}'"),
            ConfigError::UnknownValidityPolicy(s) =>
                write!(f, "unknown validity error policy '{s}' (expected ignore|expire)"),
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::NotTracking =>
                write!(f, "no authenticated session is being tracked"),
            StateError::AlreadyExpired =>
                write!(f, "session already expired"),
        }
    }
}

impl std::error::Error for Error {}
impl std::error::Error for ConfigError {}
impl std::error::Error for StateError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::InvalidConfig(e)
    }
}

impl From<StateError> for Error {
    fn from(e: StateError) -> Self {
        Error::InvalidState(e)
    }
}
