// Author: Dustin Pilgrim
// License: MIT

//! Idle session monitor.
//!
//! Tracks user activity for an authenticated session, opens a warning
//! countdown before the idle limit, and signs the user out when it runs out
//! or when the backend reports the session gone.
//!
//! - [`core`] is the clock-free decision engine (events in, actions out).
//! - [`monitor`] runs it on tokio against an [`auth::AuthProvider`] and a
//!   [`monitor::SessionHost`].

pub mod auth;
pub mod config;
pub mod core;
pub mod monitor;
pub mod services;

pub use crate::auth::{AuthError, AuthProvider, User};
pub use crate::core::{
    action::ExpiryReason,
    config::{Config, ValidityErrorPolicy},
    events::ActivityKind,
    info::SessionInfo,
    state::Status,
};
pub use crate::monitor::{MonitorError, SessionHandle, SessionHost, SessionMonitor, TracingHost};
pub use crate::services::activity::{ActivityBus, ListenerGuard};
