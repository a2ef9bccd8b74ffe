// Author: Dustin Pilgrim
// License: MIT

use std::sync::{Arc, Mutex};

use tokio::time::{Duration, sleep};

use crate::auth::{User, memory::InMemoryAuth};
use crate::core::{
    action::ExpiryReason,
    config::Config,
    error::{Error, StateError},
    events::ActivityKind,
    state::Status,
};
use crate::services::activity::ActivityBus;

use super::{MonitorError, SessionHandle, SessionHost, SessionMonitor};

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostCall {
    Show(u64),
    Countdown(u64),
    Hide,
    Notify(String),
    Clear,
    Redirect(String),
    Expired(ExpiryReason),
}

#[derive(Default)]
struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
}

impl RecordingHost {
    fn push(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl SessionHost for RecordingHost {
    fn show_warning(&self, remaining_seconds: u64) {
        self.push(HostCall::Show(remaining_seconds));
    }

    fn update_countdown(&self, remaining_seconds: u64) {
        self.push(HostCall::Countdown(remaining_seconds));
    }

    fn hide_warning(&self) {
        self.push(HostCall::Hide);
    }

    fn notify(&self, message: &str) {
        self.push(HostCall::Notify(message.to_string()));
    }

    fn clear_local_session(&self) {
        self.push(HostCall::Clear);
    }

    fn redirect(&self, route: &str) {
        self.push(HostCall::Redirect(route.to_string()));
    }

    fn on_expired(&self, reason: ExpiryReason) {
        self.push(HostCall::Expired(reason));
    }
}

struct Rig {
    handle: SessionHandle,
    task: tokio::task::JoinHandle<()>,
    auth: Arc<InMemoryAuth>,
    host: Arc<RecordingHost>,
    bus: ActivityBus,
}

fn start(cfg: Config, auth: InMemoryAuth) -> Rig {
    let auth = Arc::new(auth);
    let host = Arc::new(RecordingHost::default());
    let bus = ActivityBus::new();

    let monitor = SessionMonitor::new(cfg, auth.clone(), host.clone(), bus.clone()).unwrap();
    let (handle, task) = monitor.spawn();

    Rig {
        handle,
        task,
        auth,
        host,
        bus,
    }
}

fn ana() -> InMemoryAuth {
    InMemoryAuth::signed_in(User::new("ana"))
}

#[tokio::test(start_paused = true)]
async fn idle_session_warns_counts_down_and_signs_out() {
    let rig = start(Config::with_limits(120, 30), ana());

    let info = rig.handle.session_info().await.unwrap();
    assert!(info.tracking);
    assert_eq!(info.user.as_deref(), Some("ana"));
    assert_eq!(rig.bus.listener_count(), 1);

    sleep(Duration::from_millis(95_500)).await;

    let info = rig.handle.session_info().await.unwrap();
    assert_eq!(info.status, Status::Warning);
    assert!(info.is_warning_active);
    assert_eq!(info.remaining_seconds, Some(25));
    assert_eq!(
        rig.host.calls(),
        vec![
            HostCall::Show(30),
            HostCall::Countdown(29),
            HostCall::Countdown(28),
            HostCall::Countdown(27),
            HostCall::Countdown(26),
            HostCall::Countdown(25),
        ]
    );

    sleep(Duration::from_millis(25_000)).await;

    let info = rig.handle.session_info().await.unwrap();
    assert_eq!(info.status, Status::Expired);
    assert!(!info.tracking);
    assert_eq!(info.expiry, Some(ExpiryReason::IdleTimeout));
    assert_eq!(rig.auth.sign_out_calls(), 1);
    assert_eq!(rig.bus.listener_count(), 0);

    let calls = rig.host.calls();
    assert_eq!(
        &calls[calls.len() - 4..],
        &[
            HostCall::Hide,
            HostCall::Clear,
            HostCall::Redirect("/login".to_string()),
            HostCall::Expired(ExpiryReason::IdleTimeout),
        ]
    );
    assert!(!calls.contains(&HostCall::Countdown(0)));
}

#[tokio::test(start_paused = true)]
async fn extend_during_warning_restarts_the_window() {
    let rig = start(Config::with_limits(120, 30), ana());

    sleep(Duration::from_millis(100_500)).await;
    assert_eq!(
        rig.handle.session_info().await.unwrap().status,
        Status::Warning
    );

    rig.handle.extend_session().await.unwrap();

    let info = rig.handle.session_info().await.unwrap();
    assert_eq!(info.status, Status::Active);
    assert_eq!(info.remaining_seconds, None);

    let calls = rig.host.calls();
    assert_eq!(
        &calls[calls.len() - 2..],
        &[
            HostCall::Hide,
            HostCall::Notify("Session extended".to_string()),
        ]
    );

    // Old deadline (120s) passes without effect; new warning is at ~190.5s.
    sleep(Duration::from_millis(80_000)).await;
    let info = rig.handle.session_info().await.unwrap();
    assert_eq!(info.status, Status::Active);
    assert_eq!(rig.auth.sign_out_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn bus_activity_resets_the_idle_window() {
    let rig = start(Config::with_limits(120, 30), ana());

    sleep(Duration::from_millis(70_000)).await;
    assert_eq!(rig.bus.dispatch(ActivityKind::Click), 1);

    sleep(Duration::from_millis(25_000)).await;

    let info = rig.handle.session_info().await.unwrap();
    assert_eq!(info.status, Status::Active);
    let until_warning = info.time_until_warning_ms.unwrap();
    assert!((64_000..=65_000).contains(&until_warning));
    assert!(rig.host.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn server_side_revocation_expires_on_next_check() {
    let cfg = Config {
        validity_check_interval_ms: 10_000,
        ..Config::with_limits(120, 30)
    };
    let rig = start(cfg, ana());

    rig.auth.revoke();
    sleep(Duration::from_millis(10_500)).await;

    let info = rig.handle.session_info().await.unwrap();
    assert_eq!(info.status, Status::Expired);
    assert_eq!(info.expiry, Some(ExpiryReason::Revoked));
    assert_eq!(rig.auth.sign_out_calls(), 1);
    assert_eq!(
        rig.host.calls().last(),
        Some(&HostCall::Expired(ExpiryReason::Revoked))
    );
}

#[tokio::test(start_paused = true)]
async fn failed_checks_are_ignored_by_default() {
    let cfg = Config {
        validity_check_interval_ms: 10_000,
        ..Config::with_limits(120, 30)
    };
    let rig = start(cfg, ana());

    rig.auth.set_check_failure(true);
    sleep(Duration::from_millis(35_000)).await;

    let info = rig.handle.session_info().await.unwrap();
    assert_eq!(rig.auth.validity_checks(), 3);
    assert_eq!(info.status, Status::Active);
    assert_eq!(info.expiry, None);
}

#[tokio::test(start_paused = true)]
async fn logout_clears_locally_even_if_sign_out_fails() {
    let rig = start(Config::with_limits(120, 30), ana());

    rig.auth.set_sign_out_failure(true);
    rig.handle.logout().await.unwrap();

    assert_eq!(rig.auth.sign_out_calls(), 1);
    assert_eq!(
        rig.host.calls(),
        vec![
            HostCall::Clear,
            HostCall::Redirect("/login".to_string()),
            HostCall::Expired(ExpiryReason::Manual),
        ]
    );

    rig.handle.logout().await.unwrap();
    assert_eq!(rig.auth.sign_out_calls(), 1);
    assert_eq!(rig.host.calls().len(), 3);

    assert_eq!(
        rig.handle.extend_session().await,
        Err(MonitorError::Rejected(Error::InvalidState(
            StateError::AlreadyExpired
        )))
    );
}

#[tokio::test(start_paused = true)]
async fn user_sign_out_stops_tracking_without_expiry() {
    let rig = start(Config::with_limits(120, 30), ana());

    rig.handle.set_user(None).await.unwrap();
    assert_eq!(rig.bus.listener_count(), 0);
    assert_eq!(rig.bus.dispatch(ActivityKind::KeyDown), 0);

    sleep(Duration::from_millis(200_000)).await;

    let info = rig.handle.session_info().await.unwrap();
    assert!(!info.tracking);
    assert_eq!(info.expiry, None);
    assert!(rig.host.calls().is_empty());
    assert_eq!(rig.auth.sign_out_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn sign_in_after_expiry_tracks_again() {
    let rig = start(Config::with_limits(120, 30), ana());

    rig.handle.logout().await.unwrap();
    assert_eq!(rig.bus.listener_count(), 0);

    rig.handle.set_user(Some(User::new("bo"))).await.unwrap();

    let info = rig.handle.session_info().await.unwrap();
    assert!(info.tracking);
    assert_eq!(info.status, Status::Active);
    assert_eq!(info.user.as_deref(), Some("bo"));
    assert_eq!(info.expiry, None);
    assert_eq!(rig.bus.listener_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn no_user_at_start_rejects_extend() {
    let rig = start(Config::with_limits(120, 30), InMemoryAuth::new());

    let info = rig.handle.session_info().await.unwrap();
    assert!(!info.tracking);
    assert_eq!(rig.bus.listener_count(), 0);

    assert_eq!(
        rig.handle.extend_session().await,
        Err(MonitorError::Rejected(Error::InvalidState(
            StateError::NotTracking
        )))
    );
}

#[tokio::test(start_paused = true)]
async fn teardown_stops_everything() {
    let rig = start(Config::with_limits(120, 30), ana());

    rig.handle.teardown().await.unwrap();
    rig.task.await.unwrap();

    assert!(rig.handle.is_closed());
    assert_eq!(rig.bus.listener_count(), 0);
    assert_eq!(
        rig.handle.session_info().await,
        Err(MonitorError::Closed)
    );
    // Second teardown is a no-op.
    assert_eq!(rig.handle.teardown().await, Ok(()));

    sleep(Duration::from_millis(200_000)).await;
    assert!(rig.host.calls().is_empty());
    assert_eq!(rig.auth.sign_out_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn shutdown_signal_ends_the_task() {
    let rig = start(Config::with_limits(120, 30), ana());

    rig.handle.session_info().await.unwrap();
    rig.handle.request_shutdown();
    rig.task.await.unwrap();

    assert_eq!(rig.bus.listener_count(), 0);
}
