// Author: Dustin Pilgrim
// License: MIT

use serde::Serialize;

use crate::auth::User;
use crate::core::action::ExpiryReason;
use crate::core::timers::TimerSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Active,
    Warning,
    Expired,
}

#[derive(Debug, Clone)]
pub struct State {
    // On only while an authenticated, unexpired user is present.
    tracking: bool,
    user: Option<User>,

    status: Status,

    // Timing (ms, supplied by events)
    last_activity_ms: u64,

    // Only Some while Warning; pinned to Some(0) on expiry.
    remaining_seconds: Option<u64>,

    timers: TimerSet,

    expiry: Option<ExpiryReason>,

    // Sign-out is requested at most once per session.
    sign_out_issued: bool,

    // Bumped by every sign-in; tags work started on behalf of one session.
    generation: u64,
}

impl State {
    /// Dormant state: no user, nothing armed.
    pub fn new(now_ms: u64) -> Self {
        Self {
            tracking: false,
            user: None,
            status: Status::Active,
            last_activity_ms: now_ms,
            remaining_seconds: None,
            timers: TimerSet::new(),
            expiry: None,
            sign_out_issued: false,
            generation: 0,
        }
    }

    // ---------------- getters ----------------

    pub fn tracking(&self) -> bool {
        self.tracking
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_expired(&self) -> bool {
        self.status == Status::Expired
    }

    pub fn last_activity_ms(&self) -> u64 {
        self.last_activity_ms
    }

    pub fn remaining_seconds(&self) -> Option<u64> {
        self.remaining_seconds
    }

    pub fn timers(&self) -> &TimerSet {
        &self.timers
    }

    pub fn expiry(&self) -> Option<ExpiryReason> {
        self.expiry
    }

    pub fn sign_out_issued(&self) -> bool {
        self.sign_out_issued
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ---------------- setters ----------------

    pub(crate) fn timers_mut(&mut self) -> &mut TimerSet {
        &mut self.timers
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub(crate) fn set_remaining_seconds(&mut self, v: Option<u64>) {
        self.remaining_seconds = v;
    }

    // ---------------- cycle control ----------------

    /// Fresh session for `user`: forget any previous expiry.
    pub(crate) fn begin_session(&mut self, user: User, now_ms: u64) {
        self.tracking = true;
        self.user = Some(user);
        self.status = Status::Active;
        self.last_activity_ms = now_ms;
        self.remaining_seconds = None;
        self.timers.cancel_all();
        self.expiry = None;
        self.sign_out_issued = false;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Back to ACTIVE with a fresh activity stamp. Caller re-arms timers.
    pub(crate) fn mark_activity(&mut self, now_ms: u64) {
        self.status = Status::Active;
        self.last_activity_ms = now_ms;
        self.remaining_seconds = None;
    }

    /// User went away: inert ACTIVE-but-dormant.
    pub(crate) fn go_dormant(&mut self) {
        self.tracking = false;
        self.user = None;
        self.status = Status::Active;
        self.remaining_seconds = None;
        self.timers.cancel_all();
        self.expiry = None;
    }

    /// Terminal transition. Returns false if the session had already expired.
    pub(crate) fn mark_expired(&mut self, reason: ExpiryReason) -> bool {
        if self.status == Status::Expired {
            return false;
        }
        self.tracking = false;
        self.status = Status::Expired;
        self.remaining_seconds = Some(0);
        self.timers.cancel_all();
        self.expiry = Some(reason);
        true
    }

    /// Take the sign-out latch. True only the first time per session.
    pub(crate) fn take_sign_out(&mut self) -> bool {
        if self.sign_out_issued {
            return false;
        }
        self.sign_out_issued = true;
        true
    }
}

impl Default for State {
    fn default() -> Self {
        State::new(0)
    }
}
