// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    action::{Action, ExpiryReason},
    state::{State, Status},
};

use super::Manager;

impl Manager {
    /// Cancel every timer and arm a fresh window starting at `now_ms`.
    pub(crate) fn reset(&self, state: &mut State, now_ms: u64) -> Vec<Action> {
        let was_warning = state.status() == Status::Warning;

        state.mark_activity(now_ms);
        state.timers_mut().rearm(
            now_ms,
            self.cfg.warning_offset_ms(),
            self.cfg.inactivity_limit_ms,
        );

        tracing::debug!(
            "timers re-armed: warning at {}ms, logout at {}ms (epoch {})",
            now_ms.saturating_add(self.cfg.warning_offset_ms()),
            now_ms.saturating_add(self.cfg.inactivity_limit_ms),
            state.timers().epoch()
        );

        if was_warning {
            vec![Action::HideWarning]
        } else {
            Vec::new()
        }
    }

    /// Same as a reset, plus the confirmation the user asked for.
    pub(crate) fn extend(&self, state: &mut State, now_ms: u64) -> Vec<Action> {
        let mut out = self.reset(state, now_ms);

        if self.cfg.notify_on_extend {
            out.push(Action::Notify {
                message: self.cfg.extend_message.clone(),
            });
        }

        out
    }

    /// Fire whatever is due at `now_ms`.
    ///
    /// The logout deadline wins over everything else, so a late tick never
    /// passes through WARNING on its way to EXPIRED.
    pub(crate) fn fire_due_timers(&self, state: &mut State, now_ms: u64) -> Vec<Action> {
        if state.timers().logout().is_some_and(|t| t.is_due(now_ms)) {
            tracing::info!("idle limit reached");
            return self.expire(state, ExpiryReason::IdleTimeout);
        }

        if state.timers().warning().is_some_and(|t| t.is_due(now_ms)) {
            return self.open_warning(state, now_ms);
        }

        if state.timers().countdown().is_some_and(|t| t.is_due(now_ms)) {
            return self.countdown_tick(state, now_ms);
        }

        Vec::new()
    }

    fn open_warning(&self, state: &mut State, now_ms: u64) -> Vec<Action> {
        let warning_at = state
            .timers()
            .warning()
            .map(|t| t.deadline_ms)
            .unwrap_or(now_ms);

        let remaining = self.remaining_seconds_at(state, now_ms).unwrap_or(0);

        let period = self.cfg.countdown_interval_ms;
        let timers = state.timers_mut();
        timers.clear_warning();
        timers.start_countdown(warning_at.saturating_add(period), period);
        if let Some(iv) = timers.countdown_mut() {
            iv.advance_past(now_ms);
        }

        state.set_status(Status::Warning);
        state.set_remaining_seconds(Some(remaining));

        tracing::info!("inactivity warning: {}s until logout", remaining);

        vec![Action::ShowWarning {
            remaining_seconds: remaining,
        }]
    }

    fn countdown_tick(&self, state: &mut State, now_ms: u64) -> Vec<Action> {
        // Derived from the logout deadline every tick, never decremented.
        let remaining = self.remaining_seconds_at(state, now_ms).unwrap_or(0);

        if remaining == 0 {
            tracing::info!("countdown reached zero");
            return self.expire(state, ExpiryReason::IdleTimeout);
        }

        if let Some(iv) = state.timers_mut().countdown_mut() {
            iv.advance_past(now_ms);
        }
        state.set_remaining_seconds(Some(remaining));

        vec![Action::UpdateCountdown {
            remaining_seconds: remaining,
        }]
    }
}
