// Author: Dustin Pilgrim
// License: MIT

use crate::auth::User;
use crate::core::{
    action::{Action, ExpiryReason},
    config::ValidityErrorPolicy,
    events::ValidityOutcome,
    state::{State, Status},
};

use super::Manager;

impl Manager {
    pub(crate) fn on_user_changed(
        &self,
        state: &mut State,
        user: Option<User>,
        now_ms: u64,
    ) -> Vec<Action> {
        let mut out = Vec::new();
        let was_warning = state.status() == Status::Warning;

        match user {
            Some(user) => {
                if state.tracking() && state.user() == Some(&user) {
                    return out;
                }

                let was_tracking = state.tracking();
                tracing::info!("session started for {}", user);

                state.begin_session(user, now_ms);

                if was_warning {
                    out.push(Action::HideWarning);
                }
                if !was_tracking {
                    out.push(Action::StartTracking);
                }
                out.extend(self.reset(state, now_ms));
            }

            None => {
                if state.tracking() {
                    tracing::info!("user signed out; session tracking stopped");
                    if was_warning {
                        out.push(Action::HideWarning);
                    }
                    out.push(Action::StopTracking);
                }
                state.go_dormant();
            }
        }

        out
    }

    pub(crate) fn on_validity(
        &self,
        state: &mut State,
        generation: u64,
        outcome: ValidityOutcome,
    ) -> Vec<Action> {
        if !state.tracking() {
            return Vec::new();
        }

        if generation != state.generation() {
            tracing::debug!(
                "dropping validity result from session {} (current {})",
                generation,
                state.generation()
            );
            return Vec::new();
        }

        match outcome {
            ValidityOutcome::Valid => Vec::new(),

            ValidityOutcome::Invalid => {
                tracing::warn!("session invalidated server-side");
                self.expire(state, ExpiryReason::Revoked)
            }

            ValidityOutcome::CheckFailed { message } => match self.cfg.validity_error_policy {
                ValidityErrorPolicy::Ignore => {
                    tracing::warn!("session validity check failed (ignored): {}", message);
                    Vec::new()
                }
                ValidityErrorPolicy::Expire => {
                    tracing::warn!("session validity check failed (expiring): {}", message);
                    self.expire(state, ExpiryReason::Revoked)
                }
            },
        }
    }

    /// Terminal transition. Emits nothing if the session already expired.
    pub(crate) fn expire(&self, state: &mut State, reason: ExpiryReason) -> Vec<Action> {
        let was_warning = state.status() == Status::Warning;

        if !state.mark_expired(reason) {
            return Vec::new();
        }

        tracing::info!("session expired ({:?})", reason);

        let mut out = Vec::new();

        if was_warning {
            out.push(Action::HideWarning);
        }
        out.push(Action::StopTracking);

        if state.take_sign_out() {
            out.push(Action::SignOut);
        }

        out.push(Action::ClearLocalSession);
        out.push(Action::Redirect {
            route: self.cfg.signed_out_route.clone(),
        });
        out.push(Action::Expired { reason });

        out
    }
}
