// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    action::{Action, ExpiryReason},
    error::{Error, StateError},
    events::Event,
    state::State,
};

use super::Manager;

impl Manager {
    pub fn handle_event(&mut self, state: &mut State, event: Event) -> Result<Vec<Action>, Error> {
        let now_ms = event.now_ms();
        let mut out = Vec::new();

        match event {
            Event::Tick { .. } => {
                if !state.tracking() {
                    return Ok(out);
                }
                out.extend(self.fire_due_timers(state, now_ms));
            }

            Event::UserActivity { kind, .. } => {
                out.extend(self.on_activity(state, kind, now_ms));
            }

            Event::Extend { .. } => {
                Self::require_live(state)?;
                tracing::info!("session extended by user");
                out.extend(self.extend(state, now_ms));
            }

            Event::ManualLogout { .. } => {
                // Logout is idempotent once the session is gone.
                if state.is_expired() {
                    return Ok(out);
                }
                if !state.tracking() {
                    return Err(Error::InvalidState(StateError::NotTracking));
                }
                tracing::info!("manual logout requested");
                out.extend(self.expire(state, ExpiryReason::Manual));
            }

            Event::UserChanged { user, .. } => {
                out.extend(self.on_user_changed(state, user, now_ms));
            }

            Event::ValidityChecked {
                outcome, generation, ..
            } => {
                out.extend(self.on_validity(state, generation, outcome));
            }
        }

        Ok(out)
    }

    fn require_live(state: &State) -> Result<(), StateError> {
        if state.is_expired() {
            return Err(StateError::AlreadyExpired);
        }
        if !state.tracking() {
            return Err(StateError::NotTracking);
        }
        Ok(())
    }
}
