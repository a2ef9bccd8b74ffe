// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    action::Action,
    events::ActivityKind,
    state::{State, Status},
};

use super::Manager;

impl Manager {
    /// Qualifying activity resets the timers, debounced while ACTIVE.
    /// During WARNING any qualifying activity resets immediately.
    pub(crate) fn on_activity(
        &self,
        state: &mut State,
        kind: ActivityKind,
        now_ms: u64,
    ) -> Vec<Action> {
        if !state.tracking() {
            return Vec::new();
        }

        if !self.cfg.tracks(kind) {
            return Vec::new();
        }

        if state.status() == Status::Active {
            let since = now_ms.saturating_sub(state.last_activity_ms());
            if since <= self.cfg.activity_debounce_ms {
                return Vec::new();
            }
        }

        tracing::debug!("activity ({}) resets idle timers", kind);
        self.reset(state, now_ms)
    }
}
