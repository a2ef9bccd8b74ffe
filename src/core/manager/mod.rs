// Author: Dustin Pilgrim
// License: MIT

pub mod controller;
pub mod engine;
pub mod info;
pub mod scheduler;
pub mod tracker;

use crate::core::{config::Config, error::Error, state::State};

/// The session decision engine.
///
/// Pure: it never reads a clock and never performs I/O. Every input is an
/// [`Event`](crate::core::events::Event) stamped with `now_ms`; every effect
/// is an [`Action`](crate::core::action::Action) for the runtime to execute.
#[derive(Debug, Clone)]
pub struct Manager {
    cfg: Config,
}

impl Manager {
    /// Build a manager from an already validated config.
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    pub fn try_new(cfg: Config) -> Result<Self, Error> {
        cfg.validate()?;
        Ok(Self::new(cfg))
    }

    pub fn cfg(&self) -> &Config {
        &self.cfg
    }

    /// When the runtime must deliver the next `Tick`, if ever.
    pub fn next_deadline_ms(&self, state: &State) -> Option<u64> {
        if !state.tracking() {
            return None;
        }
        state.timers().next_deadline_ms()
    }

    /// Whole seconds left until the logout deadline, rounded up.
    pub fn remaining_seconds_at(&self, state: &State, now_ms: u64) -> Option<u64> {
        let deadline = state.timers().logout()?.deadline_ms;
        Some(ceil_seconds(deadline.saturating_sub(now_ms)))
    }
}

pub(crate) fn ceil_seconds(ms: u64) -> u64 {
    ms.div_ceil(1000)
}
