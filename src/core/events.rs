// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::auth::User;

/// Interaction classes that count as user activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    PointerDown,
    PointerMove,
    KeyDown,
    Scroll,
    TouchStart,
    Click,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 6] = [
        ActivityKind::PointerDown,
        ActivityKind::PointerMove,
        ActivityKind::KeyDown,
        ActivityKind::Scroll,
        ActivityKind::TouchStart,
        ActivityKind::Click,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::PointerDown => "pointer_down",
            ActivityKind::PointerMove => "pointer_move",
            ActivityKind::KeyDown => "key_down",
            ActivityKind::Scroll => "scroll",
            ActivityKind::TouchStart => "touch_start",
            ActivityKind::Click => "click",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('-', "_");
        ActivityKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == norm)
            .or(match norm.as_str() {
                "mousedown" | "mouse_down" => Some(ActivityKind::PointerDown),
                "mousemove" | "mouse_move" => Some(ActivityKind::PointerMove),
                "keypress" | "key_press" | "keydown" => Some(ActivityKind::KeyDown),
                "touchstart" => Some(ActivityKind::TouchStart),
                _ => None,
            })
            .ok_or_else(|| s.trim().to_string())
    }
}

/// Result of one server-side validity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidityOutcome {
    Valid,
    Invalid,
    /// The check itself failed (transport error etc).
    CheckFailed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Tick {
        now_ms: u64,
    },

    UserActivity {
        kind: ActivityKind,
        now_ms: u64,
    },

    /// Explicit "stay signed in" from the warning UI.
    Extend {
        now_ms: u64,
    },

    /// Logout requested by the user.
    ManualLogout {
        now_ms: u64,
    },

    /// Authenticated user appeared, changed, or went away.
    UserChanged {
        user: Option<User>,
        now_ms: u64,
    },

    /// Result of a validity check started during session `generation`.
    ValidityChecked {
        outcome: ValidityOutcome,
        generation: u64,
        now_ms: u64,
    },
}

impl Event {
    pub fn now_ms(&self) -> u64 {
        match self {
            Event::Tick { now_ms }
            | Event::UserActivity { now_ms, .. }
            | Event::Extend { now_ms }
            | Event::ManualLogout { now_ms }
            | Event::UserChanged { now_ms, .. }
            | Event::ValidityChecked { now_ms, .. } => *now_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_kind_accepts_snake_kebab_and_dom_names() {
        assert_eq!("pointer_down".parse::<ActivityKind>(), Ok(ActivityKind::PointerDown));
        assert_eq!("touch-start".parse::<ActivityKind>(), Ok(ActivityKind::TouchStart));
        assert_eq!(" Scroll ".parse::<ActivityKind>(), Ok(ActivityKind::Scroll));
        assert_eq!("mousemove".parse::<ActivityKind>(), Ok(ActivityKind::PointerMove));
        assert_eq!("keypress".parse::<ActivityKind>(), Ok(ActivityKind::KeyDown));
        assert_eq!("hover".parse::<ActivityKind>(), Err("hover".to_string()));
    }
}
