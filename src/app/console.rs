// Author: Dustin Pilgrim
// License: MIT

use sessionwatch::{ActivityKind, ExpiryReason, SessionHost};

pub const HELP: &str = "\
commands:
  activity <kind>   pointer_down | pointer_move | key_down | scroll | touch_start | click
  extend            stay signed in
  logout            sign out now
  info [--json]     show session state
  revoke            invalidate the session server-side
  signin <name>     sign in (or switch) user
  signout           sign out elsewhere (stops tracking, no expiry)
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCmd {
    Activity(ActivityKind),
    Extend,
    Logout,
    Info { json: bool },
    Revoke,
    SignIn(String),
    SignOut,
    Help,
    Quit,
}

/// Parse one stdin line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCmd>, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = parts.collect();

    let cmd = match (word, rest.as_slice()) {
        ("activity", [kind]) => ConsoleCmd::Activity(
            kind.parse::<ActivityKind>()
                .map_err(|bad| format!("unknown activity kind '{bad}'"))?,
        ),
        ("activity", _) => return Err("usage: activity <kind>".to_string()),
        ("extend", []) => ConsoleCmd::Extend,
        ("logout", []) => ConsoleCmd::Logout,
        ("info", []) => ConsoleCmd::Info { json: false },
        ("info", ["--json"]) => ConsoleCmd::Info { json: true },
        ("revoke", []) => ConsoleCmd::Revoke,
        ("signin", [name]) => ConsoleCmd::SignIn(name.to_string()),
        ("signin", _) => return Err("usage: signin <name>".to_string()),
        ("signout", []) => ConsoleCmd::SignOut,
        ("help" | "?", _) => ConsoleCmd::Help,
        ("quit" | "exit", []) => ConsoleCmd::Quit,
        _ => return Err(format!("unknown command '{}' (try 'help')", line.trim())),
    };

    Ok(Some(cmd))
}

/// Host that renders callbacks as plain stdout lines.
pub struct ConsoleHost;

impl SessionHost for ConsoleHost {
    fn show_warning(&self, remaining_seconds: u64) {
        println!("[warning] you will be signed out in {remaining_seconds}s (type 'extend' to stay)");
    }

    fn update_countdown(&self, remaining_seconds: u64) {
        println!("[countdown] {remaining_seconds}s");
    }

    fn hide_warning(&self) {
        println!("[warning] dismissed");
    }

    fn notify(&self, message: &str) {
        println!("[notice] {message}");
    }

    fn clear_local_session(&self) {
        println!("[session] local data cleared");
    }

    fn redirect(&self, route: &str) {
        println!("[redirect] {route}");
    }

    fn on_expired(&self, reason: ExpiryReason) {
        let why = match reason {
            ExpiryReason::IdleTimeout => "inactivity",
            ExpiryReason::Revoked => "session revoked",
            ExpiryReason::Manual => "logout",
        };
        println!("[session] expired ({why})");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(
            parse_line("activity key-down"),
            Ok(Some(ConsoleCmd::Activity(ActivityKind::KeyDown)))
        );
        assert_eq!(
            parse_line("info --json"),
            Ok(Some(ConsoleCmd::Info { json: true }))
        );
        assert_eq!(
            parse_line("signin bo"),
            Ok(Some(ConsoleCmd::SignIn("bo".to_string())))
        );
        assert_eq!(parse_line("quit"), Ok(Some(ConsoleCmd::Quit)));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_line("activity hover").is_err());
        assert!(parse_line("signin").is_err());
        assert!(parse_line("extend now").is_err());
        assert!(parse_line("dance").is_err());
    }
}
