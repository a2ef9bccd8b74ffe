// Author: Dustin Pilgrim
// License: MIT

use chrono::{Duration as ChronoDuration, Local};

use crate::core::{
    config::Config,
    info::SessionInfo,
    state::{State, Status},
    utils::format_ms,
};

use super::{Manager, ceil_seconds};

impl Manager {
    pub fn snapshot(&self, state: &State, now_ms: u64) -> SessionInfo {
        let cfg = &self.cfg;
        let last = state.last_activity_ms();
        let since = now_ms.saturating_sub(last);

        let mut info = SessionInfo {
            status: state.status(),
            tracking: state.tracking(),
            user: state.user().map(|u| u.id.clone()),
            time_since_last_activity_ms: None,
            time_until_warning_ms: None,
            time_until_logout_ms: None,
            is_warning_active: false,
            remaining_seconds: None,
            expiry: state.expiry(),
            pretty_text: String::new(),
        };

        if state.is_expired() {
            info.time_since_last_activity_ms = Some(since);
            info.time_until_warning_ms = Some(0);
            info.time_until_logout_ms = Some(0);
            info.remaining_seconds = Some(0);
        } else if state.tracking() {
            let until_logout = last
                .saturating_add(cfg.inactivity_limit_ms)
                .saturating_sub(now_ms);
            let until_warning = last
                .saturating_add(cfg.warning_offset_ms())
                .saturating_sub(now_ms);
            let warning = state.status() == Status::Warning;

            info.time_since_last_activity_ms = Some(since);
            info.time_until_warning_ms = Some(until_warning);
            info.time_until_logout_ms = Some(until_logout);
            info.is_warning_active = warning;
            info.remaining_seconds = warning.then(|| ceil_seconds(until_logout));
        }

        info.pretty_text = render_info(cfg, &info);
        info
    }
}

pub fn render_info(cfg: &Config, info: &SessionInfo) -> String {
    let mut out = String::new();

    out.push_str("◆ SESSION\n");
    out.push_str(&format!(
        "User: {}\n",
        info.user.as_deref().unwrap_or("(none)")
    ));

    let status = match (info.status, info.tracking) {
        (Status::Expired, _) => match info.expiry {
            Some(reason) => format!("expired ({reason:?})"),
            None => "expired".to_string(),
        },
        (_, false) => "dormant".to_string(),
        (Status::Warning, true) => "warning".to_string(),
        (Status::Active, true) => "active".to_string(),
    };
    out.push_str(&format!("State: {status}\n"));

    if let Some(since) = info.time_since_last_activity_ms {
        let at = Local::now() - ChronoDuration::milliseconds(i64::try_from(since).unwrap_or(i64::MAX));
        out.push_str(&format!(
            "Last Activity: {} ago ({})\n",
            format_ms(since),
            at.format("%H:%M:%S")
        ));
    }

    if info.is_warning_active {
        if let Some(secs) = info.remaining_seconds {
            out.push_str(&format!("Logout In: {secs}s\n"));
        }
    } else if info.tracking {
        if let Some(ms) = info.time_until_warning_ms {
            out.push_str(&format!("Warning In: {}\n", format_ms(ms)));
        }
        if let Some(ms) = info.time_until_logout_ms {
            out.push_str(&format!("Logout In: {}\n", format_ms(ms)));
        }
    }

    out.push('\n');
    out.push_str(&render_config(cfg));
    out
}

/// Human-readable dump of the effective configuration.
pub fn render_config(cfg: &Config) -> String {
    let mut out = String::new();

    out.push_str("◆ CONFIGURATION\n");
    out.push_str(&format!("Inactivity Limit: {}\n", format_ms(cfg.inactivity_limit_ms)));
    out.push_str(&format!("Warning Lead: {}\n", format_ms(cfg.warning_lead_ms)));
    out.push_str(&format!("Activity Debounce: {}\n", format_ms(cfg.activity_debounce_ms)));
    out.push_str(&format!("Countdown Interval: {}ms\n", cfg.countdown_interval_ms));
    out.push_str(&format!(
        "Validity Check: every {} (on error: {})\n",
        format_ms(cfg.validity_check_interval_ms),
        cfg.validity_error_policy
    ));

    let kinds: Vec<&str> = cfg.activity_events.iter().map(|k| k.as_str()).collect();
    out.push_str(&format!("Activity Events: {}\n", kinds.join(", ")));
    out.push_str(&format!("Signed-out Route: {}\n", cfg.signed_out_route));

    if cfg.notify_on_extend {
        out.push_str(&format!("On Extend: notify \"{}\"\n", cfg.extend_message));
    } else {
        out.push_str("On Extend: silent\n");
    }

    out.trim_end().to_string()
}
