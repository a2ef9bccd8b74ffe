// Author: Dustin Pilgrim
// License: MIT

use eyre::{Result, eyre};
use rune_cfg::RuneConfig;

use crate::core::config::{Config, ValidityErrorPolicy};
use crate::core::error::ConfigError;
use crate::core::events::ActivityKind;

/// Parses the `session:` block into an effective [`Config`].
///
/// Missing keys keep their defaults; snake_case and kebab-case spellings
/// are both accepted.
pub fn parse_session_config(config: &RuneConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Ok(secs) = config
        .get::<u64>("session.inactivity_limit_seconds")
        .or_else(|_| config.get::<u64>("session.inactivity-limit-seconds"))
    {
        cfg.inactivity_limit_ms = seconds_to_ms("session.inactivity_limit_seconds", secs)?;
    }

    if let Ok(secs) = config
        .get::<u64>("session.warning_lead_seconds")
        .or_else(|_| config.get::<u64>("session.warning-lead-seconds"))
    {
        cfg.warning_lead_ms = seconds_to_ms("session.warning_lead_seconds", secs)?;
    }

    if let Ok(secs) = config
        .get::<u64>("session.activity_debounce_seconds")
        .or_else(|_| config.get::<u64>("session.activity-debounce-seconds"))
    {
        cfg.activity_debounce_ms = seconds_to_ms("session.activity_debounce_seconds", secs)?;
    }

    if let Ok(secs) = config
        .get::<u64>("session.validity_check_seconds")
        .or_else(|_| config.get::<u64>("session.validity-check-seconds"))
    {
        cfg.validity_check_interval_ms = seconds_to_ms("session.validity_check_seconds", secs)?;
    }

    if let Ok(ms) = config
        .get::<u64>("session.countdown_interval_ms")
        .or_else(|_| config.get::<u64>("session.countdown-interval-ms"))
    {
        cfg.countdown_interval_ms = ms;
    }

    if let Ok(route) = config
        .get::<String>("session.signed_out_route")
        .or_else(|_| config.get::<String>("session.signed-out-route"))
    {
        let route = route.trim();
        if !route.is_empty() {
            cfg.signed_out_route = route.to_string();
        }
    }

    if let Ok(v) = config
        .get::<bool>("session.notify_on_extend")
        .or_else(|_| config.get::<bool>("session.notify-on-extend"))
    {
        cfg.notify_on_extend = v;
    }

    if let Ok(msg) = config
        .get::<String>("session.extend_message")
        .or_else(|_| config.get::<String>("session.extend-message"))
    {
        cfg.extend_message = msg;
    }

    if let Ok(policy) = config
        .get::<String>("session.on_validity_error")
        .or_else(|_| config.get::<String>("session.on-validity-error"))
    {
        cfg.validity_error_policy = policy
            .parse::<ValidityErrorPolicy>()
            .map_err(|e| eyre!("session.on_validity_error: {e}"))?;
    }

    if let Ok(events) = config
        .get::<Vec<String>>("session.activity_events")
        .or_else(|_| config.get::<Vec<String>>("session.activity-events"))
    {
        cfg.activity_events = parse_activity_events(&events)
            .map_err(|e| eyre!("session.activity_events: {e}"))?;
    }

    cfg.validate().map_err(|e| eyre!("invalid session config: {e}"))?;

    Ok(cfg)
}

fn seconds_to_ms(key: &str, secs: u64) -> Result<u64> {
    secs.checked_mul(1000)
        .ok_or_else(|| eyre!("{key}: {secs} seconds is out of range"))
}

/// Parse and de-duplicate activity event names, keeping file order.
pub fn parse_activity_events(names: &[String]) -> Result<Vec<ActivityKind>, ConfigError> {
    let mut out: Vec<ActivityKind> = Vec::new();

    for name in names {
        let kind = name
            .parse::<ActivityKind>()
            .map_err(ConfigError::UnknownActivityKind)?;
        if !out.contains(&kind) {
            out.push(kind);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn activity_events_keep_order_and_drop_duplicates() {
        let kinds = parse_activity_events(&names(&["click", "key-down", "click", "scroll"])).unwrap();
        assert_eq!(
            kinds,
            vec![ActivityKind::Click, ActivityKind::KeyDown, ActivityKind::Scroll]
        );
    }

    #[test]
    fn unknown_activity_event_is_an_error() {
        assert_eq!(
            parse_activity_events(&names(&["click", " hover "])),
            Err(ConfigError::UnknownActivityKind("hover".to_string()))
        );
    }

    #[test]
    fn oversized_seconds_are_an_error_not_a_panic() {
        assert_eq!(seconds_to_ms("session.warning_lead_seconds", 300).unwrap(), 300_000);

        let err = seconds_to_ms("session.inactivity_limit_seconds", u64::MAX / 10).unwrap_err();
        assert!(err.to_string().contains("session.inactivity_limit_seconds"));
    }
}
