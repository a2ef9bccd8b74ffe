// Author: Dustin Pilgrim
// License: MIT

/// A one-shot deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneShot {
    pub deadline_ms: u64,
}

impl OneShot {
    pub fn at(deadline_ms: u64) -> Self {
        Self { deadline_ms }
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.deadline_ms
    }
}

/// A repeating timer; `next_ms` is the next firing instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub next_ms: u64,
    pub period_ms: u64,
}

impl Interval {
    pub fn starting_at(next_ms: u64, period_ms: u64) -> Self {
        Self {
            next_ms,
            period_ms: period_ms.max(1),
        }
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.next_ms
    }

    /// Move `next_ms` past `now_ms`, skipping missed periods.
    pub fn advance_past(&mut self, now_ms: u64) {
        if now_ms < self.next_ms {
            return;
        }
        let missed = (now_ms - self.next_ms) / self.period_ms + 1;
        self.next_ms = self
            .next_ms
            .saturating_add(missed.saturating_mul(self.period_ms));
    }
}

/// The scheduler's three timer slots.
///
/// Each slot holds at most one armed timer; arming replaces, never stacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerSet {
    warning: Option<OneShot>,
    logout: Option<OneShot>,
    countdown: Option<Interval>,

    // Bumped on every cancel/re-arm so observers can tell generations apart.
    epoch: u64,
}

impl TimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel_all(&mut self) {
        self.warning = None;
        self.logout = None;
        self.countdown = None;
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Cancel everything, then arm warning and logout relative to `base_ms`.
    pub fn rearm(&mut self, base_ms: u64, warning_offset_ms: u64, limit_ms: u64) {
        self.cancel_all();
        self.warning = Some(OneShot::at(base_ms.saturating_add(warning_offset_ms)));
        self.logout = Some(OneShot::at(base_ms.saturating_add(limit_ms)));
    }

    pub fn start_countdown(&mut self, first_tick_ms: u64, period_ms: u64) {
        self.countdown = Some(Interval::starting_at(first_tick_ms, period_ms));
    }

    pub fn clear_warning(&mut self) {
        self.warning = None;
    }

    pub fn warning(&self) -> Option<OneShot> {
        self.warning
    }

    pub fn logout(&self) -> Option<OneShot> {
        self.logout
    }

    pub fn countdown(&self) -> Option<Interval> {
        self.countdown
    }

    pub fn countdown_mut(&mut self) -> Option<&mut Interval> {
        self.countdown.as_mut()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn armed_count(&self) -> usize {
        usize::from(self.warning.is_some())
            + usize::from(self.logout.is_some())
            + usize::from(self.countdown.is_some())
    }

    pub fn is_idle(&self) -> bool {
        self.armed_count() == 0
    }

    /// Earliest instant at which any armed timer wants attention.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        [
            self.warning.map(|t| t.deadline_ms),
            self.logout.map(|t| t.deadline_ms),
            self.countdown.map(|t| t.next_ms),
        ]
        .into_iter()
        .flatten()
        .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearm_replaces_previous_generation() {
        let mut t = TimerSet::new();
        t.rearm(0, 90_000, 120_000);
        t.start_countdown(91_000, 1000);
        let first_epoch = t.epoch();

        t.rearm(50_000, 90_000, 120_000);

        assert_eq!(t.armed_count(), 2);
        assert_eq!(t.countdown(), None);
        assert_eq!(t.warning(), Some(OneShot::at(140_000)));
        assert_eq!(t.logout(), Some(OneShot::at(170_000)));
        assert!(t.epoch() > first_epoch);
    }

    #[test]
    fn rearm_near_the_end_of_time_saturates() {
        let mut t = TimerSet::new();
        t.rearm(u64::MAX - 5, 90_000, 120_000);
        assert_eq!(t.logout(), Some(OneShot::at(u64::MAX)));
        assert_eq!(t.warning(), Some(OneShot::at(u64::MAX)));

        let mut iv = Interval::starting_at(u64::MAX - 10, 1000);
        iv.advance_past(u64::MAX - 1);
        assert_eq!(iv.next_ms, u64::MAX);
    }

    #[test]
    fn interval_skips_missed_periods() {
        let mut iv = Interval::starting_at(1000, 1000);
        iv.advance_past(1000);
        assert_eq!(iv.next_ms, 2000);

        iv.advance_past(4500);
        assert_eq!(iv.next_ms, 5000);

        iv.advance_past(100);
        assert_eq!(iv.next_ms, 5000);
    }

    #[test]
    fn next_deadline_is_minimum_of_armed() {
        let mut t = TimerSet::new();
        assert_eq!(t.next_deadline_ms(), None);

        t.rearm(0, 90_000, 120_000);
        assert_eq!(t.next_deadline_ms(), Some(90_000));

        t.clear_warning();
        t.start_countdown(91_000, 1000);
        assert_eq!(t.next_deadline_ms(), Some(91_000));

        t.cancel_all();
        assert!(t.is_idle());
    }
}
