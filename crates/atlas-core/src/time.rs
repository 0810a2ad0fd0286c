//! Clocks and the ambient time-of-day cycle.
//!
//! All stateful components take time as plain milliseconds through the
//! `Clock` trait so tests can fast-forward; only `SystemClock` touches
//! the real wall clock.

use chrono::Timelike;
use serde::Serialize;
use std::cell::Cell;
use std::fmt;

/// Injectable time source.
pub trait Clock {
    /// Monotonic-enough milliseconds used for cooldowns and fade timing.
    fn now_ms(&self) -> u64;
    /// Local wall-clock hour (0–23) for the time-of-day background.
    fn local_hour(&self) -> u32;
}

/// Real wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }

    fn local_hour(&self) -> u32 {
        chrono::Local::now().hour()
    }
}

/// Test clock with settable time.
#[derive(Debug)]
pub struct ManualClock {
    ms: Cell<u64>,
    hour: Cell<u32>,
}

impl ManualClock {
    pub fn new(ms: u64, hour: u32) -> Self {
        Self {
            ms: Cell::new(ms),
            hour: Cell::new(hour),
        }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.ms.set(self.ms.get() + delta_ms);
    }

    pub fn set_hour(&self, hour: u32) {
        self.hour.set(hour);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.ms.get()
    }

    fn local_hour(&self) -> u32 {
        self.hour.get()
    }
}

// ─── Time of day ─────────────────────────────────────────────────────────

/// Eight-phase day cycle driving the ambient background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeOfDay {
    Dawn,
    Morning,
    Midday,
    Afternoon,
    Evening,
    Dusk,
    Night,
    LateNight,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..7 => TimeOfDay::Dawn,
            7..11 => TimeOfDay::Morning,
            11..15 => TimeOfDay::Midday,
            15..17 => TimeOfDay::Afternoon,
            17..19 => TimeOfDay::Evening,
            19..21 => TimeOfDay::Dusk,
            2..5 => TimeOfDay::LateNight,
            _ => TimeOfDay::Night, // 21–23 and 0–1
        }
    }

    /// Kebab-case token, e.g. `late-night` (used as a style class).
    pub fn as_token(&self) -> &'static str {
        match self {
            TimeOfDay::Dawn => "dawn",
            TimeOfDay::Morning => "morning",
            TimeOfDay::Midday => "midday",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Dusk => "dusk",
            TimeOfDay::Night => "night",
            TimeOfDay::LateNight => "late-night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Periodic background refresh (default: once a minute).
#[derive(Debug)]
pub struct BackgroundCycle {
    update_interval_ms: u64,
    last_refresh_ms: u64,
    current: TimeOfDay,
}

impl BackgroundCycle {
    pub const DEFAULT_INTERVAL_MS: u64 = 60_000;

    pub fn new(clock: &dyn Clock, update_interval_ms: u64) -> Self {
        Self {
            update_interval_ms,
            last_refresh_ms: clock.now_ms(),
            current: TimeOfDay::from_hour(clock.local_hour()),
        }
    }

    pub fn current(&self) -> TimeOfDay {
        self.current
    }

    /// Re-classify when the interval has elapsed. Returns the new phase
    /// when it changed.
    pub fn tick(&mut self, clock: &dyn Clock) -> Option<TimeOfDay> {
        let now = clock.now_ms();
        if now.saturating_sub(self.last_refresh_ms) < self.update_interval_ms {
            return None;
        }
        self.last_refresh_ms = now;
        let phase = TimeOfDay::from_hour(clock.local_hour());
        if phase != self.current {
            log::debug!("time-of-day: {} -> {}", self.current, phase);
            self.current = phase;
            Some(phase)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hour_boundaries() {
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Dawn);
        assert_eq!(TimeOfDay::from_hour(10), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Midday);
        assert_eq!(TimeOfDay::from_hour(16), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(18), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(20), TimeOfDay::Dusk);
        assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(1), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(3), TimeOfDay::LateNight);
    }

    #[test]
    fn cycle_refreshes_on_interval_only() {
        let clock = ManualClock::new(0, 12);
        let mut cycle = BackgroundCycle::new(&clock, 60_000);
        assert_eq!(cycle.current(), TimeOfDay::Midday);

        // Hour changes, but the interval hasn't elapsed yet.
        clock.set_hour(18);
        clock.advance(30_000);
        assert_eq!(cycle.tick(&clock), None);
        assert_eq!(cycle.current(), TimeOfDay::Midday);

        clock.advance(30_000);
        assert_eq!(cycle.tick(&clock), Some(TimeOfDay::Evening));
        assert_eq!(cycle.current(), TimeOfDay::Evening);
    }
}
