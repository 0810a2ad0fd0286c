//! Ambient app/session state: time-of-day phase, device class, and the
//! last-interaction timestamp the idle behaviors key off.

use atlas_core::time::{Clock, TimeOfDay};

#[derive(Debug)]
pub struct AppState {
    time_of_day: TimeOfDay,
    is_mobile: bool,
    is_initialized: bool,
    last_interaction_ms: u64,
}

impl AppState {
    pub fn new(clock: &dyn Clock) -> Self {
        Self {
            time_of_day: TimeOfDay::from_hour(clock.local_hour()),
            is_mobile: false,
            is_initialized: false,
            last_interaction_ms: clock.now_ms(),
        }
    }

    pub fn set_mobile(&mut self, mobile: bool) {
        self.is_mobile = mobile;
    }

    pub fn set_initialized(&mut self, initialized: bool) {
        self.is_initialized = initialized;
    }

    /// Record user activity (any interaction event).
    pub fn touch_interaction(&mut self, clock: &dyn Clock) {
        self.last_interaction_ms = clock.now_ms();
    }

    /// Apply a background-cycle phase change.
    pub fn set_time_of_day(&mut self, phase: TimeOfDay) {
        self.time_of_day = phase;
    }

    /// Re-classify from the clock's current hour. Returns the new phase
    /// when it changed.
    pub fn refresh_time_of_day(&mut self, clock: &dyn Clock) -> Option<TimeOfDay> {
        let phase = TimeOfDay::from_hour(clock.local_hour());
        if phase != self.time_of_day {
            self.time_of_day = phase;
            Some(phase)
        } else {
            None
        }
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    pub fn is_mobile(&self) -> bool {
        self.is_mobile
    }

    pub fn is_initialized(&self) -> bool {
        self.is_initialized
    }

    pub fn last_interaction_ms(&self) -> u64 {
        self.last_interaction_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::time::ManualClock;
    use pretty_assertions::assert_eq;

    #[test]
    fn tracks_interaction_time() {
        let clock = ManualClock::new(1_000, 12);
        let mut app = AppState::new(&clock);
        assert_eq!(app.time_of_day(), TimeOfDay::Midday);
        assert_eq!(app.last_interaction_ms(), 1_000);

        clock.advance(5_000);
        app.touch_interaction(&clock);
        assert_eq!(app.last_interaction_ms(), 6_000);
    }

    #[test]
    fn refresh_reports_phase_changes_only() {
        let clock = ManualClock::new(0, 12);
        let mut app = AppState::new(&clock);

        assert_eq!(app.refresh_time_of_day(&clock), None);
        clock.set_hour(20);
        assert_eq!(app.refresh_time_of_day(&clock), Some(TimeOfDay::Dusk));
        assert_eq!(app.time_of_day(), TimeOfDay::Dusk);
    }
}
