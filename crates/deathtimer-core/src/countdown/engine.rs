//! Countdown state machine.
//!
//! Like the rest of the core it owns no thread: callers pass `now` into
//! every command and call [`CountdownEngine::tick`] whenever they want a
//! fresh reading. [`super::CountdownTimer`] drives it once per second.
//!
//! ```text
//! Stopped --start--> Running --stop--> Stopped
//! ```
//!
//! "Running" is exactly "has a timer start date".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CountdownReading, DisplayMode};
use crate::events::Event;
use crate::profile::Profile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownEngine {
    death_date: Option<DateTime<Utc>>,
    #[serde(default)]
    timer_start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    display_mode: DisplayMode,
}

impl CountdownEngine {
    /// A stopped engine counting toward `death_date`.
    pub fn new(death_date: Option<DateTime<Utc>>) -> Self {
        Self {
            death_date,
            timer_start_date: None,
            display_mode: DisplayMode::default(),
        }
    }

    /// Restores the persisted state; a stored start date means running.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            death_date: profile.predicted_death_date(),
            timer_start_date: profile.timer_start_date(),
            display_mode: profile.display_mode(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.timer_start_date.is_some()
    }

    pub fn death_date(&self) -> Option<DateTime<Utc>> {
        self.death_date
    }

    pub fn timer_start_date(&self) -> Option<DateTime<Utc>> {
        self.timer_start_date
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        Event::StateSnapshot {
            running: self.is_running(),
            display_mode: self.display_mode,
            timer_start_date: self.timer_start_date,
            death_date: self.death_date,
            reading: self.tick(now),
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Starts counting. No-op while running or without a predicted date.
    pub fn start(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.is_running() {
            return None;
        }
        let death_date = self.death_date?;
        self.timer_start_date = Some(now);
        tracing::info!(%now, %death_date, "countdown started");
        Some(Event::CountdownStarted { death_date, at: now })
    }

    /// Stops counting. No-op while stopped.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Option<Event> {
        let started = self.timer_start_date.take()?;
        tracing::info!(%now, "countdown stopped");
        Some(Event::CountdownStopped {
            ran_for_secs: (now - started).num_seconds(),
            at: now,
        })
    }

    /// Changes the display mode; takes effect on the next tick.
    pub fn set_display_mode(&mut self, mode: DisplayMode, now: DateTime<Utc>) -> Option<Event> {
        if mode == self.display_mode {
            return None;
        }
        let from = std::mem::replace(&mut self.display_mode, mode);
        Some(Event::DisplayModeChanged { from, to: mode, at: now })
    }

    /// Current reading, or `None` while stopped or without a predicted date.
    pub fn tick(&self, now: DateTime<Utc>) -> Option<CountdownReading> {
        if !self.is_running() {
            return None;
        }
        let death_date = self.death_date?;
        Some(CountdownReading::compute(now, death_date, self.display_mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap()
    }

    fn death() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2071, 8, 20, 0, 0, 0).unwrap()
    }

    #[test]
    fn starts_stopped() {
        let engine = CountdownEngine::new(Some(death()));
        assert!(!engine.is_running());
        assert_eq!(engine.tick(t0()), None);
    }

    #[test]
    fn start_is_idempotent() {
        let mut engine = CountdownEngine::new(Some(death()));
        assert!(matches!(engine.start(t0()), Some(Event::CountdownStarted { .. })));
        assert_eq!(engine.start(t0() + Duration::seconds(5)), None);
        assert_eq!(engine.timer_start_date(), Some(t0()));
    }

    #[test]
    fn start_without_death_date_is_noop() {
        let mut engine = CountdownEngine::new(None);
        assert_eq!(engine.start(t0()), None);
        assert!(!engine.is_running());
    }

    #[test]
    fn stop_clears_start_date() {
        let mut engine = CountdownEngine::new(Some(death()));
        engine.start(t0());
        let event = engine.stop(t0() + Duration::seconds(42));
        assert_eq!(
            event,
            Some(Event::CountdownStopped { ran_for_secs: 42, at: t0() + Duration::seconds(42) })
        );
        assert!(!engine.is_running());
        assert_eq!(engine.stop(t0()), None);
        assert_eq!(engine.tick(t0()), None);
    }

    #[test]
    fn mode_change_applies_to_next_tick() {
        let mut engine = CountdownEngine::new(Some(death()));
        engine.start(t0());
        assert!(matches!(engine.tick(t0()), Some(CountdownReading::Split(_))));

        let event = engine.set_display_mode(DisplayMode::Days, t0());
        assert!(matches!(event, Some(Event::DisplayModeChanged { to: DisplayMode::Days, .. })));
        assert_eq!(engine.set_display_mode(DisplayMode::Days, t0()), None);
        assert!(matches!(
            engine.tick(t0()),
            Some(CountdownReading::Scalar { unit: DisplayMode::Days, .. })
        ));
    }

    #[test]
    fn snapshot_reports_state() {
        let mut engine = CountdownEngine::new(Some(death()));
        engine.start(t0());
        let Event::StateSnapshot { running, reading, death_date, .. } = engine.snapshot(t0()) else {
            panic!("expected snapshot");
        };
        assert!(running);
        assert!(reading.is_some());
        assert_eq!(death_date, Some(death()));
    }
}
