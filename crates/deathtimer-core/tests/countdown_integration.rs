//! Integration tests for the countdown engine and its ticker.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, TimeZone, Utc};
use deathtimer_core::countdown::{format_interval, signed_seconds};
use deathtimer_core::{
    CalendarDelta, Clock, CountdownEngine, CountdownReading, CountdownTimer, DisplayMode, Event,
    FixedClock,
};
use proptest::prelude::*;

fn death() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2064, 2, 29, 0, 0, 0).unwrap()
}

fn running_engine(now: DateTime<Utc>, mode: DisplayMode) -> CountdownEngine {
    let mut engine = CountdownEngine::new(Some(death()));
    engine.set_display_mode(mode, now);
    engine.start(now);
    engine
}

#[test]
fn test_seconds_mode_at_and_before_death() {
    let at = running_engine(death(), DisplayMode::Seconds);
    assert_eq!(
        at.tick(death()),
        Some(CountdownReading::Scalar { unit: DisplayMode::Seconds, value: 0.0 })
    );

    let before = death() - Duration::hours(1);
    let engine = running_engine(before, DisplayMode::Seconds);
    assert_eq!(
        engine.tick(before),
        Some(CountdownReading::Scalar { unit: DisplayMode::Seconds, value: 3600.0 })
    );
}

#[test]
fn test_every_mode_goes_negative_after_death() {
    let after = death() + Duration::days(400);
    for mode in DisplayMode::ALL {
        let engine = running_engine(after, mode);
        match engine.tick(after).unwrap() {
            CountdownReading::Split(delta) => {
                assert!(delta.is_negative());
                assert_eq!(delta.years, -1);
            }
            CountdownReading::Scalar { value, .. } => assert!(value < 0.0, "{mode}"),
        }
    }
}

#[test]
fn test_split_at_death_is_zero() {
    let engine = running_engine(death(), DisplayMode::Split);
    assert_eq!(engine.tick(death()), Some(CountdownReading::Split(CalendarDelta::default())));
}

#[test]
fn test_interval_text_matches_signed_seconds() {
    let now = death() - Duration::seconds(90_061);
    assert_eq!(format_interval(signed_seconds(now, death()) as i64), "1 days, 1 hrs, 1 mins, 1 sec");
}

proptest! {
    #[test]
    fn prop_split_reapplied_reaches_death_date(offset_secs in -3_000_000_000i64..3_000_000_000i64) {
        let now = death() - Duration::seconds(offset_secs);
        let engine = running_engine(now, DisplayMode::Split);
        let Some(CountdownReading::Split(delta)) = engine.tick(now) else {
            return Err(TestCaseError::fail("expected a split reading"));
        };
        prop_assert_eq!(delta.apply_to(now), Some(death()));
        prop_assert!(delta.months.abs() < 12);
        prop_assert!(delta.hours.abs() < 24);
        prop_assert!(delta.minutes.abs() < 60);
        prop_assert!(delta.seconds.abs() < 60);
    }

    #[test]
    fn prop_seconds_mode_is_raw_difference(offset_secs in -3_000_000_000i64..3_000_000_000i64) {
        let now = death() - Duration::seconds(offset_secs);
        let engine = running_engine(now, DisplayMode::Seconds);
        prop_assert_eq!(
            engine.tick(now),
            Some(CountdownReading::Scalar { unit: DisplayMode::Seconds, value: offset_secs as f64 })
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_double_start_keeps_one_ticker() {
    let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
    let mut timer = CountdownTimer::new(CountdownEngine::new(Some(death())), clock.clone());

    assert!(matches!(timer.start(), Some(Event::CountdownStarted { .. })));
    assert_eq!(timer.start(), None);
    assert!(timer.is_ticking());

    // One task ticks at t = 0, 1, ..., 5 s; two tasks would double that.
    tokio::time::sleep(StdDuration::from_millis(5_500)).await;
    let ticks = timer.recompute_count();
    assert_eq!(ticks, 6);

    assert!(matches!(timer.stop(), Some(Event::CountdownStopped { .. })));
    assert_eq!(timer.stop(), None);
    tokio::time::sleep(StdDuration::from_secs(5)).await;
    assert_eq!(timer.recompute_count(), ticks);
    assert!(!timer.is_ticking());
}

#[tokio::test(start_paused = true)]
async fn test_ticker_follows_clock() {
    let t0 = death() - Duration::seconds(100);
    let clock = Arc::new(FixedClock::new(t0));
    let mut engine = CountdownEngine::new(Some(death()));
    engine.set_display_mode(DisplayMode::Seconds, t0);
    let mut timer = CountdownTimer::new(engine, clock.clone());
    let mut rx = timer.subscribe();

    timer.start();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().and_then(|r| r.whole_value()), Some(100));

    clock.advance(Duration::seconds(40));
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().and_then(|r| r.whole_value()), Some(60));
    assert_eq!(clock.now(), t0 + Duration::seconds(40));
}

#[tokio::test(start_paused = true)]
async fn test_restored_running_engine_resumes_ticking() {
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let mut engine = CountdownEngine::new(Some(death()));
    engine.start(now - Duration::days(30));

    let mut timer = CountdownTimer::new(engine, Arc::new(FixedClock::new(now)));
    assert_eq!(timer.start(), None);
    assert!(timer.is_ticking());
    assert_eq!(timer.engine().timer_start_date(), Some(now - Duration::days(30)));
}
