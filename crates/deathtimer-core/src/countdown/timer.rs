//! Periodic driver for [`CountdownEngine`].
//!
//! Owns at most one tokio task that recomputes the reading every period
//! and publishes it on a watch channel. The engine sits behind a mutex
//! so commands issued between ticks are seen by the next recompute.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{CountdownEngine, CountdownReading, DisplayMode};
use crate::clock::Clock;
use crate::events::Event;

/// Default recompute period.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

pub struct CountdownTimer {
    engine: Arc<Mutex<CountdownEngine>>,
    clock: Arc<dyn Clock>,
    period: Duration,
    readings: watch::Sender<Option<CountdownReading>>,
    recomputes: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl CountdownTimer {
    pub fn new(engine: CountdownEngine, clock: Arc<dyn Clock>) -> Self {
        Self::with_period(engine, clock, DEFAULT_TICK_PERIOD)
    }

    /// A zero period is treated as one millisecond.
    pub fn with_period(engine: CountdownEngine, clock: Arc<dyn Clock>, period: Duration) -> Self {
        let (readings, _) = watch::channel(None);
        Self {
            engine: Arc::new(Mutex::new(engine)),
            clock,
            period: period.max(Duration::from_millis(1)),
            readings,
            recomputes: Arc::new(AtomicU64::new(0)),
            task: None,
        }
    }

    /// Receiver for the latest reading; `None` until the first tick.
    pub fn subscribe(&self) -> watch::Receiver<Option<CountdownReading>> {
        self.readings.subscribe()
    }

    /// Copy of the engine state.
    pub fn engine(&self) -> CountdownEngine {
        lock(&self.engine).clone()
    }

    pub fn is_ticking(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// How many times the reading has been recomputed.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes.load(Ordering::Relaxed)
    }

    /// Starts the engine if needed and makes sure exactly one periodic task
    /// runs. An engine restored in the running state just resumes ticking.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> Option<Event> {
        let event = lock(&self.engine).start(self.clock.now());
        if !lock(&self.engine).is_running() || self.is_ticking() {
            return event;
        }

        let engine = Arc::clone(&self.engine);
        let clock = Arc::clone(&self.clock);
        let readings = self.readings.clone();
        let recomputes = Arc::clone(&self.recomputes);
        let period = self.period;

        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                recompute(&engine, clock.as_ref(), &readings, &recomputes);
            }
        }));
        tracing::debug!(period_ms = period.as_millis() as u64, "countdown ticker spawned");
        event
    }

    /// Stops the engine and aborts the periodic task. Second call is a no-op.
    pub fn stop(&mut self) -> Option<Event> {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("countdown ticker aborted");
        }
        let event = lock(&self.engine).stop(self.clock.now());
        self.readings.send_replace(None);
        event
    }

    /// Changes the display mode and republishes right away when ticking.
    pub fn set_display_mode(&self, mode: DisplayMode) -> Option<Event> {
        let event = lock(&self.engine).set_display_mode(mode, self.clock.now());
        if event.is_some() && self.is_ticking() {
            recompute(&self.engine, self.clock.as_ref(), &self.readings, &self.recomputes);
        }
        event
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn recompute(
    engine: &Mutex<CountdownEngine>,
    clock: &dyn Clock,
    readings: &watch::Sender<Option<CountdownReading>>,
    recomputes: &AtomicU64,
) {
    let reading = lock(engine).tick(clock.now());
    readings.send_replace(reading);
    recomputes.fetch_add(1, Ordering::Relaxed);
}

fn lock(engine: &Mutex<CountdownEngine>) -> MutexGuard<'_, CountdownEngine> {
    engine.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()))
    }

    fn engine() -> CountdownEngine {
        CountdownEngine::new(Some(Utc.with_ymd_and_hms(2070, 1, 1, 0, 0, 0).unwrap()))
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_first_reading_immediately() {
        let mut timer = CountdownTimer::new(engine(), clock());
        let rx = timer.subscribe();
        assert!(timer.start().is_some());
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(matches!(*rx.borrow(), Some(CountdownReading::Split(_))));
        assert!(timer.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn no_task_without_death_date() {
        let mut timer = CountdownTimer::new(CountdownEngine::new(None), clock());
        assert_eq!(timer.start(), None);
        assert!(!timer.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn mode_change_republishes() {
        let mut timer = CountdownTimer::new(engine(), clock());
        let rx = timer.subscribe();
        timer.start();
        tokio::time::sleep(Duration::from_millis(10)).await;
        timer.set_display_mode(DisplayMode::Seconds);
        assert!(matches!(
            *rx.borrow(),
            Some(CountdownReading::Scalar { unit: DisplayMode::Seconds, .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_clears_published_reading() {
        let mut timer = CountdownTimer::new(engine(), clock());
        let rx = timer.subscribe();
        timer.start();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(timer.stop().is_some());
        assert!(rx.borrow().is_none());
        assert!(!timer.is_ticking());
        assert_eq!(timer.stop(), None);
    }
}
