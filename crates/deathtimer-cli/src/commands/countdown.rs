use std::sync::Arc;

use chrono::Utc;
use clap::Subcommand;
use deathtimer_core::countdown::{format_interval, signed_seconds};
use deathtimer_core::{
    Config, CountdownEngine, CountdownTimer, Database, DisplayMode, Feedback, ImpactStyle,
    SystemClock, TracingFeedback,
};
use serde_json::json;

use super::{print_json, require_profile, CliResult};

#[derive(Subcommand)]
pub enum CountdownAction {
    /// Show the countdown state and current reading
    Status,
    /// Start the countdown
    Start,
    /// Stop the countdown
    Stop,
    /// Change how the remaining time is shown
    Mode {
        /// split, seconds, minutes, hours, days, months or years
        mode: DisplayMode,
    },
    /// Print a reading every tick until interrupted
    Watch {
        /// Exit after this many readings
        #[arg(long)]
        ticks: Option<u64>,
    },
}

pub fn run(action: CountdownAction) -> CliResult {
    let db = Database::open()?;
    let mut engine = CountdownEngine::from_profile(&require_profile(&db)?);
    let now = Utc::now();

    match action {
        CountdownAction::Status => {
            let remaining = engine
                .death_date()
                .filter(|_| engine.is_running())
                .map(|death| format_interval(signed_seconds(now, death) as i64));
            print_json(&json!({
                "state": engine.snapshot(now),
                "remaining": remaining,
            }))
        }
        CountdownAction::Start => {
            match engine.start(now) {
                Some(event) => {
                    db.set_timer_start(engine.timer_start_date())?;
                    TracingFeedback.impact(ImpactStyle::Heavy);
                    print_json(&event)?;
                }
                None if engine.is_running() => println!("countdown already running"),
                None => return Err("no predicted death date to count down to".into()),
            }
            Ok(())
        }
        CountdownAction::Stop => {
            match engine.stop(now) {
                Some(event) => {
                    db.set_timer_start(None)?;
                    print_json(&event)?;
                }
                None => println!("countdown not running"),
            }
            Ok(())
        }
        CountdownAction::Mode { mode } => {
            if let Some(event) = engine.set_display_mode(mode, now) {
                db.set_display_mode(mode)?;
                TracingFeedback.selection();
                print_json(&event)?;
            } else {
                println!("display mode already {mode}");
            }
            Ok(())
        }
        CountdownAction::Watch { ticks } => {
            if ticks == Some(0) {
                return Err("ticks must be greater than zero".into());
            }
            let period = Config::load_or_default().tick_interval();
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(watch(db, engine, period, ticks))
        }
    }
}

async fn watch(
    db: Database,
    engine: CountdownEngine,
    period: std::time::Duration,
    ticks: Option<u64>,
) -> CliResult {
    let mut timer = CountdownTimer::with_period(engine, Arc::new(SystemClock), period);
    let mut readings = timer.subscribe();
    if let Some(event) = timer.start() {
        db.set_timer_start(timer.engine().timer_start_date())?;
        print_json(&event)?;
    }
    if !timer.is_ticking() {
        return Err("no predicted death date to count down to".into());
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut printed = 0u64;
    loop {
        tokio::select! {
            changed = readings.changed() => {
                if changed.is_err() {
                    break;
                }
                let Some(reading) = readings.borrow_and_update().clone() else {
                    continue;
                };
                println!("{}", serde_json::to_string(&reading)?);
                printed += 1;
                if ticks.is_some_and(|limit| printed >= limit) {
                    break;
                }
            }
            _ = &mut ctrl_c => break,
        }
    }
    tracing::debug!(printed, "watch finished");
    Ok(())
}
