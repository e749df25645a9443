use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::countdown::{CountdownReading, DisplayMode};

/// Every state change in the system produces an Event.
/// Front ends print or forward them; the ticker publishes readings separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CountdownStarted {
        death_date: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    CountdownStopped {
        /// Seconds between the start and this stop.
        ran_for_secs: i64,
        at: DateTime<Utc>,
    },
    DisplayModeChanged {
        from: DisplayMode,
        to: DisplayMode,
        at: DateTime<Utc>,
    },
    QuizCompleted {
        session_id: String,
        country: String,
        adjusted_years: i32,
        death_date: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        running: bool,
        display_mode: DisplayMode,
        timer_start_date: Option<DateTime<Utc>>,
        death_date: Option<DateTime<Utc>>,
        /// `None` while stopped or without a predicted date.
        reading: Option<CountdownReading>,
        at: DateTime<Utc>,
    },
}
