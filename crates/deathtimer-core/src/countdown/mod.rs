//! Countdown to the predicted date of death.
//!
//! Two distinct arithmetics live here and are kept apart on purpose:
//!
//! - **split** mode decomposes the remaining interval with calendar rules
//!   (see [`crate::calendar::CalendarDelta`]);
//! - every other mode divides the raw signed seconds by a fixed ratio
//!   (a year is 365.25 days, a month 30.44 days).
//!
//! The two can disagree by days over long intervals.

mod engine;
mod format;
mod timer;

pub use engine::CountdownEngine;
pub use format::{approximate_years, format_interval, welcome_message};
pub use timer::CountdownTimer;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDelta;

pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const SECONDS_PER_MONTH: f64 = 30.44 * SECONDS_PER_DAY;
pub const SECONDS_PER_YEAR: f64 = 365.25 * SECONDS_PER_DAY;

/// How the remaining time is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Split,
    Years,
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 7] = [
        Self::Split,
        Self::Years,
        Self::Months,
        Self::Days,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Split => "split",
            Self::Years => "years",
            Self::Months => "months",
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }

    /// Capitalized name for pickers and unit captions.
    pub fn label(self) -> &'static str {
        match self {
            Self::Split => "Split",
            Self::Years => "Years",
            Self::Months => "Months",
            Self::Days => "Days",
            Self::Hours => "Hours",
            Self::Minutes => "Minutes",
            Self::Seconds => "Seconds",
        }
    }

    /// Length of one unit in seconds; `None` for split mode.
    pub fn seconds_per_unit(self) -> Option<f64> {
        match self {
            Self::Split => None,
            Self::Years => Some(SECONDS_PER_YEAR),
            Self::Months => Some(SECONDS_PER_MONTH),
            Self::Days => Some(SECONDS_PER_DAY),
            Self::Hours => Some(SECONDS_PER_HOUR),
            Self::Minutes => Some(SECONDS_PER_MINUTE),
            Self::Seconds => Some(1.0),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown display mode '{s}' (expected one of: {})",
                    Self::ALL.map(|m| m.as_str()).join(", ")
                )
            })
    }
}

/// One recomputation of the remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CountdownReading {
    /// Calendar fields, all negative once the date has passed.
    Split(CalendarDelta),
    /// Remaining time in a single unit.
    Scalar { unit: DisplayMode, value: f64 },
}

impl CountdownReading {
    /// Computes the reading for `mode`.
    pub fn compute(now: DateTime<Utc>, death_date: DateTime<Utc>, mode: DisplayMode) -> Self {
        match mode.seconds_per_unit() {
            None => Self::Split(CalendarDelta::between(now, death_date)),
            Some(unit_secs) => Self::Scalar {
                unit: mode,
                value: signed_seconds(now, death_date) / unit_secs,
            },
        }
    }

    /// Scalar value truncated toward zero, as a counter shows it.
    pub fn whole_value(&self) -> Option<i64> {
        match self {
            Self::Split(_) => None,
            Self::Scalar { value, .. } => Some(value.trunc() as i64),
        }
    }
}

/// Signed seconds from `now` to `target`, millisecond precision.
pub fn signed_seconds(now: DateTime<Utc>, target: DateTime<Utc>) -> f64 {
    (target - now).num_milliseconds() as f64 / 1_000.0
}
