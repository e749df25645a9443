//! Home-screen widget content.
//!
//! Derived from the stored profile alone. Widgets always show calendar
//! (split) fields regardless of the chosen display mode.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDelta;
use crate::profile::Profile;
use crate::progress::{DotGrid, LifeProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetFamily {
    Small,
    Medium,
    Large,
}

impl fmt::Display for WidgetFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        })
    }
}

impl FromStr for WidgetFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(format!("unknown widget size '{other}' (expected small, medium or large)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum WidgetContent {
    NoData,
    Small {
        title: String,
        years: i64,
        months: i64,
        days: i64,
    },
    Medium {
        title: String,
        years: i64,
        months: i64,
        days: i64,
        hours: i64,
    },
    Large {
        title: String,
        grid: DotGrid,
        caption: String,
    },
}

pub const COUNTDOWN_TITLE: &str = "Time Left";
pub const PROGRESS_TITLE: &str = "Life Progress";

impl WidgetContent {
    /// Builds the content for `family`; `NoData` without a predicted date.
    pub fn render(profile: Option<&Profile>, family: WidgetFamily, now: DateTime<Utc>, grid_columns: usize) -> Self {
        let Some((profile, death_date)) =
            profile.and_then(|p| p.predicted_death_date().map(|d| (p, d)))
        else {
            return Self::NoData;
        };

        match family {
            WidgetFamily::Small => {
                let delta = CalendarDelta::between(now, death_date);
                Self::Small {
                    title: COUNTDOWN_TITLE.to_string(),
                    years: delta.years,
                    months: delta.months,
                    days: delta.days,
                }
            }
            WidgetFamily::Medium => {
                let delta = CalendarDelta::between(now, death_date);
                Self::Medium {
                    title: COUNTDOWN_TITLE.to_string(),
                    years: delta.years,
                    months: delta.months,
                    days: delta.days,
                    hours: delta.hours,
                }
            }
            WidgetFamily::Large => {
                let progress = LifeProgress::compute(profile.birth_date(), death_date, now);
                Self::Large {
                    title: PROGRESS_TITLE.to_string(),
                    grid: progress.dot_grid(grid_columns),
                    caption: progress.month_caption(),
                }
            }
        }
    }
}
