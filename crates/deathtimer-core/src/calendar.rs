//! Gregorian calendar arithmetic on UTC instants.
//!
//! Month and year steps clamp the day of month (Jan 31 + 1 month = Feb 28
//! or 29); day and smaller steps are fixed-length. All differences are
//! whole-field and signed: the larger unit is taken first and only its
//! remainder feeds the next one.

use chrono::{DateTime, Datelike, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// Shifts `t` by a signed number of calendar months, clamping the day.
///
/// Returns `None` when the result falls outside chrono's range.
pub fn shift_months(t: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        t.checked_add_months(magnitude)
    } else {
        t.checked_sub_months(magnitude)
    }
}

/// Shifts `t` by a signed number of calendar years.
pub fn shift_years(t: DateTime<Utc>, years: i64) -> Option<DateTime<Utc>> {
    shift_months(t, years.checked_mul(12)?)
}

/// Whole calendar days from `from` to `to`, truncated toward zero.
pub fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days()
}

/// Whole calendar months from `from` to `to`, truncated toward zero.
pub fn whole_months_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    month_anchor(from, to).map(|(months, _)| months).unwrap_or(0)
}

/// Largest signed month count `m` such that `from + m months` does not pass
/// `to`, together with that anchor instant.
fn month_anchor(from: DateTime<Utc>, to: DateTime<Utc>) -> Option<(i64, DateTime<Utc>)> {
    let forward = to >= from;
    let passes = |anchor: DateTime<Utc>| if forward { anchor > to } else { anchor < to };

    // Landing in `to`'s own month is either exact or one month too far.
    let mut months = (i64::from(to.year()) - i64::from(from.year())) * 12
        + (i64::from(to.month()) - i64::from(from.month()));
    let mut anchor = shift_months(from, months)?;
    if passes(anchor) {
        months += if forward { -1 } else { 1 };
        anchor = shift_months(from, months)?;
    }
    Some((months, anchor))
}

/// Field-by-field calendar difference between two instants.
///
/// All fields share the sign of the overall interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDelta {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CalendarDelta {
    /// Decomposes the interval from `from` to `to`. Sub-second precision is
    /// dropped.
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        let (total_months, anchor) = month_anchor(from, to).unwrap_or((0, from));
        let sign = if to >= from { 1 } else { -1 };

        let rest = if sign > 0 { to - anchor } else { anchor - to };
        let secs = rest.num_seconds();

        Self {
            years: total_months / 12,
            months: total_months % 12,
            days: sign * (secs / 86_400),
            hours: sign * (secs % 86_400 / 3_600),
            minutes: sign * (secs % 3_600 / 60),
            seconds: sign * (secs % 60),
        }
    }

    /// Total calendar months (`years * 12 + months`).
    pub fn total_months(&self) -> i64 {
        self.years * 12 + self.months
    }

    /// Fixed-length part (days and smaller) as a duration.
    pub fn clock_part(&self) -> Duration {
        Duration::days(self.days)
            + Duration::hours(self.hours)
            + Duration::minutes(self.minutes)
            + Duration::seconds(self.seconds)
    }

    /// Adds the delta to `t`: calendar months first, then the fixed part.
    pub fn apply_to(&self, t: DateTime<Utc>) -> Option<DateTime<Utc>> {
        shift_months(t, self.total_months())?.checked_add_signed(self.clock_part())
    }

    /// True when every field is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// True when the interval runs backwards (target already passed).
    pub fn is_negative(&self) -> bool {
        [self.years, self.months, self.days, self.hours, self.minutes, self.seconds]
            .iter()
            .any(|v| *v < 0)
    }
}
