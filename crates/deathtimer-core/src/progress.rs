//! How much of the predicted lifespan has elapsed.
//!
//! Day counts are whole calendar days. `months_lived_approx` divides days
//! by 30, while the dot grid counts whole calendar months; the two are
//! reported side by side and are not reconciled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{whole_days_between, whole_months_between};

/// Grid width on the statistics screen.
pub const STATS_GRID_COLUMNS: usize = 20;
/// Grid width on the large widget.
pub const WIDGET_GRID_COLUMNS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeProgress {
    pub total_days: i64,
    pub days_lived: i64,
    pub days_remaining: i64,
    /// NaN or infinite when `total_days` is zero; see [`Self::is_defined`].
    pub percentage_lived: f64,
    pub percentage_remaining: f64,
    pub weeks_lived: i64,
    pub months_lived_approx: i64,
    /// Calendar months from birth to the predicted date.
    pub total_months: i64,
    /// Calendar months from birth to now.
    pub months_lived: i64,
}

impl LifeProgress {
    pub fn compute(birth_date: DateTime<Utc>, death_date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total_days = whole_days_between(birth_date, death_date);
        let days_lived = whole_days_between(birth_date, now);
        let percentage_lived = 100.0 * days_lived as f64 / total_days as f64;

        Self {
            total_days,
            days_lived,
            days_remaining: total_days - days_lived,
            percentage_lived,
            percentage_remaining: 100.0 - percentage_lived,
            weeks_lived: days_lived / 7,
            months_lived_approx: days_lived / 30,
            total_months: whole_months_between(birth_date, death_date),
            months_lived: whole_months_between(birth_date, now),
        }
    }

    /// False when the span is empty and the percentages are meaningless.
    pub fn is_defined(&self) -> bool {
        self.total_days != 0 && self.percentage_lived.is_finite()
    }

    /// Percentage lived clamped to `0..=100`, or `None` when undefined.
    pub fn clamped_percentage_lived(&self) -> Option<f64> {
        self.is_defined().then(|| self.percentage_lived.clamp(0.0, 100.0))
    }

    pub fn dot_grid(&self, columns: usize) -> DotGrid {
        DotGrid::new(self.total_months, self.months_lived, columns)
    }

    /// Caption such as `"412 / 1020 months"`. Uses the unclamped count, so
    /// it can exceed the total past the predicted date.
    pub fn month_caption(&self) -> String {
        format!("{} / {} months", self.months_lived, self.total_months)
    }

    pub fn statistics(&self) -> LifeStatistics {
        LifeStatistics::for_days(self.days_lived)
    }
}

/// One cell per calendar month of the predicted lifespan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotGrid {
    pub total: usize,
    pub filled: usize,
    pub columns: usize,
}

impl DotGrid {
    /// Negative totals give an empty grid; `filled` never exceeds `total`.
    pub fn new(total_months: i64, months_lived: i64, columns: usize) -> Self {
        let total = usize::try_from(total_months).unwrap_or(0);
        let filled = usize::try_from(months_lived).unwrap_or(0).min(total);
        Self {
            total,
            filled,
            columns: columns.max(1),
        }
    }

    pub fn rows(&self) -> usize {
        self.total.div_ceil(self.columns)
    }

    /// Cell `index` is filled when that month has elapsed.
    pub fn is_filled(&self, index: usize) -> bool {
        index < self.filled
    }

    /// Text rendering, one string per row.
    pub fn render(&self, filled: char, empty: char) -> Vec<String> {
        (0..self.rows())
            .map(|row| {
                let start = row * self.columns;
                let end = (start + self.columns).min(self.total);
                (start..end)
                    .map(|i| if self.is_filled(i) { filled } else { empty })
                    .collect()
            })
            .collect()
    }
}

/// Rough lifetime counters, extrapolated from days lived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeStatistics {
    pub heartbeats: i64,
    pub breaths: i64,
    pub hours_slept: i64,
    pub meals: i64,
}

impl LifeStatistics {
    const MINUTES_PER_DAY: i64 = 24 * 60;

    pub fn for_days(days_lived: i64) -> Self {
        Self {
            heartbeats: days_lived.saturating_mul(Self::MINUTES_PER_DAY * 80),
            breaths: days_lived.saturating_mul(Self::MINUTES_PER_DAY * 12),
            hours_slept: days_lived.saturating_mul(8),
            meals: days_lived.saturating_mul(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn birth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap()
    }

    fn death() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2070, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn zero_at_birth_hundred_at_death() {
        let start = LifeProgress::compute(birth(), death(), birth());
        assert_eq!(start.percentage_lived, 0.0);
        assert_eq!(start.percentage_remaining, 100.0);

        let end = LifeProgress::compute(birth(), death(), death());
        assert_eq!(end.percentage_lived, 100.0);
        assert_eq!(end.days_remaining, 0);
        assert_eq!(end.months_lived, end.total_months);
    }

    #[test]
    fn derived_counts() {
        let now = Utc.with_ymd_and_hms(1990, 3, 15, 12, 0, 0).unwrap();
        let p = LifeProgress::compute(birth(), death(), now);
        assert_eq!(p.days_lived, 73);
        assert_eq!(p.weeks_lived, 10);
        assert_eq!(p.months_lived_approx, 2);
        assert_eq!(p.months_lived, 2);
        assert_eq!(p.total_months, 960);
    }

    #[test]
    fn zero_span_is_undefined() {
        let p = LifeProgress::compute(birth(), birth(), birth());
        assert!(p.percentage_lived.is_nan());
        assert!(!p.is_defined());
        assert_eq!(p.clamped_percentage_lived(), None);
    }

    #[test]
    fn past_death_exceeds_hundred() {
        let now = Utc.with_ymd_and_hms(2080, 1, 1, 0, 0, 0).unwrap();
        let p = LifeProgress::compute(birth(), death(), now);
        assert!(p.percentage_lived > 100.0);
        assert!(p.days_remaining < 0);
        assert_eq!(p.clamped_percentage_lived(), Some(100.0));
        assert_eq!(p.dot_grid(20).filled, 960);
        assert_eq!(p.months_lived, 1080);
        assert_eq!(p.month_caption(), "1080 / 960 months");
    }

    #[test]
    fn day_counts_add_up_at_mid_day() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let p = LifeProgress::compute(birth(), death(), now);
        assert_eq!(p.total_days, 29_220);
        assert_eq!(p.days_lived, 12_935);
        assert_eq!(p.days_remaining, 29_220 - 12_935);
        assert_eq!(p.days_lived + p.days_remaining, p.total_days);
    }

    #[test]
    fn grid_layout() {
        let grid = DotGrid::new(41, 5, 20);
        assert_eq!(grid.rows(), 3);
        assert!(grid.is_filled(4));
        assert!(!grid.is_filled(5));
        let rows = grid.render('#', '.');
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], format!("{}{}", "#".repeat(5), ".".repeat(15)));
        assert_eq!(rows[2], ".");
    }

    #[test]
    fn negative_total_gives_empty_grid() {
        let grid = DotGrid::new(-24, 10, 16);
        assert_eq!(grid.total, 0);
        assert_eq!(grid.filled, 0);
        assert_eq!(grid.rows(), 0);
        assert!(grid.render('#', '.').is_empty());
    }

    #[test]
    fn statistics_rates() {
        let stats = LifeStatistics::for_days(10);
        assert_eq!(stats.heartbeats, 10 * 1440 * 80);
        assert_eq!(stats.breaths, 10 * 1440 * 12);
        assert_eq!(stats.hours_slept, 80);
        assert_eq!(stats.meals, 30);
    }
}
