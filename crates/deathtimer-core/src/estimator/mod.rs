//! Life expectancy estimator.
//!
//! Maps a birth date, a country and the ten lifestyle answers to a predicted
//! date of death:
//!
//! 1. base years from the country table ([`DEFAULT_LIFE_EXPECTANCY`] when the
//!    country is unlisted),
//! 2. plus the fixed adjustment of every answered question,
//! 3. added as calendar years to the birth date.
//!
//! The adjusted value is not clamped; extreme answers can put the predicted
//! date before the birth date. The estimate is meant to be computed once,
//! when the quiz completes, and stored.

mod answers;
mod table;

pub use answers::{
    Alcohol, BiologicalSex, Choice, ChronicConditions, Contribution, Diet, Exercise,
    FamilyLongevity, LifestyleAnswers, LifestyleQuestion, OverallHealth, Sleep, Smoking, Stress,
    UnknownChoice,
};
pub use table::{
    base_life_expectancy, countries, is_known_country, DEFAULT_LIFE_EXPECTANCY, LIFE_EXPECTANCY,
};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar;

/// Result of an estimate, with the breakdown that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    pub country: String,
    pub base_years: i32,
    /// True when the country was not in the table.
    pub base_is_fallback: bool,
    pub contributions: Vec<Contribution>,
    pub adjusted_years: i32,
    pub birth_date: DateTime<Utc>,
    pub predicted_death_date: DateTime<Utc>,
}

/// Computes the full estimate.
pub fn estimate(birth_date: DateTime<Utc>, country: &str, answers: &LifestyleAnswers) -> Estimate {
    let (base_years, base_is_fallback) = match base_life_expectancy(country) {
        Some(years) => (years, false),
        None => {
            tracing::debug!(country, "country not in table, using default base");
            (DEFAULT_LIFE_EXPECTANCY, true)
        }
    };

    let contributions = answers.contributions();
    let adjusted_years = base_years + contributions.iter().map(|c| c.years).sum::<i32>();

    Estimate {
        country: country.to_string(),
        base_years,
        base_is_fallback,
        contributions,
        adjusted_years,
        birth_date,
        predicted_death_date: add_years(birth_date, adjusted_years),
    }
}

/// Computes only the predicted date of death.
pub fn predicted_death_date(
    birth_date: DateTime<Utc>,
    country: &str,
    answers: &LifestyleAnswers,
) -> DateTime<Utc> {
    estimate(birth_date, country, answers).predicted_death_date
}

/// Adds whole calendar years to `birth_date`.
///
/// Falls back to 365-day years if the calendar step is out of range, and
/// to `birth_date` itself if even that overflows.
pub fn add_years(birth_date: DateTime<Utc>, years: i32) -> DateTime<Utc> {
    if let Some(date) = calendar::shift_years(birth_date, i64::from(years)) {
        return date;
    }

    tracing::warn!(years, %birth_date, "calendar year addition failed, using 365-day years");
    Duration::try_seconds(i64::from(years) * 365 * 86_400)
        .and_then(|offset| birth_date.checked_add_signed(offset))
        .unwrap_or(birth_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn birth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1990, 6, 15, 0, 0, 0).unwrap()
    }

    #[test]
    fn neutral_answers_use_base_only() {
        let est = estimate(birth(), "Japan", &LifestyleAnswers::default());
        assert_eq!(est.base_years, 85);
        assert!(!est.base_is_fallback);
        assert!(est.contributions.is_empty());
        assert_eq!(est.adjusted_years, 85);
        assert_eq!(est.predicted_death_date, Utc.with_ymd_and_hms(2075, 6, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn unknown_country_falls_back_to_75() {
        let est = estimate(birth(), "Narnia", &LifestyleAnswers::default());
        assert_eq!(est.base_years, 75);
        assert!(est.base_is_fallback);
        assert_eq!(est.predicted_death_date, Utc.with_ymd_and_hms(2065, 6, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn female_adds_eight_years() {
        let answers = LifestyleAnswers {
            sex: Some(BiologicalSex::Female),
            ..Default::default()
        };
        let est = estimate(birth(), "Narnia", &answers);
        assert_eq!(est.adjusted_years, 83);
        assert_eq!(est.contributions.len(), 1);
        assert_eq!(est.contributions[0].question, LifestyleQuestion::Sex);
    }

    #[test]
    fn no_floor_on_adjusted_years() {
        let answers = LifestyleAnswers {
            sex: Some(BiologicalSex::Male),
            health: Some(OverallHealth::Poor),
            exercise: Some(Exercise::Rarely),
            diet: Some(Diet::VeryUnhealthy),
            sleep: Some(Sleep::UnderFour),
            smoking: Some(Smoking::Heavy),
            alcohol: Some(Alcohol::Daily),
            stress: Some(Stress::VeryHigh),
            conditions: Some(ChronicConditions::ThreeOrMore),
            family_history: Some(FamilyLongevity::BelowAverage),
        };
        // Sierra Leone: 54 - 82
        let est = estimate(birth(), "Sierra Leone", &answers);
        assert_eq!(est.adjusted_years, -28);
        assert!(est.predicted_death_date < est.birth_date);
        assert_eq!(est.predicted_death_date, Utc.with_ymd_and_hms(1962, 6, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn leap_day_birth_clamps() {
        let leap = Utc.with_ymd_and_hms(2000, 2, 29, 0, 0, 0).unwrap();
        assert_eq!(add_years(leap, 75), Utc.with_ymd_and_hms(2075, 2, 28, 0, 0, 0).unwrap());
        assert_eq!(add_years(leap, 76), Utc.with_ymd_and_hms(2076, 2, 29, 0, 0, 0).unwrap());
    }

    #[test]
    fn out_of_range_years_do_not_panic() {
        let result = add_years(birth(), i32::MAX);
        assert_eq!(result, birth());
    }
}
