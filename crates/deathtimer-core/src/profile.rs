//! The single stored user profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::countdown::DisplayMode;
use crate::estimator::Estimate;

/// One answered quiz question, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResponse {
    pub position: usize,
    pub question: String,
    pub answer: String,
}

/// Birth data, the fixed prediction and the countdown state.
///
/// Built once from a completed quiz or loaded from storage. The predicted
/// date has no setter; retaking the quiz means a new profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    birth_date: DateTime<Utc>,
    country: String,
    predicted_death_date: Option<DateTime<Utc>>,
    timer_start_date: Option<DateTime<Utc>>,
    display_mode: DisplayMode,
    quiz_responses: Vec<QuizResponse>,
    created_at: DateTime<Utc>,
}

impl Profile {
    /// Profile for a just-completed quiz; the countdown starts at `now`.
    pub fn from_quiz(estimate: &Estimate, quiz_responses: Vec<QuizResponse>, now: DateTime<Utc>) -> Self {
        Self {
            birth_date: estimate.birth_date,
            country: estimate.country.clone(),
            predicted_death_date: Some(estimate.predicted_death_date),
            timer_start_date: Some(now),
            display_mode: DisplayMode::default(),
            quiz_responses,
            created_at: now,
        }
    }

    /// Rebuilds a stored profile. A start date without a predicted date is
    /// dropped.
    pub(crate) fn from_stored(
        birth_date: DateTime<Utc>,
        country: String,
        predicted_death_date: Option<DateTime<Utc>>,
        timer_start_date: Option<DateTime<Utc>>,
        display_mode: DisplayMode,
        quiz_responses: Vec<QuizResponse>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            birth_date,
            country,
            timer_start_date: predicted_death_date.and(timer_start_date),
            predicted_death_date,
            display_mode,
            quiz_responses,
            created_at,
        }
    }

    pub fn birth_date(&self) -> DateTime<Utc> {
        self.birth_date
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn predicted_death_date(&self) -> Option<DateTime<Utc>> {
        self.predicted_death_date
    }

    pub fn timer_start_date(&self) -> Option<DateTime<Utc>> {
        self.timer_start_date
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn quiz_responses(&self) -> &[QuizResponse] {
        &self.quiz_responses
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_running(&self) -> bool {
        self.timer_start_date.is_some()
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }
}
