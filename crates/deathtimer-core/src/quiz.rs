//! The onboarding quiz.
//!
//! Twelve questions in fixed order: birth date, country, then the ten
//! lifestyle questions. A [`QuizSession`] walks them one at a time and,
//! once every question is answered, produces the [`Profile`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::estimator::{self, is_known_country, Estimate, LifestyleAnswers, LifestyleQuestion};
use crate::events::Event;
use crate::feedback::{Feedback, ImpactStyle};
use crate::profile::{Profile, QuizResponse};

pub const BIRTH_DATE_QUESTION: &str = "What is your birthdate?";
pub const COUNTRY_QUESTION: &str = "Which country do you live in?";
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Total number of questions.
pub const QUESTION_COUNT: usize = 2 + LifestyleQuestion::ALL.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "question", rename_all = "snake_case")]
pub enum QuestionKind {
    BirthDate,
    Country,
    Lifestyle(LifestyleQuestion),
}

impl QuestionKind {
    pub fn at(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::BirthDate),
            1 => Some(Self::Country),
            i => LifestyleQuestion::ALL.get(i - 2).copied().map(Self::Lifestyle),
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::BirthDate => BIRTH_DATE_QUESTION,
            Self::Country => COUNTRY_QUESTION,
            Self::Lifestyle(q) => q.text(),
        }
    }
}

/// A question as presented to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub index: usize,
    pub text: String,
    pub kind: QuestionKind,
    /// Empty for the birth date; sorted names for the country.
    pub options: Vec<String>,
}

impl QuizQuestion {
    pub fn at(index: usize) -> Option<Self> {
        let kind = QuestionKind::at(index)?;
        let options = match kind {
            QuestionKind::BirthDate => Vec::new(),
            QuestionKind::Country => estimator::countries().map(str::to_string).collect(),
            QuestionKind::Lifestyle(q) => q.options().iter().map(|o| o.to_string()).collect(),
        };
        Some(Self {
            index,
            text: kind.text().to_string(),
            kind,
            options,
        })
    }
}

/// The full catalog in quiz order.
pub fn questions() -> Vec<QuizQuestion> {
    (0..QUESTION_COUNT).filter_map(QuizQuestion::at).collect()
}

/// Quiz progress for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    id: String,
    started_at: DateTime<Utc>,
    current_index: usize,
    birth_date: Option<NaiveDate>,
    country: Option<String>,
    answers: LifestyleAnswers,
}

impl QuizSession {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            started_at: now,
            current_index: 0,
            birth_date: None,
            country: None,
            answers: LifestyleAnswers::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// `None` once every question is answered.
    pub fn current_question(&self) -> Option<QuizQuestion> {
        QuizQuestion::at(self.current_index)
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= QUESTION_COUNT
    }

    /// `index / (count - 1)`, capped at 1.
    pub fn progress(&self) -> f64 {
        (self.current_index as f64 / (QUESTION_COUNT - 1) as f64).min(1.0)
    }

    pub fn lifestyle_answers(&self) -> &LifestyleAnswers {
        &self.answers
    }

    /// Answers the current question and moves to the next one.
    ///
    /// `today` bounds the birth date. Choice answers accept the option text
    /// in any case or its slug.
    pub fn answer(&mut self, input: &str, today: NaiveDate, feedback: &dyn Feedback) -> Result<(), QuizError> {
        let kind = QuestionKind::at(self.current_index).ok_or(QuizError::AlreadyComplete)?;
        let input = input.trim();

        match kind {
            QuestionKind::BirthDate => {
                let date = NaiveDate::parse_from_str(input, BIRTH_DATE_FORMAT)
                    .map_err(|_| QuizError::InvalidBirthDate(input.to_string()))?;
                if date > today {
                    return Err(QuizError::BirthDateInFuture(input.to_string()));
                }
                self.birth_date = Some(date);
            }
            QuestionKind::Country => {
                let name = estimator::countries()
                    .find(|c| c.eq_ignore_ascii_case(input))
                    .ok_or_else(|| QuizError::UnknownCountry(input.to_string()))?;
                self.country = Some(name.to_string());
            }
            QuestionKind::Lifestyle(question) => {
                let label = question.match_option(input).ok_or_else(|| QuizError::InvalidChoice {
                    question: question.text().to_string(),
                    choice: input.to_string(),
                })?;
                self.answers.set_label(question, label);
                feedback.impact(ImpactStyle::Medium);
            }
        }

        self.current_index += 1;
        Ok(())
    }

    /// Steps back one question, keeping earlier answers. Returns `false` at
    /// the first question.
    pub fn back(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Answer log in question order, using the stored option text.
    pub fn responses(&self) -> Vec<QuizResponse> {
        (0..QUESTION_COUNT.min(self.current_index))
            .filter_map(|index| {
                let kind = QuestionKind::at(index)?;
                let answer = match kind {
                    QuestionKind::BirthDate => self.birth_date?.format(BIRTH_DATE_FORMAT).to_string(),
                    QuestionKind::Country => self.country.clone()?,
                    QuestionKind::Lifestyle(q) => lifestyle_label(&self.answers, q)?.to_string(),
                };
                Some(QuizResponse {
                    position: index,
                    question: kind.text().to_string(),
                    answer,
                })
            })
            .collect()
    }

    /// Runs the estimator on the collected answers.
    pub fn estimate(&self) -> Result<Estimate, QuizError> {
        let incomplete = || QuizError::Incomplete {
            answered: self.current_index.min(QUESTION_COUNT),
            total: QUESTION_COUNT,
        };
        if !self.is_complete() {
            return Err(incomplete());
        }
        let birth_date = self.birth_date.ok_or_else(incomplete)?;
        let country = self.country.as_deref().ok_or_else(incomplete)?;
        if !is_known_country(country) {
            return Err(QuizError::UnknownCountry(country.to_string()));
        }
        Ok(estimator::estimate(
            birth_date.and_time(chrono::NaiveTime::MIN).and_utc(),
            country,
            &self.answers,
        ))
    }

    /// Completes the quiz. The profile's countdown starts at `now`.
    pub fn finish(self, now: DateTime<Utc>, feedback: &dyn Feedback) -> Result<(Profile, Event), QuizError> {
        let estimate = self.estimate()?;
        let profile = Profile::from_quiz(&estimate, self.responses(), now);
        feedback.impact(ImpactStyle::Heavy);
        tracing::info!(
            session_id = %self.id,
            country = %estimate.country,
            adjusted_years = estimate.adjusted_years,
            death_date = %estimate.predicted_death_date,
            "quiz completed"
        );
        let event = Event::QuizCompleted {
            session_id: self.id,
            country: estimate.country,
            adjusted_years: estimate.adjusted_years,
            death_date: estimate.predicted_death_date,
            at: now,
        };
        Ok((profile, event))
    }
}

fn lifestyle_label(answers: &LifestyleAnswers, question: LifestyleQuestion) -> Option<&'static str> {
    answers
        .contributions()
        .into_iter()
        .find(|c| c.question == question)
        .and_then(|c| question.match_option(&c.answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{Cue, NoopFeedback, RecordingFeedback};
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap()
    }

    const JAPAN_BEST: [&str; 12] = [
        "1990-06-15",
        "Japan",
        "Male",
        "Good",
        "Daily",
        "Very healthy",
        "8+ hours",
        "Never",
        "Never",
        "Very low",
        "None",
        "Yes, many lived past 90",
    ];

    #[test]
    fn catalog_has_twelve_questions() {
        let qs = questions();
        assert_eq!(qs.len(), 12);
        assert_eq!(qs[0].text, "What is your birthdate?");
        assert!(qs[0].options.is_empty());
        assert_eq!(qs[1].options.len(), 191);
        assert_eq!(qs[2].options, vec!["Male", "Female"]);
        assert_eq!(qs[11].kind, QuestionKind::Lifestyle(LifestyleQuestion::FamilyHistory));
    }

    #[test]
    fn full_run_produces_profile() {
        let fb = RecordingFeedback::default();
        let mut session = QuizSession::new(now());
        for answer in JAPAN_BEST {
            session.answer(answer, today(), &fb).unwrap();
        }
        assert!(session.is_complete());
        assert_eq!(session.progress(), 1.0);
        assert_eq!(session.estimate().unwrap().adjusted_years, 143);

        let (profile, event) = session.finish(now(), &fb).unwrap();
        assert_eq!(
            profile.predicted_death_date(),
            Some(Utc.with_ymd_and_hms(2133, 6, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(profile.timer_start_date(), Some(now()));
        assert_eq!(profile.quiz_responses().len(), 12);
        assert_eq!(profile.quiz_responses()[1].answer, "Japan");
        assert_eq!(profile.quiz_responses()[11].answer, "Yes, many lived past 90");
        assert!(matches!(event, Event::QuizCompleted { adjusted_years: 143, .. }));

        let cues = fb.cues();
        assert_eq!(cues.len(), 11);
        assert!(cues[..10].iter().all(|c| *c == Cue::Impact(ImpactStyle::Medium)));
        assert_eq!(cues[10], Cue::Impact(ImpactStyle::Heavy));
    }

    #[test]
    fn rejects_bad_input_without_advancing() {
        let mut session = QuizSession::new(now());
        assert_eq!(
            session.answer("15/06/1990", today(), &NoopFeedback),
            Err(QuizError::InvalidBirthDate("15/06/1990".into()))
        );
        assert_eq!(
            session.answer("2030-01-01", today(), &NoopFeedback),
            Err(QuizError::BirthDateInFuture("2030-01-01".into()))
        );
        session.answer("1990-06-15", today(), &NoopFeedback).unwrap();
        assert!(matches!(
            session.answer("Atlantis", today(), &NoopFeedback),
            Err(QuizError::UnknownCountry(_))
        ));
        session.answer("japan", today(), &NoopFeedback).unwrap();
        assert!(matches!(
            session.answer("Sometimes", today(), &NoopFeedback),
            Err(QuizError::InvalidChoice { .. })
        ));
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn back_keeps_answers_and_stops_at_zero() {
        let mut session = QuizSession::new(now());
        assert!(!session.back());
        session.answer("1990-06-15", today(), &NoopFeedback).unwrap();
        session.answer("Chile", today(), &NoopFeedback).unwrap();
        session.answer("female", today(), &NoopFeedback).unwrap();
        assert!(session.back());
        session.answer("Male", today(), &NoopFeedback).unwrap();
        assert_eq!(session.lifestyle_answers().sex, Some(estimator::BiologicalSex::Male));
        assert_eq!(session.responses().len(), 3);
    }

    #[test]
    fn finish_before_complete_fails() {
        let mut session = QuizSession::new(now());
        session.answer("1990-06-15", today(), &NoopFeedback).unwrap();
        assert_eq!(
            session.finish(now(), &NoopFeedback).unwrap_err(),
            QuizError::Incomplete { answered: 1, total: 12 }
        );
    }

    #[test]
    fn answering_after_completion_fails() {
        let mut session = QuizSession::new(now());
        for answer in JAPAN_BEST {
            session.answer(answer, today(), &NoopFeedback).unwrap();
        }
        assert_eq!(
            session.answer("Male", today(), &NoopFeedback),
            Err(QuizError::AlreadyComplete)
        );
    }

    #[test]
    fn progress_is_index_over_last() {
        let mut session = QuizSession::new(now());
        assert_eq!(session.progress(), 0.0);
        session.answer("1990-06-15", today(), &NoopFeedback).unwrap();
        assert!((session.progress() - 1.0 / 11.0).abs() < 1e-12);
    }
}
