use chrono::Utc;
use clap::{Args, Subcommand};
use deathtimer_core::countdown::{signed_seconds, welcome_message};
use deathtimer_core::estimator::LIFE_EXPECTANCY;
use deathtimer_core::quiz::{self, QuizSession};
use deathtimer_core::{Config, Database, Estimate, Event, TracingFeedback};
use serde::Serialize;

use super::{print_json, CliResult};

/// kv key holding the id of the quiz that produced the stored profile.
pub const LAST_SESSION_KEY: &str = "last_quiz_session";

#[derive(Subcommand)]
pub enum QuizAction {
    /// List the quiz questions and their options
    Questions,
    /// List countries with their base life expectancy
    Countries,
    /// Answer the quiz, store the profile and start the countdown
    Take(AnswerArgs),
    /// Show the estimate for a set of answers without storing anything
    Estimate(AnswerArgs),
}

/// Answers accept the option text (any case) or its short form,
/// e.g. `--exercise 3-4-weekly` or `--exercise "3-4 times a week"`.
#[derive(Args)]
pub struct AnswerArgs {
    /// Birth date as YYYY-MM-DD
    #[arg(long)]
    birth_date: String,
    /// Country of residence
    #[arg(long)]
    country: String,
    /// Biological sex (male, female)
    #[arg(long)]
    sex: String,
    /// Overall health (excellent, good, fair, poor)
    #[arg(long)]
    health: String,
    /// Exercise frequency (daily, 3-4-weekly, 1-2-weekly, rarely)
    #[arg(long)]
    exercise: String,
    /// Diet (very-healthy, moderately-healthy, somewhat-unhealthy, very-unhealthy)
    #[arg(long)]
    diet: String,
    /// Sleep per night (8-plus, 6-7, 4-5, under-4)
    #[arg(long)]
    sleep: String,
    /// Smoking (never, occasionally, regularly, heavy)
    #[arg(long)]
    smoking: String,
    /// Alcohol (never, occasionally, weekly, daily)
    #[arg(long)]
    alcohol: String,
    /// Stress level (very-low, moderate, high, very-high)
    #[arg(long)]
    stress: String,
    /// Chronic conditions (none, one, two, three-plus)
    #[arg(long)]
    conditions: String,
    /// Family longevity (many-past-90, most-past-80, average, below-average)
    #[arg(long)]
    family_history: String,
}

impl AnswerArgs {
    /// Answers in quiz order.
    fn in_order(&self) -> [&str; quiz::QUESTION_COUNT] {
        [
            &self.birth_date,
            &self.country,
            &self.sex,
            &self.health,
            &self.exercise,
            &self.diet,
            &self.sleep,
            &self.smoking,
            &self.alcohol,
            &self.stress,
            &self.conditions,
            &self.family_history,
        ]
    }

    fn session(&self) -> Result<QuizSession, Box<dyn std::error::Error>> {
        let now = Utc::now();
        let today = now.date_naive();
        let mut session = QuizSession::new(now);
        for answer in self.in_order() {
            session.answer(answer, today, &TracingFeedback)?;
        }
        Ok(session)
    }
}

#[derive(Serialize)]
struct EstimateReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<Event>,
    estimate: &'a Estimate,
    summary: String,
}

#[derive(Serialize)]
struct CountryRow {
    country: &'static str,
    base_years: i32,
}

pub fn run(action: QuizAction) -> CliResult {
    match action {
        QuizAction::Questions => print_json(&quiz::questions()),
        QuizAction::Countries => {
            let rows: Vec<CountryRow> = LIFE_EXPECTANCY
                .iter()
                .map(|&(country, base_years)| CountryRow { country, base_years })
                .collect();
            print_json(&rows)
        }
        QuizAction::Estimate(args) => {
            let estimate = args.session()?.estimate()?;
            let summary = welcome_message(signed_seconds(Utc::now(), estimate.predicted_death_date));
            print_json(&EstimateReport { event: None, estimate: &estimate, summary })
        }
        QuizAction::Take(args) => {
            let session = args.session()?;
            let estimate = session.estimate()?;
            let db = Database::open()?;
            let config = Config::load_or_default();

            let now = Utc::now();
            let (mut profile, event) = session.finish(now, &TracingFeedback)?;
            profile.set_display_mode(config.countdown.default_display_mode);
            db.insert_profile(&profile)?;
            if let Event::QuizCompleted { session_id, .. } = &event {
                db.kv_set(LAST_SESSION_KEY, session_id)?;
            }

            let summary = welcome_message(signed_seconds(now, estimate.predicted_death_date));
            print_json(&EstimateReport { event: Some(event), estimate: &estimate, summary })
        }
    }
}
