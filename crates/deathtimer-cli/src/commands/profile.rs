use clap::Subcommand;
use deathtimer_core::{Database, Feedback, NotificationKind, Profile, TracingFeedback};
use serde::Serialize;
use serde_json::json;

use super::quiz::LAST_SESSION_KEY;
use super::{print_json, require_profile, CliResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the stored profile and quiz answers
    Show,
    /// Delete the stored profile so the quiz can be taken again
    Reset,
}

#[derive(Serialize)]
struct ProfileView {
    #[serde(flatten)]
    profile: Profile,
    running: bool,
    last_quiz_session: Option<String>,
}

pub fn run(action: ProfileAction) -> CliResult {
    let db = Database::open()?;
    match action {
        ProfileAction::Show => {
            let profile = require_profile(&db)?;
            print_json(&ProfileView {
                running: profile.is_running(),
                profile,
                last_quiz_session: db.kv_get(LAST_SESSION_KEY)?,
            })
        }
        ProfileAction::Reset => {
            let removed = db.reset()?;
            if removed {
                TracingFeedback.notification(NotificationKind::Warning);
            }
            print_json(&json!({ "reset": removed }))
        }
    }
}
