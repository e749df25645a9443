pub mod completions;
pub mod config;
pub mod countdown;
pub mod profile;
pub mod quiz;
pub mod stats;
pub mod widget;

use deathtimer_core::{Database, Profile, ProfileError};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// The stored profile, or an error telling the user to take the quiz.
pub fn require_profile(db: &Database) -> Result<Profile, Box<dyn std::error::Error>> {
    Ok(db.load_profile()?.ok_or(ProfileError::NotFound)?)
}
