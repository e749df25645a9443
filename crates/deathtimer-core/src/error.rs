//! Core error types for deathtimer-core.
//!
//! Domain computations never fail (they degrade to fallbacks); these errors
//! cover the edges: quiz input validation, profile lifecycle, storage and
//! configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for deathtimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Quiz input errors
    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),

    /// Profile lifecycle errors
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A stored value could not be decoded
    #[error("Corrupt value in column '{column}': {value}")]
    CorruptValue { column: String, value: String },

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Errors raised while answering the onboarding quiz.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// Every question already has an answer.
    #[error("Quiz already complete")]
    AlreadyComplete,

    /// `finish` called before the last question was answered.
    #[error("Quiz incomplete: {answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },

    /// Birth date is not `YYYY-MM-DD`.
    #[error("Invalid birth date '{0}', expected YYYY-MM-DD")]
    InvalidBirthDate(String),

    /// Birth date lies after the current day.
    #[error("Birth date {0} is in the future")]
    BirthDateInFuture(String),

    /// Country is not in the life expectancy table.
    #[error("Unknown country '{0}'")]
    UnknownCountry(String),

    /// Answer is not one of the question's options.
    #[error("Invalid choice '{choice}' for question '{question}'")]
    InvalidChoice { question: String, choice: String },
}

/// Profile lifecycle errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// The predicted death date is written once; retaking needs a reset.
    #[error("A profile already exists; reset it before retaking the quiz")]
    AlreadyExists,

    /// No profile has been stored yet.
    #[error("No profile found; take the quiz first")]
    NotFound,
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) if e.code == rusqlite::ErrorCode::DatabaseBusy => {
                DatabaseError::Locked
            }
            rusqlite::Error::SqliteFailure(e, _msg) if e.code == rusqlite::ErrorCode::DatabaseLocked => {
                DatabaseError::Locked
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_errors_map_to_query_failed() {
        let err: DatabaseError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, DatabaseError::QueryFailed(_)));
    }

    #[test]
    fn quiz_error_messages_name_the_input() {
        let err = QuizError::InvalidChoice {
            question: "Do you smoke?".into(),
            choice: "Sometimes".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid choice 'Sometimes' for question 'Do you smoke?'"
        );
    }
}
