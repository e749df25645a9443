//! SQLite-based profile storage.
//!
//! Provides persistent storage for:
//! - The single user profile (birth data, prediction, countdown state)
//! - The quiz answer log
//! - Key-value store for application state

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use super::{data_dir, migrations};
use crate::countdown::DisplayMode;
use crate::error::{CoreError, DatabaseError, ProfileError};
use crate::profile::{Profile, QuizResponse};

/// File name inside the data directory.
pub const DATABASE_FILE: &str = "deathtimer.db";

/// SQLite database holding the profile.
pub struct Database {
    conn: Connection,
    read_only: bool,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Open the database at `<data_dir>/deathtimer.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the database
    /// cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        Ok(Self::open_at(data_dir()?.join(DATABASE_FILE))?)
    }

    /// Open (and migrate) the database at `path`.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn, read_only: false };
        db.migrate()?;
        tracing::debug!(path = %path.display(), "opened profile database");
        Ok(db)
    }

    /// Open the default database without write access, for readers such as
    /// the widget. `None` when no database has been created yet.
    pub fn open_read_only() -> Result<Option<Self>, CoreError> {
        Ok(Self::open_read_only_at(data_dir()?.join(DATABASE_FILE))?)
    }

    /// Read-only open of `path`; never creates or migrates anything.
    pub fn open_read_only_at(path: impl AsRef<Path>) -> Result<Option<Self>, DatabaseError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| DatabaseError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        Ok(Some(Self { conn, read_only: true }))
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn, read_only: false };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        migrations::migrate(&self.conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    // ── Profile ──────────────────────────────────────────────────────

    /// Load the stored profile, if any.
    pub fn load_profile(&self) -> Result<Option<Profile>, DatabaseError> {
        if migrations::schema_version(&self.conn) < 1 {
            return Ok(None);
        }

        let row = self
            .conn
            .query_row(
                "SELECT birth_date, country, predicted_death_date, timer_start_date, display_mode, created_at
                 FROM profile WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                },
            )
            .optional()?;

        let Some((birth, country, death, start, mode, created)) = row else {
            return Ok(None);
        };

        let display_mode = mode.parse::<DisplayMode>().map_err(|_| DatabaseError::CorruptValue {
            column: "display_mode".into(),
            value: mode.clone(),
        })?;

        Ok(Some(Profile::from_stored(
            parse_timestamp("birth_date", birth)?,
            country,
            death.map(|v| parse_timestamp("predicted_death_date", v)).transpose()?,
            start.map(|v| parse_timestamp("timer_start_date", v)).transpose()?,
            display_mode,
            self.quiz_responses()?,
            parse_timestamp("created_at", created)?,
        )))
    }

    fn quiz_responses(&self) -> Result<Vec<QuizResponse>, DatabaseError> {
        if migrations::schema_version(&self.conn) < 2 {
            return Ok(Vec::new());
        }
        let mut stmt = self
            .conn
            .prepare("SELECT position, question, answer FROM quiz_responses ORDER BY position")?;
        let rows = stmt.query_map([], |row| {
            Ok(QuizResponse {
                position: row.get::<_, i64>(0)?.try_into().unwrap_or(0),
                question: row.get(1)?,
                answer: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Store a freshly created profile and its answer log.
    ///
    /// # Errors
    /// [`ProfileError::AlreadyExists`] when a profile is already stored; the
    /// prediction is written once and only [`Database::reset`] clears it.
    pub fn insert_profile(&self, profile: &Profile) -> Result<(), CoreError> {
        let tx = self.conn.unchecked_transaction()?;

        let exists: bool = tx.query_row("SELECT EXISTS(SELECT 1 FROM profile WHERE id = 1)", [], |row| {
            row.get(0)
        })?;
        if exists {
            return Err(ProfileError::AlreadyExists.into());
        }

        tx.execute(
            "INSERT INTO profile (id, birth_date, country, predicted_death_date, timer_start_date, display_mode, created_at)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                profile.birth_date().to_rfc3339(),
                profile.country(),
                profile.predicted_death_date().map(|d| d.to_rfc3339()),
                profile.timer_start_date().map(|d| d.to_rfc3339()),
                profile.display_mode().as_str(),
                profile.created_at().to_rfc3339(),
            ],
        )?;

        tx.execute("DELETE FROM quiz_responses", [])?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO quiz_responses (position, question, answer) VALUES (?1, ?2, ?3)")?;
            for response in profile.quiz_responses() {
                stmt.execute(params![response.position as i64, response.question, response.answer])?;
            }
        }
        tx.commit()?;

        tracing::info!(country = profile.country(), "profile stored");
        Ok(())
    }

    /// Record the countdown start, or clear it with `None`.
    ///
    /// A start date is only kept for a profile with a predicted date.
    pub fn set_timer_start(&self, start: Option<DateTime<Utc>>) -> Result<(), CoreError> {
        let changed = self.conn.execute(
            "UPDATE profile SET timer_start_date = ?1
             WHERE id = 1 AND (?1 IS NULL OR predicted_death_date IS NOT NULL)",
            params![start.map(|d| d.to_rfc3339())],
        )?;
        if changed == 0 && !self.has_profile()? {
            return Err(ProfileError::NotFound.into());
        }
        Ok(())
    }

    pub fn set_display_mode(&self, mode: DisplayMode) -> Result<(), CoreError> {
        let changed = self.conn.execute(
            "UPDATE profile SET display_mode = ?1 WHERE id = 1",
            params![mode.as_str()],
        )?;
        if changed == 0 {
            return Err(ProfileError::NotFound.into());
        }
        Ok(())
    }

    pub fn has_profile(&self) -> Result<bool, DatabaseError> {
        Ok(self
            .conn
            .query_row("SELECT EXISTS(SELECT 1 FROM profile WHERE id = 1)", [], |row| row.get(0))?)
    }

    /// Delete the profile and its answer log. Returns whether one existed.
    pub fn reset(&self) -> Result<bool, DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM profile", [])?;
        tx.execute("DELETE FROM quiz_responses", [])?;
        tx.commit()?;
        if removed > 0 {
            tracing::info!("profile reset");
        }
        Ok(removed > 0)
    }

    // ── Key-value ────────────────────────────────────────────────────

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        Ok(self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

fn parse_timestamp(column: &str, value: String) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(&value)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| DatabaseError::CorruptValue {
            column: column.to_string(),
            value,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::{estimate, LifestyleAnswers};
    use chrono::TimeZone;

    fn sample_profile() -> Profile {
        let birth = Utc.with_ymd_and_hms(1992, 11, 5, 0, 0, 0).unwrap();
        let est = estimate(birth, "Norway", &LifestyleAnswers::default());
        let log = vec![
            QuizResponse { position: 0, question: "What is your birthdate?".into(), answer: "1992-11-05".into() },
            QuizResponse { position: 1, question: "Which country do you live in?".into(), answer: "Norway".into() },
        ];
        Profile::from_quiz(&est, log, Utc.with_ymd_and_hms(2025, 2, 2, 12, 0, 0).unwrap())
    }

    #[test]
    fn empty_database_has_no_profile() {
        let db = Database::open_memory().unwrap();
        assert!(db.load_profile().unwrap().is_none());
        assert!(!db.has_profile().unwrap());
    }

    #[test]
    fn insert_and_load_round_trip() {
        let db = Database::open_memory().unwrap();
        let profile = sample_profile();
        db.insert_profile(&profile).unwrap();
        assert_eq!(db.load_profile().unwrap(), Some(profile));
    }

    #[test]
    fn insert_is_once() {
        let db = Database::open_memory().unwrap();
        db.insert_profile(&sample_profile()).unwrap();
        let err = db.insert_profile(&sample_profile()).unwrap_err();
        assert!(matches!(err, CoreError::Profile(ProfileError::AlreadyExists)));
    }

    #[test]
    fn timer_start_and_mode_updates() {
        let db = Database::open_memory().unwrap();
        db.insert_profile(&sample_profile()).unwrap();

        db.set_timer_start(None).unwrap();
        db.set_display_mode(DisplayMode::Hours).unwrap();
        let loaded = db.load_profile().unwrap().unwrap();
        assert!(!loaded.is_running());
        assert_eq!(loaded.display_mode(), DisplayMode::Hours);

        let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        db.set_timer_start(Some(start)).unwrap();
        assert_eq!(db.load_profile().unwrap().unwrap().timer_start_date(), Some(start));
    }

    #[test]
    fn updates_without_profile_fail() {
        let db = Database::open_memory().unwrap();
        assert!(matches!(
            db.set_timer_start(None).unwrap_err(),
            CoreError::Profile(ProfileError::NotFound)
        ));
        assert!(matches!(
            db.set_display_mode(DisplayMode::Days).unwrap_err(),
            CoreError::Profile(ProfileError::NotFound)
        ));
    }

    #[test]
    fn reset_allows_retake() {
        let db = Database::open_memory().unwrap();
        db.insert_profile(&sample_profile()).unwrap();
        assert!(db.reset().unwrap());
        assert!(!db.reset().unwrap());
        assert!(db.load_profile().unwrap().is_none());
        db.insert_profile(&sample_profile()).unwrap();
    }

    #[test]
    fn corrupt_timestamp_is_reported() {
        let db = Database::open_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO profile (id, birth_date, country, created_at) VALUES (1, 'yesterday', 'Peru', '2025-01-01T00:00:00+00:00')",
                [],
            )
            .unwrap();
        assert!(matches!(
            db.load_profile().unwrap_err(),
            DatabaseError::CorruptValue { column, .. } if column == "birth_date"
        ));
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }
}
