//! Database schema migrations for deathtimer.
//!
//! Migrations are versioned, additive only, and applied automatically when
//! the database is opened for writing. The `schema_version` table tracks the
//! current migration version.

use rusqlite::{Connection, Result as SqliteResult};

/// Current schema version.
///
/// Increment this when adding new migrations.
pub const SCHEMA_VERSION: i32 = 2;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if a migration statement fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Current schema version, 0 for a fresh database.
pub fn schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| row.get::<_, i32>(0))
        .unwrap_or_else(|e| {
            if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                tracing::warn!(error = %e, "failed to read schema_version");
            }
            0
        })
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Migration v1: profile row and key-value store.
///
/// `id` is pinned to 1 so the table holds at most one profile.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS profile (
            id                   INTEGER PRIMARY KEY CHECK (id = 1),
            birth_date           TEXT NOT NULL,
            country              TEXT NOT NULL,
            predicted_death_date TEXT,
            timer_start_date     TEXT,
            display_mode         TEXT NOT NULL DEFAULT 'split',
            created_at           TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS kv (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;
    set_schema_version(&tx, 1)?;
    tx.commit()?;
    tracing::debug!("applied schema migration v1");
    Ok(())
}

/// Migration v2: quiz answer log.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS quiz_responses (
            position INTEGER PRIMARY KEY,
            question TEXT NOT NULL,
            answer   TEXT NOT NULL
        );",
    )?;
    set_schema_version(&tx, 2)?;
    tx.commit()?;
    tracing::debug!("applied schema migration v2");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_fresh_database() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert_eq!(schema_version(&conn), SCHEMA_VERSION);

        let stmt = conn
            .prepare("SELECT birth_date, country, predicted_death_date, timer_start_date, display_mode, created_at FROM profile")
            .unwrap();
        drop(stmt);
        let stmt = conn.prepare("SELECT position, question, answer FROM quiz_responses").unwrap();
        drop(stmt);
    }

    #[test]
    fn test_migrate_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();
        assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    }

    #[test]
    fn test_incremental_migration() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema_version_table(&conn).unwrap();
        migrate_v1(&conn).unwrap();
        conn.execute(
            "INSERT INTO profile (id, birth_date, country, created_at) VALUES (1, '1990-01-01T00:00:00+00:00', 'Peru', '2025-01-01T00:00:00+00:00')",
            [],
        )
        .unwrap();
        assert_eq!(schema_version(&conn), 1);

        migrate(&conn).unwrap();
        assert_eq!(schema_version(&conn), 2);

        let country: String = conn
            .query_row("SELECT country FROM profile WHERE id = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(country, "Peru");
    }

    #[test]
    fn test_single_profile_row() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO profile (id, birth_date, country, created_at) VALUES (2, 'x', 'y', 'z')",
            [],
        );
        assert!(result.is_err());
    }
}
