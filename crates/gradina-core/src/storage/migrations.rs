//! Database schema migrations for gradina.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use indoc::indoc;
use rusqlite::{Connection, Result as SqliteResult};

/// Current schema version.
///
/// Increment this when adding new migrations.
pub const SCHEMA_VERSION: i32 = 2;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    if current_version < SCHEMA_VERSION {
        tracing::info!(from = current_version, to = SCHEMA_VERSION, "database migrated");
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

/// Returns 0 if no version is set (initial database).
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
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

/// Migration v1: profiles, the message library, and the append-only history.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(indoc! {"
        CREATE TABLE IF NOT EXISTS profiles (
            id               TEXT PRIMARY KEY,
            display_name     TEXT NOT NULL DEFAULT '',
            total_xp         INTEGER NOT NULL DEFAULT 0 CHECK (total_xp >= 0),
            streak_count     INTEGER NOT NULL DEFAULT 0 CHECK (streak_count >= 0),
            last_active_date TEXT,
            created_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS messages (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            content    TEXT NOT NULL,
            category   TEXT NOT NULL,
            is_active  INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS history (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id         TEXT NOT NULL,
            message_id      INTEGER NOT NULL,
            recipient_label TEXT NOT NULL DEFAULT '',
            action          TEXT NOT NULL,
            xp_awarded      INTEGER NOT NULL,
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_messages_active_category ON messages(is_active, category);
        CREATE INDEX IF NOT EXISTS idx_history_user_created ON history(user_id, created_at);
        CREATE INDEX IF NOT EXISTS idx_history_message ON history(message_id);
    "})?;

    set_schema_version(&tx, 1)?;
    tx.commit()
}

/// Migration v2: favorites and beneficiaries.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(indoc! {"
        CREATE TABLE IF NOT EXISTS favorites (
            user_id    TEXT NOT NULL,
            message_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            PRIMARY KEY (user_id, message_id)
        );

        CREATE TABLE IF NOT EXISTS beneficiaries (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      TEXT NOT NULL,
            name         TEXT NOT NULL,
            relationship TEXT NOT NULL DEFAULT 'child',
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_beneficiaries_user ON beneficiaries(user_id);
    "})?;

    set_schema_version(&tx, 2)?;
    tx.commit()
}
