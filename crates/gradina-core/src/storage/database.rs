//! SQLite-based storage for the garden.
//!
//! Provides persistent storage for:
//! - Profiles with their XP, streak, and last active date
//! - The message library (soft-deleted, never removed)
//! - The append-only history of qualifying actions
//! - Favorites and beneficiaries
//! - Key-value store for application state

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use serde::{Deserialize, Serialize};

use super::{data_dir, migrations};
use crate::catalog::{starter_library, Category, Message};
use crate::error::{DatabaseError, Result, ValidationError};
use crate::progression::{apply_award, AwardOutcome, ProgressSnapshot, QualifyingAction};
use crate::streak::StreakChange;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A user's garden profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub display_name: String,
    pub total_xp: u32,
    pub streak_count: u32,
    pub last_active_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            total_xp: self.total_xp,
            streak_count: self.streak_count,
            last_active_date: self.last_active_date,
        }
    }
}

/// One qualifying action, as recorded in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub user_id: String,
    pub message_id: i64,
    pub recipient_label: String,
    pub action: QualifyingAction,
    pub xp_awarded: u32,
    pub created_at: DateTime<Utc>,
}

/// Who a beneficiary is to the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Child,
    Student,
    Other,
}

impl Relationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Child => "child",
            Relationship::Student => "student",
            Relationship::Other => "other",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relationship {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "child" => Ok(Relationship::Child),
            "student" => Ok(Relationship::Student),
            "other" => Ok(Relationship::Other),
            other => Err(ValidationError::invalid(
                "relationship",
                format!("expected child, student or other, got '{other}'"),
            )),
        }
    }
}

/// A child or student messages are sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficiary {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub relationship: Relationship,
    pub created_at: DateTime<Utc>,
}

/// Input to [`Database::award_xp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardRequest {
    pub user_id: String,
    pub message_id: i64,
    pub recipient_label: String,
    pub action: QualifyingAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageUsage {
    pub message_id: i64,
    pub content: String,
    pub uses: u64,
}

/// Counters for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GardenStats {
    pub profiles: u64,
    pub active_messages: u64,
    pub total_messages: u64,
    pub history_records: u64,
    pub total_xp_awarded: u64,
    pub favorites: u64,
    pub beneficiaries: u64,
    pub by_action: BTreeMap<String, u64>,
    pub top_messages: Vec<MessageUsage>,
}

/// SQLite database backing profiles, messages, and history.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/gradina/gradina.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("gradina.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        migrations::migrate(&self.conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    // ── Profiles ────────────────────────────────────────────────────────

    /// Fresh opaque profile id.
    pub fn new_profile_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    pub fn create_profile(&self, id: &str, display_name: &str) -> Result<Profile> {
        if id.trim().is_empty() {
            return Err(ValidationError::Empty("profile id".into()).into());
        }
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO profiles (id, display_name, created_at) VALUES (?1, ?2, ?3)",
            params![id, display_name, now.to_rfc3339()],
        )?;
        tracing::info!(user_id = id, "profile created");
        self.require_profile(id)
    }

    /// Return the profile for `id`, creating an empty one if needed.
    pub fn ensure_profile(&self, id: &str, display_name: &str) -> Result<Profile> {
        match self.profile(id)? {
            Some(profile) => Ok(profile),
            None => self.create_profile(id, display_name),
        }
    }

    pub fn profile(&self, id: &str) -> Result<Option<Profile>> {
        let profile = self
            .conn
            .query_row(
                "SELECT id, display_name, total_xp, streak_count, last_active_date, created_at
                 FROM profiles WHERE id = ?1",
                params![id],
                profile_from_row,
            )
            .optional()?;
        Ok(profile)
    }

    fn require_profile(&self, id: &str) -> Result<Profile> {
        self.profile(id)?
            .ok_or_else(|| ValidationError::not_found("profile", id).into())
    }

    pub fn list_profiles(&self) -> Result<Vec<Profile>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, display_name, total_xp, streak_count, last_active_date, created_at
             FROM profiles ORDER BY created_at, id",
        )?;
        let rows = stmt.query_map([], profile_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Erase a profile together with its history, favorites, and beneficiaries.
    pub fn delete_profile(&self, id: &str) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM profiles WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(ValidationError::not_found("profile", id).into());
        }
        tx.execute("DELETE FROM history WHERE user_id = ?1", params![id])?;
        tx.execute("DELETE FROM favorites WHERE user_id = ?1", params![id])?;
        tx.execute("DELETE FROM beneficiaries WHERE user_id = ?1", params![id])?;
        tx.commit()?;
        tracing::info!(user_id = id, "profile erased");
        Ok(())
    }

    // ── Progression ─────────────────────────────────────────────────────

    /// Award `amount` XP for a qualifying action performed on `today`.
    ///
    /// The profile is re-read inside an immediate transaction, so two
    /// writers sharing the database file cannot both build on the same
    /// snapshot. Repeated actions on the same message are not deduplicated.
    pub fn award_xp(
        &self,
        request: &AwardRequest,
        amount: u32,
        today: NaiveDate,
    ) -> Result<AwardOutcome> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;

        let before = tx
            .query_row(
                "SELECT total_xp, streak_count, last_active_date FROM profiles WHERE id = ?1",
                params![request.user_id],
                |row| {
                    Ok(ProgressSnapshot {
                        total_xp: row.get(0)?,
                        streak_count: row.get(1)?,
                        last_active_date: date_column(row, 2)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| ValidationError::not_found("profile", &request.user_id))?;

        // Deactivated messages are hidden from the library and cannot earn XP.
        let message_exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM messages WHERE id = ?1 AND is_active = 1)",
            params![request.message_id],
            |row| row.get(0),
        )?;
        if !message_exists {
            return Err(ValidationError::not_found("message", request.message_id).into());
        }

        let after = apply_award(&before, amount, today);
        let streak_change = StreakChange::classify(before.last_active_date, today);

        tx.execute(
            "UPDATE profiles
             SET total_xp = ?1, streak_count = ?2, last_active_date = ?3
             WHERE id = ?4",
            params![
                after.total_xp,
                after.streak_count,
                after.last_active_date.map(|d| d.format(DATE_FORMAT).to_string()),
                request.user_id,
            ],
        )?;

        tx.execute(
            "INSERT INTO history (user_id, message_id, recipient_label, action, xp_awarded, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                request.user_id,
                request.message_id,
                request.recipient_label.trim(),
                request.action.as_str(),
                amount,
                Utc::now().to_rfc3339(),
            ],
        )?;
        let history_id = tx.last_insert_rowid();
        tx.commit()?;

        let outcome = AwardOutcome {
            user_id: request.user_id.clone(),
            action: request.action,
            xp_awarded: amount,
            before,
            after,
            streak_change,
            history_id,
        };
        tracing::info!(
            user_id = %request.user_id,
            action = %request.action,
            total_xp = after.total_xp,
            streak = after.streak_count,
            stage_advanced = outcome.stage_advanced(),
            "xp awarded"
        );
        Ok(outcome)
    }

    /// Most recent history records for a user, newest first.
    pub fn history_for(&self, user_id: &str, limit: usize) -> Result<Vec<HistoryRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, message_id, recipient_label, action, xp_awarded, created_at
             FROM history WHERE user_id = ?1
             ORDER BY id DESC
             LIMIT ?2",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![user_id, limit], history_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // ── Messages ────────────────────────────────────────────────────────

    pub fn add_message(&self, content: &str, category: Category) -> Result<Message> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ValidationError::Empty("content".into()).into());
        }
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO messages (content, category, is_active, created_at, updated_at)
             VALUES (?1, ?2, 1, ?3, ?3)",
            params![content, category.slug(), now],
        )?;
        Ok(Message::new(self.conn.last_insert_rowid(), content, category))
    }

    /// Replace content and/or category of an existing message.
    pub fn update_message(
        &self,
        id: i64,
        content: Option<&str>,
        category: Option<Category>,
    ) -> Result<Message> {
        let current = self
            .message(id)?
            .ok_or_else(|| ValidationError::not_found("message", id))?;

        let content = match content.map(str::trim) {
            Some("") => return Err(ValidationError::Empty("content".into()).into()),
            Some(c) => c.to_string(),
            None => current.content,
        };
        let category = category.unwrap_or(current.category);

        self.conn.execute(
            "UPDATE messages SET content = ?1, category = ?2, updated_at = ?3 WHERE id = ?4",
            params![content, category.slug(), Utc::now().to_rfc3339(), id],
        )?;
        Ok(Message {
            id,
            content,
            category,
            is_active: current.is_active,
        })
    }

    /// Soft-delete: the row stays so history keeps pointing at it.
    pub fn deactivate_message(&self, id: i64) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE messages SET is_active = 0, updated_at = ?1 WHERE id = ?2",
            params![Utc::now().to_rfc3339(), id],
        )?;
        if changed == 0 {
            return Err(ValidationError::not_found("message", id).into());
        }
        Ok(())
    }

    pub fn message(&self, id: i64) -> Result<Option<Message>> {
        let message = self
            .conn
            .query_row(
                "SELECT id, content, category, is_active FROM messages WHERE id = ?1",
                params![id],
                message_from_row,
            )
            .optional()?;
        Ok(message)
    }

    /// Active messages in insertion order, optionally for one category.
    pub fn active_messages(&self, category: Option<Category>) -> Result<Vec<Message>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, content, category, is_active FROM messages
             WHERE is_active = 1 AND (?1 IS NULL OR category = ?1)
             ORDER BY id",
        )?;
        let rows = stmt.query_map(params![category.map(|c| c.slug())], message_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Insert the starter library if the message table is empty.
    ///
    /// Returns the number of messages inserted.
    pub fn seed_starter_library(&self) -> Result<usize> {
        let existing: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(0);
        }

        let tx = self.conn.unchecked_transaction()?;
        let now = Utc::now().to_rfc3339();
        let library = starter_library();
        for (category, content) in &library {
            tx.execute(
                "INSERT INTO messages (content, category, is_active, created_at, updated_at)
                 VALUES (?1, ?2, 1, ?3, ?3)",
                params![content, category.slug(), now],
            )?;
        }
        tx.commit()?;
        tracing::info!(count = library.len(), "seeded starter library");
        Ok(library.len())
    }

    // ── Favorites ───────────────────────────────────────────────────────

    /// Mark a message as favorite. Adding twice is a no-op.
    pub fn add_favorite(&self, user_id: &str, message_id: i64) -> Result<()> {
        self.require_profile(user_id)?;
        if self.message(message_id)?.is_none() {
            return Err(ValidationError::not_found("message", message_id).into());
        }
        self.conn.execute(
            "INSERT OR IGNORE INTO favorites (user_id, message_id, created_at) VALUES (?1, ?2, ?3)",
            params![user_id, message_id, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Returns whether a favorite was removed.
    pub fn remove_favorite(&self, user_id: &str, message_id: i64) -> Result<bool> {
        let removed = self.conn.execute(
            "DELETE FROM favorites WHERE user_id = ?1 AND message_id = ?2",
            params![user_id, message_id],
        )?;
        Ok(removed > 0)
    }

    /// Favorite messages that are still active, most recently added first.
    pub fn favorites_for(&self, user_id: &str) -> Result<Vec<Message>> {
        let mut stmt = self.conn.prepare(
            "SELECT m.id, m.content, m.category, m.is_active
             FROM favorites f JOIN messages m ON m.id = f.message_id
             WHERE f.user_id = ?1 AND m.is_active = 1
             ORDER BY f.rowid DESC",
        )?;
        let rows = stmt.query_map(params![user_id], message_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // ── Beneficiaries ───────────────────────────────────────────────────

    pub fn add_beneficiary(
        &self,
        user_id: &str,
        name: &str,
        relationship: Relationship,
    ) -> Result<Beneficiary> {
        self.require_profile(user_id)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty("name".into()).into());
        }
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO beneficiaries (user_id, name, relationship, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_id, name, relationship.as_str(), now.to_rfc3339()],
        )?;
        Ok(Beneficiary {
            id: self.conn.last_insert_rowid(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            relationship,
            created_at: now,
        })
    }

    pub fn remove_beneficiary(&self, user_id: &str, id: i64) -> Result<()> {
        let removed = self.conn.execute(
            "DELETE FROM beneficiaries WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        if removed == 0 {
            return Err(ValidationError::not_found("beneficiary", id).into());
        }
        Ok(())
    }

    pub fn beneficiaries_for(&self, user_id: &str) -> Result<Vec<Beneficiary>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, name, relationship, created_at
             FROM beneficiaries WHERE user_id = ?1 ORDER BY name COLLATE NOCASE, id",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok(Beneficiary {
                id: row.get(0)?,
                user_id: row.get(1)?,
                name: row.get(2)?,
                relationship: parsed_column(row, 3)?,
                created_at: timestamp_column(row, 4)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // ── Analytics ───────────────────────────────────────────────────────

    pub fn garden_stats(&self, top: usize) -> Result<GardenStats> {
        let count = |sql: &str| -> rusqlite::Result<u64> {
            self.conn.query_row(sql, [], |row| row.get(0))
        };

        let mut stats = GardenStats {
            profiles: count("SELECT COUNT(*) FROM profiles")?,
            active_messages: count("SELECT COUNT(*) FROM messages WHERE is_active = 1")?,
            total_messages: count("SELECT COUNT(*) FROM messages")?,
            history_records: count("SELECT COUNT(*) FROM history")?,
            total_xp_awarded: count("SELECT COALESCE(SUM(xp_awarded), 0) FROM history")?,
            favorites: count("SELECT COUNT(*) FROM favorites")?,
            beneficiaries: count("SELECT COUNT(*) FROM beneficiaries")?,
            ..GardenStats::default()
        };

        let mut stmt = self
            .conn
            .prepare("SELECT action, COUNT(*) FROM history GROUP BY action")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, u64>(1)?)))?;
        for row in rows {
            let (action, uses) = row?;
            stats.by_action.insert(action, uses);
        }

        let mut stmt = self.conn.prepare(
            "SELECT h.message_id, COALESCE(m.content, ''), COUNT(*) AS uses
             FROM history h LEFT JOIN messages m ON m.id = h.message_id
             GROUP BY h.message_id
             ORDER BY uses DESC, h.message_id
             LIMIT ?1",
        )?;
        let limit = i64::try_from(top).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], |row| {
            Ok(MessageUsage {
                message_id: row.get(0)?,
                content: row.get(1)?,
                uses: row.get(2)?,
            })
        })?;
        stats.top_messages = rows.collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(stats)
    }
}

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(|e| conversion_error(idx, e)))
        .transpose()
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

fn parsed_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = ValidationError>,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>().map_err(|e| conversion_error(idx, e))
}

fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get(0)?,
        display_name: row.get(1)?,
        total_xp: row.get(2)?,
        streak_count: row.get(3)?,
        last_active_date: date_column(row, 4)?,
        created_at: timestamp_column(row, 5)?,
    })
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        id: row.get(0)?,
        content: row.get(1)?,
        category: parsed_column(row, 2)?,
        is_active: row.get(3)?,
    })
}

fn history_from_row(row: &Row<'_>) -> rusqlite::Result<HistoryRecord> {
    Ok(HistoryRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        message_id: row.get(2)?,
        recipient_label: row.get(3)?,
        action: parsed_column(row, 4)?,
        xp_awarded: row.get(5)?,
        created_at: timestamp_column(row, 6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn setup() -> (Database, Message) {
        let db = Database::open_memory().unwrap();
        db.create_profile("ana", "Ana").unwrap();
        let message = db
            .add_message("Sunt mândru de tine!", Category::ExamsTests)
            .unwrap();
        (db, message)
    }

    fn request(message_id: i64, action: QualifyingAction) -> AwardRequest {
        AwardRequest {
            user_id: "ana".into(),
            message_id,
            recipient_label: "Ioana".into(),
            action,
        }
    }

    #[test]
    fn new_profile_starts_empty() {
        let (db, _) = setup();
        let profile = db.profile("ana").unwrap().unwrap();
        assert_eq!(profile.total_xp, 0);
        assert_eq!(profile.streak_count, 0);
        assert_eq!(profile.last_active_date, None);
    }

    #[test]
    fn first_award_today() {
        let (db, message) = setup();
        let today = day("2026-05-04");
        let outcome = db
            .award_xp(&request(message.id, QualifyingAction::Send), 10, today)
            .unwrap();
        assert_eq!(outcome.after.total_xp, 10);
        assert_eq!(outcome.after.streak_count, 1);
        assert_eq!(outcome.streak_change, StreakChange::Restarted);

        let stored = db.profile("ana").unwrap().unwrap();
        assert_eq!(stored.snapshot(), outcome.after);
        assert_eq!(stored.last_active_date, Some(today));
    }

    #[test]
    fn repeated_actions_are_not_deduplicated() {
        let (db, message) = setup();
        let today = day("2026-05-04");
        db.award_xp(&request(message.id, QualifyingAction::Copy), 10, today)
            .unwrap();
        let outcome = db
            .award_xp(&request(message.id, QualifyingAction::Share), 10, today)
            .unwrap();
        assert_eq!(outcome.after.total_xp, 20);
        assert_eq!(outcome.after.streak_count, 1);
        assert_eq!(outcome.streak_change, StreakChange::Kept);
        assert_eq!(db.history_for("ana", 10).unwrap().len(), 2);
    }

    #[test]
    fn award_reads_fresh_profile() {
        let (db, message) = setup();
        db.conn()
            .execute(
                "UPDATE profiles SET total_xp = 390, streak_count = 4, last_active_date = '2026-05-03' WHERE id = 'ana'",
                [],
            )
            .unwrap();
        let outcome = db
            .award_xp(&request(message.id, QualifyingAction::Send), 10, day("2026-05-04"))
            .unwrap();
        assert_eq!(outcome.before.total_xp, 390);
        assert_eq!(outcome.after.total_xp, 400);
        assert_eq!(outcome.after.streak_count, 5);
        assert!(outcome.stage_advanced());
    }

    #[test]
    fn award_for_unknown_profile_fails_without_side_effects() {
        let (db, message) = setup();
        let mut req = request(message.id, QualifyingAction::Send);
        req.user_id = "ghost".into();
        let err = db.award_xp(&req, 10, day("2026-05-04")).unwrap_err();
        assert!(err.to_string().contains("ghost"));
        assert_eq!(db.garden_stats(5).unwrap().history_records, 0);
    }

    #[test]
    fn award_for_unknown_message_fails() {
        let (db, _) = setup();
        assert!(db
            .award_xp(&request(999, QualifyingAction::Send), 10, day("2026-05-04"))
            .is_err());
        assert_eq!(db.profile("ana").unwrap().unwrap().total_xp, 0);
    }

    #[test]
    fn award_for_deactivated_message_fails() {
        let (db, message) = setup();
        db.deactivate_message(message.id).unwrap();
        let err = db
            .award_xp(&request(message.id, QualifyingAction::Send), 10, day("2026-10-16"))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::NotFound { entity: "message", .. })
        ));
        assert_eq!(db.profile("ana").unwrap().unwrap().total_xp, 0);
        assert!(db.history_for("ana", 10).unwrap().is_empty());
    }

    #[test]
    fn history_is_newest_first() {
        let (db, message) = setup();
        let today = day("2026-05-04");
        let first = db
            .award_xp(&request(message.id, QualifyingAction::Copy), 10, today)
            .unwrap();
        let second = db
            .award_xp(&request(message.id, QualifyingAction::Send), 10, today)
            .unwrap();
        let history = db.history_for("ana", 10).unwrap();
        assert_eq!(history[0].id, second.history_id);
        assert_eq!(history[1].id, first.history_id);
        assert_eq!(history[0].recipient_label, "Ioana");
        assert_eq!(history[0].action, QualifyingAction::Send);
    }

    #[test]
    fn deactivated_messages_leave_the_library() {
        let (db, message) = setup();
        let other = db.add_message("Te iubesc.", Category::FamilyReconnection).unwrap();
        db.deactivate_message(message.id).unwrap();
        let active = db.active_messages(None).unwrap();
        assert_eq!(active, vec![other]);
        assert!(!db.message(message.id).unwrap().unwrap().is_active);
    }

    #[test]
    fn active_messages_filter_by_category() {
        let (db, message) = setup();
        db.add_message("Te iubesc.", Category::FamilyReconnection).unwrap();
        let exams = db.active_messages(Some(Category::ExamsTests)).unwrap();
        assert_eq!(exams, vec![message]);
    }

    #[test]
    fn update_message_keeps_unspecified_fields() {
        let (db, message) = setup();
        let updated = db
            .update_message(message.id, None, Some(Category::OvercomingFailure))
            .unwrap();
        assert_eq!(updated.content, message.content);
        assert_eq!(updated.category, Category::OvercomingFailure);
        assert!(db.update_message(message.id, Some("  "), None).is_err());
    }

    #[test]
    fn empty_content_is_rejected() {
        let db = Database::open_memory().unwrap();
        assert!(db.add_message("   ", Category::Personalized).is_err());
    }

    #[test]
    fn seeding_only_fills_empty_library() {
        let db = Database::open_memory().unwrap();
        let inserted = db.seed_starter_library().unwrap();
        assert_eq!(inserted, starter_library().len());
        assert_eq!(db.seed_starter_library().unwrap(), 0);
    }

    #[test]
    fn favorites_are_idempotent() {
        let (db, message) = setup();
        db.add_favorite("ana", message.id).unwrap();
        db.add_favorite("ana", message.id).unwrap();
        assert_eq!(db.favorites_for("ana").unwrap().len(), 1);
        assert!(db.remove_favorite("ana", message.id).unwrap());
        assert!(!db.remove_favorite("ana", message.id).unwrap());
    }

    #[test]
    fn favorites_hide_deactivated_messages() {
        let (db, message) = setup();
        db.add_favorite("ana", message.id).unwrap();
        db.deactivate_message(message.id).unwrap();
        assert!(db.favorites_for("ana").unwrap().is_empty());
    }

    #[test]
    fn beneficiaries_sorted_by_name() {
        let (db, _) = setup();
        db.add_beneficiary("ana", "Victor", Relationship::Student).unwrap();
        db.add_beneficiary("ana", "ioana", Relationship::Child).unwrap();
        let names: Vec<String> = db
            .beneficiaries_for("ana")
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["ioana", "Victor"]);
    }

    #[test]
    fn beneficiary_removal_is_scoped_to_owner() {
        let (db, _) = setup();
        db.create_profile("mihai", "Mihai").unwrap();
        let b = db.add_beneficiary("ana", "Ioana", Relationship::Child).unwrap();
        assert!(db.remove_beneficiary("mihai", b.id).is_err());
        db.remove_beneficiary("ana", b.id).unwrap();
        assert!(db.beneficiaries_for("ana").unwrap().is_empty());
    }

    #[test]
    fn delete_profile_erases_owned_rows() {
        let (db, message) = setup();
        db.award_xp(&request(message.id, QualifyingAction::Send), 10, day("2026-05-04"))
            .unwrap();
        db.add_favorite("ana", message.id).unwrap();
        db.add_beneficiary("ana", "Ioana", Relationship::Child).unwrap();

        db.delete_profile("ana").unwrap();
        assert!(db.profile("ana").unwrap().is_none());
        let stats = db.garden_stats(5).unwrap();
        assert_eq!(stats.history_records, 0);
        assert_eq!(stats.favorites, 0);
        assert_eq!(stats.beneficiaries, 0);
        assert_eq!(stats.total_messages, 1);
    }

    #[test]
    fn garden_stats_counts_usage() {
        let (db, message) = setup();
        let other = db.add_message("Te iubesc.", Category::FamilyReconnection).unwrap();
        let today = day("2026-05-04");
        db.award_xp(&request(message.id, QualifyingAction::Send), 10, today)
            .unwrap();
        db.award_xp(&request(message.id, QualifyingAction::Copy), 10, today)
            .unwrap();
        db.award_xp(&request(other.id, QualifyingAction::Send), 10, today)
            .unwrap();

        let stats = db.garden_stats(1).unwrap();
        assert_eq!(stats.profiles, 1);
        assert_eq!(stats.history_records, 3);
        assert_eq!(stats.total_xp_awarded, 30);
        assert_eq!(stats.by_action.get("send"), Some(&2));
        assert_eq!(stats.by_action.get("copy"), Some(&1));
        assert_eq!(stats.top_messages.len(), 1);
        assert_eq!(stats.top_messages[0].message_id, message.id);
        assert_eq!(stats.top_messages[0].uses, 2);
    }

    #[test]
    fn generated_profile_ids_are_unique() {
        let db = Database::open_memory().unwrap();
        let a = db.create_profile(&Database::new_profile_id(), "A").unwrap();
        let b = db.create_profile(&Database::new_profile_id(), "B").unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(db.list_profiles().unwrap().len(), 2);
    }

    #[test]
    fn relationship_parsing() {
        assert_eq!("Student".parse::<Relationship>().unwrap(), Relationship::Student);
        assert!("cousin".parse::<Relationship>().is_err());
    }
}
