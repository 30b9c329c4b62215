//! XP award bookkeeping.
//!
//! [`apply_award`] is the pure half of an award: it maps the profile fields
//! read just before the write to the fields to store. The storage layer
//! wraps it in a transaction and appends the history record.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::stage::PlantStage;
use crate::error::ValidationError;
use crate::streak::{next_streak, StreakChange};

/// User actions that grant XP. Each one awards independently; performing
/// two of them on the same message awards twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualifyingAction {
    /// Shared through the platform share sheet
    Share,
    /// Copied to the clipboard
    Copy,
    /// Sent through an external channel (SMS, chat app)
    Send,
}

impl QualifyingAction {
    pub const ALL: [QualifyingAction; 3] = [
        QualifyingAction::Share,
        QualifyingAction::Copy,
        QualifyingAction::Send,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualifyingAction::Share => "share",
            QualifyingAction::Copy => "copy",
            QualifyingAction::Send => "send",
        }
    }
}

impl fmt::Display for QualifyingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualifyingAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "share" => Ok(QualifyingAction::Share),
            "copy" => Ok(QualifyingAction::Copy),
            "send" => Ok(QualifyingAction::Send),
            other => Err(ValidationError::invalid(
                "action",
                format!("expected share, copy or send, got '{other}'"),
            )),
        }
    }
}

/// The three profile fields an award reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub total_xp: u32,
    pub streak_count: u32,
    pub last_active_date: Option<NaiveDate>,
}

impl ProgressSnapshot {
    pub fn stage(&self) -> PlantStage {
        PlantStage::for_xp(i64::from(self.total_xp))
    }
}

/// Fields to persist after awarding `amount` XP on `today`.
pub fn apply_award(current: &ProgressSnapshot, amount: u32, today: NaiveDate) -> ProgressSnapshot {
    ProgressSnapshot {
        total_xp: current.total_xp.saturating_add(amount),
        streak_count: next_streak(current.last_active_date, current.streak_count, today),
        last_active_date: Some(today),
    }
}

/// Result of a persisted award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwardOutcome {
    pub user_id: String,
    pub action: QualifyingAction,
    pub xp_awarded: u32,
    pub before: ProgressSnapshot,
    pub after: ProgressSnapshot,
    pub streak_change: StreakChange,
    pub history_id: i64,
}

impl AwardOutcome {
    /// Whether this award moved the garden into a new stage.
    pub fn stage_advanced(&self) -> bool {
        self.after.stage() > self.before.stage()
    }
}
