//! Per-day garden summary for a profile.

use chrono::NaiveDate;
use serde::Serialize;

use super::award::ProgressSnapshot;
use super::stage::{ProgressionRules, StageProgress};
use crate::streak::current_streak;

/// What the garden screen shows for one profile on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GardenOverview {
    pub total_xp: u32,
    /// Streak as of `today`; 0 once a day has been missed.
    pub streak: u32,
    pub last_active_date: Option<NaiveDate>,
    pub active_today: bool,
    pub progress: StageProgress,
}

impl GardenOverview {
    pub fn new(snapshot: &ProgressSnapshot, rules: &ProgressionRules, today: NaiveDate) -> Self {
        Self {
            total_xp: snapshot.total_xp,
            streak: current_streak(snapshot.last_active_date, snapshot.streak_count, today),
            last_active_date: snapshot.last_active_date,
            active_today: snapshot.last_active_date == Some(today),
            progress: rules.stage_for_xp(i64::from(snapshot.total_xp)),
        }
    }
}
