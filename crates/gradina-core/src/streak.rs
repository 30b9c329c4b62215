//! Daily streak continuation policy.
//!
//! A streak counts consecutive calendar days with at least one qualifying
//! action. Dates carry no time-of-day; "today" comes from [`ActivityClock`]
//! so every caller uses the same day boundary as the stored
//! `last_active_date` strings.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

/// How an action changed the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakChange {
    /// Already credited today
    Kept,
    /// Last activity was yesterday
    Continued,
    /// Gap of two or more days, or no previous activity
    Restarted,
}

impl StreakChange {
    pub fn classify(last_active_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        match last_active_date {
            Some(last) if last == today => StreakChange::Kept,
            Some(last) if last.succ_opt() == Some(today) => StreakChange::Continued,
            _ => StreakChange::Restarted,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StreakChange::Kept => "Already active today",
            StreakChange::Continued => "Streak continued from yesterday",
            StreakChange::Restarted => "New streak started",
        }
    }
}

/// Streak after a qualifying action performed on `today`.
///
/// A missing `last_active_date`, a gap of two or more days, or a date after
/// `today` all restart the streak at 1: the current action is day one.
pub fn next_streak(
    last_active_date: Option<NaiveDate>,
    streak_count: u32,
    today: NaiveDate,
) -> u32 {
    match StreakChange::classify(last_active_date, today) {
        StreakChange::Kept => streak_count,
        StreakChange::Continued => streak_count.saturating_add(1),
        StreakChange::Restarted => 1,
    }
}

/// Streak as it should be displayed on `today` before any action.
///
/// The stored count is only refreshed on awards, so a streak broken by
/// inactivity still holds its old value until the next action.
pub fn current_streak(
    last_active_date: Option<NaiveDate>,
    streak_count: u32,
    today: NaiveDate,
) -> u32 {
    match StreakChange::classify(last_active_date, today) {
        StreakChange::Kept | StreakChange::Continued => streak_count,
        StreakChange::Restarted => 0,
    }
}

/// Source of the canonical calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityClock {
    offset: FixedOffset,
}

impl Default for ActivityClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl ActivityClock {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Clock with a fixed offset from UTC. Offsets outside ±24h fall back to UTC.
    pub fn with_offset_minutes(minutes: i32) -> Self {
        match FixedOffset::east_opt(minutes.saturating_mul(60)) {
            Some(offset) => Self { offset },
            None => {
                tracing::warn!(minutes, "utc offset out of range, using UTC");
                Self::utc()
            }
        }
    }

    pub fn date_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    pub fn today(&self) -> NaiveDate {
        self.date_at(Utc::now())
    }
}
