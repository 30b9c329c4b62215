use chrono::NaiveDate;
use clap::Subcommand;
use gradina_core::{next_streak, Config, StreakChange};

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Streak after a qualifying action today
    Next {
        /// Date of the last qualifying action (YYYY-MM-DD); omit if none
        #[arg(long)]
        last: Option<NaiveDate>,
        /// Current streak count
        #[arg(long, default_value_t = 0)]
        count: u32,
        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

pub fn run(action: StreakAction) -> CmdResult {
    match action {
        StreakAction::Next { last, count, today } => {
            let today = today.unwrap_or_else(|| Config::load_or_default().clock().today());
            let change = StreakChange::classify(last, today);
            print_json(&serde_json::json!({
                "today": today,
                "last_active_date": last,
                "streak_count": count,
                "next_streak": next_streak(last, count, today),
                "change": change,
                "reason": change.description(),
            }))
        }
    }
}
