//! Profile commands: garden overview, XP awards, history, erasure.

use chrono::NaiveDate;
use clap::Subcommand;
use gradina_core::{AwardRequest, Database, GardenOverview, QualifyingAction};

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create a profile
    Create {
        /// Profile id; generated when omitted
        id: Option<String>,
        /// Display name
        #[arg(long, default_value = "")]
        name: String,
    },
    /// List all profiles
    List,
    /// Show the garden for a profile
    Show {
        #[arg(long)]
        user: Option<String>,
    },
    /// Record a qualifying action and award XP
    Award {
        /// Message that was shared, copied or sent
        message_id: i64,
        /// share, copy or send
        #[arg(long, default_value = "send")]
        action: QualifyingAction,
        /// Who the message went to
        #[arg(long, default_value = "")]
        to: String,
        #[arg(long)]
        user: Option<String>,
        /// Override the activity date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show recent qualifying actions
    History {
        #[arg(long)]
        user: Option<String>,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Erase a profile with its history, favorites and beneficiaries
    Delete {
        id: String,
        /// Confirm the erasure
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: ProfileAction) -> CmdResult {
    let session = Session::open()?;

    match action {
        ProfileAction::Create { id, name } => {
            let id = id.unwrap_or_else(Database::new_profile_id);
            let profile = session.db.create_profile(&id, &name)?;
            print_json(&profile)
        }
        ProfileAction::List => print_json(&session.db.list_profiles()?),
        ProfileAction::Show { user } => {
            let profile = session.profile(user)?;
            let today = session.config.clock().today();
            let overview = GardenOverview::new(
                &profile.snapshot(),
                &session.config.progression_rules(),
                today,
            );
            print_json(&serde_json::json!({
                "id": profile.id,
                "display_name": profile.display_name,
                "garden": overview,
            }))
        }
        ProfileAction::Award {
            message_id,
            action,
            to,
            user,
            date,
        } => {
            let profile = session.profile(user)?;
            let today = date.unwrap_or_else(|| session.config.clock().today());
            let request = AwardRequest {
                user_id: profile.id,
                message_id,
                recipient_label: to,
                action,
            };
            let outcome = session.db.award_xp(
                &request,
                session.config.progression.xp_per_action,
                today,
            )?;

            eprintln!(
                "+{} XP ({}), streak {} day(s)",
                outcome.xp_awarded,
                outcome.streak_change.description(),
                outcome.after.streak_count
            );
            if outcome.stage_advanced() {
                eprintln!("Grădina a crescut: {}!", outcome.after.stage().label());
            }
            print_json(&outcome)
        }
        ProfileAction::History { user, limit } => {
            let user_id = session.user_id(user);
            print_json(&session.db.history_for(&user_id, limit)?)
        }
        ProfileAction::Delete { id, yes } => {
            if !yes {
                return Err(format!("refusing to erase '{id}' without --yes").into());
            }
            session.db.delete_profile(&id)?;
            println!("profile '{id}' erased");
            Ok(())
        }
    }
}
