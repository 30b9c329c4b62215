use clap::Subcommand;
use gradina_core::storage::Relationship;

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum BeneficiaryAction {
    /// Add a child or student
    Add {
        name: String,
        /// child, student or other
        #[arg(long, default_value = "child")]
        relationship: Relationship,
        #[arg(long)]
        user: Option<String>,
    },
    /// Remove a beneficiary by id
    Remove {
        id: i64,
        #[arg(long)]
        user: Option<String>,
    },
    /// List beneficiaries
    List {
        #[arg(long)]
        user: Option<String>,
    },
}

pub fn run(action: BeneficiaryAction) -> CmdResult {
    let session = Session::open()?;

    match action {
        BeneficiaryAction::Add {
            name,
            relationship,
            user,
        } => {
            let profile = session.profile(user)?;
            print_json(&session.db.add_beneficiary(&profile.id, &name, relationship)?)
        }
        BeneficiaryAction::Remove { id, user } => {
            let user_id = session.user_id(user);
            session.db.remove_beneficiary(&user_id, id)?;
            println!("ok");
            Ok(())
        }
        BeneficiaryAction::List { user } => {
            let user_id = session.user_id(user);
            print_json(&session.db.beneficiaries_for(&user_id)?)
        }
    }
}
