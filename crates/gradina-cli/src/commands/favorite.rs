use clap::Subcommand;

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum FavoriteAction {
    /// Mark a message as favorite
    Add {
        message_id: i64,
        #[arg(long)]
        user: Option<String>,
    },
    /// Unmark a favorite
    Remove {
        message_id: i64,
        #[arg(long)]
        user: Option<String>,
    },
    /// List favorite messages
    List {
        #[arg(long)]
        user: Option<String>,
    },
}

pub fn run(action: FavoriteAction) -> CmdResult {
    let session = Session::open()?;

    match action {
        FavoriteAction::Add { message_id, user } => {
            let profile = session.profile(user)?;
            session.db.add_favorite(&profile.id, message_id)?;
            println!("ok");
            Ok(())
        }
        FavoriteAction::Remove { message_id, user } => {
            let user_id = session.user_id(user);
            if session.db.remove_favorite(&user_id, message_id)? {
                println!("ok");
            } else {
                println!("message {message_id} was not a favorite");
            }
            Ok(())
        }
        FavoriteAction::List { user } => {
            let user_id = session.user_id(user);
            print_json(&session.db.favorites_for(&user_id)?)
        }
    }
}
