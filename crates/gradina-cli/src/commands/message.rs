use clap::Subcommand;
use gradina_core::Category;

use super::search::print_message_line;
use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum MessageAction {
    /// Add a message to the library
    Add {
        /// Message text
        content: String,
        /// school-harmony, exams-tests, family-reconnection, overcoming-failure or personalized
        #[arg(long)]
        category: Category,
    },
    /// Edit a message's text or category
    Edit {
        id: i64,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<Category>,
    },
    /// Remove a message from the library (soft delete)
    Remove { id: i64 },
    /// Show one message
    Show { id: i64 },
    /// List active messages
    List {
        #[arg(long)]
        category: Option<Category>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Insert the starter library into an empty database
    Seed,
}

pub fn run(action: MessageAction) -> CmdResult {
    let session = Session::open()?;
    let db = &session.db;

    match action {
        MessageAction::Add { content, category } => {
            print_json(&db.add_message(&content, category)?)
        }
        MessageAction::Edit {
            id,
            content,
            category,
        } => {
            if content.is_none() && category.is_none() {
                return Err("nothing to change: pass --content and/or --category".into());
            }
            print_json(&db.update_message(id, content.as_deref(), category)?)
        }
        MessageAction::Remove { id } => {
            db.deactivate_message(id)?;
            println!("message {id} removed");
            Ok(())
        }
        MessageAction::Show { id } => match db.message(id)? {
            Some(message) => print_json(&message),
            None => Err(format!("message {id} not found").into()),
        },
        MessageAction::List { category, json } => {
            let messages = db.active_messages(category)?;
            if json {
                return print_json(&messages);
            }
            for c in Category::ALL {
                let in_category: Vec<_> = messages.iter().filter(|m| m.category == c).collect();
                if in_category.is_empty() {
                    continue;
                }
                println!("{} - {}", c.label(), c.description());
                for message in in_category {
                    print_message_line(message.id, message.category, &message.content);
                }
                println!();
            }
            Ok(())
        }
        MessageAction::Seed => {
            let inserted = db.seed_starter_library()?;
            if inserted == 0 {
                println!("library already has messages, nothing seeded");
            } else {
                println!("seeded {inserted} messages");
            }
            Ok(())
        }
    }
}
