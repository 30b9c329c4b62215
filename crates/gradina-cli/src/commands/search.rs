use clap::Args;
use gradina_core::Category;

use super::{print_json, CmdResult, Session};

#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query; a blank query returns nothing
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,
    /// Only show the expanded search terms
    #[arg(long)]
    expand: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SearchArgs) -> CmdResult {
    let query = args.query.join(" ");
    let session = Session::open()?;
    let table = session.config.synonym_table();

    if args.expand {
        let terms: Vec<String> = table.expand(&query).into_iter().collect();
        return print_json(&terms);
    }

    let messages = session.db.active_messages(None)?;
    let found = table.search(&messages, &query);

    if args.json {
        return print_json(&found);
    }

    if found.is_empty() {
        println!("no messages match '{query}'");
        return Ok(());
    }
    for message in &found {
        print_message_line(message.id, message.category, &message.content);
    }
    println!();
    println!("{} message(s)", found.len());
    Ok(())
}

pub fn print_message_line(id: i64, category: Category, content: &str) {
    println!("[{id:>4}] ({}) {content}", category.label());
}
