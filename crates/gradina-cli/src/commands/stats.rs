use super::{print_json, CmdResult, Session};

pub fn run(top: usize) -> CmdResult {
    let session = Session::open()?;
    print_json(&session.db.garden_stats(top)?)
}
