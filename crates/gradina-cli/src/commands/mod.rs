pub mod beneficiary;
pub mod config;
pub mod favorite;
pub mod message;
pub mod profile;
pub mod search;
pub mod stage;
pub mod stats;
pub mod streak;

use gradina_core::{Config, Database, Profile};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Configuration and an open database, the pair most commands need.
pub struct Session {
    pub config: Config,
    pub db: Database,
}

impl Session {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load_or_default();
        let db = Database::open()?;
        Ok(Self { config, db })
    }

    /// `--user` if given, otherwise the configured default user.
    pub fn user_id(&self, user: Option<String>) -> String {
        user.unwrap_or_else(|| self.config.profile.default_user.clone())
    }

    /// Profile for `user`, creating the configured default profile on first use.
    pub fn profile(&self, user: Option<String>) -> Result<Profile, Box<dyn std::error::Error>> {
        match user {
            Some(id) => self
                .db
                .profile(&id)?
                .ok_or_else(|| format!("profile '{id}' not found").into()),
            None => Ok(self.db.ensure_profile(
                &self.config.profile.default_user,
                &self.config.profile.display_name,
            )?),
        }
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
