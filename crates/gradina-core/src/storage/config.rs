//! TOML-based application configuration.
//!
//! Stores:
//! - Progression tuning (XP per qualifying action, day boundary offset)
//! - Search behaviour (synonym expansion on/off)
//! - The default local profile used by the CLI
//!
//! Configuration is stored at `~/.config/gradina/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::progression::{ProgressionRules, XP_PER_MESSAGE};
use crate::search::SynonymTable;
use crate::streak::ActivityClock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    #[serde(default = "default_xp_per_action")]
    pub xp_per_action: u32,
    /// Minutes east of UTC used to decide what "today" is.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_true")]
    pub synonym_expansion: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_user")]
    pub default_user: String,
    #[serde(default = "default_display_name")]
    pub display_name: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/gradina/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub progression: ProgressionConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

fn default_xp_per_action() -> u32 {
    XP_PER_MESSAGE
}
fn default_true() -> bool {
    true
}
fn default_user() -> String {
    "local".into()
}
fn default_display_name() -> String {
    "Părinte".into()
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            xp_per_action: default_xp_per_action(),
            utc_offset_minutes: 0,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            synonym_expansion: true,
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            default_user: default_user(),
            display_name: default_display_name(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            progression: ProgressionConfig::default(),
            search: SearchConfig::default(),
            profile: ProfileConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<i64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot replace a whole section".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// into the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }

    pub fn progression_rules(&self) -> ProgressionRules {
        ProgressionRules::new(self.progression.xp_per_action)
    }

    pub fn clock(&self) -> ActivityClock {
        ActivityClock::with_offset_minutes(self.progression.utc_offset_minutes)
    }

    /// Synonym table honouring `search.synonym_expansion`.
    pub fn synonym_table(&self) -> SynonymTable {
        if self.search.synonym_expansion {
            SynonymTable::builtin().clone()
        } else {
            SynonymTable::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let parsed: Config = toml::from_str("[progression]\nxp_per_action = 25\n").unwrap();
        assert_eq!(parsed.progression.xp_per_action, 25);
        assert_eq!(parsed.progression.utc_offset_minutes, 0);
        assert!(parsed.search.synonym_expansion);
        assert_eq!(parsed.profile.default_user, "local");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("progression.xp_per_action").as_deref(), Some("10"));
        assert_eq!(cfg.get("search.synonym_expansion").as_deref(), Some("true"));
        assert_eq!(cfg.get("profile.default_user").as_deref(), Some("local"));
        assert!(cfg.get("progression.missing").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.set("progression.xp_per_action", "15").unwrap();
        cfg.set("progression.utc_offset_minutes", "-180").unwrap();
        cfg.set("search.synonym_expansion", "false").unwrap();
        cfg.set("profile.display_name", "Doamna Popescu").unwrap();
        assert_eq!(cfg.progression.xp_per_action, 15);
        assert_eq!(cfg.progression.utc_offset_minutes, -180);
        assert!(!cfg.search.synonym_expansion);
        assert_eq!(cfg.profile.display_name, "Doamna Popescu");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("progression.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("search.synonym_expansion", "sometimes").is_err());
        assert!(cfg.set("progression.xp_per_action", "ten").is_err());
        // Negative does not fit the unsigned field.
        assert!(cfg.set("progression.xp_per_action", "-5").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_rejects_whole_sections() {
        let mut cfg = Config::default();
        assert!(cfg.set("progression", "{}").is_err());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("progression.xp_per_action", "20").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().progression.xp_per_action, 20);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "progression = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn disabled_expansion_yields_empty_table() {
        let mut cfg = Config::default();
        assert!(!cfg.synonym_table().is_empty());
        cfg.set("search.synonym_expansion", "false").unwrap();
        assert!(cfg.synonym_table().is_empty());
    }
}
