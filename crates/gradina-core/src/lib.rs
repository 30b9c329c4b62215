//! # Grădina cu Vorbe Bune Core Library
//!
//! Business logic for "The Garden of Good Words": parents and teachers send
//! supportive messages to children and grow a garden while doing it. The
//! CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Progression**: XP → plant stage, progress within the stage, and the
//!   number of messages left until the next one
//! - **Streak**: the daily continuation policy for consecutive active days
//! - **Search**: diacritic folding plus synonym expansion over the library
//! - **Storage**: SQLite for profiles, messages, and history; TOML for configuration
//!
//! ## Key Components
//!
//! - [`stage_for_xp`]: stage and progress for an XP total
//! - [`next_streak`]: streak after a qualifying action
//! - [`search()`]: filter the library by a free-text query
//! - [`Database`]: persistence for profiles, messages, and history
//! - [`Config`]: application configuration management

pub mod catalog;
pub mod error;
pub mod progression;
pub mod search;
pub mod storage;
pub mod streak;

pub use catalog::{Category, Message};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use progression::{
    apply_award, stage_for_xp, AwardOutcome, GardenOverview, PlantStage, ProgressSnapshot,
    ProgressionRules, QualifyingAction, StageProgress,
};
pub use search::{expand_query, normalize, search, SynonymTable};
pub use storage::{AwardRequest, Config, Database, Profile};
pub use streak::{current_streak, next_streak, ActivityClock, StreakChange};
