//! Garden progression: XP totals, plant stages, and award bookkeeping.

mod award;
mod overview;
mod stage;

pub use award::{apply_award, AwardOutcome, ProgressSnapshot, QualifyingAction};
pub use overview::GardenOverview;
pub use stage::{
    stage_for_xp, PlantStage, ProgressionRules, StageProgress, STAGE_SPAN, XP_PER_MESSAGE,
};
