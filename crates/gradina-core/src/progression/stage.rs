//! Plant stages derived from accumulated XP.
//!
//! Stages are 200 XP wide and start at 0. The sixth stage has no upper
//! bound and always reports itself as fully grown.

use serde::{Deserialize, Serialize};

/// XP granted for one qualifying action when no configuration overrides it.
pub const XP_PER_MESSAGE: u32 = 10;

/// Width of every bounded stage, in XP.
pub const STAGE_SPAN: i64 = 200;

/// Garden growth stages, ordered from first to last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlantStage {
    Seed,
    Sprout,
    Plant,
    Bloom,
    Fruiting,
    MasterGardener,
}

impl PlantStage {
    pub const ALL: [PlantStage; 6] = [
        PlantStage::Seed,
        PlantStage::Sprout,
        PlantStage::Plant,
        PlantStage::Bloom,
        PlantStage::Fruiting,
        PlantStage::MasterGardener,
    ];

    /// Highest stage whose lower bound is at most `xp`. Negative XP is
    /// treated as 0.
    pub fn for_xp(xp: i64) -> Self {
        let xp = xp.max(0);
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|stage| stage.lower_bound() <= xp)
            .unwrap_or(PlantStage::Seed)
    }

    /// Zero-based position in [`PlantStage::ALL`].
    pub fn index(self) -> u8 {
        match self {
            PlantStage::Seed => 0,
            PlantStage::Sprout => 1,
            PlantStage::Plant => 2,
            PlantStage::Bloom => 3,
            PlantStage::Fruiting => 4,
            PlantStage::MasterGardener => 5,
        }
    }

    /// Inclusive XP lower bound.
    pub fn lower_bound(self) -> i64 {
        i64::from(self.index()) * STAGE_SPAN
    }

    pub fn next(self) -> Option<PlantStage> {
        Self::ALL.get(usize::from(self.index()) + 1).copied()
    }

    pub fn is_final(self) -> bool {
        self.next().is_none()
    }

    pub fn slug(self) -> &'static str {
        match self {
            PlantStage::Seed => "seed",
            PlantStage::Sprout => "sprout",
            PlantStage::Plant => "plant",
            PlantStage::Bloom => "bloom",
            PlantStage::Fruiting => "fruiting",
            PlantStage::MasterGardener => "master-gardener",
        }
    }

    /// Label shown in the garden view.
    pub fn label(self) -> &'static str {
        match self {
            PlantStage::Seed => "Sămânță",
            PlantStage::Sprout => "Răsad",
            PlantStage::Plant => "Plantă",
            PlantStage::Bloom => "Floare",
            PlantStage::Fruiting => "Pom cu roade",
            PlantStage::MasterGardener => "Grădinar Maestru",
        }
    }

    /// XP range as displayed, e.g. `"200-399"` or `"1000+"`.
    pub fn range_label(self) -> String {
        match self.next() {
            Some(next) => format!("{}-{}", self.lower_bound(), next.lower_bound() - 1),
            None => format!("{}+", self.lower_bound()),
        }
    }
}

/// Snapshot of where a given XP total sits in the garden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageProgress {
    pub xp: i64,
    pub stage_index: u8,
    pub stage: PlantStage,
    pub label: &'static str,
    /// Percent of the current stage completed; always 100 on the final stage.
    pub progress_percent: u8,
    /// Qualifying actions still needed to reach the next stage; 0 on the final stage.
    pub messages_to_next: u32,
}

impl StageProgress {
    pub fn is_final(&self) -> bool {
        self.stage.is_final()
    }
}

/// Tunable inputs to the progression math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionRules {
    /// XP granted per qualifying action.
    pub xp_per_action: u32,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            xp_per_action: XP_PER_MESSAGE,
        }
    }
}

impl ProgressionRules {
    pub fn new(xp_per_action: u32) -> Self {
        Self { xp_per_action }
    }

    pub fn stage_for_xp(&self, xp: i64) -> StageProgress {
        let xp = xp.max(0);
        let stage = PlantStage::for_xp(xp);

        let (progress_percent, messages_to_next) = match stage.next() {
            None => (100, 0),
            Some(next) => {
                let percent = (xp % STAGE_SPAN) * 100 / STAGE_SPAN;
                let remaining = next.lower_bound() - xp;
                let per_action = i64::from(self.xp_per_action.max(1));
                let actions = (remaining + per_action - 1) / per_action;
                (percent as u8, actions as u32)
            }
        };

        StageProgress {
            xp,
            stage_index: stage.index(),
            stage,
            label: stage.label(),
            progress_percent,
            messages_to_next,
        }
    }
}

/// Stage, progress, and remaining actions for `xp` under the default rules.
pub fn stage_for_xp(xp: i64) -> StageProgress {
    ProgressionRules::default().stage_for_xp(xp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_xp_is_an_empty_seed() {
        let progress = stage_for_xp(0);
        assert_eq!(progress.stage, PlantStage::Seed);
        assert_eq!(progress.stage_index, 0);
        assert_eq!(progress.progress_percent, 0);
        assert_eq!(progress.messages_to_next, 20);
    }

    #[test]
    fn stage_boundaries() {
        assert_eq!(stage_for_xp(199).stage, PlantStage::Seed);
        assert_eq!(stage_for_xp(200).stage, PlantStage::Sprout);
        assert_eq!(stage_for_xp(200).progress_percent, 0);
        assert_eq!(stage_for_xp(399).stage, PlantStage::Sprout);
        assert_eq!(stage_for_xp(400).stage, PlantStage::Plant);
        assert_eq!(stage_for_xp(600).stage, PlantStage::Bloom);
        assert_eq!(stage_for_xp(800).stage, PlantStage::Fruiting);
        assert_eq!(stage_for_xp(999).stage, PlantStage::Fruiting);
    }

    #[test]
    fn final_stage_is_always_complete() {
        for xp in [1000, 1150, 5000] {
            let progress = stage_for_xp(xp);
            assert_eq!(progress.stage, PlantStage::MasterGardener);
            assert_eq!(progress.stage_index, 5);
            assert_eq!(progress.progress_percent, 100);
            assert_eq!(progress.messages_to_next, 0);
            assert!(progress.is_final());
        }
    }

    #[test]
    fn messages_to_next_rounds_up() {
        assert_eq!(stage_for_xp(190).messages_to_next, 1);
        assert_eq!(stage_for_xp(195).messages_to_next, 1);
        assert_eq!(stage_for_xp(185).messages_to_next, 2);
    }

    #[test]
    fn progress_percent_within_stage() {
        assert_eq!(stage_for_xp(100).progress_percent, 50);
        assert_eq!(stage_for_xp(350).progress_percent, 75);
        assert_eq!(stage_for_xp(199).progress_percent, 99);
    }

    #[test]
    fn negative_xp_is_clamped() {
        let progress = stage_for_xp(-40);
        assert_eq!(progress.xp, 0);
        assert_eq!(progress.stage, PlantStage::Seed);
        assert_eq!(progress.progress_percent, 0);
    }

    #[test]
    fn custom_award_size_changes_remaining_actions() {
        let rules = ProgressionRules::new(25);
        assert_eq!(rules.stage_for_xp(0).messages_to_next, 8);
        assert_eq!(rules.stage_for_xp(190).messages_to_next, 1);
    }

    #[test]
    fn range_labels() {
        assert_eq!(PlantStage::Seed.range_label(), "0-199");
        assert_eq!(PlantStage::MasterGardener.range_label(), "1000+");
    }

    #[test]
    fn stage_serializes_as_kebab_case() {
        let json = serde_json::to_string(&PlantStage::MasterGardener).unwrap();
        assert_eq!(json, "\"master-gardener\"");
    }

    proptest! {
        #[test]
        fn stage_index_is_monotonic(a in 0i64..20_000, b in 0i64..20_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(stage_for_xp(lo).stage_index <= stage_for_xp(hi).stage_index);
            prop_assert!(stage_for_xp(hi).stage_index <= 5);
        }

        #[test]
        fn progress_percent_is_bounded(xp in -500i64..20_000) {
            prop_assert!(stage_for_xp(xp).progress_percent <= 100);
        }
    }
}
