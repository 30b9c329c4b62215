use gradina_core::{Config, PlantStage};

use super::{print_json, CmdResult};

pub fn run(xp: i64) -> CmdResult {
    let config = Config::load_or_default();
    let progress = config.progression_rules().stage_for_xp(xp);

    tracing::debug!(xp, stage = progress.stage.slug(), "computed stage");
    print_json(&serde_json::json!({
        "xp": progress.xp,
        "stage_index": progress.stage_index,
        "stage": progress.stage,
        "label": progress.label,
        "range": progress.stage.range_label(),
        "progress_percent": progress.progress_percent,
        "messages_to_next": progress.messages_to_next,
        "next_stage": progress.stage.next().map(PlantStage::label),
    }))
}
