//! Schedule Presets Tool
//!
//! List the named fixed-schedule patterns.

use serde_json::Value;
use std::sync::Arc;

use learnbase_core::{parse_pattern, SchedulePreset, Scheduler};

/// Input schema for list_schedule_presets tool
pub fn schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {}
    })
}

pub async fn execute(scheduler: &Arc<Scheduler>, _args: Option<Value>) -> Result<Value, String> {
    let default_preset = scheduler.config().default_preset;

    let presets: Vec<Value> = SchedulePreset::ALL
        .iter()
        .map(|preset| {
            serde_json::json!({
                "name": preset.as_str(),
                "pattern": preset.pattern(),
                "intervals": parse_pattern(preset.pattern()),
                "description": preset.description(),
                "isDefault": *preset == default_preset,
            })
        })
        .collect();

    Ok(serde_json::json!({
        "success": true,
        "presets": presets,
        "default": default_preset.as_str(),
    }))
}
