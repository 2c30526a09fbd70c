//! Preview Review Tool
//!
//! Show what each of the four ratings would do to a note, without committing
//! any of them. Useful for labelling rating buttons with their intervals.

use serde_json::Value;
use std::sync::Arc;

use learnbase_core::Scheduler;

use super::{parse_args, review_json, StateArgs};

/// Input schema for preview_review tool
pub fn schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "reviewMode": {
                "type": "string",
                "enum": ["spaced", "scheduled", "adaptive", "fixed"],
                "description": "'spaced'/'adaptive' for SM-2 scheduling, 'scheduled'/'fixed' for a fixed interval pattern"
            },
            "currentInterval": {
                "type": "integer",
                "description": "Current interval in days",
                "minimum": 1,
                "default": 1
            },
            "easeFactor": {
                "type": "number",
                "description": "Current ease factor (1.3 - 3.0). Defaults to 2.5"
            },
            "reviewCount": {
                "type": "integer",
                "description": "Number of completed reviews",
                "minimum": 0,
                "default": 0
            },
            "schedulePattern": {
                "type": "string",
                "description": "Interval pattern for scheduled mode"
            }
        },
        "required": ["reviewMode"]
    })
}

pub async fn execute(scheduler: &Arc<Scheduler>, args: Option<Value>) -> Result<Value, String> {
    let args: StateArgs = parse_args(args)?;
    let state = args.into_state(scheduler)?;

    let preview = scheduler.preview(&state);

    Ok(serde_json::json!({
        "success": true,
        "reviewMode": state.mode.as_str(),
        "again": review_json(&preview.again),
        "hard": review_json(&preview.hard),
        "good": review_json(&preview.good),
        "easy": review_json(&preview.easy),
    }))
}
