//! Schedule Pattern Tool
//!
//! Parse a fixed-schedule pattern and show the steps it produces.

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use learnbase_core::{format_days, SchedulePattern, Scheduler};

use super::parse_args;

/// Input schema for parse_schedule_pattern tool
pub fn schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "pattern": {
                "type": "string",
                "description": "Comma-separated intervals: <count><unit> with unit d (day), w (week), m (month = 30 days) or y (year = 365 days). Example: '1d,1w,2w,1m,3m,6m'"
            }
        },
        "required": ["pattern"]
    })
}

#[derive(Debug, Deserialize)]
struct PatternArgs {
    pattern: String,
}

pub async fn execute(_scheduler: &Arc<Scheduler>, args: Option<Value>) -> Result<Value, String> {
    let args: PatternArgs = parse_args(args)?;
    let pattern = SchedulePattern::parse(&args.pattern);

    let steps: Vec<Value> = pattern
        .intervals()
        .iter()
        .enumerate()
        .map(|(index, &days)| {
            serde_json::json!({
                "step": index,
                "days": days,
                "label": format_days(days),
            })
        })
        .collect();

    let message = if pattern.is_fallback() {
        format!(
            "No valid intervals in '{}', using the fallback pattern {}",
            args.pattern, pattern
        )
    } else {
        format!("{} step(s): {}", pattern.len(), pattern)
    };

    Ok(serde_json::json!({
        "success": true,
        "pattern": args.pattern,
        "intervals": pattern.intervals(),
        "normalized": pattern.to_string(),
        "fallback": pattern.is_fallback(),
        "steps": steps,
        "message": message,
    }))
}
