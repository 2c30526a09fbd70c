//! Next Review Tool
//!
//! Apply a rating to a note's scheduling state and return the successor.
//! Adaptive (spaced) notes use the SM-2 update; fixed (scheduled) notes walk
//! their pattern and keep their ease factor.

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use learnbase_core::Scheduler;

use super::{parse_args, parse_rating, review_json, StateArgs};

/// Input schema for calculate_next_review tool
pub fn schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "reviewMode": {
                "type": "string",
                "enum": ["spaced", "scheduled", "adaptive", "fixed"],
                "description": "'spaced'/'adaptive' for SM-2 scheduling, 'scheduled'/'fixed' for a fixed interval pattern"
            },
            "rating": {
                "type": "integer",
                "description": "Recall rating: 1=Again (forgot), 2=Hard, 3=Good, 4=Easy",
                "minimum": 1,
                "maximum": 4
            },
            "currentInterval": {
                "type": "integer",
                "description": "Current interval in days",
                "minimum": 1,
                "default": 1
            },
            "easeFactor": {
                "type": "number",
                "description": "Current ease factor (1.3 - 3.0). Defaults to 2.5",
                "minimum": 1.3,
                "maximum": 3.0
            },
            "reviewCount": {
                "type": "integer",
                "description": "Number of completed reviews",
                "minimum": 0,
                "default": 0
            },
            "schedulePattern": {
                "type": "string",
                "description": "Interval pattern for scheduled mode, e.g. '1d,1w,2w,1m,3m,6m'"
            }
        },
        "required": ["reviewMode", "rating"]
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NextReviewArgs {
    #[serde(alias = "overall_rating", alias = "overallRating")]
    rating: Value,
    #[serde(flatten)]
    state: StateArgs,
}

pub async fn execute(scheduler: &Arc<Scheduler>, args: Option<Value>) -> Result<Value, String> {
    let args: NextReviewArgs = parse_args(args)?;
    let rating = parse_rating(&args.rating)?;
    let state = args.state.into_state(scheduler)?;

    let result = scheduler.review(&state, rating);

    let mut value = review_json(&result);
    if let Some(obj) = value.as_object_mut() {
        obj.insert("success".to_string(), serde_json::json!(true));
        obj.insert("reviewMode".to_string(), serde_json::json!(state.mode.as_str()));
        obj.insert(
            "message".to_string(),
            serde_json::json!(format!(
                "Rated '{}' ({}). Next review in {} day(s) on {}",
                rating.name(),
                rating.description(),
                result.interval_days,
                result.state.next_review.format("%Y-%m-%d")
            )),
        );
        if let Some(pattern) = state.mode.schedule_pattern() {
            obj.insert("patternFallback".to_string(), serde_json::json!(pattern.is_fallback()));
        }
    }
    Ok(value)
}

// ============================================================================
// TESTS
// ============================================================================
