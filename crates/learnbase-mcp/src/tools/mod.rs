//! MCP Tools
//!
//! Tool implementations for the LearnBase scheduling server. Every tool is
//! stateless: callers pass the note's scheduling state in and persist what
//! comes back.

pub mod next_review;
pub mod pattern;
pub mod presets;
pub mod preview;

use serde::Deserialize;
use serde_json::Value;

use learnbase_core::{Rating, ReviewMode, ReviewResult, Scheduler, SchedulingState};

/// Parse a JSON rating; integral numbers 1-4 only
pub(crate) fn parse_rating(value: &Value) -> Result<Rating, String> {
    let parsed = if let Some(i) = value.as_i64() {
        Rating::try_from(i)
    } else if let Some(f) = value.as_f64() {
        Rating::try_from(f)
    } else {
        return Err("Rating must be a number between 1 and 4".to_string());
    };
    parsed.map_err(|e| e.to_string())
}

/// Deserialize tool arguments, rejecting a missing object
pub(crate) fn parse_args<T: for<'de> Deserialize<'de>>(args: Option<Value>) -> Result<T, String> {
    match args {
        Some(v) => serde_json::from_value(v).map_err(|e| format!("Invalid arguments: {}", e)),
        None => Err("Missing arguments".to_string()),
    }
}

/// A note's scheduling state as supplied by the caller
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StateArgs {
    #[serde(alias = "review_mode")]
    review_mode: String,
    #[serde(default = "default_interval", alias = "current_interval")]
    current_interval: u32,
    #[serde(default, alias = "ease_factor")]
    ease_factor: Option<f64>,
    #[serde(default, alias = "review_count")]
    review_count: u32,
    #[serde(default, alias = "schedule_pattern")]
    schedule_pattern: Option<String>,
}

fn default_interval() -> u32 {
    1
}

impl StateArgs {
    pub(crate) fn into_state(self, scheduler: &Scheduler) -> Result<SchedulingState, String> {
        let mode = ReviewMode::from_parts(&self.review_mode, self.schedule_pattern.as_deref())
            .map_err(|e| e.to_string())?;

        let mut state = scheduler.new_state(mode);
        state.interval_days = self.current_interval.max(1);
        if let Some(ease) = self.ease_factor {
            state.ease_factor = ease;
        }
        state.review_count = self.review_count;
        Ok(state)
    }
}

/// JSON view of a review result
pub(crate) fn review_json(result: &ReviewResult) -> Value {
    let mut value = serde_json::json!({
        "rating": result.rating.name(),
        "ratingValue": result.rating.as_i32(),
        "intervalDays": result.interval_days,
        "easeFactor": result.state.ease_factor,
        "previousEaseFactor": result.previous_ease_factor,
        "reviewCount": result.state.review_count,
        "nextReview": result.state.next_review.to_rfc3339(),
        "nextReviewDate": result.state.next_review.format("%Y-%m-%d").to_string(),
    });
    if let (Some(index), Some(obj)) = (result.step_index, value.as_object_mut()) {
        obj.insert("stepIndex".to_string(), serde_json::json!(index));
    }
    value
}
