//! Fixed-schedule walker
//!
//! Progression is positional within a user-authored pattern: Again restarts
//! the sequence, Hard repeats the current step, Good advances one, Easy
//! advances two. Every index is clipped to the final step, so once a note
//! reaches the end it stays there. The ease factor is not touched here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::clock::{days_after, Clock};
use super::pattern::SchedulePattern;
use super::rating::Rating;
use crate::error::Result;

/// Result of one fixed-schedule step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedOutcome {
    /// Interval of the selected step
    pub interval_days: u32,
    /// Position selected within the pattern
    pub step_index: usize,
    /// `now + interval_days`
    pub next_review: DateTime<Utc>,
}

/// Pattern position selected by a rating, clipped to `[0, len - 1]`
pub fn step_index(rating: Rating, review_count: u32, len: usize) -> usize {
    let last = len.saturating_sub(1);
    let position = review_count as usize;
    match rating {
        Rating::Again => 0,
        Rating::Hard => position.min(last),
        Rating::Good => position.saturating_add(1).min(last),
        Rating::Easy => position.saturating_add(2).min(last),
    }
}

/// Fixed step at a given instant
pub fn schedule_fixed(
    rating: Rating,
    pattern: &SchedulePattern,
    review_count: u32,
    now: DateTime<Utc>,
) -> FixedOutcome {
    let step_index = step_index(rating, review_count, pattern.len());
    let interval_days = pattern.interval_at(step_index);

    tracing::debug!(
        rating = rating.as_i32(),
        step_index,
        steps = pattern.len(),
        interval_days,
        "Fixed schedule computed"
    );

    FixedOutcome {
        interval_days,
        step_index,
        next_review: days_after(now, interval_days),
    }
}

/// Compute the next fixed-schedule review from raw inputs.
///
/// Fails with [`SchedulingError::InvalidArgument`](crate::SchedulingError)
/// when `rating` is not 1-4. A malformed `pattern` is not an error; it walks
/// the fallback sequence.
pub fn compute_next_fixed(
    rating: i64,
    pattern: &str,
    review_count: u32,
    clock: &dyn Clock,
) -> Result<FixedOutcome> {
    let rating = Rating::try_from(rating)?;
    let pattern = SchedulePattern::parse(pattern);
    if pattern.is_fallback() {
        tracing::warn!(pattern = pattern.source(), "Schedule pattern has no valid tokens, walking fallback");
    }
    Ok(schedule_fixed(rating, &pattern, review_count, clock.now()))
}

// ============================================================================
// TESTS
// ============================================================================
