//! Adaptive scheduler (simplified SM-2)
//!
//! The ease factor is a long-run difficulty estimate. Only a Good rating lets
//! it compound into the interval; Hard and Easy apply fixed one-shot
//! multipliers, Again resets to one day.
//!
//! | Rating | Ease factor          | Interval                               |
//! |--------|----------------------|----------------------------------------|
//! | Again  | `max(1.3, ef - 0.2)` | `1`                                    |
//! | Hard   | `max(1.3, ef - 0.15)`| `max(1, floor(i * 0.5))`               |
//! | Good   | unchanged            | `floor(i * ef)`, or `1` on first review|
//! | Easy   | `min(3.0, ef + 0.1)` | `floor(i * 2.5)`                       |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::clock::{days_after, Clock};
use super::rating::Rating;
use crate::error::{Result, SchedulingError};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Lowest ease factor a note can reach
pub const EASE_FACTOR_MIN: f64 = 1.3;

/// Highest ease factor a note can reach
pub const EASE_FACTOR_MAX: f64 = 3.0;

/// Ease factor of a newly tracked note
pub const EASE_FACTOR_DEFAULT: f64 = 2.5;

/// Ease penalty for Again
pub const EASE_DECREASE_AGAIN: f64 = 0.2;

/// Ease penalty for Hard
pub const EASE_DECREASE_HARD: f64 = 0.15;

/// Ease bonus for Easy
pub const EASE_INCREASE_EASY: f64 = 0.1;

/// Interval after Again
pub const INTERVAL_AGAIN: u32 = 1;

/// Interval multiplier for Hard
pub const INTERVAL_HARD_MULTIPLIER: f64 = 0.5;

/// Interval multiplier for Easy
pub const INTERVAL_EASY_MULTIPLIER: f64 = 2.5;

/// Interval after a Good rating on a note that was never reviewed
pub const FIRST_REVIEW_INTERVAL: u32 = 1;

// ============================================================================
// PARAMETERS
// ============================================================================

/// Tunable constants of the adaptive scheduler.
///
/// `Default` reproduces the classic values above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AdaptiveParameters {
    pub ease_min: f64,
    pub ease_max: f64,
    pub ease_default: f64,
    pub ease_decrease_again: f64,
    pub ease_decrease_hard: f64,
    pub ease_increase_easy: f64,
    pub again_interval: u32,
    pub hard_multiplier: f64,
    pub easy_multiplier: f64,
    pub first_review_interval: u32,
}

impl Default for AdaptiveParameters {
    fn default() -> Self {
        Self {
            ease_min: EASE_FACTOR_MIN,
            ease_max: EASE_FACTOR_MAX,
            ease_default: EASE_FACTOR_DEFAULT,
            ease_decrease_again: EASE_DECREASE_AGAIN,
            ease_decrease_hard: EASE_DECREASE_HARD,
            ease_increase_easy: EASE_INCREASE_EASY,
            again_interval: INTERVAL_AGAIN,
            hard_multiplier: INTERVAL_HARD_MULTIPLIER,
            easy_multiplier: INTERVAL_EASY_MULTIPLIER,
            first_review_interval: FIRST_REVIEW_INTERVAL,
        }
    }
}

impl AdaptiveParameters {
    /// Reject parameter sets that would break the scheduler's invariants
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.ease_min,
            self.ease_max,
            self.ease_default,
            self.ease_decrease_again,
            self.ease_decrease_hard,
            self.ease_increase_easy,
            self.hard_multiplier,
            self.easy_multiplier,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(SchedulingError::invalid("adaptive parameters must be finite"));
        }
        if self.ease_min < 1.0 || self.ease_min > self.ease_max {
            return Err(SchedulingError::invalid(format!(
                "ease bounds must satisfy 1.0 <= min <= max, got [{}, {}]",
                self.ease_min, self.ease_max
            )));
        }
        if !(self.ease_min..=self.ease_max).contains(&self.ease_default) {
            return Err(SchedulingError::invalid(format!(
                "default ease {} is outside [{}, {}]",
                self.ease_default, self.ease_min, self.ease_max
            )));
        }
        if self.ease_decrease_again < 0.0 || self.ease_decrease_hard < 0.0 || self.ease_increase_easy < 0.0 {
            return Err(SchedulingError::invalid("ease adjustments must not be negative"));
        }
        if self.hard_multiplier <= 0.0 || self.easy_multiplier < 1.0 {
            return Err(SchedulingError::invalid(format!(
                "interval multipliers out of range: hard {} (> 0), easy {} (>= 1)",
                self.hard_multiplier, self.easy_multiplier
            )));
        }
        if self.again_interval == 0 || self.first_review_interval == 0 {
            return Err(SchedulingError::invalid("reset intervals must be at least one day"));
        }
        Ok(())
    }

    /// Clamp into `[ease_min, ease_max]`; non-finite input becomes the default
    pub fn clamp_ease(&self, ease_factor: f64) -> f64 {
        if ease_factor.is_finite() {
            ease_factor.clamp(self.ease_min, self.ease_max)
        } else {
            self.ease_default
        }
    }

    /// Ease factor after a rating
    pub fn next_ease(&self, rating: Rating, ease_factor: f64) -> f64 {
        let adjusted = match rating {
            Rating::Again => (ease_factor - self.ease_decrease_again).max(self.ease_min),
            Rating::Hard => (ease_factor - self.ease_decrease_hard).max(self.ease_min),
            Rating::Good => ease_factor,
            Rating::Easy => (ease_factor + self.ease_increase_easy).min(self.ease_max),
        };
        self.clamp_ease(adjusted)
    }

    /// Interval in days after a rating. `new_ease` is only consulted for Good.
    pub fn next_interval(&self, rating: Rating, interval_days: u32, new_ease: f64, review_count: u32) -> u32 {
        let interval = f64::from(interval_days.max(1));
        match rating {
            Rating::Again => self.again_interval,
            Rating::Hard => (interval * self.hard_multiplier).floor().max(1.0) as u32,
            Rating::Good if review_count == 0 => self.first_review_interval,
            Rating::Good => (interval * new_ease).floor() as u32,
            Rating::Easy => (interval * self.easy_multiplier).floor() as u32,
        }
    }

    /// Full adaptive step at a given instant
    pub fn schedule(
        &self,
        rating: Rating,
        interval_days: u32,
        ease_factor: f64,
        review_count: u32,
        now: DateTime<Utc>,
    ) -> AdaptiveOutcome {
        let ease_factor = self.next_ease(rating, ease_factor);
        let interval_days = self.next_interval(rating, interval_days, ease_factor, review_count);

        tracing::debug!(
            rating = rating.as_i32(),
            interval_days,
            ease_factor,
            review_count,
            "Adaptive schedule computed"
        );

        AdaptiveOutcome {
            interval_days,
            ease_factor,
            next_review: days_after(now, interval_days),
        }
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// Result of one adaptive scheduling step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveOutcome {
    /// New gap in days
    pub interval_days: u32,
    /// New ease factor, always within the configured bounds
    pub ease_factor: f64,
    /// `now + interval_days`
    pub next_review: DateTime<Utc>,
}

/// Compute the next adaptive review with the default parameters.
///
/// Fails with [`SchedulingError::InvalidArgument`] when `rating` is not 1-4.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use learnbase_core::{compute_next_adaptive, FixedClock};
///
/// let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
/// let outcome = compute_next_adaptive(4, 10, 2.5, 5, &clock).unwrap();
/// assert_eq!(outcome.interval_days, 25);
/// ```
pub fn compute_next_adaptive(
    rating: i64,
    interval_days: u32,
    ease_factor: f64,
    review_count: u32,
    clock: &dyn Clock,
) -> Result<AdaptiveOutcome> {
    let rating = Rating::try_from(rating)?;
    Ok(AdaptiveParameters::default().schedule(rating, interval_days, ease_factor, review_count, clock.now()))
}

// ============================================================================
// TESTS
// ============================================================================
