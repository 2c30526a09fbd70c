//! Scheduler
//!
//! Owns the configuration and the clock, and applies a rating to a note's
//! [`SchedulingState`]: dispatch on the review mode, then advance the review
//! bookkeeping. Immutable and `Send + Sync`, so one instance can be shared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::adaptive::{AdaptiveOutcome, AdaptiveParameters};
use super::clock::{Clock, SystemClock};
use super::fixed::{schedule_fixed, FixedOutcome};
use super::pattern::SchedulePattern;
use super::rating::Rating;
use super::state::{ReviewMode, SchedulingState};
use crate::config::SchedulerConfig;

/// Outcome of applying one rating to a state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    /// Successor state to persist
    pub state: SchedulingState,
    /// Rating that produced it
    pub rating: Rating,
    /// Days until the next review
    pub interval_days: u32,
    /// Ease factor before the review
    pub previous_ease_factor: f64,
    /// Pattern step selected, fixed mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_index: Option<usize>,
}

/// What each rating would do, without committing any of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResults {
    pub again: ReviewResult,
    pub hard: ReviewResult,
    pub good: ReviewResult,
    pub easy: ReviewResult,
}

impl PreviewResults {
    /// Result for one rating
    pub fn get(&self, rating: Rating) -> &ReviewResult {
        match rating {
            Rating::Again => &self.again,
            Rating::Hard => &self.hard,
            Rating::Good => &self.good,
            Rating::Easy => &self.easy,
        }
    }

    /// Results in rating order
    pub fn iter(&self) -> impl Iterator<Item = &ReviewResult> {
        [&self.again, &self.hard, &self.good, &self.easy].into_iter()
    }
}

/// Spaced repetition scheduler
#[derive(Debug, Clone)]
pub struct Scheduler<C: Clock = SystemClock> {
    config: SchedulerConfig,
    clock: C,
}

impl Default for Scheduler<SystemClock> {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl Scheduler<SystemClock> {
    /// Scheduler on the wall clock
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Scheduler<C> {
    /// Scheduler on an injected clock
    pub fn with_clock(config: SchedulerConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn params(&self) -> &AdaptiveParameters {
        &self.config.adaptive
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current instant according to this scheduler's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Fresh state for a new note in the given mode
    pub fn new_state(&self, mode: ReviewMode) -> SchedulingState {
        let mut state = SchedulingState::new(mode, self.now());
        state.ease_factor = self.config.adaptive.ease_default;
        state
    }

    /// Fresh fixed-mode state on the configured default preset
    pub fn new_preset_state(&self) -> SchedulingState {
        self.new_state(ReviewMode::fixed(self.config.default_preset.pattern()))
    }

    /// One adaptive step from raw state values
    pub fn next_adaptive(
        &self,
        rating: Rating,
        interval_days: u32,
        ease_factor: f64,
        review_count: u32,
    ) -> AdaptiveOutcome {
        self.config
            .adaptive
            .schedule(rating, interval_days, ease_factor, review_count, self.now())
    }

    /// One fixed-pattern step
    pub fn next_fixed(&self, rating: Rating, pattern: &SchedulePattern, review_count: u32) -> FixedOutcome {
        schedule_fixed(rating, pattern, review_count, self.now())
    }

    /// Apply a rating to a state, producing the successor to persist.
    ///
    /// Adaptive mode updates interval and ease factor; fixed mode updates the
    /// interval only and carries the ease factor through. Both increment the
    /// review count and stamp `last_reviewed`.
    pub fn review(&self, state: &SchedulingState, rating: Rating) -> ReviewResult {
        let now = self.now();
        self.review_at(state, rating, now)
    }

    /// All four ratings against the same instant; `state` is not modified
    pub fn preview(&self, state: &SchedulingState) -> PreviewResults {
        let now = self.now();
        PreviewResults {
            again: self.review_at(state, Rating::Again, now),
            hard: self.review_at(state, Rating::Hard, now),
            good: self.review_at(state, Rating::Good, now),
            easy: self.review_at(state, Rating::Easy, now),
        }
    }

    fn review_at(&self, state: &SchedulingState, rating: Rating, now: DateTime<Utc>) -> ReviewResult {
        let (interval_days, ease_factor, next_review, step_index) = match &state.mode {
            ReviewMode::Adaptive => {
                let outcome = self.config.adaptive.schedule(
                    rating,
                    state.interval_days,
                    state.ease_factor,
                    state.review_count,
                    now,
                );
                (outcome.interval_days, outcome.ease_factor, outcome.next_review, None)
            }
            ReviewMode::Fixed { pattern } => {
                let pattern = SchedulePattern::parse(pattern);
                if pattern.is_fallback() {
                    tracing::warn!(
                        pattern = pattern.source(),
                        "Stored schedule pattern has no valid tokens, walking fallback"
                    );
                }
                let outcome = schedule_fixed(rating, &pattern, state.review_count, now);
                (outcome.interval_days, state.ease_factor, outcome.next_review, Some(outcome.step_index))
            }
        };

        let next = SchedulingState {
            interval_days,
            ease_factor,
            review_count: state.review_count.saturating_add(1),
            mode: state.mode.clone(),
            next_review,
            last_reviewed: Some(now),
        };

        tracing::debug!(
            mode = state.mode.as_str(),
            rating = rating.as_i32(),
            review_count = next.review_count,
            interval_days,
            next_review = %next_review,
            "Review applied"
        );

        ReviewResult {
            state: next,
            rating,
            interval_days,
            previous_ease_factor: state.ease_factor,
            step_index,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
