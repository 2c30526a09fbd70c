//! Per-note scheduling state
//!
//! What a note store persists between reviews. The engine reads one of these,
//! computes a successor, and hands it back; it never stores anything itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::adaptive::EASE_FACTOR_DEFAULT;
use super::pattern::SchedulePattern;
use crate::error::{Result, SchedulingError};

// ============================================================================
// REVIEW MODE
// ============================================================================

/// Which algorithm schedules a note
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ReviewMode {
    /// Ease-factor driven intervals (a.k.a. "spaced")
    #[default]
    #[serde(alias = "spaced")]
    Adaptive,
    /// Positional walk through a fixed pattern (a.k.a. "scheduled")
    #[serde(alias = "scheduled")]
    Fixed {
        /// Pattern text as authored, e.g. `"1d,1w,2w"`
        pattern: String,
    },
}

impl ReviewMode {
    /// Fixed mode over a pattern
    pub fn fixed(pattern: impl Into<String>) -> Self {
        ReviewMode::Fixed { pattern: pattern.into() }
    }

    /// Build from a mode name and an optional pattern.
    ///
    /// Accepts `adaptive`/`spaced` and `fixed`/`scheduled`. Fixed mode needs a
    /// non-blank pattern; a pattern given with adaptive mode is ignored.
    pub fn from_parts(mode: &str, pattern: Option<&str>) -> Result<Self> {
        match mode.trim().to_lowercase().as_str() {
            "adaptive" | "spaced" => Ok(ReviewMode::Adaptive),
            "fixed" | "scheduled" => match pattern.map(str::trim).filter(|p| !p.is_empty()) {
                Some(p) => Ok(ReviewMode::fixed(p)),
                None => Err(SchedulingError::invalid(
                    "schedule pattern required for fixed (scheduled) mode",
                )),
            },
            other => Err(SchedulingError::invalid(format!(
                "unknown review mode '{}', expected 'spaced' or 'scheduled'",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewMode::Adaptive => "adaptive",
            ReviewMode::Fixed { .. } => "fixed",
        }
    }

    /// Pattern text for fixed mode
    pub fn pattern(&self) -> Option<&str> {
        match self {
            ReviewMode::Adaptive => None,
            ReviewMode::Fixed { pattern } => Some(pattern),
        }
    }

    /// Parsed pattern for fixed mode
    pub fn schedule_pattern(&self) -> Option<SchedulePattern> {
        self.pattern().map(SchedulePattern::parse)
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, ReviewMode::Fixed { .. })
    }
}

impl std::fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewMode::Adaptive => write!(f, "adaptive"),
            ReviewMode::Fixed { pattern } => write!(f, "fixed ({})", pattern),
        }
    }
}

// ============================================================================
// SCHEDULING STATE
// ============================================================================

/// Scheduling state carried by a note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingState {
    /// Current gap in days
    pub interval_days: u32,
    /// Difficulty multiplier, within the scheduler's ease bounds
    pub ease_factor: f64,
    /// Completed reviews
    pub review_count: u32,
    /// Algorithm selector
    #[serde(flatten)]
    pub mode: ReviewMode,
    /// When the note is next due
    pub next_review: DateTime<Utc>,
    /// Last completed review
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl SchedulingState {
    /// Fresh state for a note entering review tracking; due immediately
    pub fn new(mode: ReviewMode, now: DateTime<Utc>) -> Self {
        Self {
            interval_days: 1,
            ease_factor: EASE_FACTOR_DEFAULT,
            review_count: 0,
            mode,
            next_review: now,
            last_reviewed: None,
        }
    }

    /// Fresh adaptive state
    pub fn adaptive(now: DateTime<Utc>) -> Self {
        Self::new(ReviewMode::Adaptive, now)
    }

    /// Fresh fixed-pattern state
    pub fn fixed(pattern: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::new(ReviewMode::fixed(pattern), now)
    }

    /// True once `next_review` has been reached
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }

    /// Calendar days (UTC) from `now` until the next review; negative when overdue
    pub fn days_until_review(&self, now: DateTime<Utc>) -> i64 {
        (self.next_review.date_naive() - now.date_naive()).num_days()
    }

    /// Calendar days (UTC) since the last review, `None` if never reviewed
    pub fn days_since_review(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_reviewed
            .map(|last| (now.date_naive() - last.date_naive()).num_days())
    }
}

// ============================================================================
// TESTS
// ============================================================================
