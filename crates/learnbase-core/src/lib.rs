//! # LearnBase Core
//!
//! Spaced repetition scheduling engine for a personal knowledge base.
//!
//! - **Adaptive scheduling**: simplified SM-2 with a clamped ease factor
//! - **Fixed schedules**: positional walk through patterns like `"1d,1w,2w,1m"`
//! - **Presets**: aggressive, moderate and relaxed patterns
//! - **Review transitions**: apply a rating to a note's persisted state
//! - **Statistics**: due counts and average ease over a collection
//!
//! The engine is pure. It reads the current instant through an injected
//! [`Clock`] and never stores anything; persistence and per-note locking
//! belong to the caller's note store.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use learnbase_core::{FixedClock, Rating, ReviewMode, Scheduler, SchedulerConfig};
//!
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
//! let scheduler = Scheduler::with_clock(SchedulerConfig::default(), clock);
//!
//! // A note entering review tracking
//! let state = scheduler.new_state(ReviewMode::Adaptive);
//!
//! // The user rates their recall
//! let result = scheduler.review(&state, Rating::Good);
//! assert_eq!(result.state.review_count, 1);
//! assert_eq!(result.interval_days, 1);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod config;
pub mod error;
pub mod scheduling;
pub mod stats;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use config::{ConfigParseError, SchedulerConfig};
pub use error::{Result, SchedulingError};
pub use stats::ReviewStats;

pub use scheduling::{
    compute_next_adaptive,
    compute_next_fixed,
    format_days,
    parse_pattern,
    AdaptiveOutcome,
    AdaptiveParameters,
    Clock,
    FixedClock,
    FixedOutcome,
    PreviewResults,
    Rating,
    ReviewMode,
    ReviewResult,
    SchedulePattern,
    SchedulePreset,
    Scheduler,
    SchedulingState,
    SystemClock,
    EASE_FACTOR_DEFAULT,
    EASE_FACTOR_MAX,
    EASE_FACTOR_MIN,
    FALLBACK_INTERVALS,
    FIRST_REVIEW_INTERVAL,
    PRESET_AGGRESSIVE,
    PRESET_MODERATE,
    PRESET_RELAXED,
};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        Clock, FixedClock, Rating, ReviewMode, ReviewResult, ReviewStats, SchedulePattern,
        SchedulePreset, Scheduler, SchedulerConfig, SchedulingError, SchedulingState, SystemClock,
    };
}
