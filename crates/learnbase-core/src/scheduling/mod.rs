//! Spaced Repetition Scheduling Module
//!
//! Two pure scheduling algorithms driven by a 1-4 recall rating:
//!
//! - **Adaptive** (simplified SM-2): interval and ease factor evolve
//!   multiplicatively. The ease factor stays within [1.3, 3.0].
//! - **Fixed**: the note walks a user-authored interval pattern such as
//!   `"1d,1w,2w,1m"`, moving back, holding or advancing by rating.
//!
//! Both read the current instant once, through an injected [`Clock`].

mod adaptive;
mod clock;
mod fixed;
mod pattern;
mod rating;
mod scheduler;
mod state;

pub use adaptive::{
    compute_next_adaptive,
    AdaptiveOutcome,
    AdaptiveParameters,
    // Constants
    EASE_DECREASE_AGAIN,
    EASE_DECREASE_HARD,
    EASE_FACTOR_DEFAULT,
    EASE_FACTOR_MAX,
    EASE_FACTOR_MIN,
    EASE_INCREASE_EASY,
    FIRST_REVIEW_INTERVAL,
    INTERVAL_AGAIN,
    INTERVAL_EASY_MULTIPLIER,
    INTERVAL_HARD_MULTIPLIER,
};

pub use clock::{days_after, Clock, FixedClock, SystemClock};

pub use fixed::{compute_next_fixed, schedule_fixed, step_index, FixedOutcome};

pub use pattern::{
    format_days, parse_pattern, IntervalUnit, SchedulePattern, SchedulePreset, FALLBACK_INTERVALS,
    PRESET_AGGRESSIVE, PRESET_MODERATE, PRESET_RELAXED,
};

pub use rating::Rating;

pub use scheduler::{PreviewResults, ReviewResult, Scheduler};

pub use state::{ReviewMode, SchedulingState};
