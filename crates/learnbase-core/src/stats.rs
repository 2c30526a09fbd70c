//! Review statistics over a collection of scheduling states

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scheduling::{SchedulingState, EASE_FACTOR_DEFAULT};

/// Summary of a note collection's review load
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total: usize,
    /// Due on or before the end of today (UTC), overdue included
    pub due_today: usize,
    /// Due after today but within the following seven days
    pub due_this_week: usize,
    /// Last reviewed on today's date
    pub reviewed_today: usize,
    /// Mean ease over notes reviewed at least once; the default when none
    pub average_ease: f64,
    pub adaptive_count: usize,
    pub fixed_count: usize,
}

impl ReviewStats {
    pub fn collect<'a>(states: impl IntoIterator<Item = &'a SchedulingState>, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let today_end = today.and_time(NaiveTime::MIN).and_utc() + Duration::days(1);
        let week_end = today_end + Duration::days(7);

        let mut stats = ReviewStats::default();
        let mut ease_sum = 0.0;
        let mut reviewed = 0usize;

        for state in states {
            stats.total += 1;

            if state.next_review < today_end {
                stats.due_today += 1;
            } else if state.next_review < week_end {
                stats.due_this_week += 1;
            }

            if state.last_reviewed.is_some_and(|last| last.date_naive() == today) {
                stats.reviewed_today += 1;
            }

            if state.review_count > 0 {
                ease_sum += state.ease_factor;
                reviewed += 1;
            }

            if state.mode.is_fixed() {
                stats.fixed_count += 1;
            } else {
                stats.adaptive_count += 1;
            }
        }

        stats.average_ease = if reviewed > 0 {
            ease_sum / reviewed as f64
        } else {
            EASE_FACTOR_DEFAULT
        };
        stats
    }
}
