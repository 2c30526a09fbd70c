//! Test Data Factory
//!
//! Provides utilities for generating scheduling test data:
//! - Scheduling states in known conditions
//! - Batch generation across both review modes
//! - Rating sequences, including exhaustive enumeration

use chrono::{DateTime, Duration, TimeZone, Utc};
use learnbase_core::{FixedClock, Rating, ReviewMode, SchedulingState, PRESET_MODERATE};

use crate::TestNoteStore;

/// Factory for creating test data
pub struct TestDataFactory;

/// Configuration for batch note generation
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of notes to create
    pub count: usize,
    /// Id prefix; notes are named `<prefix>-<n>`
    pub id_prefix: String,
    /// Every n-th note uses fixed mode (0 = none)
    pub fixed_every: usize,
    /// Pattern for fixed-mode notes
    pub pattern: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            count: 10,
            id_prefix: "note".to_string(),
            fixed_every: 3,
            pattern: PRESET_MODERATE.to_string(),
        }
    }
}

impl TestDataFactory {
    /// Start instant shared by every test, a Monday morning
    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
    }

    pub fn clock() -> FixedClock {
        FixedClock::new(Self::epoch())
    }

    // ========================================================================
    // SINGLE STATES
    // ========================================================================

    /// Adaptive state with explicit values
    pub fn adaptive_state(interval_days: u32, ease_factor: f64, review_count: u32) -> SchedulingState {
        let mut state = SchedulingState::adaptive(Self::epoch());
        state.interval_days = interval_days;
        state.ease_factor = ease_factor;
        state.review_count = review_count;
        state
    }

    /// Fixed state at a given position
    pub fn fixed_state(pattern: &str, review_count: u32) -> SchedulingState {
        let mut state = SchedulingState::fixed(pattern, Self::epoch());
        state.review_count = review_count;
        state
    }

    /// State due `offset` from the epoch, reviewed `reviewed_ago` before it
    pub fn state_due_in(offset: Duration, reviewed_ago: Option<Duration>) -> SchedulingState {
        let mut state = SchedulingState::adaptive(Self::epoch());
        state.next_review = Self::epoch() + offset;
        state.last_reviewed = reviewed_ago.map(|ago| Self::epoch() - ago);
        if state.last_reviewed.is_some() {
            state.review_count = 1;
        }
        state
    }

    // ========================================================================
    // BATCH CREATION
    // ========================================================================

    /// Create a batch of notes
    pub fn create_batch(store: &mut TestNoteStore, count: usize) -> Vec<String> {
        Self::create_batch_with_config(store, BatchConfig { count, ..Default::default() })
    }

    /// Create a batch with custom configuration
    pub fn create_batch_with_config(store: &mut TestNoteStore, config: BatchConfig) -> Vec<String> {
        let mut ids = Vec::with_capacity(config.count);

        for i in 0..config.count {
            let id = format!("{}-{}", config.id_prefix, i);
            let mode = if config.fixed_every > 0 && i % config.fixed_every == 0 {
                ReviewMode::fixed(config.pattern.clone())
            } else {
                ReviewMode::Adaptive
            };
            store.add_note(&id, mode);
            ids.push(id);
        }

        ids
    }

    // ========================================================================
    // RATING SEQUENCES
    // ========================================================================

    /// Ratings from integers; panics on anything outside 1-4
    pub fn ratings(values: &[i64]) -> Vec<Rating> {
        values
            .iter()
            .map(|&v| Rating::try_from(v).expect("test rating out of range"))
            .collect()
    }

    /// Every rating sequence of exactly `len` reviews (4^len sequences)
    pub fn all_sequences(len: usize) -> Vec<Vec<Rating>> {
        let mut sequences: Vec<Vec<Rating>> = vec![Vec::new()];
        for _ in 0..len {
            sequences = sequences
                .into_iter()
                .flat_map(|seq| {
                    Rating::ALL.into_iter().map(move |rating| {
                        let mut next = seq.clone();
                        next.push(rating);
                        next
                    })
                })
                .collect();
        }
        sequences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sequences_count() {
        assert_eq!(TestDataFactory::all_sequences(0).len(), 1);
        assert_eq!(TestDataFactory::all_sequences(3).len(), 64);
    }

    #[test]
    fn test_batch_mixes_modes() {
        let mut store = TestNoteStore::new_temp();
        let ids = TestDataFactory::create_batch(&mut store, 6);
        assert_eq!(ids.len(), 6);
        let stats = store.stats();
        assert_eq!(stats.fixed_count, 2);
        assert_eq!(stats.adaptive_count, 4);
    }
}
