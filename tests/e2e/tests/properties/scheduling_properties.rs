//! Scheduling Properties
//!
//! Invariants of both schedulers, checked over exhaustive rating sequences
//! and a grid of starting states rather than single examples.

use chrono::Duration;
use learnbase_core::{
    compute_next_adaptive, compute_next_fixed, Rating, ReviewMode, Scheduler, SchedulerConfig,
    SchedulingError, EASE_FACTOR_MAX, EASE_FACTOR_MIN,
};
use learnbase_e2e_tests::TestDataFactory;

const EASES: [f64; 7] = [0.5, 1.3, 1.31, 2.0, 2.5, 2.95, 3.0];
const INTERVALS: [u32; 6] = [0, 1, 2, 10, 365, 100_000];

fn scheduler() -> Scheduler<learnbase_core::FixedClock> {
    Scheduler::with_clock(SchedulerConfig::default(), TestDataFactory::clock())
}

// ============================================================================
// ADAPTIVE
// ============================================================================

#[test]
fn test_ease_stays_in_bounds_for_every_sequence() {
    let scheduler = scheduler();

    for start_ease in [1.3, 2.5, 3.0] {
        for sequence in TestDataFactory::all_sequences(6) {
            let mut state = TestDataFactory::adaptive_state(1, start_ease, 0);
            for rating in sequence {
                state = scheduler.review(&state, rating).state;
                assert!(
                    (EASE_FACTOR_MIN..=EASE_FACTOR_MAX).contains(&state.ease_factor),
                    "ease {} out of bounds",
                    state.ease_factor
                );
            }
        }
    }
}

#[test]
fn test_ease_in_bounds_from_any_input() {
    for rating in 1..=4 {
        for ease in EASES.into_iter().chain([-1.0, 10.0, f64::NAN, f64::INFINITY]) {
            let outcome = compute_next_adaptive(rating, 10, ease, 3, &TestDataFactory::clock()).unwrap();
            assert!((EASE_FACTOR_MIN..=EASE_FACTOR_MAX).contains(&outcome.ease_factor));
        }
    }
}

#[test]
fn test_again_always_resets_to_one_day() {
    for interval in INTERVALS {
        for ease in EASES {
            for count in [0, 1, 7, u32::MAX] {
                let outcome = compute_next_adaptive(1, interval, ease, count, &TestDataFactory::clock()).unwrap();
                assert_eq!(outcome.interval_days, 1);
            }
        }
    }
}

#[test]
fn test_first_good_review_is_one_day() {
    for interval in INTERVALS {
        for ease in EASES {
            let outcome = compute_next_adaptive(3, interval, ease, 0, &TestDataFactory::clock()).unwrap();
            assert_eq!(outcome.interval_days, 1);
        }
    }
}

#[test]
fn test_worked_examples() {
    let clock = TestDataFactory::clock();

    let easy = compute_next_adaptive(4, 10, 2.5, 5, &clock).unwrap();
    assert_eq!(easy.interval_days, 25);
    assert!((easy.ease_factor - 2.6).abs() < 1e-9);

    let hard = compute_next_adaptive(2, 10, 2.5, 5, &clock).unwrap();
    assert_eq!(hard.interval_days, 5);
    assert!((hard.ease_factor - 2.35).abs() < 1e-9);
}

#[test]
fn test_intervals_are_always_positive() {
    let scheduler = scheduler();
    for sequence in TestDataFactory::all_sequences(5) {
        let mut state = scheduler.new_state(ReviewMode::Adaptive);
        for rating in sequence {
            let result = scheduler.review(&state, rating);
            assert!(result.interval_days >= 1);
            state = result.state;
        }
    }
}

#[test]
fn test_next_review_is_now_plus_interval() {
    let scheduler = scheduler();
    for mode in [ReviewMode::Adaptive, ReviewMode::fixed("1d,1w,2w,1m")] {
        let mut state = scheduler.new_state(mode);
        state.review_count = 2;
        state.interval_days = 9;
        for result in scheduler.preview(&state).iter() {
            assert_eq!(
                result.state.next_review,
                scheduler.now() + Duration::days(i64::from(result.interval_days))
            );
        }
    }
}

// ============================================================================
// FIXED
// ============================================================================

#[test]
fn test_fixed_worked_examples() {
    let clock = TestDataFactory::clock();
    assert_eq!(compute_next_fixed(1, "1d,1w,2w", 5, &clock).unwrap().interval_days, 1);
    assert_eq!(compute_next_fixed(4, "1d,1w,2w", 0, &clock).unwrap().interval_days, 14);
    assert_eq!(compute_next_fixed(3, "1d,1w,2w", 5, &clock).unwrap().interval_days, 14);
}

#[test]
fn test_fixed_step_stays_in_pattern() {
    let scheduler = scheduler();
    for len in 1..=5usize {
        let pattern: Vec<String> = (1..=len).map(|i| format!("{}d", i)).collect();
        let pattern = pattern.join(",");

        for sequence in TestDataFactory::all_sequences(5) {
            let mut state = scheduler.new_state(ReviewMode::fixed(pattern.clone()));
            for rating in sequence {
                let result = scheduler.review(&state, rating);
                let step = result.step_index.unwrap();
                assert!(step < len);
                assert_eq!(result.interval_days as usize, step + 1);
                state = result.state;
            }
        }
    }
}

#[test]
fn test_fixed_clipping_is_idempotent_at_end() {
    let clock = TestDataFactory::clock();
    for count in 2..50 {
        for rating in [3, 4] {
            let outcome = compute_next_fixed(rating, "1d,1w,2w", count, &clock).unwrap();
            assert_eq!(outcome.interval_days, 14);
            assert_eq!(outcome.step_index, 2);
        }
    }
}

#[test]
fn test_fixed_never_changes_ease() {
    let scheduler = scheduler();
    for ease in EASES {
        for sequence in TestDataFactory::all_sequences(4) {
            let mut state = TestDataFactory::fixed_state("1d,3d,1w", 0);
            state.ease_factor = ease;
            for rating in sequence {
                state = scheduler.review(&state, rating).state;
                assert_eq!(state.ease_factor, ease);
            }
        }
    }
}

// ============================================================================
// BOOKKEEPING AND VALIDATION
// ============================================================================

#[test]
fn test_review_count_increments_by_one() {
    let scheduler = scheduler();
    for mode in [ReviewMode::Adaptive, ReviewMode::fixed("1w")] {
        let mut state = scheduler.new_state(mode);
        for (i, rating) in TestDataFactory::ratings(&[1, 2, 3, 4, 1]).into_iter().enumerate() {
            state = scheduler.review(&state, rating).state;
            assert_eq!(state.review_count as usize, i + 1);
            assert_eq!(state.last_reviewed, Some(scheduler.now()));
        }
    }
}

#[test]
fn test_invalid_ratings_rejected() {
    let clock = TestDataFactory::clock();
    for rating in [0, 5, -1, 100, i64::MAX] {
        assert!(matches!(
            compute_next_adaptive(rating, 1, 2.5, 0, &clock),
            Err(SchedulingError::InvalidArgument(_))
        ));
        assert!(matches!(
            compute_next_fixed(rating, "1d", 0, &clock),
            Err(SchedulingError::InvalidArgument(_))
        ));
    }

    for value in [2.5, 0.0, 4.5, f64::NAN] {
        assert!(Rating::try_from(value).is_err());
    }
}
