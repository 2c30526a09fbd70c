//! Review Cycle Journeys
//!
//! Notes enter review tracking, fall due, get rated, and come back later.
//! The store reviews each note when it becomes due, as a user would.

use chrono::Duration;
use learnbase_core::{Rating, ReviewMode, SchedulePreset, SchedulerConfig, EASE_FACTOR_MIN};
use learnbase_e2e_tests::{TestDataFactory, TestNoteStore};

/// Review a note every time it falls due, returning the intervals chosen
fn review_on_schedule(store: &mut TestNoteStore, id: &str, ratings: &[Rating]) -> Vec<u32> {
    let mut intervals = Vec::new();
    for &rating in ratings {
        let due = store.get(id).unwrap().next_review;
        store.advance_to(due);
        let result = store.review(id, rating).unwrap();
        intervals.push(result.interval_days);
    }
    intervals
}

#[test]
fn test_new_note_is_due_immediately() {
    let mut store = TestNoteStore::new_temp();
    store.add_note("ownership", ReviewMode::Adaptive);

    assert_eq!(store.due_notes(), vec!["ownership".to_string()]);
    assert_eq!(store.stats().due_today, 1);
}

#[test]
fn test_adaptive_good_streak_grows_geometrically() {
    let mut store = TestNoteStore::new_temp();
    store.add_note("lifetimes", ReviewMode::Adaptive);

    let ratings = TestDataFactory::ratings(&[3, 3, 3, 3, 3]);
    let intervals = review_on_schedule(&mut store, "lifetimes", &ratings);

    // First review fixed at one day, then multiplied by the unchanged ease 2.5
    assert_eq!(intervals, vec![1, 2, 5, 12, 30]);
    let state = store.get("lifetimes").unwrap();
    assert_eq!(state.review_count, 5);
    assert_eq!(state.ease_factor, 2.5);
}

#[test]
fn test_adaptive_lapse_resets_interval_and_lowers_ease() {
    let mut store = TestNoteStore::new_temp();
    store.add_note("borrowck", ReviewMode::Adaptive);

    let ratings = TestDataFactory::ratings(&[3, 3, 3, 1, 3]);
    let intervals = review_on_schedule(&mut store, "borrowck", &ratings);

    assert_eq!(intervals[3], 1);
    // Good after the lapse multiplies the reset interval by the lowered ease
    assert_eq!(intervals[4], 2);
    let state = store.get("borrowck").unwrap();
    assert!((state.ease_factor - 2.3).abs() < 1e-9);
}

#[test]
fn test_repeated_lapses_floor_the_ease_factor() {
    let mut store = TestNoteStore::new_temp();
    store.add_note("hard-topic", ReviewMode::Adaptive);

    let ratings = vec![Rating::Again; 12];
    review_on_schedule(&mut store, "hard-topic", &ratings);

    let state = store.get("hard-topic").unwrap();
    assert_eq!(state.ease_factor, EASE_FACTOR_MIN);
    assert_eq!(state.interval_days, 1);
}

#[test]
fn test_fixed_note_walks_preset() {
    let mut store = TestNoteStore::new_temp();
    store.add_note("german-verbs", ReviewMode::fixed(SchedulePreset::Moderate.pattern()));

    let ratings = TestDataFactory::ratings(&[3, 3, 3, 3, 3, 3, 3]);
    let intervals = review_on_schedule(&mut store, "german-verbs", &ratings);

    // Good advances past the current position, ending on the final step
    assert_eq!(intervals, vec![7, 14, 30, 90, 180, 180, 180]);
    assert_eq!(store.get("german-verbs").unwrap().ease_factor, 2.5);
}

#[test]
fn test_fixed_note_restart_after_again() {
    let mut store = TestNoteStore::new_temp();
    store.add_note("kanji", ReviewMode::fixed("1d,3d,1w,2w"));

    let ratings = TestDataFactory::ratings(&[4, 1, 2, 3]);
    let intervals = review_on_schedule(&mut store, "kanji", &ratings);

    // Easy at 0 jumps to step 2; Again restarts; Hard and Good index by the
    // review count, which keeps climbing after the restart
    assert_eq!(intervals, vec![7, 1, 7, 14]);
}

#[test]
fn test_mixed_collection_stats_over_a_week() {
    let mut store = TestNoteStore::new_temp();
    let ids = TestDataFactory::create_batch(&mut store, 9);

    for id in &ids {
        store.review(id, Rating::Good).unwrap();
    }

    let stats = store.stats();
    assert_eq!(stats.total, 9);
    assert_eq!(stats.reviewed_today, 9);
    assert_eq!(stats.due_today, 0);
    // Adaptive notes come back tomorrow, fixed ones in a week (step 1 = 1w)
    assert_eq!(stats.due_this_week, 9);
    assert_eq!(stats.fixed_count, 3);
    assert_eq!(stats.average_ease, 2.5);

    store.advance_days(1);
    assert_eq!(store.due_notes().len(), 6);
    assert_eq!(store.stats().reviewed_today, 0);

    store.advance_days(6);
    assert_eq!(store.due_notes().len(), 9);
}

#[test]
fn test_late_review_schedules_from_review_time() {
    let mut store = TestNoteStore::new_temp();
    store.add_note("late", ReviewMode::Adaptive);
    store.review("late", Rating::Good).unwrap();

    // Reviewed three days after it fell due
    store.advance_days(4);
    let result = store.review("late", Rating::Good).unwrap();
    assert_eq!(result.state.next_review, store.now() + Duration::days(2));
    assert_eq!(result.state.last_reviewed, Some(store.now()));
}

#[test]
fn test_custom_config_changes_schedule() {
    let mut config = SchedulerConfig::default();
    config.adaptive.first_review_interval = 3;
    config.adaptive.easy_multiplier = 3.0;

    let mut store = TestNoteStore::with_config(config);
    store.add_note("custom", ReviewMode::Adaptive);

    let ratings = TestDataFactory::ratings(&[3, 4]);
    let intervals = review_on_schedule(&mut store, "custom", &ratings);
    assert_eq!(intervals, vec![3, 9]);
}

#[test]
fn test_unknown_note_is_not_reviewed() {
    let mut store = TestNoteStore::new_temp();
    assert!(store.review("missing", Rating::Good).is_none());
    assert!(store.is_empty());
}
