//! Pattern Properties
//!
//! The parser never fails and never yields an empty sequence, whatever
//! the input.

use learnbase_core::{
    parse_pattern, SchedulePattern, SchedulePreset, FALLBACK_INTERVALS,
};

const INPUTS: [&str; 12] = [
    "",
    "garbage",
    ",,,",
    "1d,1w,2w,1m,3m,6m",
    " 2W , 3D ",
    "1d;1w",
    "0d,0w",
    "1x,2y",
    "d,w,m",
    "１d",
    "999999999y",
    "1d,,1w,",
];

#[test]
fn test_parse_never_empty_and_never_zero() {
    for input in INPUTS {
        let intervals = parse_pattern(input);
        assert!(!intervals.is_empty(), "{:?}", input);
        assert!(intervals.iter().all(|&d| d >= 1), "{:?}", input);
    }
}

#[test]
fn test_documented_examples() {
    assert_eq!(parse_pattern("1d,1w,2w,1m,3m,6m"), vec![1, 7, 14, 30, 90, 180]);
    assert_eq!(parse_pattern(""), FALLBACK_INTERVALS.to_vec());
    assert_eq!(parse_pattern("garbage"), FALLBACK_INTERVALS.to_vec());
}

#[test]
fn test_fallback_flag_matches_token_validity() {
    for input in INPUTS {
        let pattern = SchedulePattern::parse(input);
        if pattern.is_fallback() {
            assert_eq!(pattern.intervals(), &FALLBACK_INTERVALS);
        }
    }
    assert!(SchedulePattern::parse("1d;1w").is_fallback());
    assert!(!SchedulePattern::parse("1d,,1w,").is_fallback());
}

#[test]
fn test_normalized_form_parses_to_same_intervals() {
    for input in INPUTS {
        let pattern = SchedulePattern::parse(input);
        let normalized = pattern.to_string();
        assert_eq!(parse_pattern(&normalized), pattern.intervals(), "{:?}", input);
    }
}

#[test]
fn test_presets_parse_without_fallback() {
    for preset in SchedulePreset::ALL {
        let pattern = SchedulePattern::parse(preset.pattern());
        assert!(!pattern.is_fallback());
        assert_eq!(pattern.len(), 6);
        assert!(pattern.intervals().windows(2).all(|w| w[0] < w[1]));
    }
}
