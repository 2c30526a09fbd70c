//! Fixed interval patterns
//!
//! A pattern is user-authored text such as `"1d,1w,2w,1m,3m,6m"`:
//!
//! ```text
//! pattern := token (',' token)*
//! token   := WS* digits unit WS*
//! unit    := 'd' | 'w' | 'm' | 'y'   (case-insensitive)
//! ```
//!
//! Units are fixed approximations (d=1, w=7, m=30, y=365), not calendar-aware.
//! Parsing never fails: tokens that do not match are skipped, and a pattern
//! with no usable token yields [`FALLBACK_INTERVALS`].

use serde::{Deserialize, Serialize};

/// Sequence used when a pattern contains no valid token
pub const FALLBACK_INTERVALS: [u32; 4] = [1, 7, 14, 30];

/// Intensive learning
pub const PRESET_AGGRESSIVE: &str = "1d,3d,1w,2w,1m,3m";

/// Recommended default
pub const PRESET_MODERATE: &str = "1d,1w,2w,1m,3m,6m";

/// Long-term retention
pub const PRESET_RELAXED: &str = "1w,2w,1m,2m,6m,1y";

// ============================================================================
// UNITS
// ============================================================================

/// Unit suffix of a pattern token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    Day,
    Week,
    Month,
    Year,
}

impl IntervalUnit {
    /// Largest unit first, for rendering
    const DESCENDING: [IntervalUnit; 4] = [
        IntervalUnit::Year,
        IntervalUnit::Month,
        IntervalUnit::Week,
        IntervalUnit::Day,
    ];

    /// Parse a unit suffix, case-insensitive
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'd' => Some(IntervalUnit::Day),
            'w' => Some(IntervalUnit::Week),
            'm' => Some(IntervalUnit::Month),
            'y' => Some(IntervalUnit::Year),
            _ => None,
        }
    }

    /// Days per unit
    pub fn days(self) -> u32 {
        match self {
            IntervalUnit::Day => 1,
            IntervalUnit::Week => 7,
            IntervalUnit::Month => 30,
            IntervalUnit::Year => 365,
        }
    }

    pub fn suffix(self) -> char {
        match self {
            IntervalUnit::Day => 'd',
            IntervalUnit::Week => 'w',
            IntervalUnit::Month => 'm',
            IntervalUnit::Year => 'y',
        }
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Parse one token into days. `None` for anything outside the grammar,
/// a zero count, or a value that overflows `u32`.
fn parse_token(token: &str) -> Option<u32> {
    let token = token.trim();
    let mut chars = token.chars();
    let unit = IntervalUnit::from_char(chars.next_back()?)?;
    let digits = chars.as_str();

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let count: u32 = digits.parse().ok()?;
    if count == 0 {
        return None;
    }
    count.checked_mul(unit.days())
}

/// Parse a pattern into day intervals. Never empty.
///
/// ```
/// use learnbase_core::parse_pattern;
///
/// assert_eq!(parse_pattern("1d,1w,2w,1m,3m,6m"), vec![1, 7, 14, 30, 90, 180]);
/// assert_eq!(parse_pattern("garbage"), vec![1, 7, 14, 30]);
/// ```
pub fn parse_pattern(pattern: &str) -> Vec<u32> {
    SchedulePattern::parse(pattern).intervals
}

/// Render a day count in the largest unit that divides it exactly
pub fn format_days(days: u32) -> String {
    let unit = IntervalUnit::DESCENDING
        .into_iter()
        .find(|unit| days % unit.days() == 0)
        .unwrap_or(IntervalUnit::Day);
    format!("{}{}", days / unit.days(), unit.suffix())
}

// ============================================================================
// SCHEDULE PATTERN
// ============================================================================

/// A parsed pattern, keeping the text it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulePattern {
    source: String,
    intervals: Vec<u32>,
    fallback: bool,
}

impl SchedulePattern {
    pub fn parse(pattern: &str) -> Self {
        let mut intervals: Vec<u32> = pattern.split(',').filter_map(parse_token).collect();
        let fallback = intervals.is_empty();
        if fallback {
            tracing::debug!(pattern, "No valid tokens in schedule pattern, using fallback");
            intervals = FALLBACK_INTERVALS.to_vec();
        }
        Self {
            source: pattern.to_string(),
            intervals,
            fallback,
        }
    }

    /// The text as authored
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Day intervals, never empty
    pub fn intervals(&self) -> &[u32] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// True when no token parsed and [`FALLBACK_INTERVALS`] was substituted
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Index of the final step
    pub fn last_index(&self) -> usize {
        self.intervals.len().saturating_sub(1)
    }

    /// Interval at `index`, clamped to the final step
    pub fn interval_at(&self, index: usize) -> u32 {
        self.intervals[index.min(self.last_index())]
    }
}

impl From<&str> for SchedulePattern {
    fn from(pattern: &str) -> Self {
        Self::parse(pattern)
    }
}

impl std::fmt::Display for SchedulePattern {
    /// Normalized form, e.g. `" 14D, 2W"` renders as `2w,2w`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tokens: Vec<String> = self.intervals.iter().map(|&d| format_days(d)).collect();
        write!(f, "{}", tokens.join(","))
    }
}

// ============================================================================
// PRESETS
// ============================================================================

/// Named patterns offered to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulePreset {
    Aggressive,
    #[default]
    Moderate,
    Relaxed,
}

impl SchedulePreset {
    pub const ALL: [SchedulePreset; 3] = [
        SchedulePreset::Aggressive,
        SchedulePreset::Moderate,
        SchedulePreset::Relaxed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulePreset::Aggressive => "aggressive",
            SchedulePreset::Moderate => "moderate",
            SchedulePreset::Relaxed => "relaxed",
        }
    }

    /// Parse from name, case-insensitive
    pub fn parse_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "aggressive" => Some(SchedulePreset::Aggressive),
            "moderate" => Some(SchedulePreset::Moderate),
            "relaxed" => Some(SchedulePreset::Relaxed),
            _ => None,
        }
    }

    /// Pattern text of this preset
    pub fn pattern(&self) -> &'static str {
        match self {
            SchedulePreset::Aggressive => PRESET_AGGRESSIVE,
            SchedulePreset::Moderate => PRESET_MODERATE,
            SchedulePreset::Relaxed => PRESET_RELAXED,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SchedulePreset::Aggressive => "Intensive learning",
            SchedulePreset::Moderate => "Recommended default",
            SchedulePreset::Relaxed => "Long-term retention",
        }
    }
}

impl std::fmt::Display for SchedulePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TESTS
// ============================================================================
