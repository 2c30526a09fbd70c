//! Recall ratings
//!
//! The 1-4 grade a user gives after reviewing a note. It is the only signal
//! either scheduler consults.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};

/// User recall rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Rating {
    /// Forgot the note entirely
    Again = 1,
    /// Recalled with serious difficulty
    Hard = 2,
    /// Recalled correctly
    Good = 3,
    /// Perfect, effortless recall
    Easy = 4,
}

impl Rating {
    /// All ratings in ascending order
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    /// Convert from the numeric grade, `None` outside 1-4
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(Rating::Again),
            2 => Some(Rating::Hard),
            3 => Some(Rating::Good),
            4 => Some(Rating::Easy),
            _ => None,
        }
    }

    /// Numeric grade
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Short display name
    pub fn name(self) -> &'static str {
        match self {
            Rating::Again => "Again",
            Rating::Hard => "Hard",
            Rating::Good => "Good",
            Rating::Easy => "Easy",
        }
    }

    /// Human-readable meaning of the grade
    pub fn description(self) -> &'static str {
        match self {
            Rating::Again => "poor (need to review again soon)",
            Rating::Hard => "fair (somewhat understood)",
            Rating::Good => "good (well understood)",
            Rating::Easy => "excellent (perfect recall)",
        }
    }
}

impl TryFrom<i64> for Rating {
    type Error = SchedulingError;

    fn try_from(value: i64) -> Result<Self> {
        i32::try_from(value)
            .ok()
            .and_then(Rating::from_i32)
            .ok_or_else(|| {
                SchedulingError::invalid(format!("rating must be between 1 and 4, got {}", value))
            })
    }
}

impl TryFrom<f64> for Rating {
    type Error = SchedulingError;

    /// Accepts only integral values; `3.0` is Good, `3.5` is rejected.
    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(SchedulingError::invalid(format!(
                "rating must be an integer between 1 and 4, got {}",
                value
            )));
        }
        Rating::try_from(value as i64)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        rating as i64
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// TESTS
// ============================================================================
