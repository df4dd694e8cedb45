//! Score value object (0-10 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A rubric score between 0 and 10 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// The minimum score.
    pub const MIN: Self = Self(0);

    /// The maximum score.
    pub const MAX: Self = Self(10);

    /// Creates a new Score, clamping to the valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(10))
    }

    /// Creates a Score, returning an error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > 10 {
            return Err(ValidationError::out_of_range("score", 0, 10, value as i32));
        }
        Ok(Self(value))
    }

    /// Creates a Score from a float, rounding to nearest and clamping.
    ///
    /// Non-finite inputs map to zero.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self::MIN;
        }
        Self(value.round().clamp(0.0, 10.0) as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}
