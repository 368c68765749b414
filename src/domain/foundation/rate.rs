//! Participation rate value object (0.0-100.0, one decimal place).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A percentage rounded to one decimal place.
///
/// Used for dashboard participation rates. A zero denominator yields
/// `ParticipationRate::ZERO` rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipationRate(f64);

impl ParticipationRate {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// Computes `part / whole * 100`, rounded to one decimal place.
    ///
    /// Returns `ZERO` when `whole` is zero.
    pub fn from_counts(part: u64, whole: u64) -> Self {
        if whole == 0 {
            return Self::ZERO;
        }
        let raw = part as f64 / whole as f64 * 100.0;
        Self((raw * 10.0).round() / 10.0)
    }

    /// Returns the rate as f64 (0.0 to 100.0).
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for ParticipationRate {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for ParticipationRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}
