//! Threshold bands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the three bands of a threshold rule a value fell into.
///
/// Bands are half-open: `Low` is `v < low`, `Mid` is `low <= v < high`,
/// `High` is `v >= high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// Below the low threshold.
    Low,
    /// At or above the low threshold and below the high threshold.
    Mid,
    /// At or above the high threshold.
    High,
}

impl Band {
    /// Index into a rule's score triple.
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Classifies `value` against `[low, high]`.
    ///
    /// # Example
    ///
    /// ```
    /// use doshaforge_core::Band;
    ///
    /// assert_eq!(Band::classify(59.9, 60.0, 90.0), Band::Low);
    /// assert_eq!(Band::classify(60.0, 60.0, 90.0), Band::Mid);
    /// assert_eq!(Band::classify(90.0, 60.0, 90.0), Band::High);
    /// ```
    #[inline]
    pub fn classify(value: f64, low: f64, high: f64) -> Band {
        if value < low {
            Band::Low
        } else if value < high {
            Band::Mid
        } else {
            Band::High
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Band::Low => "low",
            Band::Mid => "mid",
            Band::High => "high",
        })
    }
}
