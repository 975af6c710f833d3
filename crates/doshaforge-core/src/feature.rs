//! Canonical pulse features.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the four physiological inputs the engine understands.
///
/// # Example
///
/// ```
/// use doshaforge_core::Feature;
///
/// let f: Feature = "hrv".parse().unwrap();
/// assert_eq!(f, Feature::Hrv);
/// assert_eq!(f.as_str(), "hrv");
/// assert!("spo2".parse::<Feature>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Heart rate.
    Hr,
    /// Heart-rate variability.
    Hrv,
    /// Pulse amplitude.
    Amplitude,
    /// Pulse morphology.
    Morphology,
}

impl Feature {
    /// All features in canonical evaluation order.
    pub const ALL: [Feature; 4] = [
        Feature::Hr,
        Feature::Hrv,
        Feature::Amplitude,
        Feature::Morphology,
    ];

    /// Returns the wire name used in configuration files and requests.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Feature::Hr => "hr",
            Feature::Hrv => "hrv",
            Feature::Amplitude => "amplitude",
            Feature::Morphology => "morphology",
        }
    }

    /// Position of this feature in [`Feature::ALL`].
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a name that is not a canonical feature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown feature '{0}'")]
pub struct UnknownFeature(pub String);

impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for feature in Feature::ALL {
            assert_eq!(feature.as_str().parse::<Feature>().unwrap(), feature);
        }
    }

    #[test]
    fn test_index_matches_all() {
        for (i, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), i);
        }
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert_eq!(
            "HR".parse::<Feature>(),
            Err(UnknownFeature("HR".to_string()))
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Feature::Morphology).unwrap();
        assert_eq!(json, "\"morphology\"");
        let back: Feature = serde_json::from_str("\"amplitude\"").unwrap();
        assert_eq!(back, Feature::Amplitude);
    }
}
