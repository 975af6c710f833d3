//! Threshold rules and per-category rule sets.

use std::fmt;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use thiserror::Error;

use doshaforge_core::{Band, Feature};

/// Why a single threshold rule is structurally invalid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    #[error("expected exactly 2 thresholds, found {0}")]
    ThresholdCount(usize),

    #[error("expected exactly 3 scores, found {0}")]
    ScoreCount(usize),

    #[error("thresholds must be finite numbers")]
    NonFiniteThreshold,

    #[error("thresholds must be ascending, got [{low}, {high}]")]
    DescendingThresholds { low: f64, high: f64 },

    #[error("score {0} is not an integer")]
    NonIntegerScore(f64),

    #[error("score {0} is out of range (expected 0..={max})", max = u32::MAX)]
    ScoreOutOfRange(i64),
}

/// Two cut points and the score awarded in each of the three bands.
///
/// # Example
///
/// ```
/// use doshaforge_config::ThresholdRule;
/// use doshaforge_core::Band;
///
/// let rule = ThresholdRule::new(60.0, 90.0, [0, 1, 2]).unwrap();
///
/// assert_eq!(rule.band(60.0), Band::Mid);
/// assert_eq!(rule.score_for(59.0), 0);
/// assert_eq!(rule.score_for(90.0), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdRule {
    low: f64,
    high: f64,
    scores: [u32; 3],
}

impl ThresholdRule {
    /// Creates a rule, checking that the thresholds are finite and ascending.
    pub fn new(low: f64, high: f64, scores: [u32; 3]) -> Result<Self, RuleError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(RuleError::NonFiniteThreshold);
        }
        if low > high {
            return Err(RuleError::DescendingThresholds { low, high });
        }
        Ok(Self { low, high, scores })
    }

    /// Creates a rule from loosely sized inputs, as read from a config file.
    ///
    /// Scores arrive as floats so that `2.0` is accepted and `1.5` is
    /// reported as a rule error rather than a parse error.
    pub fn from_slices(thresholds: &[f64], scores: &[f64]) -> Result<Self, RuleError> {
        let &[low, high] = thresholds else {
            return Err(RuleError::ThresholdCount(thresholds.len()));
        };
        let &[s0, s1, s2] = scores else {
            return Err(RuleError::ScoreCount(scores.len()));
        };
        let score = |s: f64| {
            if !s.is_finite() || s.fract() != 0.0 {
                return Err(RuleError::NonIntegerScore(s));
            }
            if s < 0.0 || s > f64::from(u32::MAX) {
                return Err(RuleError::ScoreOutOfRange(s as i64));
            }
            Ok(s as u32)
        };
        Self::new(low, high, [score(s0)?, score(s1)?, score(s2)?])
    }

    /// Lower cut point.
    #[inline]
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper cut point.
    #[inline]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Both cut points as `[low, high]`.
    pub fn thresholds(&self) -> [f64; 2] {
        [self.low, self.high]
    }

    /// Scores for the low, mid and high bands.
    pub fn scores(&self) -> [u32; 3] {
        self.scores
    }

    /// Score awarded for the given band.
    #[inline]
    pub fn score_in(&self, band: Band) -> u32 {
        self.scores[band.index()]
    }

    /// Classifies a value into one of the three bands.
    #[inline]
    pub fn band(&self, value: f64) -> Band {
        Band::classify(value, self.low, self.high)
    }

    /// The band function: the configured score for the band `value` falls in.
    #[inline]
    pub fn score_for(&self, value: f64) -> u32 {
        self.score_in(self.band(value))
    }
}

impl Serialize for ThresholdRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ThresholdRule", 2)?;
        state.serialize_field("thresholds", &self.thresholds())?;
        state.serialize_field("scores", &self.scores)?;
        state.end()
    }
}

/// The rules one category applies, at most one per feature.
#[derive(Clone, Default, PartialEq)]
pub struct FeatureRuleSet {
    rules: [Option<ThresholdRule>; 4],
}

impl FeatureRuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`FeatureRuleSet::insert`].
    pub fn with_rule(mut self, feature: Feature, rule: ThresholdRule) -> Self {
        self.insert(feature, rule);
        self
    }

    /// Sets the rule for a feature, returning the one it replaced.
    pub fn insert(&mut self, feature: Feature, rule: ThresholdRule) -> Option<ThresholdRule> {
        self.rules[feature.index()].replace(rule)
    }

    /// Returns the rule for a feature, if any.
    #[inline]
    pub fn get(&self, feature: Feature) -> Option<&ThresholdRule> {
        self.rules[feature.index()].as_ref()
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.get(feature).is_some()
    }

    /// Iterates configured rules in canonical feature order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, &ThresholdRule)> + '_ {
        Feature::ALL
            .into_iter()
            .filter_map(move |f| self.get(f).map(|r| (f, r)))
    }

    pub fn len(&self) -> usize {
        self.rules.iter().filter(|r| r.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for FeatureRuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (k.as_str(), v)))
            .finish()
    }
}

impl Serialize for FeatureRuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (feature, rule) in self.iter() {
            map.serialize_entry(feature.as_str(), rule)?;
        }
        map.end()
    }
}
