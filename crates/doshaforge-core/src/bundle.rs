//! Per-request feature values.
//!
//! A bundle distinguishes an absent feature (skipped by the engine) from a
//! present feature whose value cannot be read as a number (rejected here,
//! before the engine sees the request).

use std::fmt;

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::feature::Feature;

/// Numeric feature values for one scoring request.
///
/// Any subset of the four features may be present. Values are always finite.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct FeatureBundle {
    values: [Option<f64>; 4],
}

impl FeatureBundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert for trusted numeric input.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not finite. Use [`FeatureBundle::try_insert`] for
    /// values that come from outside the program.
    pub fn with(mut self, feature: Feature, value: f64) -> Self {
        assert!(value.is_finite(), "feature {} must be finite", feature);
        self.values[feature.index()] = Some(value);
        self
    }

    /// Inserts a value, returning the previous one.
    pub fn try_insert(
        &mut self,
        feature: Feature,
        value: f64,
    ) -> Result<Option<f64>, ValidationError> {
        let value = finite(feature, value, || value.to_string())?;
        Ok(self.values[feature.index()].replace(value))
    }

    /// Removes a value, returning it if it was present.
    pub fn remove(&mut self, feature: Feature) -> Option<f64> {
        self.values[feature.index()].take()
    }

    /// Returns the value for a feature, if supplied.
    #[inline]
    pub fn get(&self, feature: Feature) -> Option<f64> {
        self.values[feature.index()]
    }

    /// Returns true if the feature was supplied.
    pub fn contains(&self, feature: Feature) -> bool {
        self.get(feature).is_some()
    }

    /// Number of features supplied.
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Returns true if no feature was supplied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if all four features were supplied.
    pub fn is_complete(&self) -> bool {
        self.len() == Feature::ALL.len()
    }

    /// Features absent from this bundle, in canonical order.
    pub fn missing(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|f| !self.contains(*f))
            .collect()
    }

    /// Iterates supplied `(feature, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL
            .into_iter()
            .filter_map(move |f| self.get(f).map(|v| (f, v)))
    }

    /// Builds a bundle from a decoded JSON object.
    ///
    /// Keys that are not canonical feature names are ignored. A canonical key
    /// whose value is not numeric-coercible fails the whole bundle.
    pub fn from_json_map(map: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut bundle = Self::new();
        for feature in Feature::ALL {
            if let Some(raw) = map.get(feature.as_str()) {
                bundle.values[feature.index()] = Some(coerce_value(feature, raw)?);
            }
        }
        Ok(bundle)
    }

    /// Builds a bundle from textual `(name, value)` pairs, e.g. form fields.
    ///
    /// Unknown names are ignored; unparseable values for known names fail.
    pub fn from_str_pairs<I, K, V>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut bundle = Self::new();
        for (name, raw) in pairs {
            let Ok(feature) = name.as_ref().parse::<Feature>() else {
                continue;
            };
            bundle.values[feature.index()] = Some(parse_str(feature, raw.as_ref())?);
        }
        Ok(bundle)
    }
}

impl fmt::Debug for FeatureBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (k.as_str(), v)))
            .finish()
    }
}

impl FromIterator<(Feature, f64)> for FeatureBundle {
    /// Collects trusted values; panics on non-finite input like [`FeatureBundle::with`].
    fn from_iter<T: IntoIterator<Item = (Feature, f64)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |bundle, (f, v)| bundle.with(f, v))
    }
}

/// Coerces one JSON value to a finite number.
///
/// Numbers pass through, strings are trimmed and parsed. Everything else
/// (null, booleans, arrays, objects) is rejected.
///
/// # Example
///
/// ```
/// use doshaforge_core::{coerce_value, Feature};
/// use serde_json::json;
///
/// assert_eq!(coerce_value(Feature::Hr, &json!(" 64 ")).unwrap(), 64.0);
/// assert!(coerce_value(Feature::Hr, &json!("fast")).is_err());
/// assert!(coerce_value(Feature::Hr, &json!(null)).is_err());
/// ```
pub fn coerce_value(feature: Feature, raw: &Value) -> Result<f64, ValidationError> {
    match raw {
        Value::Number(n) => match n.as_f64() {
            Some(v) => finite(feature, v, || raw.to_string()),
            None => Err(not_numeric(feature, raw.to_string())),
        },
        Value::String(s) => parse_str(feature, s),
        other => Err(not_numeric(feature, other.to_string())),
    }
}

fn parse_str(feature: Feature, raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(v) => finite(feature, v, || format!("{:?}", raw)),
        Err(_) => Err(not_numeric(feature, format!("{:?}", raw))),
    }
}

fn finite(
    feature: Feature,
    value: f64,
    render: impl FnOnce() -> String,
) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(not_numeric(feature, render()))
    }
}

fn not_numeric(feature: Feature, value: String) -> ValidationError {
    ValidationError::NotNumeric { feature, value }
}

#[cfg(test)]
mod tests;
