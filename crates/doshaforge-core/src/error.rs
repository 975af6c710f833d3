//! Error types for DoshaForge

use thiserror::Error;

use crate::feature::Feature;

/// A feature value that was supplied but cannot be used as a number.
///
/// Raised per request. The whole request is rejected; an absent feature is
/// never reported through this type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The value is present but not numeric-coercible.
    #[error("Parameter '{feature}' must be numeric, got {value}")]
    NotNumeric {
        /// Feature whose value failed coercion.
        feature: Feature,
        /// Rendering of the rejected value.
        value: String,
    },
}

impl ValidationError {
    /// Returns the feature that failed validation.
    pub fn feature(&self) -> Feature {
        match self {
            ValidationError::NotNumeric { feature, .. } => *feature,
        }
    }
}
