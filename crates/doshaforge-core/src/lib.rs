//! DoshaForge Core - Shared types for threshold scoring
//!
//! This crate provides the fundamental abstractions for DoshaForge:
//! - [`Feature`]: the four canonical pulse features
//! - [`FeatureBundle`]: per-request feature values with numeric coercion
//! - [`Band`]: the half-open low/mid/high classification of a value
//! - [`ValidationError`]: rejection of a present but non-numeric value
//!
//! # Example
//!
//! ```
//! use doshaforge_core::{Feature, FeatureBundle};
//!
//! let payload = serde_json::json!({ "hr": "72", "hrv": 41.5 });
//! let bundle = FeatureBundle::from_json_map(payload.as_object().unwrap()).unwrap();
//!
//! assert_eq!(bundle.get(Feature::Hr), Some(72.0));
//! assert_eq!(bundle.get(Feature::Hrv), Some(41.5));
//! assert_eq!(bundle.get(Feature::Amplitude), None);
//! ```

pub mod band;
pub mod bundle;
pub mod error;
pub mod feature;

pub use band::Band;
pub use bundle::{coerce_value, FeatureBundle};
pub use error::ValidationError;
pub use feature::{Feature, UnknownFeature};
