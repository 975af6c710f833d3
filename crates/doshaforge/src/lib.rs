//! DoshaForge - Threshold band scoring of pulse features
//!
//! Load a rule table, build a scorer once, and analyze request payloads
//! against it.
//!
//! # Example
//!
//! ```rust
//! use doshaforge::prelude::*;
//! use serde_json::json;
//!
//! let table = RuleTable::from_json_str(r#"{
//!     "kapha": { "hr": { "thresholds": [60, 90], "scores": [2, 0, 0] } },
//!     "pitta": { "hr": { "thresholds": [60, 90], "scores": [0, 2, 0] } },
//!     "vata":  { "hr": { "thresholds": [60, 90], "scores": [0, 0, 2] } }
//! }"#).unwrap();
//! let scorer = DoshaScorer::new(table);
//!
//! let features = json!({ "hr": 50 });
//! let scores = calculate_dosha_scores(&scorer, features.as_object().unwrap()).unwrap();
//! assert_eq!(scores.to_string(), "kapha=2 pitta=0 vata=0");
//! assert_eq!(scores.dominant(), Some("kapha"));
//! ```

// Core types
pub use doshaforge_core::{coerce_value, Band, Feature, FeatureBundle, ValidationError};

// Rule tables
pub use doshaforge_config::{
    ConfigError, ConfigFormat, FeatureRuleSet, RuleError, RuleTable, ThresholdRule,
};

// Scoring engine
pub use doshaforge_scoring::{
    CategoryAnalysis, DoshaScorer, Evaluation, FeatureContribution, ScoreExplanation, ScoreResult,
};

mod analyze;
mod config;
mod error;

#[cfg(test)]
mod tests;

pub use analyze::{analyze, calculate_dosha_scores, Analysis};
pub use config::{
    config_path, default_scorer, load_config, load_config_from, CONFIG_ENV_VAR,
    DEFAULT_CONFIG_PATH,
};
pub use error::{DoshaForgeError, RequestError, Result};

/// Console output, available with the `console` feature.
#[cfg(feature = "console")]
pub use doshaforge_console as console;

pub mod prelude {
    pub use super::{analyze, calculate_dosha_scores, default_scorer, load_config, Analysis};
    pub use super::{DoshaForgeError, DoshaScorer, Feature, FeatureBundle, RuleTable, ScoreResult};
}
