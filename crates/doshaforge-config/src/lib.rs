//! Rule table configuration for DoshaForge.
//!
//! A rule table maps each category (dosha) to per-feature threshold rules.
//! Tables are loaded from JSON (the product format), TOML or YAML, and are
//! checked structurally at load time: every rule must have exactly two
//! ascending thresholds and exactly three non-negative integer scores.
//!
//! Category order is preserved from the source document. It is part of the
//! table's identity and decides ties when picking a dominant category.
//!
//! # Examples
//!
//! Load a table from a JSON string:
//!
//! ```
//! use doshaforge_config::RuleTable;
//! use doshaforge_core::Feature;
//!
//! let table = RuleTable::from_json_str(r#"{
//!     "kapha": { "hr": { "thresholds": [60, 90], "scores": [2, 0, 0] } },
//!     "pitta": { "hr": { "thresholds": [60, 90], "scores": [0, 2, 0] } }
//! }"#).unwrap();
//!
//! assert_eq!(table.categories().collect::<Vec<_>>(), ["kapha", "pitta"]);
//! let rule = table.get("pitta").unwrap().get(Feature::Hr).unwrap();
//! assert_eq!(rule.score_for(75.0), 2);
//! ```
//!
//! Short score arrays are rejected when loading, not when scoring:
//!
//! ```
//! use doshaforge_config::{ConfigError, RuleTable};
//!
//! let err = RuleTable::from_json_str(r#"{
//!     "vata": { "hrv": { "thresholds": [30, 70], "scores": [0, 2] } }
//! }"#).unwrap_err();
//!
//! assert!(matches!(err, ConfigError::Structure { .. }));
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use doshaforge_core::Feature;

mod raw;
mod rule;


pub use rule::{FeatureRuleSet, RuleError, ThresholdRule};

use raw::RawRuleTable;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A threshold rule with the wrong shape or values.
    #[error("Invalid rule for '{category}.{feature}': {source}")]
    Structure {
        category: String,
        feature: Feature,
        #[source]
        source: RuleError,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Serialization format of a rule table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    #[default]
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Picks a format from a file extension. Unknown or missing extensions
    /// are treated as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("toml") => ConfigFormat::Toml,
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Toml => "toml",
            ConfigFormat::Yaml => "yaml",
        })
    }
}

impl FromStr for ConfigFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            other => Err(format!(
                "unknown config format '{}' (expected json, toml or yaml)",
                other
            )),
        }
    }
}

/// Ordered mapping from category name to the rules it applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RuleTable {
    categories: IndexMap<String, FeatureRuleSet>,
}

impl RuleTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`RuleTable::insert`].
    pub fn with_category(mut self, name: impl Into<String>, rules: FeatureRuleSet) -> Self {
        self.insert(name, rules);
        self
    }

    /// Adds a category at the end, or replaces an existing one in place.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        rules: FeatureRuleSet,
    ) -> Option<FeatureRuleSet> {
        self.categories.insert(name.into(), rules)
    }

    /// Loads a table from a file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read, doesn't parse, or contains a
    /// structurally invalid rule.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path);
        let contents = std::fs::read_to_string(path)?;
        let table = Self::parse(&contents, format)?;
        debug!(
            event = "config_loaded",
            path = %path.display(),
            %format,
            categories = table.len(),
            "Loaded rule table"
        );
        Ok(table)
    }

    /// Parses a table in the given format.
    pub fn parse(s: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Json => Self::from_json_str(s),
            ConfigFormat::Toml => Self::from_toml_str(s),
            ConfigFormat::Yaml => Self::from_yaml_str(s),
        }
    }

    /// Parses a table from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<RawRuleTable>(s)?.into_rule_table()
    }

    /// Parses a table from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str::<RawRuleTable>(s)?.into_rule_table()
    }

    /// Parses a table from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str::<RawRuleTable>(s)?.into_rule_table()
    }

    /// Serializes the table in the given format.
    pub fn to_string_as(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Json => self.to_json_string_pretty(),
            ConfigFormat::Toml => self.to_toml_string(),
            ConfigFormat::Yaml => self.to_yaml_string(),
        }
    }

    /// Serializes to indented JSON.
    pub fn to_json_string_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Serializes to YAML.
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Category names in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.categories.keys().map(String::as_str)
    }

    /// Rules for a category.
    pub fn get(&self, category: &str) -> Option<&FeatureRuleSet> {
        self.categories.get(category)
    }

    /// Position of a category in declaration order.
    pub fn position(&self, category: &str) -> Option<usize> {
        self.categories.get_index_of(category)
    }

    /// Iterates `(category, rules)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureRuleSet)> + '_ {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
