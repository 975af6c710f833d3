// On-disk shape of a rule table, before structural validation.
//
// Parsing is format-agnostic: JSON, TOML and YAML all deserialize into these
// types, then `into_rule_table` converts them into the typed model.

use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::Deserialize;
use tracing::warn;

use doshaforge_core::Feature;

use crate::rule::{FeatureRuleSet, ThresholdRule};
use crate::{ConfigError, RuleTable};

#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(crate) struct RawRuleTable {
    categories: IndexMap<String, RawFeatureRuleSet>,
}

#[derive(Debug, Deserialize)]
struct RawFeatureRuleSet {
    hr: Option<RawRule>,
    hrv: Option<RawRule>,
    amplitude: Option<RawRule>,
    morphology: Option<RawRule>,

    // Feature names the engine does not know. Ignored, never scored.
    #[serde(flatten)]
    unknown: IndexMap<String, IgnoredAny>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    thresholds: Vec<f64>,
    scores: Vec<f64>,
}

impl RawRuleTable {
    pub(crate) fn into_rule_table(self) -> Result<RuleTable, ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::Invalid(
                "rule table defines no categories".to_string(),
            ));
        }

        let mut table = RuleTable::new();
        for (category, raw) in self.categories {
            for name in raw.unknown.keys() {
                warn!(
                    event = "unknown_feature",
                    category = category.as_str(),
                    feature = name.as_str(),
                    "Ignoring unknown feature in rule table"
                );
            }

            let mut rules = FeatureRuleSet::new();
            let entries = [
                (Feature::Hr, raw.hr),
                (Feature::Hrv, raw.hrv),
                (Feature::Amplitude, raw.amplitude),
                (Feature::Morphology, raw.morphology),
            ];
            for (feature, rule) in entries {
                let Some(rule) = rule else { continue };
                let rule = ThresholdRule::from_slices(&rule.thresholds, &rule.scores)
                    .map_err(|source| ConfigError::Structure {
                        category: category.clone(),
                        feature,
                        source,
                    })?;
                rules.insert(feature, rule);
            }
            table.insert(category, rules);
        }
        Ok(table)
    }
}
