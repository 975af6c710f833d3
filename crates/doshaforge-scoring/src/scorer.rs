//! The threshold scoring engine.

use std::sync::Arc;

use tracing::{debug, trace};

use doshaforge_config::RuleTable;
use doshaforge_core::{Feature, FeatureBundle};

use crate::analysis::{CategoryAnalysis, FeatureContribution, ScoreExplanation};
use crate::result::{Evaluation, ScoreResult};

/// Scores feature bundles against an immutable rule table.
///
/// The scorer never loads configuration itself; the caller supplies the
/// table. It holds no mutable state, so one instance can serve concurrent
/// requests through a shared reference or an [`Arc`].
///
/// # Example
///
/// ```
/// use doshaforge_config::RuleTable;
/// use doshaforge_core::{Feature, FeatureBundle};
/// use doshaforge_scoring::DoshaScorer;
///
/// let table = RuleTable::from_json_str(r#"{
///     "kapha": { "hr": { "thresholds": [60, 90], "scores": [2, 0, 0] } },
///     "pitta": { "hr": { "thresholds": [60, 90], "scores": [0, 2, 0] } },
///     "vata":  { "hr": { "thresholds": [60, 90], "scores": [0, 0, 2] } }
/// }"#).unwrap();
/// let scorer = DoshaScorer::new(table);
///
/// let result = scorer.score(&FeatureBundle::new().with(Feature::Hr, 50.0));
/// assert_eq!(result.get("kapha"), Some(2));
/// assert_eq!(result.get("pitta"), Some(0));
/// assert_eq!(result.dominant(), Some("kapha"));
/// ```
#[derive(Debug, Clone)]
pub struct DoshaScorer {
    rules: RuleTable,
}

impl DoshaScorer {
    /// Creates a scorer over the given rule table.
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// The table this scorer evaluates against.
    pub fn rule_table(&self) -> &RuleTable {
        &self.rules
    }

    /// Sums the band score of every supplied feature for every category.
    ///
    /// Features absent from the bundle, and features a category has no rule
    /// for, contribute nothing. Every category in the table appears in the
    /// result, in declaration order.
    pub fn score(&self, bundle: &FeatureBundle) -> ScoreResult {
        let mut result = ScoreResult::with_capacity(self.rules.len());
        for (category, rules) in self.rules.iter() {
            let mut total = 0u64;
            for feature in Feature::ALL {
                let Some(value) = bundle.get(feature) else {
                    continue;
                };
                let Some(rule) = rules.get(feature) else {
                    continue;
                };
                total += u64::from(rule.score_for(value));
            }
            result.push(category, total);
        }

        debug!(
            event = "score",
            features = bundle.len(),
            categories = result.len(),
            dominant = result.dominant().unwrap_or("none"),
            "Scored feature bundle"
        );
        result
    }

    /// Scores a bundle and records why each category got its total.
    pub fn explain(&self, bundle: &FeatureBundle) -> ScoreExplanation {
        let categories = self
            .rules
            .iter()
            .map(|(category, rules)| {
                let mut analysis = CategoryAnalysis::new(category);
                for (feature, value) in bundle.iter() {
                    let Some(rule) = rules.get(feature) else {
                        continue;
                    };
                    let band = rule.band(value);
                    let score = rule.score_in(band);
                    trace!(
                        event = "band",
                        category,
                        %feature,
                        value,
                        %band,
                        score,
                        "Feature scored"
                    );
                    analysis.add(FeatureContribution {
                        feature,
                        value,
                        band,
                        score,
                    });
                }
                analysis
            })
            .collect();

        ScoreExplanation {
            categories,
            skipped: bundle.missing(),
        }
    }

    /// Scores a bundle and selects the dominant category.
    pub fn evaluate(&self, bundle: &FeatureBundle) -> Evaluation {
        Evaluation::from(self.score(bundle))
    }

    /// Creates an Arc-wrapped scorer for sharing across threads.
    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl From<RuleTable> for DoshaScorer {
    fn from(rules: RuleTable) -> Self {
        Self::new(rules)
    }
}
