//! Rule table fixtures.

use doshaforge_config::{FeatureRuleSet, RuleTable, ThresholdRule};
use doshaforge_core::Feature;

/// The reference table as a JSON document.
///
/// Every feature is split into three bands. A value in the low band scores 2
/// for kapha, the mid band 2 for pitta, the high band 2 for vata.
///
/// | feature    | low  | high |
/// |------------|------|------|
/// | hr         | 60   | 90   |
/// | hrv        | 30   | 70   |
/// | amplitude  | 1    | 2    |
/// | morphology | 1    | 2    |
pub const TRI_BAND_JSON: &str = r#"{
    "kapha": {
        "hr": { "thresholds": [60, 90], "scores": [2, 0, 0] },
        "hrv": { "thresholds": [30, 70], "scores": [2, 0, 0] },
        "amplitude": { "thresholds": [1, 2], "scores": [2, 0, 0] },
        "morphology": { "thresholds": [1, 2], "scores": [2, 0, 0] }
    },
    "pitta": {
        "hr": { "thresholds": [60, 90], "scores": [0, 2, 0] },
        "hrv": { "thresholds": [30, 70], "scores": [0, 2, 0] },
        "amplitude": { "thresholds": [1, 2], "scores": [0, 2, 0] },
        "morphology": { "thresholds": [1, 2], "scores": [0, 2, 0] }
    },
    "vata": {
        "hr": { "thresholds": [60, 90], "scores": [0, 0, 2] },
        "hrv": { "thresholds": [30, 70], "scores": [0, 0, 2] },
        "amplitude": { "thresholds": [1, 2], "scores": [0, 0, 2] },
        "morphology": { "thresholds": [1, 2], "scores": [0, 0, 2] }
    }
}"#;

const BOUNDS: [(Feature, f64, f64); 4] = [
    (Feature::Hr, 60.0, 90.0),
    (Feature::Hrv, 30.0, 70.0),
    (Feature::Amplitude, 1.0, 2.0),
    (Feature::Morphology, 1.0, 2.0),
];

/// Builds the reference table in code. Equal to parsing [`TRI_BAND_JSON`].
pub fn tri_band_table() -> RuleTable {
    let categories = [
        ("kapha", [2, 0, 0]),
        ("pitta", [0, 2, 0]),
        ("vata", [0, 0, 2]),
    ];

    categories
        .into_iter()
        .fold(RuleTable::new(), |table, (name, scores)| {
            let rules = BOUNDS
                .into_iter()
                .fold(FeatureRuleSet::new(), |rules, (feature, low, high)| {
                    rules.with_rule(feature, rule(low, high, scores))
                });
            table.with_category(name, rules)
        })
}

/// A table where every category applies the same rule to one feature.
pub fn uniform_table(
    categories: &[&str],
    feature: Feature,
    low: f64,
    high: f64,
    scores: [u32; 3],
) -> RuleTable {
    categories.iter().fold(RuleTable::new(), |table, name| {
        table.with_category(
            *name,
            FeatureRuleSet::new().with_rule(feature, rule(low, high, scores)),
        )
    })
}

fn rule(low: f64, high: f64, scores: [u32; 3]) -> ThresholdRule {
    ThresholdRule::new(low, high, scores).expect("fixture thresholds are ascending")
}
