//! Request-level operations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use doshaforge_config::ConfigError;
use doshaforge_core::{Feature, FeatureBundle};
use doshaforge_scoring::{DoshaScorer, ScoreResult};

use crate::error::{RequestError, Result};

/// Outcome of a complete analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub scores: ScoreResult,
    pub dominant_dosha: String,
}

/// Scores whatever features the map supplies.
///
/// Keys that are not canonical features are ignored and absent features
/// contribute nothing. A present value that is not numeric rejects the whole
/// call.
pub fn calculate_dosha_scores(
    scorer: &DoshaScorer,
    features: &Map<String, Value>,
) -> Result<ScoreResult> {
    let bundle = FeatureBundle::from_json_map(features)?;
    Ok(scorer.score(&bundle))
}

/// Analyzes a request payload.
///
/// Unlike [`calculate_dosha_scores`], this requires all four features to be
/// present and numeric.
///
/// # Example
///
/// ```
/// use doshaforge::{analyze, DoshaScorer, RuleTable};
/// use serde_json::json;
///
/// let scorer = DoshaScorer::new(RuleTable::from_json_str(r#"{
///     "kapha": { "hr": { "thresholds": [60, 90], "scores": [2, 0, 0] } },
///     "vata":  { "hr": { "thresholds": [60, 90], "scores": [0, 0, 2] } }
/// }"#).unwrap());
///
/// let analysis = analyze(&scorer, &json!({
///     "hr": 110, "hrv": "85", "amplitude": 2, "morphology": 2
/// })).unwrap();
/// assert_eq!(analysis.dominant_dosha, "vata");
///
/// let err = analyze(&scorer, &json!({ "hr": 72, "amplitude": 1 })).unwrap_err();
/// assert_eq!(err.to_string(), "Missing parameters: hrv, morphology");
/// ```
pub fn analyze(scorer: &DoshaScorer, payload: &Value) -> Result<Analysis> {
    match analyze_payload(scorer, payload) {
        Ok(analysis) => {
            info!(
                event = "analyze",
                scores = %analysis.scores,
                dominant = analysis.dominant_dosha.as_str(),
                "Analysis complete"
            );
            Ok(analysis)
        }
        Err(err) => {
            warn!(event = "rejected", reason = %err, "Request rejected");
            Err(err)
        }
    }
}

fn analyze_payload(scorer: &DoshaScorer, payload: &Value) -> Result<Analysis> {
    let map = payload.as_object().ok_or(RequestError::NotAnObject)?;

    let missing: Vec<Feature> = Feature::ALL
        .into_iter()
        .filter(|f| !map.contains_key(f.as_str()))
        .collect();
    if !missing.is_empty() {
        return Err(RequestError::MissingParameters(missing).into());
    }

    let scores = calculate_dosha_scores(scorer, map)?;
    let dominant_dosha = scores
        .dominant()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::Invalid("rule table defines no categories".to_string()))?;

    Ok(Analysis {
        scores,
        dominant_dosha,
    })
}
