use std::io::Write;

use serde_json::json;

use doshaforge_test::tri_band_table;

use super::*;

const SHIPPED_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/dosha_config.json");

fn scorer() -> DoshaScorer {
    DoshaScorer::new(tri_band_table())
}

#[test]
fn test_shipped_config_matches_reference_table() {
    let table = load_config_from(SHIPPED_CONFIG).unwrap();
    assert_eq!(table, tri_band_table());
    assert_eq!(
        table.categories().collect::<Vec<_>>(),
        ["kapha", "pitta", "vata"]
    );
}

#[test]
fn test_analyze_picks_each_dosha() {
    let scorer = scorer();

    let kapha = analyze(
        &scorer,
        &json!({ "hr": 50, "hrv": 25, "amplitude": 0, "morphology": 0 }),
    )
    .unwrap();
    assert_eq!(kapha.dominant_dosha, "kapha");
    assert_eq!(kapha.scores.get("kapha"), Some(8));

    let pitta = analyze(
        &scorer,
        &json!({ "hr": 75, "hrv": 50, "amplitude": 1, "morphology": 1 }),
    )
    .unwrap();
    assert_eq!(pitta.dominant_dosha, "pitta");

    let vata = analyze(
        &scorer,
        &json!({ "hr": 110, "hrv": 90, "amplitude": 2, "morphology": 2 }),
    )
    .unwrap();
    assert_eq!(vata.dominant_dosha, "vata");
    assert_eq!(vata.scores.to_string(), "kapha=0 pitta=0 vata=8");
}

#[test]
fn test_analyze_coerces_numeric_strings() {
    let analysis = analyze(
        &scorer(),
        &json!({ "hr": "72", "hrv": " 45.5 ", "amplitude": "1", "morphology": 0 }),
    )
    .unwrap();
    assert_eq!(analysis.scores.get("pitta"), Some(6));
    assert_eq!(analysis.scores.get("kapha"), Some(2));
    assert_eq!(analysis.dominant_dosha, "pitta");
}

#[test]
fn test_analyze_reports_missing_in_canonical_order() {
    let err = analyze(&scorer(), &json!({ "morphology": 1, "amplitude": 1 })).unwrap_err();
    assert!(matches!(
        &err,
        DoshaForgeError::Request(RequestError::MissingParameters(missing))
            if missing == &[Feature::Hr, Feature::Hrv]
    ));
    assert_eq!(err.to_string(), "Missing parameters: hr, hrv");
    assert!(err.is_client_error());
}

#[test]
fn test_analyze_empty_object_misses_everything() {
    let err = analyze(&scorer(), &json!({})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing parameters: hr, hrv, amplitude, morphology"
    );
}

#[test]
fn test_analyze_rejects_non_object() {
    for payload in [json!(null), json!([72, 45, 1, 0]), json!("hr=72")] {
        let err = analyze(&scorer(), &payload).unwrap_err();
        assert!(matches!(
            err,
            DoshaForgeError::Request(RequestError::NotAnObject)
        ));
    }
}

#[test]
fn test_analyze_rejects_non_numeric_value() {
    let err = analyze(
        &scorer(),
        &json!({ "hr": 72, "hrv": "abc", "amplitude": 1, "morphology": 0 }),
    )
    .unwrap_err();
    assert!(matches!(err, DoshaForgeError::Validation(_)));
    assert!(err.is_client_error());
    assert!(err.to_string().starts_with("Parameter 'hrv' must be numeric"));
}

#[test]
fn test_analyze_rejects_null_value() {
    let err = analyze(
        &scorer(),
        &json!({ "hr": 72, "hrv": 45, "amplitude": null, "morphology": 0 }),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DoshaForgeError::Validation(ValidationError::NotNumeric {
            feature: Feature::Amplitude,
            ..
        })
    ));
}

#[test]
fn test_analyze_ignores_extra_keys() {
    let analysis = analyze(
        &scorer(),
        &json!({ "hr": 50, "hrv": 25, "amplitude": 0, "morphology": 0, "spo2": "n/a" }),
    )
    .unwrap();
    assert_eq!(analysis.dominant_dosha, "kapha");
}

#[test]
fn test_analyze_without_categories_is_a_config_error() {
    let scorer = DoshaScorer::new(RuleTable::new());
    let err = analyze(
        &scorer,
        &json!({ "hr": 72, "hrv": 45, "amplitude": 1, "morphology": 0 }),
    )
    .unwrap_err();
    assert!(matches!(err, DoshaForgeError::Config(ConfigError::Invalid(_))));
    assert!(!err.is_client_error());
}

#[test]
fn test_calculate_accepts_partial_features() {
    let features = json!({ "hr": 50 });
    let scores = calculate_dosha_scores(&scorer(), features.as_object().unwrap()).unwrap();
    assert_eq!(scores.get("kapha"), Some(2));
    assert_eq!(scores.get("pitta"), Some(0));
    assert_eq!(scores.get("vata"), Some(0));
    assert_eq!(scores.dominant(), Some("kapha"));
}

#[test]
fn test_calculate_empty_map_scores_zero() {
    let scores = calculate_dosha_scores(&scorer(), &serde_json::Map::new()).unwrap();
    assert_eq!(scores.to_string(), "kapha=0 pitta=0 vata=0");
}

#[test]
fn test_calculate_rejects_without_partial_result() {
    let features = json!({ "hr": 50, "hrv": true });
    let err = calculate_dosha_scores(&scorer(), features.as_object().unwrap()).unwrap_err();
    assert!(matches!(err, DoshaForgeError::Validation(_)));
}

#[test]
fn test_analysis_serializes_with_product_field_names() {
    let analysis = analyze(
        &scorer(),
        &json!({ "hr": 50, "hrv": 25, "amplitude": 0, "morphology": 0 }),
    )
    .unwrap();
    let value = serde_json::to_value(&analysis).unwrap();
    assert_eq!(
        value,
        json!({
            "scores": { "kapha": 8, "pitta": 0, "vata": 0 },
            "dominant_dosha": "kapha"
        })
    );
    let text = serde_json::to_string(&analysis).unwrap();
    assert!(text.starts_with(r#"{"scores":{"kapha":8,"pitta":0,"vata":0}"#));
}

#[test]
fn test_load_config_from_missing_file() {
    let err = load_config_from("/nonexistent/dosha_config.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));

    let wrapped = DoshaForgeError::from(err);
    assert!(wrapped.to_string().starts_with("Configuration error: IO error"));
}

// The only test that touches the process environment.
#[test]
fn test_load_config_follows_env_var() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{ "vata": {{ "hr": {{ "thresholds": [60, 90], "scores": [0, 0, 2] }} }} }}"#
    )
    .unwrap();

    std::env::set_var(CONFIG_ENV_VAR, file.path());
    assert_eq!(config_path(), file.path());
    let table = load_config();
    let scorer = default_scorer();
    std::env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(table.unwrap().categories().collect::<Vec<_>>(), ["vata"]);
    let scores = scorer.unwrap().score(&FeatureBundle::new().with(Feature::Hr, 95.0));
    assert_eq!(scores.get("vata"), Some(2));
}
