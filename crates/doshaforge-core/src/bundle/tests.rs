//! Tests for feature bundles and value coercion.

use proptest::prelude::*;
use serde_json::json;

use super::*;

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("test payload must be an object")
}

#[test]
fn test_empty_bundle() {
    let bundle = FeatureBundle::new();
    assert!(bundle.is_empty());
    assert_eq!(bundle.len(), 0);
    assert_eq!(bundle.missing(), Feature::ALL.to_vec());
}

#[test]
fn test_builder_and_iter_order() {
    let bundle = FeatureBundle::new()
        .with(Feature::Morphology, 2.0)
        .with(Feature::Hr, 72.0);

    let pairs: Vec<_> = bundle.iter().collect();
    assert_eq!(pairs, vec![(Feature::Hr, 72.0), (Feature::Morphology, 2.0)]);
    assert_eq!(bundle.missing(), vec![Feature::Hrv, Feature::Amplitude]);
    assert!(!bundle.is_complete());
}

#[test]
#[should_panic(expected = "must be finite")]
fn test_builder_rejects_nan() {
    let _ = FeatureBundle::new().with(Feature::Hr, f64::NAN);
}

#[test]
fn test_try_insert_replaces() {
    let mut bundle = FeatureBundle::new();
    assert_eq!(bundle.try_insert(Feature::Hr, 60.0), Ok(None));
    assert_eq!(bundle.try_insert(Feature::Hr, 61.0), Ok(Some(60.0)));
    assert_eq!(bundle.get(Feature::Hr), Some(61.0));
    assert!(bundle.try_insert(Feature::Hr, f64::INFINITY).is_err());
    assert_eq!(bundle.remove(Feature::Hr), Some(61.0));
    assert!(bundle.is_empty());
}

#[test]
fn test_from_json_numbers_and_strings() {
    let map = object(json!({
        "hr": 50,
        "hrv": "25",
        "amplitude": " 0.5 ",
        "morphology": 1.0,
    }));
    let bundle = FeatureBundle::from_json_map(&map).unwrap();

    assert!(bundle.is_complete());
    assert_eq!(bundle.get(Feature::Hr), Some(50.0));
    assert_eq!(bundle.get(Feature::Hrv), Some(25.0));
    assert_eq!(bundle.get(Feature::Amplitude), Some(0.5));
    assert_eq!(bundle.get(Feature::Morphology), Some(1.0));
}

#[test]
fn test_from_json_absent_is_skipped() {
    let map = object(json!({ "hr": "60" }));
    let bundle = FeatureBundle::from_json_map(&map).unwrap();
    assert_eq!(bundle.len(), 1);
    assert_eq!(bundle.get(Feature::Hrv), None);
}

#[test]
fn test_from_json_unknown_keys_ignored() {
    let map = object(json!({ "hr": 70, "spo2": "not even a number" }));
    let bundle = FeatureBundle::from_json_map(&map).unwrap();
    assert_eq!(bundle.len(), 1);
}

#[test]
fn test_from_json_present_non_numeric_rejects() {
    let map = object(json!({ "hr": "60", "amplitude": "unknown" }));
    let err = FeatureBundle::from_json_map(&map).unwrap_err();
    assert_eq!(err.feature(), Feature::Amplitude);
    assert_eq!(
        err.to_string(),
        "Parameter 'amplitude' must be numeric, got \"unknown\""
    );
}

#[test]
fn test_from_json_rejects_null_bool_and_containers() {
    for bad in [json!(null), json!(true), json!([1]), json!({ "v": 1 })] {
        let map = object(json!({ "hr": bad }));
        assert!(FeatureBundle::from_json_map(&map).is_err(), "{:?}", map);
    }
}

#[test]
fn test_booleans_are_not_numeric() {
    let map = object(json!({ "hr": true, "hrv": 40 }));
    let err = FeatureBundle::from_json_map(&map).unwrap_err();
    assert_eq!(err.feature(), Feature::Hr);
    assert_eq!(err.to_string(), "Parameter 'hr' must be numeric, got true");

    assert!(coerce_value(Feature::Morphology, &json!(false)).is_err());
}

#[test]
fn test_non_finite_strings_rejected() {
    for bad in ["NaN", "inf", "-infinity"] {
        assert!(coerce_value(Feature::Hrv, &json!(bad)).is_err(), "{}", bad);
    }
}

#[test]
fn test_from_str_pairs() {
    let bundle =
        FeatureBundle::from_str_pairs([("hr", "72"), ("hrv", "40"), ("note", "x")]).unwrap();
    assert_eq!(bundle.len(), 2);

    let err = FeatureBundle::from_str_pairs([("morphology", "smooth")]).unwrap_err();
    assert_eq!(err.feature(), Feature::Morphology);
}

#[test]
fn test_collect_from_pairs() {
    let bundle: FeatureBundle = [(Feature::Hr, 80.0), (Feature::Hrv, 30.0)]
        .into_iter()
        .collect();
    assert_eq!(bundle.len(), 2);
}

#[test]
fn test_debug_lists_present_features() {
    let bundle = FeatureBundle::new().with(Feature::Hrv, 42.0);
    assert_eq!(format!("{:?}", bundle), "{\"hrv\": 42.0}");
}

proptest! {
    #[test]
    fn prop_finite_numbers_round_trip_through_strings(v in -1.0e9f64..1.0e9) {
        let text = v.to_string();
        let parsed = coerce_value(Feature::Hr, &Value::String(text)).unwrap();
        prop_assert_eq!(parsed, v);
    }

    #[test]
    fn prop_alphabetic_strings_rejected(s in "[a-zA-Z]{1,12}") {
        prop_assume!(s.parse::<f64>().is_err());
        prop_assert!(coerce_value(Feature::Amplitude, &Value::String(s)).is_err());
    }
}
