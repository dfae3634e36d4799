//! Loading classifier artifacts from disk

use sentinel_core::FeatureVector;
use sentinel_model::{ModelError, load_classifier};
use std::io::Write;

fn write_artifact(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_and_predict_tree_ensemble() {
    let file = write_artifact(
        r#"{
            "kind": "tree_ensemble",
            "trees": [
                {"nodes": [
                    {"feature": 2, "threshold": 0.0, "left": 1, "right": 2},
                    {"leaf": -2.0},
                    {"leaf": 2.0}
                ]}
            ]
        }"#,
    );

    let classifier = load_classifier(file.path()).unwrap();
    assert_eq!(classifier.name(), "tree_ensemble");

    let bullish = FeatureVector::from_array([55.0, 1.0, 0.4, 0.002, 0.001, 0.002]);
    let bearish = FeatureVector::from_array([45.0, -1.0, -0.4, 0.002, -0.001, -0.002]);

    let up = classifier.predict(&bullish).unwrap();
    let down = classifier.predict(&bearish).unwrap();
    assert_eq!(up.class, 1);
    assert_eq!(down.class, 0);
    assert!(up.probability > 0.85);
    assert!(down.probability < 0.15);
}

#[test]
fn test_load_rejects_garbage() {
    let file = write_artifact("not json at all");
    assert!(matches!(
        load_classifier(file.path()),
        Err(ModelError::Parse(_))
    ));
}
