use stsift::{classify, ClassificationResult};

use crate::common;

#[test]
fn json_output_is_stable_for_same_input() {
    for data in [
        common::rsc(),
        common::stad(),
        common::C_SOURCE.as_bytes().to_vec(),
        common::noise(300, 3),
    ] {
        let j1 = classify(&data).to_json_string().expect("json1");
        let j2 = classify(&data).to_json_string().expect("json2");
        assert_eq!(j1, j2, "JSON outputs differ across identical runs");
    }
}

#[test]
fn json_round_trips() {
    let r = classify(common::C_SOURCE.as_bytes());
    let back = ClassificationResult::from_json_str(&r.to_json_string().unwrap()).unwrap();
    assert_eq!(back, r);
}

#[test]
fn json_schema_fields() {
    let r = classify(&common::degas_classic(0));
    let v: serde_json::Value = serde_json::from_str(&r.to_json_string().unwrap()).unwrap();
    assert_eq!(v["extension"], "PI1");
    assert_eq!(v["confidence"], 100);
    assert!(v["reason"].is_string());
    assert!(v.get("format").is_some());
    assert!(v.get("embedded_name").is_some());
}
