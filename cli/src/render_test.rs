use advisory::DetectionResult;

use super::*;

fn leaf_blight() -> Diagnosis {
    let raw: DetectionResult = serde_json::from_str(r#"{"disease":"Leaf Blight","confidence":92}"#).unwrap();
    raw.into_diagnosis()
}

#[test]
fn diagnosis_text_shows_name_percent_and_defaults() {
    let text = diagnosis_text(&leaf_blight());
    assert!(text.contains("Disease:     Leaf Blight"));
    assert!(text.contains("Confidence:  92%"));
    assert!(text.contains("Severity:    High"));
    assert!(text.contains("  - Please consult a local agricultural expert for remedies."));
    assert!(!text.contains("Advisory:"));
}

#[test]
fn diagnosis_text_includes_advisory_when_present() {
    let raw: DetectionResult =
        serde_json::from_str(r#"{"disease":"Rust","confidence":88.5,"gemini_details":"Spray **sulfur**.\n"}"#).unwrap();
    let text = diagnosis_text(&raw.into_diagnosis());
    assert!(text.contains("Confidence:  88.5%"));
    assert!(text.ends_with("Advisory:\nSpray **sulfur**.\n"));
}

#[test]
fn diagnosis_json_has_every_display_field() {
    let value = diagnosis_json(&leaf_blight());
    assert_eq!(value["disease"], "Leaf Blight");
    assert_eq!(value["confidence"], 92.0);
    assert_eq!(value["severity"], "High");
    assert_eq!(value["advisory"], Value::Null);
    assert_eq!(value["remedies"].as_array().map(Vec::len), Some(1));
}

#[test]
fn recommendation_output() {
    assert_eq!(recommendation_text("crop", " rice\n"), "Recommended crop: rice");
    assert_eq!(recommendation_json("Urea"), json!({ "recommendation": "Urea" }));
    assert_eq!(answer_json("Water early."), json!({ "answer": "Water early." }));
}
