//! Terminal and JSON output for command results.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;

use advisory::Diagnosis;
use serde_json::{Value, json};

pub fn diagnosis_text(d: &Diagnosis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Disease:     {}", d.disease);
    let _ = writeln!(out, "Confidence:  {}", d.confidence_label());
    let _ = writeln!(out, "Severity:    {}", d.severity);
    let _ = writeln!(out, "\n{}", d.description);
    push_list(&mut out, "Remedies", &d.remedies);
    push_list(&mut out, "Prevention", &d.prevention);
    if let Some(advisory) = &d.advisory {
        let _ = writeln!(out, "\nAdvisory:\n{}", advisory.trim_end());
    }
    out
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "\n{title}:");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

pub fn diagnosis_json(d: &Diagnosis) -> Value {
    json!({
        "disease": d.disease,
        "confidence": d.confidence,
        "severity": d.severity,
        "description": d.description,
        "remedies": d.remedies,
        "prevention": d.prevention,
        "advisory": d.advisory,
    })
}

/// `label` names what was recommended, e.g. `crop`.
pub fn recommendation_text(label: &str, value: &str) -> String {
    format!("Recommended {label}: {}", value.trim())
}

pub fn recommendation_json(value: &str) -> Value {
    json!({ "recommendation": value })
}

pub fn answer_json(answer: &str) -> Value {
    json!({ "answer": answer })
}
