//! Request and response DTOs for the inference API.
//!
//! DESIGN
//! ======
//! Numeric readings travel as strings, exactly as typed into the form; the
//! service parses them. Responses keep optional fields optional and the
//! display defaults live in [`DetectionResult::into_diagnosis`] so a sparse
//! model response still renders a complete result card.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::form::RequiredFields;

// =============================================================================
// DETECTION
// =============================================================================

/// An image picked for classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), content_type: content_type.into(), bytes }
    }

    /// Best-effort MIME type from a file extension.
    #[must_use]
    pub fn guess_content_type(file_name: &str) -> &'static str {
        let ext = file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => "image/png",
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            Some("bmp") => "image/bmp",
            _ => "application/octet-stream",
        }
    }
}

/// Raw `POST /api/detect` response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub disease: String,
    /// Percentage in `0..=100`, already scaled by the service.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remedies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevention: Option<Vec<String>>,
    /// Free-form advisory text the service attaches from its language model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_details: Option<String>,
}

/// A detection result with every display field populated.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnosis {
    pub disease: String,
    pub confidence: f64,
    pub severity: String,
    pub description: String,
    pub remedies: Vec<String>,
    pub prevention: Vec<String>,
    pub advisory: Option<String>,
}

pub const DEFAULT_SEVERITY: &str = "High";
pub const DEFAULT_REMEDY: &str = "Please consult a local agricultural expert for remedies.";
pub const DEFAULT_PREVENTION: &str = "Practice good crop hygiene and monitoring.";

impl DetectionResult {
    /// Fill missing display fields with generic guidance.
    #[must_use]
    pub fn into_diagnosis(self) -> Diagnosis {
        let description = non_blank(self.description)
            .unwrap_or_else(|| format!("AI analysis completed for {}.", self.disease));
        Diagnosis {
            severity: non_blank(self.severity).unwrap_or_else(|| DEFAULT_SEVERITY.to_owned()),
            description,
            remedies: non_empty(self.remedies).unwrap_or_else(|| vec![DEFAULT_REMEDY.to_owned()]),
            prevention: non_empty(self.prevention).unwrap_or_else(|| vec![DEFAULT_PREVENTION.to_owned()]),
            advisory: non_blank(self.gemini_details),
            disease: self.disease,
            confidence: self.confidence,
        }
    }
}

impl Diagnosis {
    /// Confidence rendered the way the result card shows it, e.g. `92%`.
    #[must_use]
    pub fn confidence_label(&self) -> String {
        format_percent(self.confidence)
    }
}

/// Render a percentage without a trailing `.0` for whole numbers.
#[must_use]
pub fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        let whole = value as i64;
        format!("{whole}%")
    } else {
        format!("{value}%")
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn non_empty(value: Option<Vec<String>>) -> Option<Vec<String>> {
    value.filter(|items| !items.is_empty())
}

// =============================================================================
// RECOMMENDATIONS
// =============================================================================

/// `POST /api/recommend-crop` body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropParams {
    #[serde(rename = "N")]
    pub nitrogen: String,
    #[serde(rename = "P")]
    pub phosphorus: String,
    #[serde(rename = "K")]
    pub potassium: String,
    pub temperature: String,
    pub humidity: String,
    pub ph: String,
    pub rainfall: String,
}

impl RequiredFields for CropParams {
    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("N", self.nitrogen.as_str()),
            ("P", self.phosphorus.as_str()),
            ("K", self.potassium.as_str()),
            ("temperature", self.temperature.as_str()),
            ("humidity", self.humidity.as_str()),
            ("ph", self.ph.as_str()),
            ("rainfall", self.rainfall.as_str()),
        ]
    }
}

/// `POST /api/recommend-fertilizer` body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FertilizerParams {
    pub temperature: String,
    pub humidity: String,
    pub moisture: String,
    pub soil_type: String,
    pub crop_type: String,
    #[serde(rename = "N")]
    pub nitrogen: String,
    #[serde(rename = "P")]
    pub phosphorus: String,
    #[serde(rename = "K")]
    pub potassium: String,
}

impl RequiredFields for FertilizerParams {
    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("temperature", self.temperature.as_str()),
            ("humidity", self.humidity.as_str()),
            ("moisture", self.moisture.as_str()),
            ("soil_type", self.soil_type.as_str()),
            ("crop_type", self.crop_type.as_str()),
            ("N", self.nitrogen.as_str()),
            ("P", self.phosphorus.as_str()),
            ("K", self.potassium.as_str()),
        ]
    }
}

/// Response shared by both recommenders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommendation: String,
}

// =============================================================================
// ASSISTANT
// =============================================================================

/// `POST /api/ask-assistant` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantQuestion {
    pub question: String,
}

/// `POST /api/ask-assistant` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantAnswer {
    pub answer: String,
}
