//! Endpoint table for the inference API.

#[cfg(test)]
#[path = "endpoint_test.rs"]
mod endpoint_test;

use serde::{Deserialize, Serialize};

/// Address the inference service listens on when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// One request/response operation exposed by the inference service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Multipart image classification.
    Detect,
    /// Crop suggestion from soil and weather readings.
    RecommendCrop,
    /// Fertilizer suggestion from soil, weather and crop readings.
    RecommendFertilizer,
    /// Free-text agricultural question answering.
    AskAssistant,
    /// Liveness probe.
    Test,
}

impl Endpoint {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Detect => "/api/detect",
            Self::RecommendCrop => "/api/recommend-crop",
            Self::RecommendFertilizer => "/api/recommend-fertilizer",
            Self::AskAssistant => "/api/ask-assistant",
            Self::Test => "/api/test",
        }
    }

    /// Join the endpoint path onto `base_url`, tolerating a trailing slash.
    #[must_use]
    pub fn url(self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }

    /// Prefix used when the service answers with a non-success status.
    #[must_use]
    pub fn failure_prefix(self) -> &'static str {
        match self {
            Self::Detect => "AI model error",
            _ => "API error",
        }
    }
}
