//! Shared wire model for the crop-advisory inference API.
//!
//! This crate owns the request/response shapes used by both the browser
//! `client` and the terminal `cli`. It stays free of any HTTP stack so it
//! compiles unchanged for native targets and `wasm32`; transports implement
//! [`InferenceApi`] on their side of the boundary.

pub mod api;
pub mod endpoint;
pub mod error;
pub mod form;
pub mod types;

pub use api::{InferenceApi, ask_assistant, detect, recommend_crop, recommend_fertilizer};
pub use endpoint::{DEFAULT_BASE_URL, Endpoint};
pub use error::{ApiError, SubmitError, ValidationError};
pub use form::RequiredFields;
pub use types::{
    AssistantAnswer, AssistantQuestion, CropParams, DetectionResult, Diagnosis, FertilizerParams, ImageUpload,
    Recommendation, format_percent,
};
