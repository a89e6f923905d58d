//! Transport seam and validate-then-call helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser implements [`InferenceApi`] with `gloo-net`, the CLI with
//! `reqwest`. Both route user input through the helpers below so a form that
//! fails validation never reaches the network.

#![allow(async_fn_in_trait)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::error::{ApiError, SubmitError, ValidationError};
use crate::form::RequiredFields;
use crate::types::{
    AssistantAnswer, AssistantQuestion, CropParams, DetectionResult, Diagnosis, FertilizerParams, ImageUpload,
    Recommendation,
};

/// One-shot request/response calls against the inference service.
///
/// Implementations issue exactly one HTTP request per call: no retries, no
/// streaming, no partial results.
pub trait InferenceApi {
    async fn detect(&self, image: &ImageUpload) -> Result<DetectionResult, ApiError>;
    async fn recommend_crop(&self, params: &CropParams) -> Result<Recommendation, ApiError>;
    async fn recommend_fertilizer(&self, params: &FertilizerParams) -> Result<Recommendation, ApiError>;
    async fn ask_assistant(&self, question: &AssistantQuestion) -> Result<AssistantAnswer, ApiError>;
}

/// Classify `image`, failing fast when none was picked.
///
/// # Errors
///
/// [`ValidationError::MissingImage`] without a request, or the transport error.
pub async fn detect<A: InferenceApi>(api: &A, image: Option<&ImageUpload>) -> Result<Diagnosis, SubmitError> {
    let image = image.ok_or(ValidationError::MissingImage)?;
    let result = api.detect(image).await?;
    Ok(result.into_diagnosis())
}

/// # Errors
///
/// The first blank field without a request, or the transport error.
pub async fn recommend_crop<A: InferenceApi>(api: &A, params: &CropParams) -> Result<String, SubmitError> {
    params.validate()?;
    Ok(api.recommend_crop(params).await?.recommendation)
}

/// # Errors
///
/// The first blank field without a request, or the transport error.
pub async fn recommend_fertilizer<A: InferenceApi>(api: &A, params: &FertilizerParams) -> Result<String, SubmitError> {
    params.validate()?;
    Ok(api.recommend_fertilizer(params).await?.recommendation)
}

/// # Errors
///
/// [`ValidationError::EmptyQuestion`] without a request, or the transport error.
pub async fn ask_assistant<A: InferenceApi>(api: &A, question: &str) -> Result<String, SubmitError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(ValidationError::EmptyQuestion.into());
    }
    let body = AssistantQuestion { question: question.to_owned() };
    Ok(api.ask_assistant(&body).await?.answer)
}
