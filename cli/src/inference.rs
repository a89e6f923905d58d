//! `reqwest` transport for the inference API.
//!
//! ERROR HANDLING
//! ==============
//! Non-success statuses map to `ApiError::Status` with the canonical reason
//! phrase, which is what a browser reports as `statusText`, so terminal and
//! UI show the same message for the same failure.

use advisory::{
    ApiError, AssistantAnswer, AssistantQuestion, CropParams, DetectionResult, Endpoint, FertilizerParams,
    ImageUpload, InferenceApi, Recommendation,
};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct ReqwestInference {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestInference {
    pub fn new(base_url: &str) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_owned() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/test`: returns the raw body on success.
    pub async fn ping(&self) -> Result<String, ApiError> {
        let endpoint = Endpoint::Test;
        let response = self.client.get(endpoint.url(&self.base_url)).send().await.map_err(transport)?;
        check_status(endpoint, &response)?;
        response.text().await.map_err(transport)
    }

    async fn post_json<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client.post(endpoint.url(&self.base_url)).json(body).send().await.map_err(transport)?;
        decode(endpoint, response).await
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

fn check_status(endpoint: Endpoint, response: &reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    Err(ApiError::status(endpoint, status.as_u16(), status.canonical_reason().unwrap_or_default()))
}

async fn decode<T: DeserializeOwned>(endpoint: Endpoint, response: reqwest::Response) -> Result<T, ApiError> {
    check_status(endpoint, &response)?;
    let body = response.text().await.map_err(transport)?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

impl InferenceApi for ReqwestInference {
    async fn detect(&self, image: &ImageUpload) -> Result<DetectionResult, ApiError> {
        let endpoint = Endpoint::Detect;
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(transport)?;
        let form = Form::new().part("image", part);
        let response =
            self.client.post(endpoint.url(&self.base_url)).multipart(form).send().await.map_err(transport)?;
        decode(endpoint, response).await
    }

    async fn recommend_crop(&self, params: &CropParams) -> Result<Recommendation, ApiError> {
        self.post_json(Endpoint::RecommendCrop, params).await
    }

    async fn recommend_fertilizer(&self, params: &FertilizerParams) -> Result<Recommendation, ApiError> {
        self.post_json(Endpoint::RecommendFertilizer, params).await
    }

    async fn ask_assistant(&self, question: &AssistantQuestion) -> Result<AssistantAnswer, ApiError> {
        self.post_json(Endpoint::AskAssistant, question).await
    }
}
