//! Browser transport for the inference API.
//!
//! Client-side (hydrate): `gloo-net` requests, multipart for images.
//! Server-side (SSR): every call fails with a transport error; forms only
//! submit from the browser.

#![allow(clippy::unused_async)]

use advisory::{
    ApiError, AssistantAnswer, AssistantQuestion, CropParams, DetectionResult, FertilizerParams, ImageUpload,
    InferenceApi, Recommendation,
};
#[cfg(feature = "hydrate")]
use advisory::Endpoint;

use crate::config::ClientConfig;

/// Stateless handle on the inference service; cheap to clone into tasks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpInference {
    base_url: String,
}

impl HttpInference {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.inference_url.clone())
    }
}

#[cfg(not(feature = "hydrate"))]
fn server_side<T>() -> Result<T, ApiError> {
    Err(ApiError::Transport("not available on server".to_owned()))
}

#[cfg(feature = "hydrate")]
fn transport(err: impl std::fmt::Display) -> ApiError {
    ApiError::Transport(err.to_string())
}

#[cfg(feature = "hydrate")]
fn js_transport(err: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Transport(format!("{err:?}"))
}

#[cfg(feature = "hydrate")]
impl HttpInference {
    async fn post_json<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let resp = gloo_net::http::Request::post(&endpoint.url(&self.base_url))
            .json(body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        decode(endpoint, resp).await
    }
}

#[cfg(feature = "hydrate")]
async fn decode<T: serde::de::DeserializeOwned>(
    endpoint: Endpoint,
    resp: gloo_net::http::Response,
) -> Result<T, ApiError> {
    if !resp.ok() {
        return Err(ApiError::status(endpoint, resp.status(), &resp.status_text()));
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

/// Wrap the picked image as the `image` part of a multipart form.
#[cfg(feature = "hydrate")]
fn image_form(image: &ImageUpload) -> Result<web_sys::FormData, ApiError> {
    let bytes = js_sys::Uint8Array::from(image.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(&image.content_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_transport)?;
    let form = web_sys::FormData::new().map_err(js_transport)?;
    form.append_with_blob_and_filename("image", &blob, &image.file_name)
        .map_err(js_transport)?;
    Ok(form)
}

impl InferenceApi for HttpInference {
    async fn detect(&self, image: &ImageUpload) -> Result<DetectionResult, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let form = image_form(image)?;
            // No explicit content type: the browser adds the multipart boundary.
            let resp = gloo_net::http::Request::post(&Endpoint::Detect.url(&self.base_url))
                .body(form)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            decode(Endpoint::Detect, resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = image;
            server_side()
        }
    }

    async fn recommend_crop(&self, params: &CropParams) -> Result<Recommendation, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            self.post_json(Endpoint::RecommendCrop, params).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = params;
            server_side()
        }
    }

    async fn recommend_fertilizer(&self, params: &FertilizerParams) -> Result<Recommendation, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            self.post_json(Endpoint::RecommendFertilizer, params).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = params;
            server_side()
        }
    }

    async fn ask_assistant(&self, question: &AssistantQuestion) -> Result<AssistantAnswer, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            self.post_json(Endpoint::AskAssistant, question).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = question;
            server_side()
        }
    }
}

// =============================================================================
// FILE PICKER HELPERS
// =============================================================================

/// Read a picked file into memory so it can be held in reactive state.
#[cfg(feature = "hydrate")]
pub async fn read_image_file(file: &web_sys::File) -> Result<ImageUpload, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{e:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let name = file.name();
    let content_type = match file.type_() {
        ty if ty.is_empty() => ImageUpload::guess_content_type(&name).to_owned(),
        ty => ty,
    };
    Ok(ImageUpload::new(name, content_type, bytes))
}

/// Object URL for an in-page preview of the picked file.
#[cfg(feature = "hydrate")]
pub fn preview_url(file: &web_sys::File) -> Option<String> {
    web_sys::Url::create_object_url_with_blob(file).ok()
}

/// Release a preview created by [`preview_url`].
pub fn revoke_preview(url: &str) {
    #[cfg(feature = "hydrate")]
    {
        let _ = web_sys::Url::revoke_object_url(url);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
    }
}
