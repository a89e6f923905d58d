use std::cell::{Cell, RefCell};

use futures::executor::block_on;

use super::*;
use crate::endpoint::Endpoint;
use crate::types::{DEFAULT_SEVERITY, ImageUpload};

/// Scripted inference service that counts every call.
#[derive(Default)]
struct FakeApi {
    calls: Cell<usize>,
    fail_with: Option<ApiError>,
    last_question: RefCell<Option<String>>,
}

impl FakeApi {
    fn failing(err: ApiError) -> Self {
        Self { fail_with: Some(err), ..Self::default() }
    }

    fn hit<T>(&self, ok: T) -> Result<T, ApiError> {
        self.calls.set(self.calls.get() + 1);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(ok),
        }
    }
}

impl InferenceApi for FakeApi {
    async fn detect(&self, _image: &ImageUpload) -> Result<DetectionResult, ApiError> {
        self.hit(DetectionResult {
            disease: "Leaf Blight".to_owned(),
            confidence: 92.0,
            severity: None,
            description: None,
            remedies: None,
            prevention: None,
            gemini_details: None,
        })
    }

    async fn recommend_crop(&self, _params: &CropParams) -> Result<Recommendation, ApiError> {
        self.hit(Recommendation { recommendation: "Rice".to_owned() })
    }

    async fn recommend_fertilizer(&self, _params: &FertilizerParams) -> Result<Recommendation, ApiError> {
        self.hit(Recommendation { recommendation: "Urea".to_owned() })
    }

    async fn ask_assistant(&self, question: &AssistantQuestion) -> Result<AssistantAnswer, ApiError> {
        self.last_question.replace(Some(question.question.clone()));
        self.hit(AssistantAnswer { answer: "Use mulch.".to_owned() })
    }
}

fn leaf() -> ImageUpload {
    ImageUpload::new("leaf.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF])
}

// =============================================================
// Validation gates the network
// =============================================================

#[test]
fn empty_crop_field_never_reaches_api() {
    let api = FakeApi::default();
    let params = CropParams { nitrogen: "90".to_owned(), ..CropParams::default() };
    let err = block_on(recommend_crop(&api, &params)).expect_err("should fail validation");
    assert_eq!(err, SubmitError::Invalid(ValidationError::MissingField("P")));
    assert_eq!(api.calls.get(), 0);
}

#[test]
fn empty_fertilizer_field_never_reaches_api() {
    let api = FakeApi::default();
    let err = block_on(recommend_fertilizer(&api, &FertilizerParams::default())).expect_err("invalid");
    assert_eq!(err.to_string(), "Please fill in the temperature field.");
    assert_eq!(api.calls.get(), 0);
}

#[test]
fn missing_image_never_reaches_api() {
    let api = FakeApi::default();
    let err = block_on(detect(&api, None)).expect_err("invalid");
    assert_eq!(err, SubmitError::Invalid(ValidationError::MissingImage));
    assert_eq!(api.calls.get(), 0);
}

#[test]
fn blank_question_never_reaches_api() {
    let api = FakeApi::default();
    let err = block_on(ask_assistant(&api, "  \n ")).expect_err("invalid");
    assert_eq!(err, SubmitError::Invalid(ValidationError::EmptyQuestion));
    assert_eq!(api.calls.get(), 0);
}

// =============================================================
// Successful calls
// =============================================================

#[test]
fn complete_crop_form_issues_one_request() {
    let api = FakeApi::default();
    let params = CropParams {
        nitrogen: "90".to_owned(),
        phosphorus: "42".to_owned(),
        potassium: "43".to_owned(),
        temperature: "31".to_owned(),
        humidity: "82".to_owned(),
        ph: "6.5".to_owned(),
        rainfall: "202".to_owned(),
    };
    assert_eq!(block_on(recommend_crop(&api, &params)), Ok("Rice".to_owned()));
    assert_eq!(api.calls.get(), 1);
}

#[test]
fn detect_returns_diagnosis_with_defaults() {
    let api = FakeApi::default();
    let diagnosis = block_on(detect(&api, Some(&leaf()))).expect("detect");
    assert_eq!(diagnosis.disease, "Leaf Blight");
    assert_eq!(diagnosis.confidence_label(), "92%");
    assert_eq!(diagnosis.severity, DEFAULT_SEVERITY);
    assert_eq!(api.calls.get(), 1);
}

#[test]
fn question_is_trimmed_before_sending() {
    let api = FakeApi::default();
    let answer = block_on(ask_assistant(&api, "  Best crop for sandy soil?  ")).expect("ask");
    assert_eq!(answer, "Use mulch.");
    assert_eq!(api.last_question.borrow().as_deref(), Some("Best crop for sandy soil?"));
}

// =============================================================
// Failures surface once, unchanged
// =============================================================

#[test]
fn status_failure_is_reported_verbatim() {
    let api = FakeApi::failing(ApiError::status(Endpoint::Detect, 400, "BAD REQUEST"));
    let err = block_on(detect(&api, Some(&leaf()))).expect_err("fail");
    assert_eq!(err.to_string(), "AI model error: BAD REQUEST");
    assert_eq!(api.calls.get(), 1);
}
