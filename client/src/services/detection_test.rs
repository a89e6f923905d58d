use std::cell::{Cell, RefCell};

use advisory::{
    ApiError, AssistantAnswer, AssistantQuestion, CropParams, DetectionResult, Endpoint, FertilizerParams,
    Recommendation, ValidationError,
};
use futures::executor::block_on;

use super::*;
use crate::net::backend::IdentityError;
use crate::net::types::{SessionUser, UserAttributes, UserMetadata};

struct FakeApi {
    response: Result<DetectionResult, ApiError>,
    calls: Cell<usize>,
}

impl FakeApi {
    fn returning(response: Result<DetectionResult, ApiError>) -> Self {
        Self { response, calls: Cell::new(0) }
    }
}

impl InferenceApi for FakeApi {
    async fn detect(&self, _image: &ImageUpload) -> Result<DetectionResult, ApiError> {
        self.calls.set(self.calls.get() + 1);
        self.response.clone()
    }

    async fn recommend_crop(&self, _params: &CropParams) -> Result<Recommendation, ApiError> {
        unreachable!("not used by detection")
    }

    async fn recommend_fertilizer(&self, _params: &FertilizerParams) -> Result<Recommendation, ApiError> {
        unreachable!("not used by detection")
    }

    async fn ask_assistant(&self, _question: &AssistantQuestion) -> Result<AssistantAnswer, ApiError> {
        unreachable!("not used by detection")
    }
}

#[derive(Default)]
struct FakeLog {
    fail: bool,
    refresh_fails: bool,
    refreshes: Cell<usize>,
    inserts: RefCell<Vec<(String, DetectionRecord)>>,
}

impl DetectionLog for FakeLog {
    async fn insert_detection(&self, access_token: &str, record: &DetectionRecord) -> Result<(), IdentityError> {
        self.inserts.borrow_mut().push((access_token.to_owned(), record.clone()));
        if self.fail {
            return Err(IdentityError::Provider { status: 403, message: "permission denied".to_owned() });
        }
        Ok(())
    }
}

/// The hosted backend serves both roles; only token rotation is needed here.
impl IdentityProvider for FakeLog {
    async fn sign_in_with_password(&self, _email: &str, _password: &str) -> Result<Session, IdentityError> {
        unreachable!("not used by detection")
    }

    async fn sign_up(&self, _email: &str, _password: &str, _full_name: &str) -> Result<Option<Session>, IdentityError> {
        unreachable!("not used by detection")
    }

    async fn refresh_session(&self, _refresh_token: &str) -> Result<Session, IdentityError> {
        self.refreshes.set(self.refreshes.get() + 1);
        if self.refresh_fails {
            return Err(IdentityError::Provider { status: 400, message: "Invalid Refresh Token".to_owned() });
        }
        Ok(Session { access_token: "at-rotated".to_owned(), expires_at: Some(9_000), ..session() })
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), IdentityError> {
        unreachable!("not used by detection")
    }

    async fn update_user(&self, _access_token: &str, _attributes: &UserAttributes) -> Result<SessionUser, IdentityError> {
        unreachable!("not used by detection")
    }
}

fn leaf_blight() -> DetectionResult {
    serde_json::from_str(r#"{"disease":"Leaf Blight","confidence":92}"#).unwrap()
}

fn upload() -> ImageUpload {
    ImageUpload::new("leaf.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff])
}

fn session() -> Session {
    Session {
        access_token: "at-1".to_owned(),
        refresh_token: "rt-1".to_owned(),
        expires_at: None,
        user: SessionUser {
            id: "user-1".to_owned(),
            email: Some("farmer@example.com".to_owned()),
            created_at: None,
            user_metadata: UserMetadata::default(),
        },
    }
}

// =============================================================
// Successful analysis
// =============================================================

#[test]
fn leaf_blight_displays_name_and_percent_and_inserts_once() {
    let api = FakeApi::returning(Ok(leaf_blight()));
    let history = FakeLog::default();
    let session = session();

    let outcome = block_on(analyze_image(&api, &history, Some(&session), Some(&upload()))).unwrap();

    assert_eq!(outcome.diagnosis.disease, "Leaf Blight");
    assert_eq!(outcome.diagnosis.confidence_label(), "92%");
    assert!(outcome.recorded);
    let inserts = history.inserts.borrow();
    assert_eq!(inserts.len(), 1);
    assert_eq!(inserts[0].0, "at-1");
    assert_eq!(inserts[0].1.user_id, "user-1");
    assert_eq!(inserts[0].1.disease_name, "Leaf Blight");
    assert_eq!(inserts[0].1.severity, "High");
}

#[test]
fn no_insert_without_session() {
    let api = FakeApi::returning(Ok(leaf_blight()));
    let history = FakeLog::default();
    let outcome = block_on(analyze_image(&api, &history, None, Some(&upload()))).unwrap();
    assert!(!outcome.recorded);
    assert!(history.inserts.borrow().is_empty());
}

#[test]
fn insert_failure_still_returns_diagnosis() {
    let api = FakeApi::returning(Ok(leaf_blight()));
    let history = FakeLog { fail: true, ..FakeLog::default() };
    let session = session();
    let outcome = block_on(analyze_image(&api, &history, Some(&session), Some(&upload()))).unwrap();
    assert_eq!(outcome.diagnosis.disease, "Leaf Blight");
    assert!(!outcome.recorded);
    assert_eq!(history.inserts.borrow().len(), 1);
}

// =============================================================
// Failures
// =============================================================

#[test]
fn missing_image_makes_no_calls() {
    let api = FakeApi::returning(Ok(leaf_blight()));
    let history = FakeLog::default();
    let session = session();
    let err = block_on(analyze_image(&api, &history, Some(&session), None)).unwrap_err();
    assert_eq!(err, SubmitError::Invalid(ValidationError::MissingImage));
    assert_eq!(api.calls.get(), 0);
    assert!(history.inserts.borrow().is_empty());
}

#[test]
fn failed_inference_makes_no_insert() {
    let api = FakeApi::returning(Err(ApiError::status(Endpoint::Detect, 500, "Internal Server Error")));
    let history = FakeLog::default();
    let session = session();
    let err = block_on(analyze_image(&api, &history, Some(&session), Some(&upload()))).unwrap_err();
    assert_eq!(err.to_string(), "AI model error: Internal Server Error");
    assert_eq!(api.calls.get(), 1);
    assert!(history.inserts.borrow().is_empty());
}

// =============================================================
// Current user
// =============================================================

fn expired_session() -> Session {
    Session { expires_at: Some(1_000), ..session() }
}

#[test]
fn expired_token_is_rotated_before_insert() {
    let api = FakeApi::returning(Ok(leaf_blight()));
    let backend = FakeLog::default();
    let store = SessionStore::new(Some(expired_session()));

    let outcome = block_on(analyze_for_current_user(&api, &backend, &store, Some(&upload()), 2_000)).unwrap();

    assert!(outcome.recorded);
    assert_eq!(backend.refreshes.get(), 1);
    let inserts = backend.inserts.borrow();
    assert_eq!(inserts.len(), 1);
    assert_eq!(inserts[0].0, "at-rotated");
    assert_eq!(store.snapshot().map(|s| s.access_token), Some("at-rotated".to_owned()));
}

#[test]
fn fresh_token_is_used_as_is() {
    let api = FakeApi::returning(Ok(leaf_blight()));
    let backend = FakeLog::default();
    let store = SessionStore::new(Some(session()));

    let outcome = block_on(analyze_for_current_user(&api, &backend, &store, Some(&upload()), 2_000)).unwrap();

    assert!(outcome.recorded);
    assert_eq!(backend.refreshes.get(), 0);
    assert_eq!(backend.inserts.borrow()[0].0, "at-1");
}

#[test]
fn failed_rotation_runs_detection_unrecorded() {
    let api = FakeApi::returning(Ok(leaf_blight()));
    let backend = FakeLog { refresh_fails: true, ..FakeLog::default() };
    let store = SessionStore::new(Some(expired_session()));

    let outcome = block_on(analyze_for_current_user(&api, &backend, &store, Some(&upload()), 2_000)).unwrap();

    assert_eq!(outcome.diagnosis.disease, "Leaf Blight");
    assert!(!outcome.recorded);
    assert!(backend.inserts.borrow().is_empty());
    assert!(!store.is_signed_in());
}
