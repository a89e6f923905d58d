//! Disease detection workflow: classify an image, then log it.
//!
//! ERROR HANDLING
//! ==============
//! Validation and inference failures abort the workflow and are returned for
//! display. Logging the detection to the user's history is best-effort: an
//! insert failure is logged and reported through `recorded == false`, but the
//! diagnosis is still shown. An expired token is rotated before the insert;
//! when rotation fails the detection runs unrecorded.

#[cfg(test)]
#[path = "detection_test.rs"]
mod detection_test;

use advisory::{Diagnosis, ImageUpload, InferenceApi, SubmitError};

use crate::net::backend::{DetectionLog, IdentityProvider};
use crate::net::types::{DetectionRecord, Session};
use crate::services::auth;
use crate::state::session::SessionStore;

#[derive(Clone, Debug, PartialEq)]
pub struct DetectionOutcome {
    pub diagnosis: Diagnosis,
    /// True when the detection was written to the signed-in user's history.
    pub recorded: bool,
}

/// Run one detection and, when `session` is present, insert exactly one
/// history record for it.
///
/// # Errors
///
/// [`SubmitError`] when no image was picked or the inference call failed.
pub async fn analyze_image<A, L>(
    api: &A,
    history: &L,
    session: Option<&Session>,
    image: Option<&ImageUpload>,
) -> Result<DetectionOutcome, SubmitError>
where
    A: InferenceApi,
    L: DetectionLog,
{
    let diagnosis = advisory::detect(api, image).await?;
    log::info!("detected {} at {}", diagnosis.disease, diagnosis.confidence_label());

    let Some(session) = session else {
        return Ok(DetectionOutcome { diagnosis, recorded: false });
    };
    let record = DetectionRecord::new(&session.user.id, &diagnosis);
    let recorded = match history.insert_detection(&session.access_token, &record).await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("failed to record detection for {}: {e}", session.user.id);
            false
        }
    };
    Ok(DetectionOutcome { diagnosis, recorded })
}

/// [`analyze_image`] for whoever is signed in at `now`, refreshing an expired
/// access token first so the history insert is accepted.
///
/// # Errors
///
/// Same as [`analyze_image`]. Session problems never fail the analysis.
pub async fn analyze_for_current_user<A, B>(
    api: &A,
    backend: &B,
    store: &SessionStore,
    image: Option<&ImageUpload>,
    now: i64,
) -> Result<DetectionOutcome, SubmitError>
where
    A: InferenceApi,
    B: IdentityProvider + DetectionLog,
{
    let session = match auth::current_session(backend, store, now).await {
        Ok(session) => session,
        Err(e) => {
            log::warn!("detection will not be recorded: {e}");
            None
        }
    };
    analyze_image(api, backend, session.as_ref(), image).await
}
