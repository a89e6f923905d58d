//! DTOs for the hosted identity/database backend.
//!
//! DESIGN
//! ======
//! These mirror the provider's JSON so responses deserialize directly. The
//! same [`Session`] shape is what the app writes to `localStorage`, so a
//! restored session is indistinguishable from a fresh one.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use advisory::Diagnosis;
use serde::{Deserialize, Serialize};

/// Tokens are treated as expired this many seconds early so a request never
/// leaves with a token that lapses in flight.
pub const EXPIRY_MARGIN_SECS: i64 = 10;

/// Provider-managed profile fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// The identity provider's user record, as mirrored into the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// RFC 3339 creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl SessionUser {
    /// Full name when set, otherwise the e-mail address.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.user_metadata
            .full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or("Farmer")
            .to_owned()
    }
}

/// An authenticated session issued by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds after which the access token is rejected.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: SessionUser,
}

impl Session {
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|at| now >= at - EXPIRY_MARGIN_SECS)
    }
}

/// Body returned by the token and sign-up endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: SessionUser,
}

impl TokenResponse {
    /// Prefer the absolute expiry; derive it from `expires_in` otherwise.
    #[must_use]
    pub fn into_session(self, now: i64) -> Session {
        let expires_at = self.expires_at.or_else(|| self.expires_in.map(|secs| now + secs));
        Session { access_token: self.access_token, refresh_token: self.refresh_token, expires_at, user: self.user }
    }
}

/// `grant_type=password` body.
#[derive(Clone, Debug, Serialize)]
pub struct PasswordCredentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `grant_type=refresh_token` body.
#[derive(Clone, Debug, Serialize)]
pub struct RefreshCredentials<'a> {
    pub refresh_token: &'a str,
}

/// Sign-up body; `data` lands in the user's metadata.
#[derive(Clone, Debug, Serialize)]
pub struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub data: UserMetadata,
}

/// `PUT /auth/v1/user` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserAttributes {
    pub data: UserMetadata,
}

impl UserAttributes {
    #[must_use]
    pub fn full_name(name: &str) -> Self {
        Self { data: UserMetadata { full_name: Some(name.trim().to_owned()) } }
    }
}

/// Row appended to the `detections` table after a successful analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub user_id: String,
    pub disease_name: String,
    pub confidence: f64,
    pub severity: String,
}

impl DetectionRecord {
    #[must_use]
    pub fn new(user_id: &str, diagnosis: &Diagnosis) -> Self {
        Self {
            user_id: user_id.to_owned(),
            disease_name: diagnosis.disease.clone(),
            confidence: diagnosis.confidence,
            severity: diagnosis.severity.clone(),
        }
    }
}
