//! HTTP client for the hosted identity/database backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning [`IdentityError::Unavailable`] since
//! sessions only exist in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every provider failure is folded into [`IdentityError`] whose display is
//! the provider's own message, so callers can surface it as a notification
//! without further mapping.

#![allow(clippy::unused_async)]
#![allow(async_fn_in_trait)]

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use super::types::{DetectionRecord, Session, SessionUser, UserAttributes};
#[cfg(any(test, feature = "hydrate"))]
use super::types::TokenResponse;
use crate::config::ClientConfig;

/// Failure talking to the identity provider or its database.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("identity provider is not configured")]
    NotConfigured,
    #[error("you are not signed in")]
    NotAuthenticated,
    #[error("{message}")]
    Provider { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("unexpected response from identity provider: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

impl IdentityError {
    /// The provider no longer recognises the presented token: it expired, was
    /// revoked, or its session was ended elsewhere.
    #[must_use]
    pub fn is_session_gone(&self) -> bool {
        matches!(self, Self::Provider { status: 401 | 403 | 404, .. })
    }
}

/// Session operations consumed from the identity provider.
pub trait IdentityProvider {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, IdentityError>;
    /// Returns `None` when the provider requires e-mail confirmation first.
    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<Option<Session>, IdentityError>;
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, IdentityError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError>;
    async fn update_user(&self, access_token: &str, attributes: &UserAttributes) -> Result<SessionUser, IdentityError>;
}

/// The single write this app performs against the database.
pub trait DetectionLog {
    async fn insert_detection(&self, access_token: &str, record: &DetectionRecord) -> Result<(), IdentityError>;
}

/// REST client for the auth (`/auth/v1`) and data (`/rest/v1`) surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendClient {
    base_url: String,
    anon_key: String,
}

impl BackendClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), anon_key: anon_key.into() }
    }

    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.identity_url.clone(), config.identity_anon_key.clone())
    }

    #[cfg(any(test, feature = "hydrate"))]
    fn ensure_configured(&self) -> Result<(), IdentityError> {
        if self.base_url.is_empty() || self.anon_key.is_empty() {
            return Err(IdentityError::NotConfigured);
        }
        Ok(())
    }
}

// =============================================================================
// ENDPOINTS + RESPONSE MAPPING
// =============================================================================

#[cfg(any(test, feature = "hydrate"))]
fn token_endpoint(base_url: &str, grant_type: &str) -> String {
    format!("{base_url}/auth/v1/token?grant_type={grant_type}")
}

#[cfg(any(test, feature = "hydrate"))]
fn auth_endpoint(base_url: &str, path: &str) -> String {
    format!("{base_url}/auth/v1/{path}")
}

#[cfg(any(test, feature = "hydrate"))]
fn table_endpoint(base_url: &str, table: &str) -> String {
    format!("{base_url}/rest/v1/{table}")
}

/// Pull a human-readable message out of a provider error body.
#[cfg(any(test, feature = "hydrate"))]
fn provider_error_message(status: u16, body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|value| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        })
        .map(str::to_owned)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("request failed: {status}"))
}

#[cfg(any(test, feature = "hydrate"))]
fn parse_session(body: &str, now: i64) -> Result<Session, IdentityError> {
    serde_json::from_str::<TokenResponse>(body)
        .map(|token| token.into_session(now))
        .map_err(|e| IdentityError::Decode(e.to_string()))
}

/// Sign-up answers with a full token response when the project auto-confirms
/// e-mail, and with a bare user record when confirmation is pending.
#[cfg(any(test, feature = "hydrate"))]
fn parse_sign_up(body: &str, now: i64) -> Result<Option<Session>, IdentityError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| IdentityError::Decode(e.to_string()))?;
    if value.get("access_token").is_none() {
        return Ok(None);
    }
    serde_json::from_value::<TokenResponse>(value)
        .map(|token| Some(token.into_session(now)))
        .map_err(|e| IdentityError::Decode(e.to_string()))
}

// =============================================================================
// BROWSER TRANSPORT
// =============================================================================

#[cfg(feature = "hydrate")]
fn transport(err: gloo_net::Error) -> IdentityError {
    IdentityError::Transport(err.to_string())
}

#[cfg(feature = "hydrate")]
impl BackendClient {
    fn with_auth(
        &self,
        builder: gloo_net::http::RequestBuilder,
        access_token: Option<&str>,
    ) -> gloo_net::http::RequestBuilder {
        let builder = builder.header("apikey", &self.anon_key);
        match access_token {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Send a JSON body and return the raw response text of a 2xx answer.
    async fn send_json(
        &self,
        builder: gloo_net::http::RequestBuilder,
        access_token: Option<&str>,
        body: &impl serde::Serialize,
    ) -> Result<String, IdentityError> {
        self.ensure_configured()?;
        let resp = self
            .with_auth(builder, access_token)
            .json(body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !resp.ok() {
            return Err(IdentityError::Provider { status, message: provider_error_message(status, &text) });
        }
        Ok(text)
    }
}

impl IdentityProvider for BackendClient {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        #[cfg(feature = "hydrate")]
        {
            let url = token_endpoint(&self.base_url, "password");
            let body = super::types::PasswordCredentials { email, password };
            let text = self.send_json(gloo_net::http::Request::post(&url), None, &body).await?;
            parse_session(&text, crate::util::time::now_secs())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(IdentityError::Unavailable)
        }
    }

    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<Option<Session>, IdentityError> {
        #[cfg(feature = "hydrate")]
        {
            let url = auth_endpoint(&self.base_url, "signup");
            let full_name = Some(full_name.trim().to_owned()).filter(|name| !name.is_empty());
            let body = super::types::SignUpRequest {
                email,
                password,
                data: super::types::UserMetadata { full_name },
            };
            let text = self.send_json(gloo_net::http::Request::post(&url), None, &body).await?;
            parse_sign_up(&text, crate::util::time::now_secs())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password, full_name);
            Err(IdentityError::Unavailable)
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, IdentityError> {
        #[cfg(feature = "hydrate")]
        {
            let url = token_endpoint(&self.base_url, "refresh_token");
            let body = super::types::RefreshCredentials { refresh_token };
            let text = self.send_json(gloo_net::http::Request::post(&url), None, &body).await?;
            parse_session(&text, crate::util::time::now_secs())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = refresh_token;
            Err(IdentityError::Unavailable)
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        #[cfg(feature = "hydrate")]
        {
            let url = auth_endpoint(&self.base_url, "logout");
            self.send_json(gloo_net::http::Request::post(&url), Some(access_token), &serde_json::json!({}))
                .await?;
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = access_token;
            Err(IdentityError::Unavailable)
        }
    }

    async fn update_user(&self, access_token: &str, attributes: &UserAttributes) -> Result<SessionUser, IdentityError> {
        #[cfg(feature = "hydrate")]
        {
            let url = auth_endpoint(&self.base_url, "user");
            let text = self
                .send_json(gloo_net::http::Request::put(&url), Some(access_token), attributes)
                .await?;
            serde_json::from_str(&text).map_err(|e| IdentityError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (access_token, attributes);
            Err(IdentityError::Unavailable)
        }
    }
}

impl DetectionLog for BackendClient {
    async fn insert_detection(&self, access_token: &str, record: &DetectionRecord) -> Result<(), IdentityError> {
        #[cfg(feature = "hydrate")]
        {
            let url = table_endpoint(&self.base_url, "detections");
            let builder = gloo_net::http::Request::post(&url).header("Prefer", "return=minimal");
            self.send_json(builder, Some(access_token), &[record]).await?;
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (access_token, record);
            Err(IdentityError::Unavailable)
        }
    }
}
