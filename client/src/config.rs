//! Build-time client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser bundle has no process environment, so collaborator addresses
//! are baked in when the WASM is compiled, the same way a bundler inlines
//! public env vars. The values are public: the anon key only identifies the
//! project to the identity provider.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use advisory::DEFAULT_BASE_URL;

/// Addresses of the external collaborators the UI talks to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the hosted auth/database backend (no trailing slash).
    pub identity_url: String,
    /// Public project key sent as the `apikey` header.
    pub identity_anon_key: String,
    /// Base URL of the inference API (no trailing slash).
    pub inference_url: String,
}

impl ClientConfig {
    /// Read `KRISHI_IDENTITY_URL`, `KRISHI_IDENTITY_ANON_KEY` and
    /// `KRISHI_INFERENCE_URL` as captured at compile time.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("KRISHI_IDENTITY_URL"),
            option_env!("KRISHI_IDENTITY_ANON_KEY"),
            option_env!("KRISHI_INFERENCE_URL"),
        )
    }

    #[must_use]
    pub fn from_values(identity_url: Option<&str>, anon_key: Option<&str>, inference_url: Option<&str>) -> Self {
        Self {
            identity_url: normalize_base(identity_url.unwrap_or_default()),
            identity_anon_key: anon_key.unwrap_or_default().trim().to_owned(),
            inference_url: normalize_base(
                inference_url
                    .filter(|url| !url.trim().is_empty())
                    .unwrap_or(DEFAULT_BASE_URL),
            ),
        }
    }

    /// True when both identity settings are present.
    #[must_use]
    pub fn identity_configured(&self) -> bool {
        !self.identity_url.is_empty() && !self.identity_anon_key.is_empty()
    }
}

fn normalize_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}
