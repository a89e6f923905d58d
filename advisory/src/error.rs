//! Error taxonomy for inference requests.
//!
//! ERROR HANDLING
//! ==============
//! Display strings double as the user-facing notification text, so both the
//! browser toaster and the CLI print them verbatim. Nothing here is retried.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::endpoint::Endpoint;

/// A client-side check failed; no request was issued.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required form field was empty. Holds the wire name; the message
    /// spells it with spaces.
    #[error("Please fill in the {} field.", .0.replace('_', " "))]
    MissingField(&'static str),
    /// The detection form was submitted without an image.
    #[error("No file selected")]
    MissingImage,
    /// The assistant form was submitted with a blank question.
    #[error("Please enter a question")]
    EmptyQuestion,
}

/// A request reached the transport but did not produce a usable response.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The service answered with a non-success status.
    #[error("{}", status_message(.endpoint, .status_text))]
    Status { endpoint: Endpoint, status: u16, status_text: String },
    /// The request never completed (connection refused, DNS, CORS, ...).
    #[error("network error: {0}")]
    Transport(String),
    /// The response body did not match the expected schema.
    #[error("invalid response from inference API: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error, falling back to the numeric code when the
    /// transport exposes no reason phrase (HTTP/2 responses carry none).
    #[must_use]
    pub fn status(endpoint: Endpoint, status: u16, status_text: &str) -> Self {
        let status_text = if status_text.trim().is_empty() { status.to_string() } else { status_text.to_owned() };
        Self::Status { endpoint, status, status_text }
    }
}

fn status_message(endpoint: &Endpoint, status_text: &str) -> String {
    format!("{}: {status_text}", endpoint.failure_prefix())
}

/// Outcome of a validate-then-call submission.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    /// True when the failure happened before any request was sent.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}
