//! Error types for claimcheck-backends

use thiserror::Error;

/// Errors a collaborator backend can report.
///
/// The pipeline never surfaces these to its caller; they decide whether a
/// candidate is skipped or a search returns a partial list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Transport-level failure (connect, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Remote answered with a non-success status
    #[error("backend returned status {code}: {body}")]
    Status { code: u16, body: String },

    /// Response body did not have the expected shape
    #[error("could not decode backend response: {0}")]
    Decode(String),

    /// Response decoded but carried nothing usable
    #[error("backend returned an empty response")]
    EmptyResponse,

    /// Call exceeded its time budget
    #[error("backend call timed out after {limit_ms}ms")]
    Timeout { limit_ms: u64 },

    /// Endpoint for this backend was not configured
    #[error("backend not configured: {0}")]
    NotConfigured(String),

    /// Backend refused or could not serve the request
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err.to_string())
    }
}
