//! Error types for provider calls and policy updates

use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the Compute Engine API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to obtain access token: {0}")]
    Auth(String),

    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of the provider reply, if there was one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
            _ => None,
        }
    }
}

/// Failure resolving, fetching or updating an autoscaler policy
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Neither region nor zone was supplied
    #[error("please specify either region or zone")]
    MissingLocality,

    /// The fetch failed; the provider error is surfaced as-is
    #[error(transparent)]
    NotFoundOrApi(ApiError),

    /// The update failed; the provider error is surfaced as-is
    #[error(transparent)]
    Update(ApiError),

    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Strict mode rejected the merged bounds
    #[error("invalid replica bounds: min={min}, max={max}")]
    InvalidBounds { min: i64, max: i64 },
}
