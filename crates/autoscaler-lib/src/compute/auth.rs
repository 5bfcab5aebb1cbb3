//! Access tokens for the Compute Engine API

use crate::error::ApiError;
use std::fmt;
use tracing::debug;

/// OAuth scope for reading and updating Compute Engine resources
pub const COMPUTE_SCOPE: &str = "https://www.googleapis.com/auth/compute";

/// Where bearer tokens come from
#[derive(Clone, Default)]
pub enum Credentials {
    /// Pre-issued OAuth access token (e.g. `gcloud auth print-access-token`)
    AccessToken(String),
    /// Application Default Credentials: `GOOGLE_APPLICATION_CREDENTIALS`,
    /// gcloud user credentials, then the metadata server
    #[default]
    ApplicationDefault,
}

// Tokens must not end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
            Credentials::ApplicationDefault => f.write_str("ApplicationDefault"),
        }
    }
}

impl Credentials {
    /// Pick the token source: a non-empty explicit token wins over ADC
    pub fn from_token(token: Option<String>) -> Self {
        match token {
            Some(token) if !token.is_empty() => Credentials::AccessToken(token),
            _ => Credentials::ApplicationDefault,
        }
    }

    pub fn is_application_default(&self) -> bool {
        matches!(self, Credentials::ApplicationDefault)
    }

    /// Resolve a bearer token
    pub(crate) async fn access_token(&self) -> Result<String, ApiError> {
        match self {
            Credentials::AccessToken(token) => Ok(token.clone()),
            Credentials::ApplicationDefault => {
                let provider = gcp_auth::provider()
                    .await
                    .map_err(|e| ApiError::Auth(e.to_string()))?;
                debug!(scope = COMPUTE_SCOPE, "Requesting access token from default credentials");

                let token = provider
                    .token(&[COMPUTE_SCOPE])
                    .await
                    .map_err(|e| ApiError::Auth(e.to_string()))?;
                Ok(token.as_str().to_string())
            }
        }
    }
}
