//! Compute Engine client construction

use anyhow::{Context, Result};
use autoscaler_lib::compute::DEFAULT_BASE_URL;
use autoscaler_lib::{ComputeClient, ComputeConfig, Credentials};
use std::sync::Arc;
use std::time::Duration;

/// Per-request timeout for API calls
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the API client.
///
/// A non-empty access token takes precedence; otherwise Application Default
/// Credentials are resolved on the first request.
pub fn build_client(api_url: Option<&str>, access_token: Option<String>) -> Result<Arc<ComputeClient>> {
    let credentials = Credentials::from_token(access_token);

    let client = ComputeClient::new(ComputeConfig {
        base_url: api_url.unwrap_or(DEFAULT_BASE_URL).to_string(),
        request_timeout: REQUEST_TIMEOUT,
        credentials,
    })
    .context("Failed to create Compute Engine client")?;

    Ok(Arc::new(client))
}
