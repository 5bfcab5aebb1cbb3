//! Compute Engine autoscaler API
//!
//! This module provides:
//! - The `ComputeApi` trait, the seam between policy logic and the provider
//! - A REST implementation over reqwest, authenticated through
//!   Application Default Credentials or an explicit access token

mod auth;
mod client;

pub use auth::{Credentials, COMPUTE_SCOPE};
pub use client::{ComputeClient, ComputeConfig, DEFAULT_BASE_URL};

use crate::error::ApiError;
use crate::models::{Autoscaler, Operation};
use async_trait::async_trait;

/// Read and write operations on regional and zonal autoscalers
#[async_trait]
pub trait ComputeApi: Send + Sync {
    /// Fetch a regional autoscaler
    async fn get_region_autoscaler(
        &self,
        project: &str,
        region: &str,
        name: &str,
    ) -> Result<Autoscaler, ApiError>;

    /// Fetch a zonal autoscaler
    async fn get_zone_autoscaler(
        &self,
        project: &str,
        zone: &str,
        name: &str,
    ) -> Result<Autoscaler, ApiError>;

    /// Replace the regional autoscaler `name` with `autoscaler`
    async fn update_region_autoscaler(
        &self,
        project: &str,
        region: &str,
        name: &str,
        autoscaler: &Autoscaler,
    ) -> Result<Operation, ApiError>;

    /// Replace the zonal autoscaler `name` with `autoscaler`
    async fn update_zone_autoscaler(
        &self,
        project: &str,
        zone: &str,
        name: &str,
        autoscaler: &Autoscaler,
    ) -> Result<Operation, ApiError>;
}
