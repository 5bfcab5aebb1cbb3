//! Replica bound updates for Compute Engine autoscalers
//!
//! This crate provides:
//! - The autoscaler resource model and locality resolution
//! - A REST client for regional and zonal autoscaler endpoints
//! - A policy client that merges new min/max bounds and writes them back
//! - The one-shot resize flow and logging setup used by the CLI

pub mod compute;
pub mod context;
pub mod error;
pub mod models;
pub mod observability;
pub mod policy;
pub mod resize;

#[cfg(test)]
mod testing;

pub use compute::{ComputeApi, ComputeClient, ComputeConfig, Credentials};
pub use context::RequestContext;
pub use error::{ApiError, PolicyError};
pub use models::*;
pub use observability::{init_tracing, LogFormat};
pub use policy::{merge_bounds, validate_bounds, PolicyClient, RegionalPolicyClient, ZonalPolicyClient};
pub use resize::{resize, ResizeOutcome};
