//! Resize command: update min/max replicas of an autoscaler

use anyhow::Result;
use autoscaler_lib::{resize, ComputeApi, RequestContext, ResizeRequest};
use std::sync::Arc;
use tracing::info;

use crate::output::{print_outcome, OutputFormat};

/// Fetch, merge and write back the autoscaler policy, then print the result
pub async fn run_resize(
    ctx: &RequestContext,
    api: Arc<dyn ComputeApi>,
    request: &ResizeRequest,
    format: OutputFormat,
) -> Result<()> {
    info!(
        project = %request.project,
        region = %request.region,
        zone = %request.zone,
        mig = %request.mig,
        min = request.bounds.min,
        max = request.bounds.max,
        mode = ?request.mode,
        dry_run = request.dry_run,
        "Updating autoscaler bounds"
    );

    let outcome = resize(ctx, api, request).await?;
    print_outcome(&outcome, format)
}
