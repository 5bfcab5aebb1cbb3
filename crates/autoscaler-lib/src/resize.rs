//! One-shot bound update: fetch, merge, validate, write

use crate::compute::ComputeApi;
use crate::context::RequestContext;
use crate::error::PolicyError;
use crate::models::{AutoscalerTarget, Bounds, ResizeRequest};
use crate::policy::PolicyClient;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// What a resize did
#[derive(Debug, Clone, Serialize)]
pub struct ResizeOutcome {
    pub target: AutoscalerTarget,
    pub before: Bounds,
    pub after: Bounds,
    /// False for dry runs
    pub applied: bool,
}

impl ResizeOutcome {
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

/// Run one fetch-merge-update cycle for `request`.
///
/// Exactly one read is made, and one write unless `request.dry_run` is set.
/// Errors are returned as-is; nothing is retried.
pub async fn resize(
    ctx: &RequestContext,
    api: Arc<dyn ComputeApi>,
    request: &ResizeRequest,
) -> Result<ResizeOutcome, PolicyError> {
    let mut client = PolicyClient::create(
        ctx,
        api,
        &request.project,
        &request.region,
        &request.zone,
        &request.mig,
    )
    .await?;

    let before = client.bounds();
    client.merge(request.bounds.max, request.bounds.min);
    let after = client.bounds();
    debug!(before = ?before, after = ?after, "Merged replica bounds");

    client.validate(request.mode)?;

    if request.dry_run {
        info!(autoscaler = %client.target(), "Dry run, skipping update");
    } else {
        debug!("Writing policy fetched earlier; concurrent changes since then are overwritten");
        client.update(ctx).await?;
    }

    Ok(ResizeOutcome {
        target: client.target(),
        before,
        after,
        applied: !request.dry_run,
    })
}
