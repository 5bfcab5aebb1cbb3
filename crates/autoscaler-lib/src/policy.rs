//! Scope resolution and policy client for regional and zonal autoscalers
//!
//! [`PolicyClient::create`] decides from the supplied region/zone which
//! flavour of autoscaler is addressed, fetches it once, and returns a handle
//! that merges new bounds in memory and writes the policy back through the
//! matching update endpoint.
//!
//! The fetch and the update are independent calls; a change made to the
//! autoscaler by someone else in between is overwritten (last write wins).
//! The autoscaler resource exposes no fingerprint for a conditional update.

use crate::compute::ComputeApi;
use crate::context::RequestContext;
use crate::error::PolicyError;
use crate::models::{Autoscaler, AutoscalerTarget, AutoscalingPolicy, Bounds, Locality, MergeMode};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Apply caller-supplied bounds to a policy.
///
/// `min` is applied only when positive, `max` whenever it is non-zero
/// (negative values included). No ordering check is made between the two.
pub fn merge_bounds(policy: &mut AutoscalingPolicy, max: i64, min: i64) {
    if min > 0 {
        policy.min_num_replicas = min;
    }
    if max != 0 {
        policy.max_num_replicas = max;
    }
}

/// Check merged bounds against `mode`
pub fn validate_bounds(policy: &AutoscalingPolicy, mode: MergeMode) -> Result<(), PolicyError> {
    let Bounds { min, max } = policy.bounds();
    match mode {
        MergeMode::Compatible => Ok(()),
        MergeMode::Strict if min < 0 || max < 1 || min > max => {
            warn!(min, max, "Rejecting invalid replica bounds");
            Err(PolicyError::InvalidBounds { min, max })
        }
        MergeMode::Strict => Ok(()),
    }
}

/// Autoscaler addressed by region
pub struct RegionalPolicyClient {
    api: Arc<dyn ComputeApi>,
    project: String,
    region: String,
    name: String,
    autoscaler: Autoscaler,
}

/// Autoscaler addressed by zone
pub struct ZonalPolicyClient {
    api: Arc<dyn ComputeApi>,
    project: String,
    zone: String,
    name: String,
    autoscaler: Autoscaler,
}

impl RegionalPolicyClient {
    async fn update(&self, ctx: &RequestContext) -> Result<(), PolicyError> {
        let operation = ctx
            .run(async {
                self.api
                    .update_region_autoscaler(&self.project, &self.region, &self.name, &self.autoscaler)
                    .await
                    .map_err(PolicyError::Update)
            })
            .await?;
        info!(operation = %operation.name, status = %operation.status, "Regional autoscaler update accepted");
        Ok(())
    }
}

impl ZonalPolicyClient {
    async fn update(&self, ctx: &RequestContext) -> Result<(), PolicyError> {
        let operation = ctx
            .run(async {
                self.api
                    .update_zone_autoscaler(&self.project, &self.zone, &self.name, &self.autoscaler)
                    .await
                    .map_err(PolicyError::Update)
            })
            .await?;
        info!(operation = %operation.name, status = %operation.status, "Zonal autoscaler update accepted");
        Ok(())
    }
}

/// Handle over a fetched autoscaler policy, regional or zonal
pub enum PolicyClient {
    Regional(RegionalPolicyClient),
    Zonal(ZonalPolicyClient),
}

impl PolicyClient {
    /// Resolve the locality and fetch the current autoscaler.
    ///
    /// A non-empty `region` selects the regional endpoint, otherwise a
    /// non-empty `zone` selects the zonal one. With neither set no call is
    /// made and [`PolicyError::MissingLocality`] is returned.
    pub async fn create(
        ctx: &RequestContext,
        api: Arc<dyn ComputeApi>,
        project: &str,
        region: &str,
        zone: &str,
        mig: &str,
    ) -> Result<Self, PolicyError> {
        let locality = Locality::resolve(region, zone)?;
        debug!(project, locality = ?locality, mig, "Fetching autoscaler");

        let client = match locality {
            Locality::Regional(region) => {
                let autoscaler = ctx
                    .run(async {
                        api.get_region_autoscaler(project, &region, mig)
                            .await
                            .map_err(PolicyError::NotFoundOrApi)
                    })
                    .await?;
                PolicyClient::Regional(RegionalPolicyClient {
                    api,
                    project: project.to_string(),
                    region,
                    name: mig.to_string(),
                    autoscaler,
                })
            }
            Locality::Zonal(zone) => {
                let autoscaler = ctx
                    .run(async {
                        api.get_zone_autoscaler(project, &zone, mig)
                            .await
                            .map_err(PolicyError::NotFoundOrApi)
                    })
                    .await?;
                PolicyClient::Zonal(ZonalPolicyClient {
                    api,
                    project: project.to_string(),
                    zone,
                    name: mig.to_string(),
                    autoscaler,
                })
            }
        };

        info!(autoscaler = %client.target(), bounds = ?client.bounds(), "Fetched autoscaler");
        Ok(client)
    }

    /// Merge `max` and `min` into the fetched policy, see [`merge_bounds`]
    pub fn merge(&mut self, max: i64, min: i64) {
        merge_bounds(&mut self.autoscaler_mut().autoscaling_policy, max, min);
    }

    /// Check the in-memory policy against `mode`
    pub fn validate(&self, mode: MergeMode) -> Result<(), PolicyError> {
        validate_bounds(&self.autoscaler().autoscaling_policy, mode)
    }

    /// Write the in-memory policy back through the matching endpoint
    pub async fn update(&self, ctx: &RequestContext) -> Result<(), PolicyError> {
        match self {
            PolicyClient::Regional(client) => client.update(ctx).await,
            PolicyClient::Zonal(client) => client.update(ctx).await,
        }
    }

    /// Identity captured at construction
    pub fn target(&self) -> AutoscalerTarget {
        match self {
            PolicyClient::Regional(client) => AutoscalerTarget {
                project: client.project.clone(),
                locality: Locality::Regional(client.region.clone()),
                name: client.name.clone(),
            },
            PolicyClient::Zonal(client) => AutoscalerTarget {
                project: client.project.clone(),
                locality: Locality::Zonal(client.zone.clone()),
                name: client.name.clone(),
            },
        }
    }

    pub fn autoscaler(&self) -> &Autoscaler {
        match self {
            PolicyClient::Regional(client) => &client.autoscaler,
            PolicyClient::Zonal(client) => &client.autoscaler,
        }
    }

    fn autoscaler_mut(&mut self) -> &mut Autoscaler {
        match self {
            PolicyClient::Regional(client) => &mut client.autoscaler,
            PolicyClient::Zonal(client) => &mut client.autoscaler,
        }
    }

    /// Current in-memory bounds
    pub fn bounds(&self) -> Bounds {
        self.autoscaler().autoscaling_policy.bounds()
    }
}
