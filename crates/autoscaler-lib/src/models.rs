//! Core data models for autoscaler bound updates

use crate::error::PolicyError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Addressing scope of an autoscaler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "scope", content = "location")]
pub enum Locality {
    /// Regional autoscaler, spanning every zone of the region
    Regional(String),
    /// Zonal autoscaler, pinned to a single zone
    Zonal(String),
}

impl Locality {
    /// Pick the locality from the caller-supplied region and zone.
    ///
    /// A non-empty region wins over the zone; both empty is an error.
    pub fn resolve(region: &str, zone: &str) -> Result<Self, PolicyError> {
        if !region.is_empty() {
            Ok(Locality::Regional(region.to_string()))
        } else if !zone.is_empty() {
            Ok(Locality::Zonal(zone.to_string()))
        } else {
            Err(PolicyError::MissingLocality)
        }
    }

    /// Region or zone name
    pub fn name(&self) -> &str {
        match self {
            Locality::Regional(region) => region,
            Locality::Zonal(zone) => zone,
        }
    }

    /// Collection segment used in resource paths
    pub fn collection(&self) -> &'static str {
        match self {
            Locality::Regional(_) => "regions",
            Locality::Zonal(_) => "zones",
        }
    }
}

/// Identity of an autoscaler: project, locality and name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoscalerTarget {
    pub project: String,
    pub locality: Locality,
    pub name: String,
}

impl fmt::Display for AutoscalerTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/{}/{}/autoscalers/{}",
            self.project,
            self.locality.collection(),
            self.locality.name(),
            self.name
        )
    }
}

/// Autoscaler resource as returned by the Compute Engine API.
///
/// Only the fields this tool touches are typed. Everything else is kept in
/// `extra` and sent back untouched on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Autoscaler {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub autoscaling_policy: AutoscalingPolicy,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Scaling policy attached to an autoscaler
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoscalingPolicy {
    #[serde(default)]
    pub min_num_replicas: i64,
    #[serde(default)]
    pub max_num_replicas: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AutoscalingPolicy {
    /// Snapshot of the replica bounds
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: self.min_num_replicas,
            max: self.max_num_replicas,
        }
    }
}

/// Long-running operation returned by an update call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub operation_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_link: Option<String>,
}

/// Replica bounds of a policy at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,
}

/// Caller-supplied bounds; `0` means "leave unchanged"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsRequest {
    pub min: i64,
    pub max: i64,
}

/// How merged bounds are checked before being written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Write whatever the merge produced, including negative or inverted bounds
    #[default]
    Compatible,
    /// Reject `min < 0`, `max < 1` and `min > max` before writing
    Strict,
}

/// Everything a single invocation needs, built once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeRequest {
    pub project: String,
    /// Region name, empty when unset
    pub region: String,
    /// Zone name, empty when unset
    pub zone: String,
    /// Managed instance group name, also the autoscaler name
    pub mig: String,
    pub bounds: BoundsRequest,
    pub mode: MergeMode,
    pub dry_run: bool,
}
