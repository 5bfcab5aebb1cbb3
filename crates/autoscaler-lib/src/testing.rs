//! Recording in-memory `ComputeApi` for tests

use crate::compute::ComputeApi;
use crate::error::ApiError;
use crate::models::{Autoscaler, AutoscalingPolicy, Operation};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Mutex;

/// Serves one autoscaler and records every call made against it
pub(crate) struct MockCompute {
    min: i64,
    max: i64,
    served_name: Option<String>,
    get_failure: Option<(u16, String)>,
    update_failure: Option<(u16, String)>,
    calls: Mutex<Vec<String>>,
    written: Mutex<Option<Autoscaler>>,
}

impl MockCompute {
    pub(crate) fn new(min: i64, max: i64) -> Self {
        Self {
            min,
            max,
            served_name: None,
            get_failure: None,
            update_failure: None,
            calls: Mutex::new(Vec::new()),
            written: Mutex::new(None),
        }
    }

    /// Serve a resource whose `name` differs from the one requested
    pub(crate) fn serve_name(mut self, name: &str) -> Self {
        self.served_name = Some(name.to_string());
        self
    }

    pub(crate) fn fail_get(mut self, status: u16, body: &str) -> Self {
        self.get_failure = Some((status, body.to_string()));
        self
    }

    pub(crate) fn fail_update(mut self, status: u16, body: &str) -> Self {
        self.update_failure = Some((status, body.to_string()));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn last_written(&self) -> Option<Autoscaler> {
        self.written.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn failure(failure: &Option<(u16, String)>) -> Result<(), ApiError> {
        match failure {
            Some((status, body)) => Err(ApiError::Status {
                status: StatusCode::from_u16(*status).unwrap(),
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }

    fn fetched(&self, name: &str) -> Autoscaler {
        Autoscaler {
            name: self.served_name.clone().unwrap_or_else(|| name.to_string()),
            autoscaling_policy: AutoscalingPolicy {
                min_num_replicas: self.min,
                max_num_replicas: self.max,
                ..AutoscalingPolicy::default()
            },
            ..Autoscaler::default()
        }
    }

    fn accept(&self, autoscaler: &Autoscaler) -> Operation {
        *self.written.lock().unwrap() = Some(autoscaler.clone());
        Operation {
            name: "operation-1".to_string(),
            status: "DONE".to_string(),
            operation_type: "update".to_string(),
            target_link: None,
        }
    }
}

#[async_trait]
impl ComputeApi for MockCompute {
    async fn get_region_autoscaler(
        &self,
        project: &str,
        region: &str,
        name: &str,
    ) -> Result<Autoscaler, ApiError> {
        self.record(format!("get_region {}/{}/{}", project, region, name));
        Self::failure(&self.get_failure)?;
        Ok(self.fetched(name))
    }

    async fn get_zone_autoscaler(
        &self,
        project: &str,
        zone: &str,
        name: &str,
    ) -> Result<Autoscaler, ApiError> {
        self.record(format!("get_zone {}/{}/{}", project, zone, name));
        Self::failure(&self.get_failure)?;
        Ok(self.fetched(name))
    }

    async fn update_region_autoscaler(
        &self,
        project: &str,
        region: &str,
        name: &str,
        autoscaler: &Autoscaler,
    ) -> Result<Operation, ApiError> {
        self.record(format!("update_region {}/{}/{}", project, region, name));
        Self::failure(&self.update_failure)?;
        Ok(self.accept(autoscaler))
    }

    async fn update_zone_autoscaler(
        &self,
        project: &str,
        zone: &str,
        name: &str,
        autoscaler: &Autoscaler,
    ) -> Result<Operation, ApiError> {
        self.record(format!("update_zone {}/{}/{}", project, zone, name));
        Self::failure(&self.update_failure)?;
        Ok(self.accept(autoscaler))
    }
}
