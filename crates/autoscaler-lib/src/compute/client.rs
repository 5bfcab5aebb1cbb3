//! REST client for the Compute Engine v1 autoscaler endpoints

use super::{ComputeApi, Credentials};
use crate::error::ApiError;
use crate::models::{Autoscaler, Locality, Operation};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;
use url::Url;

/// Public Compute Engine v1 endpoint
pub const DEFAULT_BASE_URL: &str = "https://compute.googleapis.com/compute/v1/";

/// Configuration for the REST client
#[derive(Debug, Clone)]
pub struct ComputeConfig {
    /// API base URL; resource paths are appended to it
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    pub credentials: Credentials,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            credentials: Credentials::default(),
        }
    }
}

/// Compute Engine API client
pub struct ComputeClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
    token: OnceCell<String>,
}

impl ComputeClient {
    /// Create a new client
    pub fn new(config: ComputeConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let base_url = Url::parse(&config.base_url)?;

        Ok(Self {
            client,
            base_url,
            credentials: config.credentials,
            token: OnceCell::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Token source in use
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// URL of the autoscaler collection for a locality, or of one autoscaler in it
    pub fn autoscaler_url(
        &self,
        project: &str,
        locality: &Locality,
        name: Option<&str>,
    ) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?;
            segments.pop_if_empty().extend([
                "projects",
                project,
                locality.collection(),
                locality.name(),
                "autoscalers",
            ]);
            if let Some(name) = name {
                segments.push(name);
            }
        }
        Ok(url)
    }

    async fn bearer_token(&self) -> Result<&str, ApiError> {
        let token = self
            .token
            .get_or_try_init(|| self.credentials.access_token())
            .await?;
        Ok(token.as_str())
    }

    /// Send a request and decode the JSON reply
    async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        debug!(method = %method, url = %url, "Calling Compute Engine API");

        let token = self.bearer_token().await?;
        let mut request = self.client.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn get_autoscaler(&self, project: &str, locality: Locality, name: &str) -> Result<Autoscaler, ApiError> {
        let url = self.autoscaler_url(project, &locality, Some(name))?;
        self.send::<Autoscaler, ()>(Method::GET, url, None).await
    }

    /// PUT to the collection; the `autoscaler` query parameter selects the target
    async fn update_autoscaler(
        &self,
        project: &str,
        locality: Locality,
        name: &str,
        autoscaler: &Autoscaler,
    ) -> Result<Operation, ApiError> {
        let mut url = self.autoscaler_url(project, &locality, None)?;
        url.query_pairs_mut().append_pair("autoscaler", name);
        self.send(Method::PUT, url, Some(autoscaler)).await
    }
}

#[async_trait]
impl ComputeApi for ComputeClient {
    async fn get_region_autoscaler(
        &self,
        project: &str,
        region: &str,
        name: &str,
    ) -> Result<Autoscaler, ApiError> {
        self.get_autoscaler(project, Locality::Regional(region.to_string()), name)
            .await
    }

    async fn get_zone_autoscaler(
        &self,
        project: &str,
        zone: &str,
        name: &str,
    ) -> Result<Autoscaler, ApiError> {
        self.get_autoscaler(project, Locality::Zonal(zone.to_string()), name)
            .await
    }

    async fn update_region_autoscaler(
        &self,
        project: &str,
        region: &str,
        name: &str,
        autoscaler: &Autoscaler,
    ) -> Result<Operation, ApiError> {
        self.update_autoscaler(project, Locality::Regional(region.to_string()), name, autoscaler)
            .await
    }

    async fn update_zone_autoscaler(
        &self,
        project: &str,
        zone: &str,
        name: &str,
        autoscaler: &Autoscaler,
    ) -> Result<Operation, ApiError> {
        self.update_autoscaler(project, Locality::Zonal(zone.to_string()), name, autoscaler)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> ComputeClient {
        ComputeClient::new(ComputeConfig {
            base_url: server.url(),
            request_timeout: Duration::from_secs(5),
            credentials: Credentials::AccessToken("test-token".to_string()),
        })
        .unwrap()
    }

    #[test]
    fn test_autoscaler_url_under_default_base() {
        let client = ComputeClient::new(ComputeConfig {
            credentials: Credentials::AccessToken("t".to_string()),
            ..ComputeConfig::default()
        })
        .unwrap();

        let url = client
            .autoscaler_url("demo", &Locality::Regional("asia-northeast1".to_string()), Some("web"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://compute.googleapis.com/compute/v1/projects/demo/regions/asia-northeast1/autoscalers/web"
        );

        let url = client
            .autoscaler_url("demo", &Locality::Zonal("asia-northeast1-a".to_string()), None)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://compute.googleapis.com/compute/v1/projects/demo/zones/asia-northeast1-a/autoscalers"
        );
    }

    #[test]
    fn test_autoscaler_url_escapes_segments() {
        let client = ComputeClient::new(ComputeConfig {
            credentials: Credentials::AccessToken("t".to_string()),
            ..ComputeConfig::default()
        })
        .unwrap();

        let url = client
            .autoscaler_url("demo", &Locality::Zonal("a/b".to_string()), Some("x y"))
            .unwrap();
        assert!(url.path().ends_with("/zones/a%2Fb/autoscalers/x%20y"));
    }

    #[tokio::test]
    async fn test_get_region_autoscaler() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/projects/demo/regions/asia-northeast1/autoscalers/web")
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "name": "web",
                    "autoscalingPolicy": { "minNumReplicas": 1, "maxNumReplicas": 3 }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let autoscaler = client
            .get_region_autoscaler("demo", "asia-northeast1", "web")
            .await
            .unwrap();

        assert_eq!(autoscaler.name, "web");
        assert_eq!(autoscaler.autoscaling_policy.min_num_replicas, 1);
        assert_eq!(autoscaler.autoscaling_policy.max_num_replicas, 3);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_zone_autoscaler_puts_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/projects/demo/zones/asia-northeast1-a/autoscalers")
            .match_query(Matcher::UrlEncoded("autoscaler".into(), "web".into()))
            .match_body(Matcher::PartialJson(json!({
                "name": "web",
                "autoscalingPolicy": { "minNumReplicas": 2, "maxNumReplicas": 20 }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name":"operation-123","status":"RUNNING","operationType":"update"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let mut autoscaler = Autoscaler {
            name: "web".to_string(),
            ..Autoscaler::default()
        };
        autoscaler.autoscaling_policy.min_num_replicas = 2;
        autoscaler.autoscaling_policy.max_num_replicas = 20;

        let operation = client
            .update_zone_autoscaler("demo", "asia-northeast1-a", "web", &autoscaler)
            .await
            .unwrap();

        assert_eq!(operation.name, "operation-123");
        assert_eq!(operation.status, "RUNNING");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_targets_requested_name_not_body_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/projects/demo/regions/r/autoscalers")
            .match_query(Matcher::UrlEncoded("autoscaler".into(), "web-mig".into()))
            .with_status(200)
            .with_body(r#"{"name":"operation-9","status":"DONE"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let autoscaler = Autoscaler {
            name: "web-mig-as".to_string(),
            ..Autoscaler::default()
        };

        client
            .update_region_autoscaler("demo", "r", "web-mig", &autoscaler)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_surfaced_verbatim() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/projects/demo/zones/z/autoscalers/missing")
            .with_status(404)
            .with_body("The resource 'missing' was not found")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .get_zone_autoscaler("demo", "z", "missing")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
        assert!(err.to_string().contains("The resource 'missing' was not found"));
    }

    #[tokio::test]
    async fn test_malformed_reply_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/projects/demo/zones/z/autoscalers/web")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.get_zone_autoscaler("demo", "z", "web").await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }
}
