//! Lightning cluster API client
//!
//! Talks to the control plane over HTTPS with basic authentication
//! (user id + API key).

use crate::error::{ApiError, Result};
use crate::wire::{ClusterResponse, CreateClusterResponse, ListClustersResponse};
use async_trait::async_trait;
use lightning_cloud::{
    ClusterId, ClusterSnapshot, ClusterState, ClusterStateClient, CreateClusterRequest,
};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const CLUSTERS_PATH: &str = "/v1/core/clusters";

/// Upper bound for a single HTTP request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the cluster API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_id: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_id: None,
            api_key: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_credentials(mut self, user_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self.api_key = Some(api_key.into());
        self
    }
}

/// HTTP implementation of [`ClusterStateClient`]
pub struct LightningClusterApi {
    client: reqwest::Client,
    base_url: String,
    user_id: Option<String>,
    api_key: Option<String>,
}

impl LightningClusterApi {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_id: config.user_id,
            api_key: config.api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the cluster collection, or of one cluster when `id` is given
    pub fn clusters_url(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{}{}/{}", self.base_url, CLUSTERS_PATH, id),
            None => format!("{}{}", self.base_url, CLUSTERS_PATH),
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.user_id {
            Some(user_id) => builder.basic_auth(user_id, self.api_key.as_deref()),
            None => builder,
        }
    }

    async fn fetch_cluster(&self, id: &str) -> Result<ClusterResponse> {
        let response = self
            .request(Method::GET, &self.clusters_url(Some(id)))
            .send()
            .await?;
        json_body(check_status(response, id).await?).await
    }

    async fn create_cluster(&self, request: &CreateClusterRequest) -> Result<String> {
        let response = self
            .request(Method::POST, &self.clusters_url(None))
            .json(request)
            .send()
            .await?;
        let created: CreateClusterResponse =
            json_body(check_status(response, &request.name).await?).await?;
        Ok(created.id)
    }

    async fn delete_cluster(&self, id: &str, force: bool) -> Result<()> {
        let response = self
            .request(Method::DELETE, &self.clusters_url(Some(id)))
            .query(&[("force", force)])
            .send()
            .await?;
        check_status(response, id).await?;
        Ok(())
    }

    async fn list_clusters(&self, exclude_phases: &[ClusterState]) -> Result<Vec<ClusterResponse>> {
        let query = phase_not_in_query(exclude_phases);
        let response = self
            .request(Method::GET, &self.clusters_url(None))
            .query(&query)
            .send()
            .await?;
        let list: ListClustersResponse = json_body(check_status(response, "").await?).await?;
        Ok(list.clusters)
    }
}

/// `phaseNotIn` query pairs, one per excluded phase
pub fn phase_not_in_query(exclude_phases: &[ClusterState]) -> Vec<(&'static str, &'static str)> {
    exclude_phases
        .iter()
        .map(|phase| ("phaseNotIn", phase.as_wire_str()))
        .collect()
}

async fn check_status(response: Response, id: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, id, body))
}

fn status_error(status: StatusCode, id: &str, body: String) -> ApiError {
    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound(id.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized {
            status: status.as_u16(),
            body,
        },
        _ => ApiError::Status {
            status: status.as_u16(),
            body,
        },
    }
}

async fn json_body<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl ClusterStateClient for LightningClusterApi {
    async fn get(&self, id: &str) -> lightning_cloud::Result<ClusterSnapshot> {
        let cluster = self.fetch_cluster(id).await?;
        Ok(cluster.into())
    }

    async fn create(&self, request: &CreateClusterRequest) -> lightning_cloud::Result<ClusterId> {
        tracing::debug!(name = %request.name, "POST {}", self.clusters_url(None));
        Ok(self.create_cluster(request).await?)
    }

    async fn delete(&self, id: &str, force: bool) -> lightning_cloud::Result<()> {
        tracing::debug!(cluster_id = %id, force, "DELETE {}", self.clusters_url(Some(id)));
        Ok(self.delete_cluster(id, force).await?)
    }

    async fn list(
        &self,
        exclude_phases: &[ClusterState],
    ) -> lightning_cloud::Result<Vec<ClusterSnapshot>> {
        let clusters = self.list_clusters(exclude_phases).await?;
        Ok(clusters.into_iter().map(ClusterSnapshot::from).collect())
    }
}
