//! JSON bodies exchanged with the cluster service

use chrono::{DateTime, Utc};
use lightning_cloud::{ClusterSnapshot, ClusterSpec, ClusterState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterStatus {
    #[serde(default = "unspecified")]
    pub phase: ClusterState,
    #[serde(default)]
    pub reason: Option<String>,
}

fn unspecified() -> ClusterState {
    ClusterState::Unspecified
}

impl Default for ClusterStatus {
    fn default() -> Self {
        Self {
            phase: ClusterState::Unspecified,
            reason: None,
        }
    }
}

/// A cluster as returned by `GET /v1/core/clusters/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub spec: Option<ClusterSpec>,
    #[serde(default)]
    pub status: Option<ClusterStatus>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ClusterResponse> for ClusterSnapshot {
    fn from(resp: ClusterResponse) -> Self {
        let status = resp.status.unwrap_or_default();
        Self {
            id: resp.id,
            name: resp.name,
            state: status.phase,
            reason: status.reason.filter(|r| !r.is_empty()),
            driver_spec: resp.spec.unwrap_or_default(),
            created_at: resp.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListClustersResponse {
    #[serde(default)]
    pub clusters: Vec<ClusterResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClusterResponse {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_response_to_snapshot() {
        let json = r#"{
            "id": "c-123",
            "name": "test-cluster",
            "createdAt": "2024-03-01T12:00:00Z",
            "spec": {
                "clusterType": "BYOC",
                "driver": {"kubernetes": {"aws": {"region": "us-west-2", "bucketName": "test-bucket"}}}
            },
            "status": {"phase": "CLUSTER_STATE_FAILED", "reason": "quota exceeded"}
        }"#;

        let resp: ClusterResponse = serde_json::from_str(json).unwrap();
        let snapshot = ClusterSnapshot::from(resp);

        assert_eq!(snapshot.id, "c-123");
        assert_eq!(snapshot.state, ClusterState::Failed);
        assert_eq!(snapshot.reason.as_deref(), Some("quota exceeded"));
        assert_eq!(snapshot.bucket_name(), Some("test-bucket"));
        assert_eq!(snapshot.driver_spec.region(), Some("us-west-2"));
        assert!(snapshot.created_at.is_some());
    }

    #[test]
    fn test_missing_status_is_unspecified() {
        let resp: ClusterResponse = serde_json::from_str(r#"{"id": "c-1"}"#).unwrap();
        let snapshot = ClusterSnapshot::from(resp);

        assert_eq!(snapshot.state, ClusterState::Unspecified);
        assert_eq!(snapshot.reason, None);
        assert_eq!(snapshot.bucket_name(), None);
    }

    #[test]
    fn test_empty_reason_is_dropped() {
        let resp: ClusterResponse = serde_json::from_str(
            r#"{"id": "c-1", "status": {"phase": "CLUSTER_STATE_PENDING", "reason": ""}}"#,
        )
        .unwrap();

        assert_eq!(ClusterSnapshot::from(resp).reason, None);
    }

    #[test]
    fn test_list_response() {
        let resp: ListClustersResponse = serde_json::from_str(
            r#"{"clusters": [
                {"id": "c-1", "status": {"phase": "CLUSTER_STATE_RUNNING"}},
                {"id": "c-2", "status": {"phase": "CLUSTER_STATE_QUEUED"}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(resp.clusters.len(), 2);
        assert_eq!(
            resp.clusters[1].status.as_ref().map(|s| s.phase),
            Some(ClusterState::Queued)
        );

        let empty: ListClustersResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.clusters.is_empty());
    }
}
