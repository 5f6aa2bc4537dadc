//! Cluster data model shared by the poller, the lifecycle manager and API clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the control plane when a cluster is created
pub type ClusterId = String;

/// Lifecycle phase of a cluster as reported by the control plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClusterState {
    #[serde(rename = "CLUSTER_STATE_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "CLUSTER_STATE_QUEUED")]
    Queued,
    #[serde(rename = "CLUSTER_STATE_PENDING")]
    Pending,
    #[serde(rename = "CLUSTER_STATE_RUNNING")]
    Running,
    #[serde(rename = "CLUSTER_STATE_FAILED")]
    Failed,
    #[serde(rename = "CLUSTER_STATE_DELETED")]
    Deleted,
    /// Any phase this client does not know about
    #[serde(other)]
    Unknown,
}

impl ClusterState {
    /// Wire name used in query parameters
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            ClusterState::Unspecified => "CLUSTER_STATE_UNSPECIFIED",
            ClusterState::Queued => "CLUSTER_STATE_QUEUED",
            ClusterState::Pending => "CLUSTER_STATE_PENDING",
            ClusterState::Running => "CLUSTER_STATE_RUNNING",
            ClusterState::Failed => "CLUSTER_STATE_FAILED",
            ClusterState::Deleted => "CLUSTER_STATE_DELETED",
            ClusterState::Unknown => "CLUSTER_STATE_UNKNOWN",
        }
    }
}

impl std::fmt::Display for ClusterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClusterState::Unspecified => write!(f, "unspecified"),
            ClusterState::Queued => write!(f, "queued"),
            ClusterState::Pending => write!(f, "pending"),
            ClusterState::Running => write!(f, "running"),
            ClusterState::Failed => write!(f, "failed"),
            ClusterState::Deleted => write!(f, "deleted"),
            ClusterState::Unknown => write!(f, "unknown"),
        }
    }
}

/// Ownership model of a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClusterType {
    #[serde(rename = "GLOBAL")]
    Global,
    #[serde(rename = "BYOC")]
    Byoc,
}

/// Performance profile requested for a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClusterPerformanceProfile {
    #[default]
    #[serde(rename = "DEFAULT")]
    Default,
    #[serde(rename = "COST_SAVING")]
    CostSaving,
}

/// AWS specific driver settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsClusterDriverSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// S3 bucket provisioned by the control plane for the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KubernetesClusterDriver {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<AwsClusterDriverSpec>,
}

/// Provider specific driver attached to a cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterDriver {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<KubernetesClusterDriver>,
}

/// Desired configuration of a cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_type: Option<ClusterType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_profile: Option<ClusterPerformanceProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<ClusterDriver>,
}

impl ClusterSpec {
    /// BYOC spec backed by a customer owned AWS account
    pub fn byoc_aws(
        region: impl Into<String>,
        role_arn: impl Into<String>,
        external_id: impl Into<String>,
    ) -> Self {
        Self {
            cluster_type: Some(ClusterType::Byoc),
            performance_profile: Some(ClusterPerformanceProfile::Default),
            driver: Some(ClusterDriver {
                kubernetes: Some(KubernetesClusterDriver {
                    aws: Some(AwsClusterDriverSpec {
                        region: Some(region.into()),
                        role_arn: Some(role_arn.into()),
                        external_id: Some(external_id.into()),
                        bucket_name: None,
                    }),
                }),
            }),
        }
    }

    /// AWS driver settings, if this is an AWS backed cluster
    pub fn aws(&self) -> Option<&AwsClusterDriverSpec> {
        self.driver
            .as_ref()
            .and_then(|d| d.kubernetes.as_ref())
            .and_then(|k| k.aws.as_ref())
    }

    pub fn bucket_name(&self) -> Option<&str> {
        self.aws().and_then(|a| a.bucket_name.as_deref())
    }

    pub fn region(&self) -> Option<&str> {
        self.aws().and_then(|a| a.region.as_deref())
    }
}

/// Body of a cluster creation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateClusterRequest {
    pub name: String,
    pub spec: ClusterSpec,
}

/// Point-in-time view of a cluster, fetched once per poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSnapshot {
    pub id: ClusterId,
    pub name: String,
    pub state: ClusterState,
    /// Human readable explanation attached to the current state
    pub reason: Option<String>,
    pub driver_spec: ClusterSpec,
    pub created_at: Option<DateTime<Utc>>,
}

impl ClusterSnapshot {
    pub fn new(id: impl Into<String>, name: impl Into<String>, state: ClusterState) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state,
            reason: None,
            driver_spec: ClusterSpec::default(),
            created_at: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_spec(mut self, spec: ClusterSpec) -> Self {
        self.driver_spec = spec;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Name used in user facing messages; falls back to the id
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn bucket_name(&self) -> Option<&str> {
        self.driver_spec.bucket_name()
    }
}
