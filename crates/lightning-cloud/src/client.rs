//! Control plane client trait

use crate::error::Result;
use crate::model::{ClusterId, ClusterSnapshot, ClusterState, CreateClusterRequest};
use async_trait::async_trait;

/// Cluster management API of the control plane
///
/// The reconciliation loop only ever talks to the control plane through this
/// trait, so tests can substitute an in-memory fake. Implementations own their
/// transport, authentication and retry behaviour.
#[async_trait]
pub trait ClusterStateClient: Send + Sync {
    /// Fetch the current state of a cluster
    ///
    /// Fails with [`ClusterError::NotFound`](crate::ClusterError::NotFound)
    /// when the id is unknown to the control plane.
    async fn get(&self, id: &str) -> Result<ClusterSnapshot>;

    /// Request creation of a new cluster and return its id
    async fn create(&self, request: &CreateClusterRequest) -> Result<ClusterId>;

    /// Request deletion of a cluster
    async fn delete(&self, id: &str, force: bool) -> Result<()>;

    /// List clusters whose phase is not in `exclude_phases`
    async fn list(&self, exclude_phases: &[ClusterState]) -> Result<Vec<ClusterSnapshot>>;
}
