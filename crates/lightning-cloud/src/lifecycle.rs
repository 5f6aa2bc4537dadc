//! Cluster lifecycle orchestration (create / delete / list)

use crate::client::ClusterStateClient;
use crate::error::{ClusterError, Result};
use crate::model::{ClusterId, ClusterSnapshot, ClusterSpec, ClusterState, CreateClusterRequest};
use crate::naming::validate_cluster_name;
use crate::progress::{ProgressEvent, ProgressReporter};
use crate::waiter::{PollConfig, poll_until};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Parameters of a BYOC cluster on AWS
#[derive(Debug, Clone)]
pub struct CreateClusterOptions {
    pub name: String,
    pub region: String,
    pub role_arn: String,
    pub external_id: String,
    /// Return right after the request is accepted instead of waiting
    pub do_async: bool,
}

/// Drives create and delete requests to completion
pub struct ClusterLifecycleManager {
    client: Arc<dyn ClusterStateClient>,
    reporter: Arc<dyn ProgressReporter>,
    poll: PollConfig,
    cancel: CancellationToken,
}

impl ClusterLifecycleManager {
    pub fn new(client: Arc<dyn ClusterStateClient>, reporter: Arc<dyn ProgressReporter>) -> Self {
        Self {
            client,
            reporter,
            poll: PollConfig::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Token that aborts a blocking wait (e.g. on Ctrl-C)
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Create a BYOC cluster and optionally wait until it is running
    pub async fn create(&self, options: &CreateClusterOptions) -> Result<ClusterId> {
        validate_cluster_name(&options.name)?;

        let request = CreateClusterRequest {
            name: options.name.clone(),
            spec: ClusterSpec::byoc_aws(
                options.region.as_str(),
                options.role_arn.as_str(),
                options.external_id.as_str(),
            ),
        };

        let cluster_id = self
            .guarded(&options.name, self.client.create(&request))
            .await?;
        tracing::info!(cluster_id = %cluster_id, name = %options.name, "Cluster creation triggered");

        self.reporter.report(&ProgressEvent::CreationTriggered {
            cluster_id: cluster_id.clone(),
        });

        self.settle(&cluster_id, ClusterState::Running, options.do_async, None)
            .await?;
        Ok(cluster_id)
    }

    /// Delete a cluster and optionally wait until it is gone
    ///
    /// The S3 bucket of the cluster is never deleted. Its name is read before
    /// the delete call so that it can be reported afterwards.
    pub async fn delete(&self, cluster_id: &str, force: bool, do_async: bool) -> Result<()> {
        let current = self.guarded(cluster_id, self.client.get(cluster_id)).await?;
        let bucket_name = current.bucket_name().map(str::to_string);

        self.guarded(cluster_id, self.client.delete(cluster_id, force))
            .await?;
        tracing::info!(cluster_id, force, "Cluster deletion triggered");

        self.reporter.report(&ProgressEvent::DeletionTriggered {
            bucket_name: bucket_name.clone(),
        });

        self.settle(
            cluster_id,
            ClusterState::Deleted,
            do_async,
            bucket_name.as_deref(),
        )
        .await
    }

    /// Clusters that have not been deleted
    pub async fn list(&self) -> Result<Vec<ClusterSnapshot>> {
        let clusters = self
            .guarded("", self.client.list(&[ClusterState::Deleted]))
            .await?;
        Ok(clusters
            .into_iter()
            .filter(|c| c.state != ClusterState::Deleted)
            .collect())
    }

    /// Wait for `target` unless the caller asked to run in the background
    ///
    /// A cancelled wait leaves the operation running remotely, so it is
    /// reported the same way as an explicit background request.
    async fn settle(
        &self,
        cluster_id: &str,
        target: ClusterState,
        do_async: bool,
        known_bucket: Option<&str>,
    ) -> Result<()> {
        if !do_async {
            match poll_until(
                self.client.as_ref(),
                cluster_id,
                target,
                &self.poll,
                self.reporter.as_ref(),
                &self.cancel,
                known_bucket,
            )
            .await
            {
                Ok(_) => return Ok(()),
                Err(ClusterError::Cancelled(_)) => {
                    tracing::debug!(cluster_id, "Stopped waiting, operation continues remotely");
                }
                Err(e) => return Err(e),
            }
        }

        self.reporter.report(&ProgressEvent::Background { target });
        Ok(())
    }

    /// Run a client call unless the caller aborted before or during it
    ///
    /// Nothing is reported on abort: the request may not have been sent.
    async fn guarded<T>(
        &self,
        cluster_id: &str,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        if self.cancel.is_cancelled() {
            return Err(ClusterError::Cancelled(cluster_id.to_string()));
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!(cluster_id, "Aborted before the request completed");
                Err(ClusterError::Cancelled(cluster_id.to_string()))
            }
            result = call => result,
        }
    }
}
