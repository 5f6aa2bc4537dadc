//! Cluster state poller
//!
//! Polls the control plane until a cluster reaches the requested state, the
//! deadline passes, or the caller cancels. A `FAILED` phase is reported but
//! never ends the wait on its own; only the timeout does.

use crate::client::ClusterStateClient;
use crate::error::{ClusterError, Result};
use crate::model::{ClusterSnapshot, ClusterState};
use crate::progress::{ProgressEvent, ProgressReporter};
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;

/// Default upper bound for a create or delete to settle
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(5400);

/// Default delay between two polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Shortest delay between two polls; smaller intervals are raised to it
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Timing of a poll session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Wall clock budget measured from the start of the session
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl PollConfig {
    /// `poll_interval` is raised to [`MIN_POLL_INTERVAL`] if shorter
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Mutable state of one `wait_for_cluster_state` call
struct PollSession {
    target: ClusterState,
    started_at: Instant,
    deadline: Instant,
    poll_interval: Duration,
    previous: Option<(ClusterState, Option<String>)>,
}

impl PollSession {
    fn start(target: ClusterState, config: &PollConfig) -> Self {
        let started_at = Instant::now();
        Self {
            target,
            started_at,
            deadline: started_at + config.timeout,
            poll_interval: config.poll_interval.max(MIN_POLL_INTERVAL),
            previous: None,
        }
    }

    fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Sleep until the next poll, never past the deadline
    fn next_delay(&self) -> Duration {
        self.poll_interval
            .min(self.deadline.saturating_duration_since(Instant::now()))
    }

    /// A failure is only new when (state, reason) changed since the last poll
    fn is_new_failure(&self, snapshot: &ClusterSnapshot) -> bool {
        snapshot.state == ClusterState::Failed
            && self.previous.as_ref()
                != Some(&(snapshot.state, snapshot.reason.clone()))
    }

    fn observe(&mut self, snapshot: &ClusterSnapshot) {
        self.previous = Some((snapshot.state, snapshot.reason.clone()));
    }
}

/// Block until `cluster_id` reaches `target`
///
/// # Returns
/// * `Ok(snapshot)` - the first snapshot observed in the target state
/// * `Err(ClusterError::Timeout)` - the deadline passed first
/// * `Err(ClusterError::Cancelled)` - `cancel` fired; nothing else is reported
/// * any error returned by [`ClusterStateClient::get`]
pub async fn wait_for_cluster_state(
    client: &dyn ClusterStateClient,
    cluster_id: &str,
    target: ClusterState,
    config: &PollConfig,
    reporter: &dyn ProgressReporter,
    cancel: &CancellationToken,
) -> Result<ClusterSnapshot> {
    poll_until(client, cluster_id, target, config, reporter, cancel, None).await
}

/// Same as [`wait_for_cluster_state`], with the bucket name already known
/// from an earlier fetch. A terminal snapshot without a driver spec then
/// still reports the retained bucket.
pub(crate) async fn poll_until(
    client: &dyn ClusterStateClient,
    cluster_id: &str,
    target: ClusterState,
    config: &PollConfig,
    reporter: &dyn ProgressReporter,
    cancel: &CancellationToken,
    known_bucket: Option<&str>,
) -> Result<ClusterSnapshot> {
    if cancel.is_cancelled() {
        return Err(ClusterError::Cancelled(cluster_id.to_string()));
    }

    let mut session = PollSession::start(target, config);
    reporter.report(&ProgressEvent::Waiting { target });

    let mut first_poll = true;
    loop {
        if cancel.is_cancelled() {
            return Err(ClusterError::Cancelled(cluster_id.to_string()));
        }
        if !first_poll && session.is_expired() {
            tracing::debug!(cluster_id, %target, "Timed out waiting for cluster");
            return Err(ClusterError::Timeout {
                cluster_id: cluster_id.to_string(),
                state: target,
                timeout: config.timeout,
            });
        }
        first_poll = false;

        let snapshot = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(ClusterError::Cancelled(cluster_id.to_string()));
            }
            snapshot = client.get(cluster_id) => snapshot?,
        };
        tracing::debug!(
            cluster_id,
            state = %snapshot.state,
            reason = snapshot.reason.as_deref().unwrap_or(""),
            "Polled cluster"
        );

        if snapshot.state == session.target {
            let bucket_name = snapshot
                .bucket_name()
                .or(known_bucket)
                .map(str::to_string);
            reporter.report(&ProgressEvent::Reached {
                target,
                snapshot: snapshot.clone(),
                bucket_name,
            });
            return Ok(snapshot);
        }

        if session.is_new_failure(&snapshot) {
            let reason = snapshot.reason.clone().unwrap_or_default();
            tracing::warn!(cluster_id, reason = %reason, "Cluster reported a failure");
            reporter.report(&ProgressEvent::FailureDetected {
                name: snapshot.display_name().to_string(),
                reason,
            });
        } else {
            reporter.report(&ProgressEvent::Heartbeat {
                name: snapshot.display_name().to_string(),
                target,
                elapsed: session.elapsed(),
            });
        }
        session.observe(&snapshot);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(cluster_id, "Wait cancelled");
                return Err(ClusterError::Cancelled(cluster_id.to_string()));
            }
            _ = sleep(session.next_delay()) => {}
        }
    }
}
