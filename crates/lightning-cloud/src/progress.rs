//! User facing progress events and the reporters that render them
//!
//! The rendered text of every event is part of the CLI output contract.

use crate::model::{ClusterSnapshot, ClusterState};
use std::sync::Mutex;
use std::time::Duration;

/// A discrete progress notification emitted during a lifecycle operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A poll session started
    Waiting { target: ClusterState },

    /// The cluster is still on its way to the target state
    Heartbeat {
        name: String,
        target: ClusterState,
        elapsed: Duration,
    },

    /// The control plane reported a failure (it retries on its own)
    FailureDetected { name: String, reason: String },

    /// The cluster reached the target state
    ///
    /// `bucket_name` is the storage kept after a delete, taken from the
    /// snapshot or from the fetch made before the delete request.
    Reached {
        target: ClusterState,
        snapshot: ClusterSnapshot,
        bucket_name: Option<String>,
    },

    /// A creation request was accepted
    CreationTriggered { cluster_id: String },

    /// A deletion request was accepted
    DeletionTriggered { bucket_name: Option<String> },

    /// The caller will not wait for the operation to finish
    Background { target: ClusterState },
}

fn transition_verb(target: ClusterState) -> &'static str {
    match target {
        ClusterState::Running => "created",
        ClusterState::Deleted => "deleted",
        _ => "updated",
    }
}

impl std::fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressEvent::Waiting { target } => {
                write!(f, "Waiting for cluster to be {}...", target)
            }
            ProgressEvent::Heartbeat {
                name,
                target,
                elapsed,
            } => write!(
                f,
                "Cluster {} is being {} [elapsed={:02}s]",
                name,
                transition_verb(*target),
                elapsed.as_secs()
            ),
            ProgressEvent::FailureDetected { name, reason } => write!(
                f,
                "The requested cluster operation for cluster {name} has errors:\n\
                {reason}\n\
                \n\
                ---\n\
                We are automatically retrying, and an automated alert has been created\n\
                \n\
                WARNING: Any non-deleted cluster may be using resources.\n\
                To avoid incuring cost on your cloud provider, delete the cluster using the following command:\n    \
                lightning delete cluster {name}\n\
                \n\
                Contact support@lightning.ai for additional help\n"
            ),
            ProgressEvent::Reached {
                target,
                snapshot,
                bucket_name,
            } => {
                let name = snapshot.display_name();
                match target {
                    ClusterState::Running => write!(
                        f,
                        "Cluster {name} is now running and ready to use.\n\
                        To launch an app on this cluster use: lightning run app app.py --cloud --cluster-id {name}\n"
                    ),
                    ClusterState::Deleted => {
                        write!(
                            f,
                            "Cluster {name} has been successfully deleted, and almost all AWS resources have been removed\n"
                        )?;
                        if let Some(bucket) = bucket_name {
                            write!(
                                f,
                                "\n\
                                For safety purposes we kept the S3 bucket associated with the cluster: {bucket}\n\
                                \n\
                                You may want to delete it manually using the AWS CLI:\n    \
                                aws s3 rb --force s3://{bucket}\n"
                            )?;
                        }
                        Ok(())
                    }
                    other => writeln!(f, "Cluster {name} is now {other}."),
                }
            }
            ProgressEvent::CreationTriggered { cluster_id } => write!(
                f,
                "BYOC cluster creation triggered successfully!\n\
                This can take up to an hour to complete.\n\
                \n\
                To view the status of your clusters use:\n    \
                lightning list clusters\n\
                \n\
                To view cluster logs use:\n    \
                lightning show cluster logs {cluster_id}\n\
                \n\
                To delete the cluster run:\n    \
                lightning delete cluster {cluster_id}\n"
            ),
            ProgressEvent::DeletionTriggered { bucket_name } => {
                writeln!(f, "Cluster deletion triggered successfully")?;
                if let Some(bucket) = bucket_name {
                    write!(
                        f,
                        "\n\
                        For safety purposes we will not delete anything in the S3 bucket associated with the cluster:\n    \
                        {bucket}\n\
                        \n\
                        You may want to delete it manually using the AWS CLI:\n    \
                        aws s3 rb --force s3://{bucket}\n"
                    )?;
                }
                Ok(())
            }
            ProgressEvent::Background { target } => match target {
                ClusterState::Running => write!(f, "\nCluster will be created in the background!"),
                ClusterState::Deleted => write!(f, "\nCluster will be deleted in the background!"),
                other => write!(f, "\nCluster will become {} in the background!", other),
            },
        }
    }
}

/// Sink for progress events
///
/// The core never reads anything back from a reporter.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: &ProgressEvent);
}

/// Prints every event on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn report(&self, event: &ProgressEvent) {
        println!("{}", event);
    }
}

/// Keeps every event in memory, in emission order
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Rendered text of every event
    pub fn messages(&self) -> Vec<String> {
        self.events().iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&self, event: &ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
