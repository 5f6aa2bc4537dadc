//! Cluster lifecycle error types

use crate::model::ClusterState;
use std::time::Duration;
use thiserror::Error;

/// Cluster lifecycle errors
#[derive(Error, Debug)]
pub enum ClusterError {
    #[error(
        "cluster name doesn't match regex pattern {pattern}\n\
        Allowed characters are lowercase a-z, 0-9 and '-'.\n\
        The name must start and end with an alphanumeric character and be at most 64 characters long."
    )]
    InvalidName { name: String, pattern: String },

    #[error("Cluster not found: {0}")]
    NotFound(String),

    #[error("API error: {0}")]
    Api(String),

    #[error(
        "The cluster has not entered the {state} state within {}s.\n\n\
        The cluster may eventually be {state} afterwards, please check its status using:\n    \
        lightning list clusters\n\n\
        To view cluster logs use:\n    \
        lightning show cluster logs {cluster_id}\n\n\
        Contact support@lightning.ai for additional help\n",
        .timeout.as_secs_f64()
    )]
    Timeout {
        cluster_id: String,
        state: ClusterState,
        timeout: Duration,
    },

    #[error("Operation on cluster {0} was cancelled")]
    Cancelled(String),
}

impl ClusterError {
    /// Whether the error is a caller-initiated abort rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClusterError::Cancelled(_))
    }
}

pub type Result<T> = std::result::Result<T, ClusterError>;
