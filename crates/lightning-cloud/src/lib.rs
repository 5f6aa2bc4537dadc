//! Lightning BYOC cluster lifecycle
//!
//! This crate holds the reconciliation core of the `lightning` CLI: after a
//! create or delete request is accepted by the control plane, it polls the
//! cluster until it settles, reports progress, and enforces a timeout.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  lightning CLI                   │
//! │        (create / delete / list clusters)         │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                lightning-cloud                   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │        ClusterLifecycleManager            │   │
//! │  └──────────────┬───────────────────────────┘   │
//! │  ┌──────────────▼──────┐  ┌────────────────┐    │
//! │  │ wait_for_cluster_   │─▶│ProgressReporter│    │
//! │  │ state (poller)      │  └────────────────┘    │
//! │  └──────────────┬──────┘                        │
//! └─────────────────┼───────────────────────────────┘
//!                   │ trait ClusterStateClient
//! ┌─────────────────▼───────────────────────────────┐
//! │              lightning-cloud-api                 │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod naming;
pub mod progress;
pub mod waiter;

// Re-exports
pub use client::ClusterStateClient;
pub use error::{ClusterError, Result};
pub use lifecycle::{ClusterLifecycleManager, CreateClusterOptions};
pub use model::{
    AwsClusterDriverSpec, ClusterDriver, ClusterId, ClusterPerformanceProfile, ClusterSnapshot,
    ClusterSpec, ClusterState, ClusterType, CreateClusterRequest, KubernetesClusterDriver,
};
pub use naming::{CLUSTER_NAME_PATTERN, is_valid_cluster_name, validate_cluster_name};
pub use progress::{ConsoleReporter, ProgressEvent, ProgressReporter, RecordingReporter};
pub use waiter::{
    DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT, MIN_POLL_INTERVAL, PollConfig,
    wait_for_cluster_state,
};

pub use tokio_util::sync::CancellationToken;
