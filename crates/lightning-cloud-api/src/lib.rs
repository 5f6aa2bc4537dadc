//! Lightning cluster API client
//!
//! Implements [`lightning_cloud::ClusterStateClient`] against the
//! `/v1/core/clusters` REST endpoints of the control plane.

pub mod client;
pub mod error;
pub mod wire;

pub use client::{ApiConfig, DEFAULT_REQUEST_TIMEOUT, LightningClusterApi, phase_not_in_query};
pub use error::{ApiError, Result};
pub use wire::{ClusterResponse, ClusterStatus, CreateClusterResponse, ListClustersResponse};
