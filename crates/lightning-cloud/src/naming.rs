//! Cluster name validation

use crate::error::{ClusterError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Accepted cluster names: lowercase DNS label, 2 to 64 characters
pub const CLUSTER_NAME_PATTERN: &str = "^[a-z0-9][-a-z0-9]{0,62}[a-z0-9]$";

fn cluster_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CLUSTER_NAME_PATTERN).expect("cluster name pattern is valid"))
}

/// Check whether `name` is acceptable as a cluster name
pub fn is_valid_cluster_name(name: &str) -> bool {
    cluster_name_regex().is_match(name)
}

/// Validate a cluster name, naming the pattern on failure
pub fn validate_cluster_name(name: &str) -> Result<()> {
    if is_valid_cluster_name(name) {
        Ok(())
    } else {
        Err(ClusterError::InvalidName {
            name: name.to_string(),
            pattern: CLUSTER_NAME_PATTERN.to_string(),
        })
    }
}
