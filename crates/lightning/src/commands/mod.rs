pub mod create;
pub mod delete;
pub mod list;

use clap::Args;
use lightning_cloud::{
    CancellationToken, ClusterLifecycleManager, ConsoleReporter, PollConfig,
};
use lightning_cloud_api::{ApiConfig, LightningClusterApi};
use lightning_config::Settings;
use std::sync::Arc;
use std::time::Duration;

/// Options controlling how long a blocking command waits
#[derive(Args, Debug, Clone, Default)]
pub struct WaitArgs {
    /// Seconds to wait for the cluster to settle
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
    /// Seconds between status checks (at least 1)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval: Option<u64>,
}

impl WaitArgs {
    /// Command line values win over the settings file
    pub fn poll_config(&self, settings: &Settings) -> PollConfig {
        PollConfig::new(
            self.timeout
                .map(Duration::from_secs)
                .unwrap_or_else(|| settings.wait_timeout()),
            self.poll_interval
                .map(Duration::from_secs)
                .unwrap_or_else(|| settings.poll_interval()),
        )
    }
}

pub fn cluster_api(settings: &Settings) -> anyhow::Result<LightningClusterApi> {
    let mut config = ApiConfig::new(settings.cloud_url.as_str());
    match (&settings.user_id, &settings.api_key) {
        (Some(user_id), Some(api_key)) => {
            config = config.with_credentials(user_id.as_str(), api_key.as_str());
        }
        _ => tracing::debug!("No credentials configured, sending anonymous requests"),
    }
    Ok(LightningClusterApi::new(config)?)
}

pub fn lifecycle_manager(
    settings: &Settings,
    wait: &WaitArgs,
    cancel: CancellationToken,
) -> anyhow::Result<ClusterLifecycleManager> {
    Ok(
        ClusterLifecycleManager::new(Arc::new(cluster_api(settings)?), Arc::new(ConsoleReporter))
            .with_poll_config(wait.poll_config(settings))
            .with_cancellation(cancel),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_config_defaults_from_settings() {
        let settings = Settings::default();
        let config = WaitArgs::default().poll_config(&settings);

        assert_eq!(config.timeout, Duration::from_secs(5400));
        assert_eq!(config.poll_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_poll_config_flags_override_settings() {
        let settings = Settings {
            wait_timeout_secs: 60,
            ..Settings::default()
        };
        let wait = WaitArgs {
            timeout: Some(30),
            poll_interval: Some(2),
        };
        let config = wait.poll_config(&settings);

        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.poll_interval, Duration::from_secs(2));
    }

    #[test]
    fn test_cluster_api_uses_settings_url() {
        let settings = Settings {
            cloud_url: "http://localhost:8080/".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            cluster_api(&settings).unwrap().base_url(),
            "http://localhost:8080"
        );
    }
}
