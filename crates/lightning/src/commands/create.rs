use lightning_cloud::{CancellationToken, CreateClusterOptions};
use lightning_config::Settings;

pub async fn handle(
    settings: &Settings,
    wait: &super::WaitArgs,
    cancel: CancellationToken,
    options: &CreateClusterOptions,
) -> anyhow::Result<()> {
    tracing::debug!(
        name = %options.name,
        region = %options.region,
        do_async = options.do_async,
        "Creating cluster"
    );

    let manager = super::lifecycle_manager(settings, wait, cancel)?;
    manager.create(options).await?;

    Ok(())
}
