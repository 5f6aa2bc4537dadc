use lightning_cloud::CancellationToken;
use lightning_config::Settings;

pub async fn handle(
    settings: &Settings,
    wait: &super::WaitArgs,
    cancel: CancellationToken,
    cluster: Option<String>,
    force: bool,
    do_async: bool,
) -> anyhow::Result<()> {
    let cluster_id = match cluster {
        Some(id) => id,
        None => {
            let cwd = std::env::current_dir()?;
            lightning_config::default_cluster_id(&cwd).ok_or_else(|| {
                anyhow::anyhow!(
                    "No cluster id given and no cluster_id set in {}",
                    cwd.join(lightning_config::APP_CONFIG_FILENAME).display()
                )
            })?
        }
    };

    let manager = super::lifecycle_manager(settings, wait, cancel)?;
    manager.delete(&cluster_id, force, do_async).await?;

    Ok(())
}
