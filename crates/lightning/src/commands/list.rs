use colored::Colorize;
use lightning_cloud::{CancellationToken, ClusterSnapshot, ClusterState};
use lightning_config::Settings;

pub async fn handle(settings: &Settings, cancel: CancellationToken) -> anyhow::Result<()> {
    let manager = super::lifecycle_manager(
        settings,
        &super::WaitArgs::default(),
        cancel,
    )?;
    let clusters = manager.list().await?;

    if clusters.is_empty() {
        println!("{}", "No clusters found".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:<28} {:<24} {:<12} {:<14} {:<18}",
            "ID", "NAME", "PHASE", "REGION", "CREATED"
        )
        .bold()
    );
    println!("{}", "─".repeat(100).dimmed());

    for cluster in &clusters {
        let row = ClusterRow::from(cluster);
        let phase = format!("{:<12}", row.phase);
        let phase = match cluster.state {
            ClusterState::Running => phase.green(),
            ClusterState::Failed => phase.red(),
            _ => phase.yellow(),
        };

        println!(
            "{} {:<24} {} {:<14} {}",
            format!("{:<28}", row.id).cyan(),
            row.name,
            phase,
            row.region,
            row.created.dimmed()
        );
    }

    Ok(())
}

/// One line of the cluster table, as plain text
#[derive(Debug, PartialEq, Eq)]
struct ClusterRow {
    id: String,
    name: String,
    phase: String,
    region: String,
    created: String,
}

impl From<&ClusterSnapshot> for ClusterRow {
    fn from(cluster: &ClusterSnapshot) -> Self {
        Self {
            id: cluster.id.clone(),
            name: cluster.display_name().to_string(),
            phase: cluster.state.to_string(),
            region: cluster.driver_spec.region().unwrap_or("-").to_string(),
            created: cluster
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}
