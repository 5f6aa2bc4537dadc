mod commands;

use clap::{Parser, Subcommand};
use commands::WaitArgs;
use lightning_cloud::{CancellationToken, ClusterError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lightning")]
#[command(about = "Manage Lightning BYOC clusters on your own AWS account", long_about = None)]
#[command(version)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a resource
    #[command(subcommand)]
    Create(CreateCommands),
    /// Delete a resource
    #[command(subcommand)]
    Delete(DeleteCommands),
    /// List resources
    #[command(subcommand)]
    List(ListCommands),
}

#[derive(Subcommand)]
enum CreateCommands {
    /// Create a BYOC cluster in your AWS account
    Cluster {
        /// Cluster name (lowercase a-z, 0-9 and '-')
        name: String,
        /// IAM role the control plane assumes in your account
        #[arg(long)]
        role_arn: String,
        /// External id configured on the IAM role trust policy
        #[arg(long)]
        external_id: String,
        /// AWS region to create the cluster in
        #[arg(long, default_value = "us-east-1")]
        region: String,
        /// Return right after the request is accepted
        #[arg(long = "async", overrides_with = "blocking")]
        do_async: bool,
        /// Wait until the operation finishes (default; overrides --async)
        #[arg(long, overrides_with = "do_async")]
        blocking: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand)]
enum DeleteCommands {
    /// Delete a BYOC cluster
    Cluster {
        /// Cluster id (defaults to cluster_id in ./.lightning)
        cluster: Option<String>,
        /// Delete even if the cluster has running workloads
        #[arg(long)]
        force: bool,
        /// Return right after the request is accepted
        #[arg(long = "async", overrides_with = "blocking")]
        do_async: bool,
        /// Wait until the operation finishes (default; overrides --async)
        #[arg(long, overrides_with = "do_async")]
        blocking: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand)]
enum ListCommands {
    /// List clusters that are not deleted
    Clusters,
}

/// Exit status of a command aborted with Ctrl-C
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // logs on stderr, progress on stdout
    init_tracing(cli.verbose);

    match run(cli).await {
        Err(e)
            if e
                .downcast_ref::<ClusterError>()
                .is_some_and(ClusterError::is_cancelled) =>
        {
            tracing::debug!("{}", e);
            std::process::exit(EXIT_INTERRUPTED);
        }
        result => result,
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = lightning_config::Settings::load()?;
    let cancel = cancel_on_ctrl_c();

    match cli.command {
        Commands::Create(CreateCommands::Cluster {
            name,
            role_arn,
            external_id,
            region,
            do_async,
            blocking: _,
            wait,
        }) => {
            let options = lightning_cloud::CreateClusterOptions {
                name,
                region,
                role_arn,
                external_id,
                do_async,
            };
            commands::create::handle(&settings, &wait, cancel, &options).await?;
        }
        Commands::Delete(DeleteCommands::Cluster {
            cluster,
            force,
            do_async,
            blocking: _,
            wait,
        }) => {
            commands::delete::handle(&settings, &wait, cancel, cluster, force, do_async).await?;
        }
        Commands::List(ListCommands::Clusters) => {
            commands::list::handle(&settings, cancel).await?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Token cancelled on the first Ctrl-C; a second Ctrl-C exits at once
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        tracing::debug!("Interrupted, stop waiting for the cluster");
        token.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(EXIT_INTERRUPTED);
        }
    });
    cancel
}
