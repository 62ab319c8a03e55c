//! Podium daemon: entry point for running a podium node.

use anyhow::Context;
use clap::Parser;
use podium_node::{init_logging, LogFormat, NodeConfig, PodiumNode};
use podium_types::{Role, UserId};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "podium-daemon", about = "Podium community events node daemon")]
struct Cli {
    /// Data directory for the event store.
    #[arg(long, default_value = "./podium_data", env = "PODIUM_DATA_DIR")]
    data_dir: PathBuf,

    /// Enable the HTTP API.
    #[arg(long, default_value_t = true, env = "PODIUM_ENABLE_RPC")]
    rpc: bool,

    /// HTTP API port.
    #[arg(long, default_value_t = 7700, env = "PODIUM_RPC_PORT")]
    rpc_port: u16,

    /// Enable the Prometheus metrics endpoint.
    #[arg(long, env = "PODIUM_ENABLE_METRICS")]
    metrics: bool,

    /// Seconds between deadline sweeps (defaults to the file or built-in value).
    #[arg(long, env = "PODIUM_SWEEP_INTERVAL_SECS")]
    sweep_interval_secs: Option<u64>,

    /// Seconds between event status rollovers.
    #[arg(long, env = "PODIUM_STATUS_INTERVAL_SECS")]
    status_interval_secs: Option<u64>,

    /// Log output format: "human" or "json".
    #[arg(long, default_value = "human", env = "PODIUM_LOG_FORMAT")]
    log_format: String,

    /// Tracing filter, e.g. "info" or "debug,podium_node=trace".
    #[arg(long, default_value = "info", env = "PODIUM_LOG_LEVEL")]
    log_level: String,

    /// Ensure an admin user exists before serving, as "usr_id" or
    /// "usr_id:Display Name". Handy on a fresh data directory, since every
    /// directory write goes through an admin.
    #[arg(long, env = "PODIUM_SEED_ADMIN")]
    seed_admin: Option<String>,

    /// Optional TOML configuration file. File settings form the base;
    /// CLI flags and env vars win where both are given.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the node until it receives SIGINT or SIGTERM.
    Run,
    /// Print the merged configuration as TOML and exit.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(LogFormat::from_config(&cli.log_format), &cli.log_level);

    let file_config: Option<NodeConfig> = if let Some(ref config_path) = cli.config {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match NodeConfig::from_toml_str(&contents) {
                Ok(cfg) => {
                    tracing::info!("loaded config from {}", config_path.display());
                    Some(cfg)
                }
                Err(e) => {
                    tracing::warn!("failed to parse config file: {e}, using CLI defaults");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(
                    "failed to read config file {}: {e}, using CLI defaults",
                    config_path.display()
                );
                None
            }
        }
    } else {
        None
    };

    let config = if let Some(file_cfg) = file_config {
        NodeConfig {
            data_dir: cli.data_dir,
            enable_rpc: cli.rpc,
            rpc_port: cli.rpc_port,
            enable_metrics: cli.metrics || file_cfg.enable_metrics,
            sweep_interval_secs: cli
                .sweep_interval_secs
                .unwrap_or(file_cfg.sweep_interval_secs),
            status_interval_secs: cli
                .status_interval_secs
                .unwrap_or(file_cfg.status_interval_secs),
            log_format: cli.log_format,
            log_level: cli.log_level,
        }
    } else {
        let defaults = NodeConfig::default();
        NodeConfig {
            data_dir: cli.data_dir,
            enable_rpc: cli.rpc,
            rpc_port: cli.rpc_port,
            enable_metrics: cli.metrics,
            sweep_interval_secs: cli
                .sweep_interval_secs
                .unwrap_or(defaults.sweep_interval_secs),
            status_interval_secs: cli
                .status_interval_secs
                .unwrap_or(defaults.status_interval_secs),
            log_format: cli.log_format,
            log_level: cli.log_level,
        }
    };

    match cli.command {
        Command::CheckConfig => {
            print!("{}", config.to_toml_string());
        }
        Command::Run => {
            tracing::info!(
                "starting podium node (data: {}, API: {}, metrics: {})",
                config.data_dir.display(),
                if config.enable_rpc {
                    config.rpc_port.to_string()
                } else {
                    "off".into()
                },
                if config.enable_metrics { "on" } else { "off" },
            );

            let mut node = PodiumNode::new(config)?;

            if let Some(ref spec) = cli.seed_admin {
                let (id, name) = match spec.split_once(':') {
                    Some((id, name)) => (id, name.trim()),
                    None => (spec.as_str(), "Admin"),
                };
                let user_id: UserId = id
                    .parse()
                    .context("--seed-admin takes a user id like usr_alice")?;
                node.ensure_user(user_id, name, Role::Admin)?;
            }

            node.start().await?;
            node.shutdown_handle().wait_for_signal().await;

            tracing::info!("shutdown signal received, stopping node");
            node.stop().await?;

            tracing::info!("podium daemon exited cleanly");
        }
    }

    Ok(())
}
