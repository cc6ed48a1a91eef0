//! stretchctl - Stretched-Cluster Conversion Tool
//!
//! Command-line front end for the conversion workflow: resolve the operator's
//! inventory paths, validate the fault-domain topology, submit it to the
//! management plane, and map the outcome to an exit code.

use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stretchctl::{
    ConversionRequest, ConversionResult, RemoteConfig, RestDirectory, RestManagementPlane, Result,
    StretchConverter, TopologyPaths, TopologyResolver,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Stretched-cluster conversion tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Management endpoint base URL
    #[arg(long, env = "STRETCHCTL_URL", default_value = "https://localhost:9443/api")]
    endpoint: String,

    /// Username for the management endpoint
    #[arg(long, env = "STRETCHCTL_USERNAME", default_value = "administrator")]
    username: String,

    /// Password for the management endpoint
    #[arg(long, env = "STRETCHCTL_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Datacenter used to qualify relative inventory paths
    #[arg(long, env = "STRETCHCTL_DATACENTER")]
    datacenter: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, env = "STRETCHCTL_INSECURE")]
    insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "STRETCHCTL_TIMEOUT", default_value = "120")]
    timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a cluster into a stretched topology
    Convert(ConvertArgs),
}

#[derive(clap::Args, Debug)]
struct ConvertArgs {
    /// Inventory path of the cluster to convert
    cluster: String,

    /// Host path for the primary fault domain (repeatable)
    #[arg(
        long = "primary-host",
        env = "STRETCHCTL_PRIMARY_HOSTS",
        value_delimiter = ',',
        required = true
    )]
    primary_hosts: Vec<String>,

    /// Host path for the secondary fault domain (repeatable)
    #[arg(
        long = "secondary-host",
        env = "STRETCHCTL_SECONDARY_HOSTS",
        value_delimiter = ',',
        required = true
    )]
    secondary_hosts: Vec<String>,

    /// Host path of the witness
    #[arg(long, env = "STRETCHCTL_WITNESS")]
    witness: String,

    /// Name of the primary fault domain
    #[arg(long, default_value = "Primary")]
    first_fd_name: String,

    /// Name of the secondary fault domain
    #[arg(long, default_value = "Secondary")]
    second_fd_name: String,

    /// Preferred fault domain for tie-breaking (defaults to the primary name)
    #[arg(long)]
    preferred: Option<String>,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(&cli);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, aborting");
                cancel.cancel();
            }
        });
    }

    match run(cli, cancel).await {
        Ok(result) => {
            let task = result
                .task_id
                .map(|id| format!(", task {}", id))
                .unwrap_or_default();
            println!("conversion accepted: status {}{}", result.status, task);
        }
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            std::process::exit(err.exit_code());
        }
    }
}

async fn run(cli: Cli, cancel: CancellationToken) -> Result<ConversionResult> {
    let config = RemoteConfig {
        endpoint: cli.endpoint,
        username: cli.username,
        password: cli.password,
        datacenter: cli.datacenter,
        insecure: cli.insecure,
        timeout_secs: cli.timeout_secs,
    };

    match cli.command {
        Command::Convert(args) => convert(config, args, cancel).await,
    }
}

async fn convert(
    config: RemoteConfig,
    args: ConvertArgs,
    cancel: CancellationToken,
) -> Result<ConversionResult> {
    info!("Converting cluster to a stretched topology");
    info!("  Version: {}", stretchctl::VERSION);
    info!("  Endpoint: {}", config.endpoint);
    info!("  Cluster: {}", args.cluster);
    info!(
        "  Datacenter: {}",
        config.datacenter.as_deref().unwrap_or("-")
    );

    let directory = Arc::new(RestDirectory::new(config.clone())?);
    let plane = Arc::new(RestManagementPlane::new(config.clone())?);

    let mut resolver = TopologyResolver::new(directory);
    if let Some(datacenter) = &config.datacenter {
        resolver = resolver.with_datacenter(datacenter.as_str());
    }

    let paths = TopologyPaths {
        cluster: args.cluster,
        primary_hosts: args.primary_hosts,
        secondary_hosts: args.secondary_hosts,
        witness: args.witness,
    };

    let resolved = resolver.resolve(&paths, &cancel).await?;

    let preferred = args
        .preferred
        .unwrap_or_else(|| args.first_fd_name.clone());
    let request = ConversionRequest::from_resolved(resolved)
        .with_domain_names(args.first_fd_name, args.second_fd_name)
        .with_preferred(preferred);

    StretchConverter::new(plane).convert(request, &cancel).await
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(cli: &Cli) {
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("reqwest=warn".parse().unwrap());

    if cli.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}
