use clap::Parser;
use clusterset_dns_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "clusterset-dns")]
#[command(version = "0.1.0")]
#[command(about = "ClusterSet DNS - authoritative DNS for multi-cluster service imports")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Cluster state file used for in-cluster access
    #[arg(long, value_name = "FILE")]
    state_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Validate the configuration and plugin stanza, then exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        state_file: cli.state_file,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    if cli.check {
        let plugin = di::check_stanza(&config)?;
        info!(zones = %plugin.zones, access = %plugin.cluster_access(), "Configuration is valid");
        return Ok(());
    }

    info!("Starting ClusterSet DNS v{}", env!("CARGO_PKG_VERSION"));

    let server = di::build_server(&config)?;
    server::run_dns_server(&config, server).await?;

    info!("Server shutdown complete");
    Ok(())
}
