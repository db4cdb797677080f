use clusterset_dns_domain::Config;
use clusterset_dns_infrastructure::host::ServerInstance;
use std::net::SocketAddr;
use tracing::error;

/// Serves the assembled server block until Ctrl-C.
pub async fn run_dns_server(config: &Config, server: ServerInstance) -> anyhow::Result<()> {
    let addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.dns_port).parse()?;

    server
        .run(addr, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for Ctrl-C");
            }
        })
        .await?;
    Ok(())
}
