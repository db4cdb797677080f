use clusterset_dns_application::ports::Handler;
use clusterset_dns_domain::{Config, DomainError, MultiClusterConfig};
use clusterset_dns_infrastructure::cluster::{ControllerTimeouts, SnapshotFileConnector};
use clusterset_dns_infrastructure::dns::KubernetesStub;
use clusterset_dns_infrastructure::host::{Dispenser, ServerBlock, ServerInstance};
use clusterset_dns_infrastructure::plugin::{self, PLUGIN_NAME};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, info_span, warn};

/// Assembles the server block: `multicluster` first, then `kubernetes`.
pub fn build_server(config: &Config) -> anyhow::Result<ServerInstance> {
    let mut block = ServerBlock::new(config.server.origins.iter().cloned());

    let connector = SnapshotFileConnector::new(
        &config.cluster.state_file,
        Duration::from_secs(config.cluster.poll_interval_secs),
    );
    let timeouts = ControllerTimeouts {
        startup: Duration::from_secs(config.cluster.startup_timeout_secs),
        shutdown: Duration::from_secs(config.cluster.shutdown_timeout_secs),
    };

    plugin::setup(
        &mut block,
        &config.multicluster.stanza,
        &connector,
        info_span!("plugin", plugin = PLUGIN_NAME),
        timeouts,
    )?;

    if config.kubernetes.enabled {
        if config.kubernetes.nameservers.is_empty() {
            warn!("kubernetes handler has no nameserver addresses");
        }
        let nameservers = config.kubernetes.nameservers.clone();
        block.add_plugin(move |next| -> Arc<dyn Handler> {
            Arc::new(KubernetesStub::new(nameservers).with_next(next))
        });
    }

    info!(
        origins = ?block.keys(),
        plugins = block.plugin_count(),
        "Server block assembled"
    );

    Ok(block.build()?)
}

/// Parses the configured stanza without touching the cluster.
pub fn check_stanza(config: &Config) -> anyhow::Result<MultiClusterConfig> {
    let mut dispenser = Dispenser::new(&config.multicluster.stanza);
    let parsed = plugin::parse_stanza(&mut dispenser, &config.server.origins)
        .map_err(|e| DomainError::plugin(PLUGIN_NAME, e))?;
    parsed.cluster_access().validate()?;
    Ok(parsed)
}
