use super::binding::bind_nameserver_lookup;
use super::stanza::parse_stanza;
use super::PLUGIN_NAME;
use crate::cluster::{init_controller, Controller, ControllerTimeouts};
use crate::dns::MultiCluster;
use crate::host::{Dispenser, ServerBlock};
use clusterset_dns_application::ports::{ClusterConnector, Handler};
use clusterset_dns_application::services::NameserverBinding;
use clusterset_dns_application::use_cases::LookupServicesUseCase;
use clusterset_dns_domain::DomainError;
use std::sync::Arc;
use tracing::{info, Span};

fn plugin_error(e: DomainError) -> DomainError {
    DomainError::plugin(PLUGIN_NAME, e)
}

/// Installs the plugin into `block`.
///
/// Registers, in order: the controller start hook, the controller stop
/// hook, the handler in the chain and the nameserver binding hook. Nothing
/// is registered when parsing or controller construction fails.
pub fn setup(
    block: &mut ServerBlock,
    stanza: &str,
    connector: &dyn ClusterConnector,
    span: Span,
    timeouts: ControllerTimeouts,
) -> Result<Arc<Controller>, DomainError> {
    let mut dispenser = Dispenser::new(stanza);
    let config = parse_stanza(&mut dispenser, block.keys()).map_err(plugin_error)?;
    let controller = Arc::new(
        init_controller(&config, connector, span.clone(), timeouts).map_err(plugin_error)?,
    );

    let starting = controller.clone();
    block
        .lifecycle()
        .on_startup(move || async move { starting.start().await.map_err(plugin_error) });
    let stopping = controller.clone();
    block
        .lifecycle()
        .on_shutdown(move || async move { stopping.stop().await.map_err(plugin_error) });

    let binding = NameserverBinding::new();
    let lookup = Arc::new(LookupServicesUseCase::new(
        controller.reader(),
        binding.clone(),
    ));
    info!(parent: &span, zones = %config.zones, "Registering plugin");
    let handler = MultiCluster::new(&config, lookup);
    block.add_plugin(move |next| -> Arc<dyn Handler> { Arc::new(handler.with_next(next)) });

    let registry = block.registry();
    block.lifecycle().on_startup(move || async move {
        bind_nameserver_lookup(&registry, &binding).map_err(plugin_error)
    });

    Ok(controller)
}
