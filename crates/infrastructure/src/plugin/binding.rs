use crate::host::HandlerRegistry;
use clusterset_dns_application::services::NameserverBinding;
use clusterset_dns_domain::DomainError;
use tracing::info;

/// Plugin whose nameserver addresses answer apex NS queries.
pub const NAMESERVER_PROVIDER: &str = "kubernetes";

/// Binds the provider's nameserver lookup into `binding`. Runs as a startup
/// hook, after the chain has been built.
pub fn bind_nameserver_lookup(
    registry: &HandlerRegistry,
    binding: &NameserverBinding,
) -> Result<(), DomainError> {
    let provider = registry
        .handler(NAMESERVER_PROVIDER)
        .ok_or_else(|| DomainError::DependencyNotLoaded(NAMESERVER_PROVIDER.to_string()))?;

    let lookup =
        provider
            .nameserver_lookup()
            .ok_or_else(|| DomainError::DependencyMissingCapability {
                plugin: NAMESERVER_PROVIDER.to_string(),
                capability: "a nameserver lookup".to_string(),
            })?;

    binding.bind(lookup)?;
    info!(provider = NAMESERVER_PROVIDER, "Nameserver lookup bound");
    Ok(())
}
