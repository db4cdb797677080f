use super::ClusterClient;
use clusterset_dns_domain::{ClusterAccess, DomainError};
use std::sync::Arc;

/// Builds a [`ClusterClient`] from an access descriptor without contacting
/// the cluster.
pub trait ClusterConnector: Send + Sync {
    fn connect(&self, access: &ClusterAccess) -> Result<Arc<dyn ClusterClient>, DomainError>;
}
