use clusterset_dns_domain::DomainError;
use std::net::IpAddr;

/// Nameserver addresses owned by another plugin. Called on the query path.
pub trait NameserverLookup: Send + Sync {
    fn ns_addrs(&self, zone: &str) -> Result<Vec<IpAddr>, DomainError>;
}
