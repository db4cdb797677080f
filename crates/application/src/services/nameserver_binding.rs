use crate::ports::NameserverLookup;
use clusterset_dns_domain::DomainError;
use std::net::IpAddr;
use std::sync::{Arc, OnceLock};

/// Write-once slot for the delegated nameserver lookup.
///
/// Clones share the slot: the startup hook writes it once and queries read
/// it without locking.
#[derive(Clone, Default)]
pub struct NameserverBinding {
    slot: Arc<OnceLock<Arc<dyn NameserverLookup>>>,
}

impl NameserverBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, lookup: Arc<dyn NameserverLookup>) -> Result<(), DomainError> {
        self.slot
            .set(lookup)
            .map_err(|_| DomainError::NameserverLookupAlreadyBound)
    }

    pub fn is_bound(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn ns_addrs(&self, zone: &str) -> Result<Vec<IpAddr>, DomainError> {
        match self.slot.get() {
            Some(lookup) => lookup.ns_addrs(zone),
            None => Err(DomainError::NameserverLookupUnbound),
        }
    }
}
