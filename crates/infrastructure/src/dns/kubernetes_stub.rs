use crate::plugin::NAMESERVER_PROVIDER;
use async_trait::async_trait;
use clusterset_dns_application::ports::{next_or_failure, Handler, NameserverLookup};
use clusterset_dns_domain::DomainError;
use hickory_proto::op::Message;
use std::net::IpAddr;
use std::sync::Arc;

/// Fixed nameserver addresses, the same for every zone.
#[derive(Debug, Clone, Default)]
pub struct StaticNameservers {
    addrs: Vec<IpAddr>,
}

impl StaticNameservers {
    pub fn new(addrs: Vec<IpAddr>) -> Self {
        Self { addrs }
    }
}

impl NameserverLookup for StaticNameservers {
    fn ns_addrs(&self, _zone: &str) -> Result<Vec<IpAddr>, DomainError> {
        Ok(self.addrs.clone())
    }
}

/// Stand-in for the `kubernetes` plugin: owns the nameserver addresses and
/// passes every query down the chain.
pub struct KubernetesStub {
    nameservers: Arc<StaticNameservers>,
    next: Option<Arc<dyn Handler>>,
}

impl KubernetesStub {
    pub fn new(nameservers: Vec<IpAddr>) -> Self {
        Self {
            nameservers: Arc::new(StaticNameservers::new(nameservers)),
            next: None,
        }
    }

    pub fn with_next(mut self, next: Option<Arc<dyn Handler>>) -> Self {
        self.next = next;
        self
    }
}

#[async_trait]
impl Handler for KubernetesStub {
    fn name(&self) -> &'static str {
        NAMESERVER_PROVIDER
    }

    async fn serve_dns(&self, request: &Message) -> Result<Message, DomainError> {
        next_or_failure(NAMESERVER_PROVIDER, self.next.as_ref(), request).await
    }

    fn nameserver_lookup(&self) -> Option<Arc<dyn NameserverLookup>> {
        Some(self.nameservers.clone())
    }
}
