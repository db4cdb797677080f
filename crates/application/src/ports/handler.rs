use super::NameserverLookup;
use async_trait::async_trait;
use clusterset_dns_domain::DomainError;
use hickory_proto::op::Message;
use std::sync::Arc;

/// One link of the plugin chain.
#[async_trait]
pub trait Handler: Send + Sync {
    fn name(&self) -> &'static str;

    /// Answer `request` or hand it to the next link. An `Err` becomes a
    /// SERVFAIL for this query only.
    async fn serve_dns(&self, request: &Message) -> Result<Message, DomainError>;

    /// Exposed by handlers that own nameserver addresses.
    fn nameserver_lookup(&self) -> Option<Arc<dyn NameserverLookup>> {
        None
    }
}

/// Calls `next`, or fails when `name` is the last link of the chain.
pub async fn next_or_failure(
    name: &str,
    next: Option<&Arc<dyn Handler>>,
    request: &Message,
) -> Result<Message, DomainError> {
    match next {
        Some(next) => next.serve_dns(request).await,
        None => Err(DomainError::NoNextHandler(name.to_string())),
    }
}
