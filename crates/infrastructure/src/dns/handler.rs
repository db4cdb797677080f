use super::record_type_map::RecordTypeMapper;
use super::response::ResponseBuilder;
use crate::plugin::PLUGIN_NAME;
use async_trait::async_trait;
use clusterset_dns_application::ports::{next_or_failure, Handler};
use clusterset_dns_application::use_cases::LookupServicesUseCase;
use clusterset_dns_domain::zones::fqdn;
use clusterset_dns_domain::{DomainError, Fallthrough, MultiClusterConfig, Zones};
use hickory_proto::op::{Message, ResponseCode};
use std::sync::Arc;
use tracing::{debug, warn};

/// Authoritative handler for the cluster-set zones.
///
/// Names outside the zones go to the next handler untouched. Inside, the
/// answer comes from the published cluster snapshot; negative outcomes are
/// handed on when fallthrough covers the name.
pub struct MultiCluster {
    zones: Zones,
    fallthrough: Fallthrough,
    lookup: Arc<LookupServicesUseCase>,
    next: Option<Arc<dyn Handler>>,
}

impl MultiCluster {
    pub fn new(config: &MultiClusterConfig, lookup: Arc<LookupServicesUseCase>) -> Self {
        Self {
            zones: config.zones.clone(),
            fallthrough: config.fallthrough.clone(),
            lookup,
            next: None,
        }
    }

    pub fn with_next(mut self, next: Option<Arc<dyn Handler>>) -> Self {
        self.next = next;
        self
    }

    async fn forward(&self, request: &Message) -> Result<Message, DomainError> {
        next_or_failure(PLUGIN_NAME, self.next.as_ref(), request).await
    }
}

#[async_trait]
impl Handler for MultiCluster {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    async fn serve_dns(&self, request: &Message) -> Result<Message, DomainError> {
        let Some(query) = request.queries().first() else {
            return self.forward(request).await;
        };
        let qname = fqdn(&query.name().to_ascii());
        let Some(zone) = self.zones.matches(&qname) else {
            return self.forward(request).await;
        };
        let record_type = RecordTypeMapper::from_hickory(query.query_type());

        if record_type.is_zone_transfer() {
            debug!(qname = %qname, record_type = %record_type, "Zone transfer refused");
            return Ok(ResponseBuilder::error(request, ResponseCode::Refused));
        }

        match self.lookup.execute(&qname, zone, record_type) {
            Ok(result) if !result.is_empty() => ResponseBuilder::answer(request, &result),
            Ok(_) => {
                if self.fallthrough.through(&qname) {
                    return self.forward(request).await;
                }
                debug!(qname = %qname, record_type = %record_type, "No data");
                ResponseBuilder::negative(request, ResponseCode::NoError, &self.lookup.soa(zone))
            }
            Err(e) if e.is_name_error() || e == DomainError::NameserverLookupUnbound => {
                if self.fallthrough.through(&qname) {
                    return self.forward(request).await;
                }
                if e == DomainError::NameserverLookupUnbound {
                    warn!(qname = %qname, "Nameserver lookup requested before it was bound");
                    return Ok(ResponseBuilder::error(request, ResponseCode::ServFail));
                }
                if !self.lookup.has_synced() {
                    warn!(qname = %qname, "Cluster state not synced yet");
                    return Ok(ResponseBuilder::error(request, ResponseCode::ServFail));
                }
                debug!(qname = %qname, record_type = %record_type, "Name not found");
                ResponseBuilder::negative(request, ResponseCode::NXDomain, &self.lookup.soa(zone))
            }
            Err(e) => Err(e),
        }
    }
}
