use super::errors::DomainError;
use super::zones::{fqdn, is_subdomain, normalize_zone};

const SVC_LABEL: &str = "svc";

/// What a query name inside an authority zone refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTarget {
    /// The zone itself.
    Apex,
    /// `svc.<zone>`.
    ServiceRoot,
    /// `<ns>.svc.<zone>`.
    Namespace { namespace: String },
    /// `<service>.<ns>.svc.<zone>`.
    Service { service: String, namespace: String },
    /// `_<port>._<protocol>.<service>.<ns>.svc.<zone>`.
    Port {
        port: String,
        protocol: String,
        service: String,
        namespace: String,
    },
    /// `<endpoint>.<cluster>.<service>.<ns>.svc.<zone>`.
    Endpoint {
        endpoint: String,
        cluster: String,
        service: String,
        namespace: String,
    },
}

/// Splits `qname` relative to `zone` into the parts used for lookups.
///
/// Names that are inside the zone but do not follow the cluster-set
/// layout yield [`DomainError::InvalidRequest`], which callers treat as a
/// name error.
pub fn parse_query_name(qname: &str, zone: &str) -> Result<QueryTarget, DomainError> {
    let name = fqdn(qname);
    let zone = normalize_zone(zone).ok_or_else(|| DomainError::InvalidDomainName(zone.into()))?;

    if !is_subdomain(&zone, &name) {
        return Err(DomainError::InvalidRequest(format!(
            "{} is not in zone {}",
            name, zone
        )));
    }

    let base = if zone == "." {
        name.trim_end_matches('.')
    } else {
        name[..name.len() - zone.len()].trim_end_matches('.')
    };
    if base.is_empty() {
        return Ok(QueryTarget::Apex);
    }

    let mut labels: Vec<&str> = base.split('.').collect();
    if labels.iter().any(|l| l.is_empty()) {
        return Err(DomainError::InvalidRequest(format!("empty label in {}", name)));
    }

    let kind = labels.pop().unwrap_or_default();
    if kind != SVC_LABEL {
        return Err(DomainError::InvalidRequest(format!(
            "expected '{}' label in {}",
            SVC_LABEL, name
        )));
    }
    let Some(namespace) = labels.pop() else {
        return Ok(QueryTarget::ServiceRoot);
    };
    let namespace = namespace.to_string();
    let Some(service) = labels.pop() else {
        return Ok(QueryTarget::Namespace { namespace });
    };
    let service = service.to_string();

    match labels.as_slice() {
        [] => Ok(QueryTarget::Service { service, namespace }),
        [port, protocol] if port.starts_with('_') && protocol.starts_with('_') => {
            Ok(QueryTarget::Port {
                port: port[1..].to_string(),
                protocol: protocol[1..].to_string(),
                service,
                namespace,
            })
        }
        [endpoint, cluster] if !endpoint.starts_with('_') && !cluster.starts_with('_') => {
            Ok(QueryTarget::Endpoint {
                endpoint: endpoint.to_string(),
                cluster: cluster.to_string(),
                service,
                namespace,
            })
        }
        _ => Err(DomainError::InvalidRequest(format!(
            "unexpected labels in {}",
            name
        ))),
    }
}
