use crate::ports::ClusterStateReader;
use crate::services::NameserverBinding;
use clusterset_dns_domain::zones::{fqdn, normalize_zone};
use clusterset_dns_domain::{
    parse_query_name, ClusterSnapshot, DomainError, LookupResult, QueryTarget, RecordData,
    RecordType, ServiceImport, ServicePort, ServiceRecord,
};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, instrument};

pub const RECORD_TTL: u32 = 5;

const SOA_REFRESH: i32 = 7200;
const SOA_RETRY: i32 = 1800;
const SOA_EXPIRE: i32 = 86400;

/// Synthesizes records for names inside an authority zone from the
/// published cluster snapshot.
///
/// A name that does not exist yields [`DomainError::NxDomain`]; an existing
/// name without data of the requested type yields an empty result.
pub struct LookupServicesUseCase {
    store: Arc<dyn ClusterStateReader>,
    nameservers: NameserverBinding,
}

impl LookupServicesUseCase {
    pub fn new(store: Arc<dyn ClusterStateReader>, nameservers: NameserverBinding) -> Self {
        Self { store, nameservers }
    }

    pub fn has_synced(&self) -> bool {
        self.store.has_synced()
    }

    #[instrument(skip(self), level = "debug")]
    pub fn execute(
        &self,
        qname: &str,
        zone: &str,
        record_type: RecordType,
    ) -> Result<LookupResult, DomainError> {
        let qname = fqdn(qname);
        let zone = normalize_zone(zone).ok_or_else(|| DomainError::InvalidDomainName(zone.into()))?;
        let snapshot = self.store.snapshot();

        if qname == nameserver_name(&zone) {
            return self.nameserver_addresses(&qname, &zone, record_type);
        }

        let target = parse_query_name(&qname, &zone)?;
        debug!(query = ?target, serial = snapshot.serial(), "Resolving cluster-set name");

        let result = match (record_type, &target) {
            (RecordType::A | RecordType::AAAA, _) => {
                address_records(&snapshot, &target, &qname, record_type)
            }
            (RecordType::SRV, _) => srv_records(&snapshot, &target, &zone),
            (RecordType::SOA, QueryTarget::Apex) => {
                LookupResult::new(vec![soa_record(&zone, snapshot.serial())])
            }
            (RecordType::NS, QueryTarget::Apex) => return self.nameserver_records(&zone),
            _ => LookupResult::default(),
        };

        if result.is_empty() && !name_exists(&snapshot, &target) {
            return Err(DomainError::NxDomain);
        }
        Ok(result)
    }

    /// SOA record placed in the authority section of negative answers.
    pub fn soa(&self, zone: &str) -> ServiceRecord {
        let zone = normalize_zone(zone).unwrap_or_else(|| fqdn(zone));
        soa_record(&zone, self.store.snapshot().serial())
    }

    fn nameserver_records(&self, zone: &str) -> Result<LookupResult, DomainError> {
        let addrs = self.nameservers.ns_addrs(zone)?;
        let target = nameserver_name(zone);
        let glue = addrs
            .into_iter()
            .map(|ip| ServiceRecord::new(target.clone(), RECORD_TTL, RecordData::Address(ip)))
            .collect();
        Ok(LookupResult::new(vec![ServiceRecord::new(
            zone,
            RECORD_TTL,
            RecordData::Ns { target },
        )])
        .with_additionals(glue))
    }

    fn nameserver_addresses(
        &self,
        qname: &str,
        zone: &str,
        record_type: RecordType,
    ) -> Result<LookupResult, DomainError> {
        if !record_type.is_address() {
            return Ok(LookupResult::default());
        }
        let answers = self
            .nameservers
            .ns_addrs(zone)?
            .into_iter()
            .filter(|ip| family_matches(ip, record_type))
            .map(|ip| ServiceRecord::new(qname, RECORD_TTL, RecordData::Address(ip)))
            .collect();
        Ok(LookupResult::new(answers))
    }
}

fn child(label: &str, zone: &str) -> String {
    if zone == "." {
        format!("{}.", label)
    } else {
        format!("{}.{}", label, zone)
    }
}

fn nameserver_name(zone: &str) -> String {
    child("ns.dns", zone)
}

fn service_name(service: &str, namespace: &str, zone: &str) -> String {
    child(&format!("{}.{}.svc", service, namespace), zone)
}

fn soa_record(zone: &str, serial: u32) -> ServiceRecord {
    ServiceRecord::new(
        zone,
        RECORD_TTL,
        RecordData::Soa {
            mname: nameserver_name(zone),
            rname: child("hostmaster", zone),
            serial,
            refresh: SOA_REFRESH,
            retry: SOA_RETRY,
            expire: SOA_EXPIRE,
            minimum: RECORD_TTL,
        },
    )
}

fn family_matches(ip: &IpAddr, record_type: RecordType) -> bool {
    match record_type {
        RecordType::A => ip.is_ipv4(),
        RecordType::AAAA => ip.is_ipv6(),
        _ => false,
    }
}

fn address_record(owner: &str, ip: IpAddr) -> ServiceRecord {
    ServiceRecord::new(owner, RECORD_TTL, RecordData::Address(ip))
}

/// Every ready endpoint address of a headless service, across clusters.
fn headless_addresses(snapshot: &ClusterSnapshot, import: &ServiceImport) -> Vec<IpAddr> {
    let mut addrs: Vec<IpAddr> = Vec::new();
    for slice in snapshot.endpoint_slices(&import.namespace, &import.name) {
        for addr in slice.ready_endpoints().flat_map(|e| e.addresses.iter()) {
            if !addrs.contains(addr) {
                addrs.push(*addr);
            }
        }
    }
    addrs
}

fn address_records(
    snapshot: &ClusterSnapshot,
    target: &QueryTarget,
    qname: &str,
    record_type: RecordType,
) -> LookupResult {
    let addrs: Vec<IpAddr> = match target {
        QueryTarget::Service { service, namespace } => {
            match snapshot.service_import(namespace, service) {
                Some(import) if import.is_headless() => headless_addresses(snapshot, import),
                Some(import) => import.ips.clone(),
                None => Vec::new(),
            }
        }
        QueryTarget::Endpoint {
            endpoint,
            cluster,
            service,
            namespace,
        } => snapshot
            .cluster_endpoints(namespace, service, cluster, endpoint)
            .into_iter()
            .flat_map(|(_, ep)| ep.addresses.iter().copied())
            .collect(),
        _ => Vec::new(),
    };

    LookupResult::new(
        addrs
            .into_iter()
            .filter(|ip| family_matches(ip, record_type))
            .map(|ip| address_record(qname, ip))
            .collect(),
    )
}

fn srv_weight(count: usize) -> u16 {
    (100 / count.max(1)).max(1) as u16
}

fn srv_records(snapshot: &ClusterSnapshot, target: &QueryTarget, zone: &str) -> LookupResult {
    let (import, ports): (&ServiceImport, Vec<&ServicePort>) = match target {
        QueryTarget::Service { service, namespace } => {
            match snapshot.service_import(namespace, service) {
                Some(import) => (import, import.ports.iter().collect()),
                None => return LookupResult::default(),
            }
        }
        QueryTarget::Port {
            port,
            protocol,
            service,
            namespace,
        } => match snapshot.service_import(namespace, service) {
            Some(import) => (
                import,
                import
                    .ports
                    .iter()
                    .filter(|p| p.matches(port, protocol))
                    .collect(),
            ),
            None => return LookupResult::default(),
        },
        _ => return LookupResult::default(),
    };

    let owner = match target {
        QueryTarget::Port {
            port, protocol, ..
        } => child(
            &format!(
                "_{}._{}.{}.{}.svc",
                port, protocol, import.name, import.namespace
            ),
            zone,
        ),
        _ => service_name(&import.name, &import.namespace, zone),
    }
    .to_ascii_lowercase();

    // (target, port, glue addresses)
    let mut targets: Vec<(String, u16, Vec<IpAddr>)> = Vec::new();
    if import.is_headless() {
        for slice in snapshot.endpoint_slices(&import.namespace, &import.name) {
            for endpoint in slice.ready_endpoints() {
                let Some(label) = endpoint.dns_label() else {
                    continue;
                };
                let host = child(
                    &format!(
                        "{}.{}.{}.{}.svc",
                        label, slice.cluster_id, import.name, import.namespace
                    ),
                    zone,
                )
                .to_ascii_lowercase();
                for port in &ports {
                    let number = slice
                        .ports
                        .iter()
                        .find(|p| p.name == port.name && p.protocol == port.protocol)
                        .map_or(port.port, |p| p.port);
                    targets.push((host.clone(), number, endpoint.addresses.clone()));
                }
            }
        }
    } else {
        let host = service_name(&import.name, &import.namespace, zone).to_ascii_lowercase();
        for port in &ports {
            targets.push((host.clone(), port.port, import.ips.clone()));
        }
    }

    let weight = srv_weight(targets.len());
    let mut answers = Vec::with_capacity(targets.len());
    let mut additionals: Vec<ServiceRecord> = Vec::new();
    for (host, port, addrs) in targets {
        for ip in addrs {
            let glue = address_record(&host, ip);
            if !additionals.contains(&glue) {
                additionals.push(glue);
            }
        }
        answers.push(ServiceRecord::new(
            owner.clone(),
            RECORD_TTL,
            RecordData::Srv {
                priority: 0,
                weight,
                port,
                target: host,
            },
        ));
    }
    LookupResult::new(answers).with_additionals(additionals)
}

fn name_exists(snapshot: &ClusterSnapshot, target: &QueryTarget) -> bool {
    match target {
        QueryTarget::Apex | QueryTarget::ServiceRoot => true,
        QueryTarget::Namespace { namespace } => snapshot.has_namespace(namespace),
        QueryTarget::Service { service, namespace } => {
            snapshot.service_import(namespace, service).is_some()
        }
        QueryTarget::Port {
            port,
            protocol,
            service,
            namespace,
        } => snapshot
            .service_import(namespace, service)
            .is_some_and(|import| import.ports.iter().any(|p| p.matches(port, protocol))),
        QueryTarget::Endpoint {
            endpoint,
            cluster,
            service,
            namespace,
        } => !snapshot
            .cluster_endpoints(namespace, service, cluster, endpoint)
            .is_empty(),
    }
}
