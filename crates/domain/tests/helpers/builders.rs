#![allow(dead_code)]
use clusterset_dns_domain::{
    ClusterState, Endpoint, EndpointSlice, Protocol, ServiceImport, ServiceImportKind,
    ServicePort,
};
use std::net::IpAddr;

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

pub struct ServiceImportBuilder {
    import: ServiceImport,
}

impl ServiceImportBuilder {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            import: ServiceImport {
                name: name.to_string(),
                namespace: namespace.to_string(),
                kind: ServiceImportKind::ClusterSetIp,
                ips: vec![],
                ports: vec![],
            },
        }
    }

    pub fn headless(mut self) -> Self {
        self.import.kind = ServiceImportKind::Headless;
        self
    }

    pub fn ip(mut self, addr: &str) -> Self {
        self.import.ips.push(ip(addr));
        self
    }

    pub fn port(mut self, name: &str, protocol: Protocol, port: u16) -> Self {
        self.import
            .ports
            .push(ServicePort::new(Some(name), protocol, port));
        self
    }

    pub fn build(self) -> ServiceImport {
        self.import
    }
}

pub struct EndpointSliceBuilder {
    slice: EndpointSlice,
}

impl EndpointSliceBuilder {
    pub fn new(namespace: &str, service: &str, cluster_id: &str) -> Self {
        Self {
            slice: EndpointSlice {
                name: format!("{}-{}", service, cluster_id),
                namespace: namespace.to_string(),
                service: service.to_string(),
                cluster_id: cluster_id.to_string(),
                ports: vec![],
                endpoints: vec![],
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.slice.name = name.to_string();
        self
    }

    pub fn endpoint(mut self, hostname: Option<&str>, addr: &str) -> Self {
        self.slice
            .endpoints
            .push(Endpoint::new(vec![ip(addr)], hostname));
        self
    }

    pub fn not_ready_endpoint(mut self, hostname: Option<&str>, addr: &str) -> Self {
        let mut endpoint = Endpoint::new(vec![ip(addr)], hostname);
        endpoint.ready = false;
        self.slice.endpoints.push(endpoint);
        self
    }

    pub fn port(mut self, name: &str, protocol: Protocol, port: u16) -> Self {
        self.slice
            .ports
            .push(ServicePort::new(Some(name), protocol, port));
        self
    }

    pub fn build(self) -> EndpointSlice {
        self.slice
    }
}

pub fn state(imports: Vec<ServiceImport>, slices: Vec<EndpointSlice>) -> ClusterState {
    ClusterState {
        service_imports: imports,
        endpoint_slices: slices,
    }
}
