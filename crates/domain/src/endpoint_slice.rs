use super::cluster_state::ObjectKey;
use super::service_import::ServicePort;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub addresses: Vec<IpAddr>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default = "default_true")]
    pub ready: bool,
}

impl Endpoint {
    pub fn new(addresses: Vec<IpAddr>, hostname: Option<&str>) -> Self {
        Self {
            addresses,
            hostname: hostname.map(str::to_string),
            ready: true,
        }
    }

    /// DNS label of this endpoint: its hostname, or the first address with
    /// separators replaced by dashes.
    pub fn dns_label(&self) -> Option<String> {
        if let Some(hostname) = self.hostname.as_deref().filter(|h| !h.is_empty()) {
            return Some(hostname.to_ascii_lowercase());
        }
        self.addresses
            .first()
            .map(|addr| addr.to_string().replace(['.', ':'], "-"))
    }
}

/// Endpoints of one service as seen from one member cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSlice {
    pub name: String,
    pub namespace: String,
    pub service: String,
    pub cluster_id: String,
    #[serde(default)]
    pub ports: Vec<ServicePort>,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

impl EndpointSlice {
    pub fn key(&self) -> ObjectKey {
        ObjectKey::new(&self.namespace, &self.name)
    }

    pub fn service_key(&self) -> ObjectKey {
        ObjectKey::new(&self.namespace, &self.service)
    }

    pub fn ready_endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter().filter(|e| e.ready)
    }
}

fn default_true() -> bool {
    true
}
