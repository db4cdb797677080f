use super::cluster_state::ObjectKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceImportKind {
    #[default]
    #[serde(rename = "ClusterSetIP")]
    ClusterSetIp,
    Headless,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
    Sctp,
}

impl Protocol {
    /// Label form used in SRV owner names, without the leading underscore.
    pub fn as_label(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
            Protocol::Sctp => "sctp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServicePort {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub protocol: Protocol,
    pub port: u16,
}

impl ServicePort {
    pub fn new(name: Option<&str>, protocol: Protocol, port: u16) -> Self {
        Self {
            name: name.map(str::to_string),
            protocol,
            port,
        }
    }

    /// Matches the `_<name>._<protocol>` labels of an SRV query.
    pub fn matches(&self, name: &str, protocol: &str) -> bool {
        let name_ok = self
            .name
            .as_deref()
            .is_some_and(|n| n.eq_ignore_ascii_case(name));
        name_ok && self.protocol.as_label().eq_ignore_ascii_case(protocol)
    }
}

/// A service exported to the whole cluster set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceImport {
    pub name: String,
    pub namespace: String,
    #[serde(default, rename = "type")]
    pub kind: ServiceImportKind,
    #[serde(default)]
    pub ips: Vec<IpAddr>,
    #[serde(default)]
    pub ports: Vec<ServicePort>,
}

impl ServiceImport {
    pub fn key(&self) -> ObjectKey {
        ObjectKey::new(&self.namespace, &self.name)
    }

    pub fn is_headless(&self) -> bool {
        self.kind == ServiceImportKind::Headless
    }
}
