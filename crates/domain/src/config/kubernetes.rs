use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Settings for the built-in `kubernetes` handler that owns nameserver
/// addresses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KubernetesConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub nameservers: Vec<IpAddr>,
}

impl Default for KubernetesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            nameservers: vec![],
        }
    }
}

fn default_true() -> bool {
    true
}
