use super::cluster_access::ClusterAccess;
use super::cluster_state::WatchScope;
use super::fallthrough::Fallthrough;
use super::zones::Zones;

/// Parsed `multicluster` stanza.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiClusterConfig {
    /// Authority zones.
    pub zones: Zones,

    /// `None` means in-cluster access.
    pub client_config: Option<ClusterAccess>,

    pub fallthrough: Fallthrough,

    pub watch_endpoints: bool,
}

impl MultiClusterConfig {
    pub fn new(zones: Zones) -> Self {
        Self {
            zones,
            client_config: None,
            fallthrough: Fallthrough::default(),
            watch_endpoints: true,
        }
    }

    pub fn cluster_access(&self) -> ClusterAccess {
        self.client_config.clone().unwrap_or_default()
    }

    pub fn watch_scope(&self) -> WatchScope {
        WatchScope {
            endpoints: self.watch_endpoints,
        }
    }
}
