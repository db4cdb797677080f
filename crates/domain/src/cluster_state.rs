use super::endpoint_slice::EndpointSlice;
use super::service_import::ServiceImport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespaced object identity. Both parts are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    pub namespace: String,
    pub name: String,
}

impl ObjectKey {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_ascii_lowercase(),
            name: name.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// A full listing of the watched resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterState {
    #[serde(default)]
    pub service_imports: Vec<ServiceImport>,
    #[serde(default)]
    pub endpoint_slices: Vec<EndpointSlice>,
}

/// One change delivered by the watch stream, in stream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterEvent {
    ServiceImportApplied(ServiceImport),
    ServiceImportDeleted(ObjectKey),
    EndpointSliceApplied(EndpointSlice),
    EndpointSliceDeleted(ObjectKey),
    /// The stream was (re)established; the listing replaces all state.
    Restarted(ClusterState),
}

impl ClusterEvent {
    pub fn is_endpoint_event(&self) -> bool {
        matches!(
            self,
            ClusterEvent::EndpointSliceApplied(_) | ClusterEvent::EndpointSliceDeleted(_)
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ClusterEvent::ServiceImportApplied(_) => "service_import_applied",
            ClusterEvent::ServiceImportDeleted(_) => "service_import_deleted",
            ClusterEvent::EndpointSliceApplied(_) => "endpoint_slice_applied",
            ClusterEvent::EndpointSliceDeleted(_) => "endpoint_slice_deleted",
            ClusterEvent::Restarted(_) => "restarted",
        }
    }
}

/// Which resources the controller watches. Service imports are always
/// watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchScope {
    pub endpoints: bool,
}

impl Default for WatchScope {
    fn default() -> Self {
        Self { endpoints: true }
    }
}
