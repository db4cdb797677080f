use super::cluster_state::{ClusterEvent, ClusterState, ObjectKey, WatchScope};
use super::endpoint_slice::{Endpoint, EndpointSlice};
use super::service_import::ServiceImport;
use rustc_hash::FxHashMap;

/// Immutable, indexed view of the cluster set published to queries.
///
/// The watch loop builds a new snapshot per event and swaps it in whole,
/// so a reader holding one never observes a partial update.
#[derive(Debug, Clone, Default)]
pub struct ClusterSnapshot {
    imports: FxHashMap<ObjectKey, ServiceImport>,
    slices: FxHashMap<ObjectKey, EndpointSlice>,
    serial: u32,
}

impl ClusterSnapshot {
    pub fn from_state(state: ClusterState, scope: WatchScope, serial: u32) -> Self {
        let mut snapshot = Self {
            serial,
            ..Self::default()
        };
        snapshot.replace(state, scope);
        snapshot
    }

    /// Applies one watch event. Endpoint events are dropped when the scope
    /// excludes endpoints.
    pub fn apply(&mut self, event: ClusterEvent, scope: WatchScope, serial: u32) {
        if event.is_endpoint_event() && !scope.endpoints {
            return;
        }

        match event {
            ClusterEvent::ServiceImportApplied(import) => {
                self.imports.insert(import.key(), import);
            }
            ClusterEvent::ServiceImportDeleted(key) => {
                self.imports.remove(&key);
            }
            ClusterEvent::EndpointSliceApplied(slice) => {
                self.slices.insert(slice.key(), slice);
            }
            ClusterEvent::EndpointSliceDeleted(key) => {
                self.slices.remove(&key);
            }
            ClusterEvent::Restarted(state) => self.replace(state, scope),
        }
        self.serial = serial;
    }

    fn replace(&mut self, state: ClusterState, scope: WatchScope) {
        self.imports = state
            .service_imports
            .into_iter()
            .map(|import| (import.key(), import))
            .collect();
        self.slices = if scope.endpoints {
            state
                .endpoint_slices
                .into_iter()
                .map(|slice| (slice.key(), slice))
                .collect()
        } else {
            FxHashMap::default()
        };
    }

    pub fn serial(&self) -> u32 {
        self.serial
    }

    pub fn service_import(&self, namespace: &str, name: &str) -> Option<&ServiceImport> {
        self.imports.get(&ObjectKey::new(namespace, name))
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.imports
            .keys()
            .any(|key| key.namespace.eq_ignore_ascii_case(namespace))
    }

    /// Endpoint slices backing a service, ordered by cluster then slice name.
    pub fn endpoint_slices(&self, namespace: &str, service: &str) -> Vec<&EndpointSlice> {
        let service_key = ObjectKey::new(namespace, service);
        let mut slices: Vec<&EndpointSlice> = self
            .slices
            .values()
            .filter(|slice| slice.service_key() == service_key)
            .collect();
        slices.sort_by(|a, b| (&a.cluster_id, &a.name).cmp(&(&b.cluster_id, &b.name)));
        slices
    }

    /// Ready endpoints of a service in one cluster whose DNS label is
    /// `label`.
    pub fn cluster_endpoints(
        &self,
        namespace: &str,
        service: &str,
        cluster_id: &str,
        label: &str,
    ) -> Vec<(&EndpointSlice, &Endpoint)> {
        self.endpoint_slices(namespace, service)
            .into_iter()
            .filter(|slice| slice.cluster_id.eq_ignore_ascii_case(cluster_id))
            .flat_map(|slice| slice.ready_endpoints().map(move |ep| (slice, ep)))
            .filter(|(_, ep)| {
                ep.dns_label()
                    .is_some_and(|l| l.eq_ignore_ascii_case(label))
            })
            .collect()
    }

    pub fn service_import_count(&self) -> usize {
        self.imports.len()
    }

    pub fn endpoint_slice_count(&self) -> usize {
        self.slices.len()
    }
}
