#![allow(dead_code)]

use clusterset_dns_application::ports::{ClusterStateReader, NameserverLookup};
use clusterset_dns_domain::{ClusterEvent, ClusterSnapshot, ClusterState, DomainError, WatchScope};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

pub struct MockClusterStateStore {
    snapshot: RwLock<Arc<ClusterSnapshot>>,
    synced: AtomicBool,
}

impl MockClusterStateStore {
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(ClusterSnapshot::default())),
            synced: AtomicBool::new(false),
        }
    }

    pub fn with_state(state: ClusterState) -> Self {
        let store = Self::new();
        store.apply(ClusterEvent::Restarted(state));
        store
    }
}

impl Default for MockClusterStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClusterStateStore {
    /// Stands in for the watch subsystem.
    pub fn apply(&self, event: ClusterEvent) {
        let restarted = matches!(event, ClusterEvent::Restarted(_));
        let mut guard = self.snapshot.write().unwrap();
        let mut next = ClusterSnapshot::clone(&guard);
        next.apply(event, WatchScope::default(), next.serial() + 1);
        *guard = Arc::new(next);
        if restarted {
            self.synced.store(true, Ordering::SeqCst);
        }
    }
}

impl ClusterStateReader for MockClusterStateStore {
    fn snapshot(&self) -> Arc<ClusterSnapshot> {
        self.snapshot.read().unwrap().clone()
    }

    fn has_synced(&self) -> bool {
        self.synced.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct MockNameserverLookup {
    addrs: RwLock<HashMap<String, Vec<IpAddr>>>,
    fail: AtomicBool,
    calls: AtomicUsize,
}

impl MockNameserverLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_addrs(zone: &str, addrs: Vec<IpAddr>) -> Self {
        let lookup = Self::new();
        lookup
            .addrs
            .write()
            .unwrap()
            .insert(zone.to_string(), addrs);
        lookup
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NameserverLookup for MockNameserverLookup {
    fn ns_addrs(&self, zone: &str) -> Result<Vec<IpAddr>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::ResolutionFailed("mock failure".into()));
        }
        Ok(self
            .addrs
            .read()
            .unwrap()
            .get(zone)
            .cloned()
            .unwrap_or_default())
    }
}
