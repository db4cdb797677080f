use arc_swap::ArcSwap;
use clusterset_dns_application::ports::{ClusterStateReader, ClusterStateWriter};
use clusterset_dns_domain::{ClusterEvent, ClusterSnapshot, WatchScope};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Copy-on-write cluster cache.
///
/// Each applied event produces a new [`ClusterSnapshot`] that replaces the
/// published one in a single pointer swap. Queries load the current pointer
/// and keep using it even if a newer snapshot is published meanwhile.
pub struct ClusterStateCache {
    snapshot: ArcSwap<ClusterSnapshot>,
    scope: WatchScope,
    synced: AtomicBool,
}

impl ClusterStateCache {
    pub fn new(scope: WatchScope) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(ClusterSnapshot::default()),
            scope,
            synced: AtomicBool::new(false),
        }
    }

    pub fn scope(&self) -> WatchScope {
        self.scope
    }
}

impl ClusterStateReader for ClusterStateCache {
    fn snapshot(&self) -> Arc<ClusterSnapshot> {
        self.snapshot.load_full()
    }

    fn has_synced(&self) -> bool {
        self.synced.load(Ordering::Acquire)
    }
}

impl ClusterStateWriter for ClusterStateCache {
    fn apply(&self, event: ClusterEvent) {
        let restarted = matches!(event, ClusterEvent::Restarted(_));
        let kind = event.kind();

        let mut next = ClusterSnapshot::clone(&self.snapshot.load());
        let serial = next_serial(next.serial());
        next.apply(event, self.scope, serial);
        debug!(
            event = kind,
            serial = next.serial(),
            service_imports = next.service_import_count(),
            endpoint_slices = next.endpoint_slice_count(),
            "Cluster snapshot updated"
        );
        self.snapshot.store(Arc::new(next));

        if restarted {
            self.synced.store(true, Ordering::Release);
        }
    }
}

/// Unix seconds, kept strictly increasing across updates.
fn next_serial(previous: u32) -> u32 {
    let now = chrono::Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
    now.max(previous.wrapping_add(1))
}
