use clusterset_dns_domain::{ClusterEvent, ClusterSnapshot};
use std::sync::Arc;

/// Read side of the watched cluster state, held by the query path.
pub trait ClusterStateReader: Send + Sync {
    fn snapshot(&self) -> Arc<ClusterSnapshot>;

    /// True once a full listing has been applied.
    fn has_synced(&self) -> bool;
}

/// Write side of the watched cluster state. Only the watch subsystem holds
/// one.
pub trait ClusterStateWriter: Send + Sync {
    fn apply(&self, event: ClusterEvent);
}
