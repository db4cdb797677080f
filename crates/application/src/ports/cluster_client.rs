use async_trait::async_trait;
use clusterset_dns_domain::{ClusterEvent, ClusterState, DomainError, WatchScope};
use futures::stream::BoxStream;

pub type ClusterEventStream = BoxStream<'static, Result<ClusterEvent, DomainError>>;

/// Access to one cluster set's control plane.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Full listing of the resources in `scope`.
    async fn list(&self, scope: WatchScope) -> Result<ClusterState, DomainError>;

    /// Change stream for the resources in `scope`. An error item or the end
    /// of the stream means the watch must be re-established.
    fn watch(&self, scope: WatchScope) -> ClusterEventStream;
}
