use super::snapshot_file::SnapshotFileClient;
use clusterset_dns_application::ports::{ClusterClient, ClusterConnector};
use clusterset_dns_domain::{ClusterAccess, DomainError};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Resolves access descriptors to snapshot files.
///
/// In-cluster access uses the configured default file and its current
/// context. A kubeconfig descriptor names the file directly and may pin a
/// context.
pub struct SnapshotFileConnector {
    in_cluster_path: PathBuf,
    poll_interval: Duration,
}

impl SnapshotFileConnector {
    pub fn new(in_cluster_path: impl Into<PathBuf>, poll_interval: Duration) -> Self {
        Self {
            in_cluster_path: in_cluster_path.into(),
            poll_interval,
        }
    }
}

impl ClusterConnector for SnapshotFileConnector {
    fn connect(&self, access: &ClusterAccess) -> Result<Arc<dyn ClusterClient>, DomainError> {
        access.validate()?;
        let client = match access {
            ClusterAccess::InCluster => {
                SnapshotFileClient::new(self.in_cluster_path.clone(), None, self.poll_interval)
            }
            ClusterAccess::Kubeconfig { path, context } => {
                SnapshotFileClient::new(path.clone(), context.clone(), self.poll_interval)
            }
        };
        Ok(Arc::new(client))
    }
}
