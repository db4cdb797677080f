use async_trait::async_trait;
use clusterset_dns_application::ports::{ClusterClient, ClusterEventStream};
use clusterset_dns_domain::{ClusterEvent, ClusterState, DomainError, WatchScope};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::debug;

/// On-disk cluster-set state, one [`ClusterState`] per context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub current_context: Option<String>,
    #[serde(default)]
    pub contexts: BTreeMap<String, ClusterState>,
}

/// [`ClusterClient`] backed by a JSON snapshot document.
///
/// The file is read on every `list`; `watch` polls its modification time
/// and re-lists when it changes.
#[derive(Debug, Clone)]
pub struct SnapshotFileClient {
    path: PathBuf,
    context: Option<String>,
    poll_interval: Duration,
}

impl SnapshotFileClient {
    pub fn new(path: impl Into<PathBuf>, context: Option<String>, poll_interval: Duration) -> Self {
        Self {
            path: path.into(),
            context,
            poll_interval,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<SnapshotDocument, DomainError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DomainError::ClusterAccess(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| DomainError::ClusterAccess(format!("{}: {}", self.path.display(), e)))
    }

    async fn load(&self, scope: WatchScope) -> Result<ClusterState, DomainError> {
        let mut document = self.read_document().await?;
        let context = self
            .context
            .clone()
            .or(document.current_context.take())
            .ok_or_else(|| {
                DomainError::ClusterAccess(format!(
                    "{}: no context selected",
                    self.path.display()
                ))
            })?;
        let mut state = document.contexts.remove(&context).ok_or_else(|| {
            DomainError::ClusterAccess(format!(
                "{}: context '{}' not found",
                self.path.display(),
                context
            ))
        })?;
        if !scope.endpoints {
            state.endpoint_slices.clear();
        }
        Ok(state)
    }

    async fn fingerprint(&self) -> Result<(SystemTime, u64), DomainError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| DomainError::WatchFailed(format!("{}: {}", self.path.display(), e)))?;
        let modified = metadata
            .modified()
            .map_err(|e| DomainError::WatchFailed(format!("{}: {}", self.path.display(), e)))?;
        Ok((modified, metadata.len()))
    }
}

struct WatchCursor {
    client: SnapshotFileClient,
    scope: WatchScope,
    seen: Option<(SystemTime, u64)>,
    failed: bool,
}

#[async_trait]
impl ClusterClient for SnapshotFileClient {
    async fn list(&self, scope: WatchScope) -> Result<ClusterState, DomainError> {
        self.load(scope).await
    }

    fn watch(&self, scope: WatchScope) -> ClusterEventStream {
        let cursor = WatchCursor {
            client: self.clone(),
            scope,
            seen: None,
            failed: false,
        };

        futures::stream::unfold(cursor, |mut cursor| async move {
            if cursor.failed {
                return None;
            }
            loop {
                if cursor.seen.is_some() {
                    tokio::time::sleep(cursor.client.poll_interval).await;
                }
                let fingerprint = match cursor.client.fingerprint().await {
                    Ok(fingerprint) => fingerprint,
                    Err(e) => {
                        cursor.failed = true;
                        return Some((Err(e), cursor));
                    }
                };
                if cursor.seen == Some(fingerprint) {
                    continue;
                }
                debug!(path = %cursor.client.path.display(), "Snapshot file changed");
                return match cursor.client.load(cursor.scope).await {
                    Ok(state) => {
                        cursor.seen = Some(fingerprint);
                        Some((Ok(ClusterEvent::Restarted(state)), cursor))
                    }
                    Err(e) => {
                        cursor.failed = true;
                        Some((Err(e), cursor))
                    }
                };
            }
        })
        .boxed()
    }
}
