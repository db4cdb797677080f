use clusterset_dns_application::ports::{ClusterClient, ClusterStateWriter};
use clusterset_dns_domain::WatchScope;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument, Span};

const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(250);
const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Exponential reconnect delay with up to 25% added jitter.
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    current: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max,
            current: initial,
        }
    }

    /// Delay to wait now; doubles the following one.
    pub fn next_delay(&mut self) -> Duration {
        let base = self.current;
        self.current = (self.current * 2).min(self.max);
        let jitter_ms = base.as_millis() as u64 / 4;
        base + Duration::from_millis(fastrand::u64(0..=jitter_ms))
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_BACKOFF)
    }
}

/// Keeps the cluster cache current by applying watch events in order,
/// re-establishing the watch whenever it fails or ends.
pub struct ClusterWatchJob {
    client: Arc<dyn ClusterClient>,
    store: Arc<dyn ClusterStateWriter>,
    scope: WatchScope,
    backoff: Backoff,
    shutdown: CancellationToken,
}

impl ClusterWatchJob {
    pub fn new(
        client: Arc<dyn ClusterClient>,
        store: Arc<dyn ClusterStateWriter>,
        scope: WatchScope,
    ) -> Self {
        Self {
            client,
            store,
            scope,
            backoff: Backoff::default(),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn spawn(self, span: Span) -> JoinHandle<()> {
        tokio::spawn(self.run().instrument(span))
    }

    pub async fn run(mut self) {
        info!(endpoints = self.scope.endpoints, "Starting cluster watch job");

        loop {
            let mut events = self.client.watch(self.scope);
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ClusterWatchJob: shutting down");
                        return;
                    }
                    item = events.next() => match item {
                        Some(Ok(event)) => {
                            debug!(event = event.kind(), "Applying cluster event");
                            self.store.apply(event);
                            self.backoff.reset();
                        }
                        Some(Err(e)) => {
                            warn!(error = %e, "Cluster watch failed");
                            break;
                        }
                        None => {
                            warn!("Cluster watch stream ended");
                            break;
                        }
                    }
                }
            }

            let delay = self.backoff.next_delay();
            debug!(delay_ms = delay.as_millis() as u64, "Re-establishing cluster watch");
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("ClusterWatchJob: shutting down");
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}
