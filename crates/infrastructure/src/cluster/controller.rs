use super::state_cache::ClusterStateCache;
use crate::jobs::{Backoff, ClusterWatchJob};
use clusterset_dns_application::ports::{
    ClusterClient, ClusterConnector, ClusterStateReader, ClusterStateWriter,
};
use clusterset_dns_domain::{ClusterEvent, DomainError, MultiClusterConfig, WatchScope};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn, Span};

const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Constructed; nothing running.
    Starting,
    Running,
    Stopping,
    Stopped,
}

#[derive(Debug, Clone, Copy)]
pub struct ControllerTimeouts {
    /// Bound on the initial listing in [`Controller::start`].
    pub startup: Duration,
    /// Bound on waiting for the watch task in [`Controller::stop`].
    pub shutdown: Duration,
}

impl Default for ControllerTimeouts {
    fn default() -> Self {
        Self {
            startup: DEFAULT_STARTUP_TIMEOUT,
            shutdown: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

struct Running {
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

struct Inner {
    state: ControllerState,
    running: Option<Running>,
}

/// Owns the cluster watch and the cache it fills.
pub struct Controller {
    client: Arc<dyn ClusterClient>,
    cache: Arc<ClusterStateCache>,
    scope: WatchScope,
    span: Span,
    timeouts: ControllerTimeouts,
    backoff: Backoff,
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller").finish_non_exhaustive()
    }
}

/// Builds the controller for a parsed stanza without starting it.
///
/// The access descriptor is resolved through `connector` here so that a
/// malformed descriptor fails setup before any hook is registered.
pub fn init_controller(
    config: &MultiClusterConfig,
    connector: &dyn ClusterConnector,
    span: Span,
    timeouts: ControllerTimeouts,
) -> Result<Controller, DomainError> {
    let access = config.cluster_access();
    let client = connector.connect(&access)?;
    let scope = config.watch_scope();

    info!(
        parent: &span,
        access = %access,
        endpoints = scope.endpoints,
        "Cluster controller initialized"
    );

    Ok(Controller {
        client,
        cache: Arc::new(ClusterStateCache::new(scope)),
        scope,
        span,
        timeouts,
        backoff: Backoff::default(),
        inner: Mutex::new(Inner {
            state: ControllerState::Starting,
            running: None,
        }),
    })
}

impl Controller {
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Read-only view of the cache for the query path.
    pub fn reader(&self) -> Arc<dyn ClusterStateReader> {
        self.cache.clone()
    }

    pub async fn state(&self) -> ControllerState {
        self.inner.lock().await.state
    }

    /// Publishes an initial listing, then starts the watch task.
    pub async fn start(&self) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().await;
        if inner.state != ControllerState::Starting {
            return Err(DomainError::Lifecycle(format!(
                "cannot start controller in state {:?}",
                inner.state
            )));
        }

        info!(parent: &self.span, "Waiting for initial cluster sync");
        let listing = tokio::time::timeout(self.timeouts.startup, self.client.list(self.scope))
            .await
            .unwrap_or(Err(DomainError::StartupTimeout(
                self.timeouts.startup.as_secs(),
            )));
        let state = match listing {
            Ok(state) => state,
            Err(e) => {
                error!(parent: &self.span, error = %e, "Initial cluster sync failed");
                inner.state = ControllerState::Stopped;
                return Err(e);
            }
        };

        self.cache.apply(ClusterEvent::Restarted(state));

        let shutdown = CancellationToken::new();
        let task = ClusterWatchJob::new(self.client.clone(), self.cache.clone(), self.scope)
            .with_backoff(self.backoff.clone())
            .with_cancellation(shutdown.clone())
            .spawn(self.span.clone());

        inner.running = Some(Running { shutdown, task });
        inner.state = ControllerState::Running;

        let snapshot = self.cache.snapshot();
        info!(
            parent: &self.span,
            service_imports = snapshot.service_import_count(),
            endpoint_slices = snapshot.endpoint_slice_count(),
            "Cluster controller started"
        );
        Ok(())
    }

    /// Cancels the watch task and waits for it within the shutdown bound.
    /// A no-op unless running.
    pub async fn stop(&self) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().await;
        let Some(running) = inner.running.take() else {
            if inner.state == ControllerState::Starting {
                inner.state = ControllerState::Stopped;
            }
            return Ok(());
        };

        inner.state = ControllerState::Stopping;
        running.shutdown.cancel();

        let abort = running.task.abort_handle();
        match tokio::time::timeout(self.timeouts.shutdown, running.task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(parent: &self.span, error = %e, "Cluster watch task failed"),
            Err(_) => {
                warn!(
                    parent: &self.span,
                    timeout_secs = self.timeouts.shutdown.as_secs(),
                    "Cluster watch did not stop in time, aborting"
                );
                abort.abort();
            }
        }

        inner.state = ControllerState::Stopped;
        info!(parent: &self.span, "Cluster controller stopped");
        Ok(())
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        if let Some(running) = self.inner.get_mut().running.take() {
            running.shutdown.cancel();
        }
    }
}
