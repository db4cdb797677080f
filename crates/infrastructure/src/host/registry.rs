use super::lifecycle::Lifecycle;
use crate::dns::DnsServer;
use clusterset_dns_application::ports::Handler;
use clusterset_dns_domain::DomainError;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

type PluginFactory = Box<dyn FnOnce(Option<Arc<dyn Handler>>) -> Arc<dyn Handler> + Send>;

/// Built handlers of one server block, looked up by name.
///
/// Empty until the chain is built; startup hooks run after that.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: OnceLock<Vec<Arc<dyn Handler>>>,
}

impl HandlerRegistry {
    pub fn handler(&self, name: &str) -> Option<Arc<dyn Handler>> {
        self.handlers
            .get()?
            .iter()
            .find(|h| h.name() == name)
            .cloned()
    }
}

/// Setup context for one server block: its keys (origins), the plugin
/// factories in chain order and the lifecycle hooks.
pub struct ServerBlock {
    keys: Vec<String>,
    factories: Vec<PluginFactory>,
    registry: Arc<HandlerRegistry>,
    lifecycle: Lifecycle,
}

/// A built server block.
pub struct ServerInstance {
    pub chain: Arc<dyn Handler>,
    pub registry: Arc<HandlerRegistry>,
    pub lifecycle: Lifecycle,
}

impl ServerBlock {
    pub fn new<S: Into<String>>(keys: impl IntoIterator<Item = S>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            factories: Vec::new(),
            registry: Arc::new(HandlerRegistry::default()),
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Appends a plugin to the chain. The factory receives the handler that
    /// follows it, or `None` for the last one.
    pub fn add_plugin<F>(&mut self, factory: F)
    where
        F: FnOnce(Option<Arc<dyn Handler>>) -> Arc<dyn Handler> + Send + 'static,
    {
        self.factories.push(Box::new(factory));
    }

    pub fn plugin_count(&self) -> usize {
        self.factories.len()
    }

    pub fn lifecycle(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    /// Handle resolving built handlers; usable from hooks.
    pub fn registry(&self) -> Arc<HandlerRegistry> {
        self.registry.clone()
    }

    /// Compiles the chain last-to-first.
    pub fn build(self) -> Result<ServerInstance, DomainError> {
        let mut next: Option<Arc<dyn Handler>> = None;
        let mut handlers = Vec::with_capacity(self.factories.len());
        for factory in self.factories.into_iter().rev() {
            let handler = factory(next.take());
            handlers.push(handler.clone());
            next = Some(handler);
        }
        let chain = next.ok_or_else(|| {
            DomainError::ConfigError("server block has no plugins".to_string())
        })?;

        handlers.reverse();
        if self.registry.handlers.set(handlers).is_err() {
            return Err(DomainError::ConfigError(
                "server block already built".to_string(),
            ));
        }

        Ok(ServerInstance {
            chain,
            registry: self.registry,
            lifecycle: self.lifecycle,
        })
    }
}

impl ServerInstance {
    /// Runs the startup hooks, serves on `addr` until `stop` resolves, then
    /// runs the shutdown hooks. Shutdown hooks also run when startup or
    /// binding fails.
    pub async fn run<F>(mut self, addr: SocketAddr, stop: F) -> Result<(), DomainError>
    where
        F: Future<Output = ()>,
    {
        if let Err(e) = self.lifecycle.run_startup().await {
            error!(error = %e, "Startup failed");
            self.shutdown_after_failure().await;
            return Err(e);
        }

        let dns = match DnsServer::bind(self.chain.clone(), addr).await {
            Ok(dns) => dns,
            Err(e) => {
                error!(bind_address = %addr, error = %e, "Failed to bind DNS server");
                self.shutdown_after_failure().await;
                return Err(e);
            }
        };
        let shutdown = CancellationToken::new();
        let serving = tokio::spawn(dns.serve(shutdown.clone()));

        stop.await;
        info!("Shutdown signal received");

        shutdown.cancel();
        if let Err(e) = serving.await {
            error!(error = %e, "DNS server task failed");
        }
        self.lifecycle.run_shutdown().await
    }

    async fn shutdown_after_failure(&mut self) {
        if let Err(e) = self.lifecycle.run_shutdown().await {
            error!(error = %e, "Shutdown after failed start failed");
        }
    }
}
