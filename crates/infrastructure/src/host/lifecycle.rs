use clusterset_dns_domain::DomainError;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use tracing::{debug, error};

type Hook = Box<dyn FnOnce() -> BoxFuture<'static, Result<(), DomainError>> + Send>;

/// Ordered one-shot startup and shutdown hooks.
#[derive(Default)]
pub struct Lifecycle {
    startup: Vec<Hook>,
    shutdown: Vec<Hook>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_startup<F, Fut>(&mut self, hook: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), DomainError>> + Send + 'static,
    {
        self.startup.push(Box::new(move || hook().boxed()));
    }

    pub fn on_shutdown<F, Fut>(&mut self, hook: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), DomainError>> + Send + 'static,
    {
        self.shutdown.push(Box::new(move || hook().boxed()));
    }

    pub fn startup_hooks(&self) -> usize {
        self.startup.len()
    }

    pub fn shutdown_hooks(&self) -> usize {
        self.shutdown.len()
    }

    /// Runs startup hooks in registration order. The first failure aborts
    /// and drops the hooks after it.
    pub async fn run_startup(&mut self) -> Result<(), DomainError> {
        let hooks = std::mem::take(&mut self.startup);
        let total = hooks.len();
        for (index, hook) in hooks.into_iter().enumerate() {
            debug!(hook = index + 1, total, "Running startup hook");
            hook().await?;
        }
        Ok(())
    }

    /// Runs every shutdown hook in registration order and returns the first
    /// failure, if any.
    pub async fn run_shutdown(&mut self) -> Result<(), DomainError> {
        let hooks = std::mem::take(&mut self.shutdown);
        let mut first_error = None;
        for hook in hooks {
            if let Err(e) = hook().await {
                error!(error = %e, "Shutdown hook failed");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
