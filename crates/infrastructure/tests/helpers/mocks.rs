#![allow(dead_code)]

use async_trait::async_trait;
use clusterset_dns_application::ports::{
    ClusterClient, ClusterConnector, ClusterEventStream, Handler, NameserverLookup,
};
use clusterset_dns_domain::{
    ClusterAccess, ClusterEvent, ClusterState, DomainError, WatchScope,
};
use clusterset_dns_infrastructure::dns::ResponseBuilder;
use futures::stream::{self, StreamExt};
use hickory_proto::op::{Message, ResponseCode};
use std::collections::VecDeque;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Script = Vec<Result<ClusterEvent, DomainError>>;

/// Scripted cluster client. Each `watch` call plays the next script and
/// then stays open; with no script left the stream is idle.
pub struct MockClusterClient {
    listing: Mutex<Result<ClusterState, DomainError>>,
    list_delay: Mutex<Option<Duration>>,
    scripts: Mutex<VecDeque<Script>>,
    list_calls: AtomicUsize,
    watch_calls: AtomicUsize,
}

impl MockClusterClient {
    pub fn new(listing: ClusterState) -> Self {
        Self {
            listing: Mutex::new(Ok(listing)),
            list_delay: Mutex::new(None),
            scripts: Mutex::new(VecDeque::new()),
            list_calls: AtomicUsize::new(0),
            watch_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        let client = Self::new(ClusterState::default());
        *client.listing.lock().unwrap() = Err(error);
        client
    }

    pub fn with_list_delay(self, delay: Duration) -> Self {
        *self.list_delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn push_watch(&self, script: Script) {
        self.scripts.lock().unwrap().push_back(script);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn watch_calls(&self) -> usize {
        self.watch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClusterClient for MockClusterClient {
    async fn list(&self, _scope: WatchScope) -> Result<ClusterState, DomainError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.list_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.listing.lock().unwrap().clone()
    }

    fn watch(&self, _scope: WatchScope) -> ClusterEventStream {
        self.watch_calls.fetch_add(1, Ordering::SeqCst);
        let script = self.scripts.lock().unwrap().pop_front().unwrap_or_default();
        stream::iter(script).chain(stream::pending()).boxed()
    }
}

/// Connector handing out one shared client.
pub struct MockConnector {
    client: Arc<MockClusterClient>,
    accesses: Mutex<Vec<ClusterAccess>>,
}

impl MockConnector {
    pub fn new(client: Arc<MockClusterClient>) -> Self {
        Self {
            client,
            accesses: Mutex::new(Vec::new()),
        }
    }

    pub fn accesses(&self) -> Vec<ClusterAccess> {
        self.accesses.lock().unwrap().clone()
    }
}

impl ClusterConnector for MockConnector {
    fn connect(&self, access: &ClusterAccess) -> Result<Arc<dyn ClusterClient>, DomainError> {
        access.validate()?;
        self.accesses.lock().unwrap().push(access.clone());
        Ok(self.client.clone())
    }
}

/// Last handler of a test chain. Answers NOTIMP so tests can tell that a
/// query reached it.
#[derive(Default)]
pub struct TerminalHandler {
    calls: AtomicUsize,
}

impl TerminalHandler {
    pub const MARKER: ResponseCode = ResponseCode::NotImp;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Handler for TerminalHandler {
    fn name(&self) -> &'static str {
        "terminal"
    }

    async fn serve_dns(&self, request: &Message) -> Result<Message, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ResponseBuilder::error(request, Self::MARKER))
    }
}

/// Nameserver lookup that records every call.
#[derive(Default)]
pub struct CountingNameservers {
    addrs: Vec<IpAddr>,
    calls: AtomicUsize,
}

impl CountingNameservers {
    pub fn new(addrs: Vec<IpAddr>) -> Self {
        Self {
            addrs,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NameserverLookup for CountingNameservers {
    fn ns_addrs(&self, _zone: &str) -> Result<Vec<IpAddr>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.addrs.clone())
    }
}

/// Handler that always fails.
pub struct FailingHandler;

#[async_trait]
impl Handler for FailingHandler {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn serve_dns(&self, _request: &Message) -> Result<Message, DomainError> {
        Err(DomainError::ResolutionFailed("upstream gone".to_string()))
    }
}
