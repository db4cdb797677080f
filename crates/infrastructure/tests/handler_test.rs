mod helpers;

use clusterset_dns_application::ports::{ClusterStateReader, ClusterStateWriter, Handler};
use clusterset_dns_application::services::NameserverBinding;
use clusterset_dns_application::use_cases::LookupServicesUseCase;
use clusterset_dns_domain::{ClusterEvent, DomainError, MultiClusterConfig, WatchScope, Zones};
use clusterset_dns_infrastructure::cluster::ClusterStateCache;
use clusterset_dns_infrastructure::dns::MultiCluster;
use helpers::{ip, query, sample_state, CountingNameservers, TerminalHandler};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, RecordType};
use std::sync::Arc;

struct Fixture {
    handler: MultiCluster,
    terminal: Arc<TerminalHandler>,
    cache: Arc<ClusterStateCache>,
    binding: NameserverBinding,
    nameservers: Arc<CountingNameservers>,
}

impl Fixture {
    /// Binds the counting lookup the way the startup hook would.
    fn bind_nameservers(&self) {
        self.binding.bind(self.nameservers.clone()).unwrap();
    }
}

fn fixture(fallthrough: Option<&[&str]>) -> Fixture {
    let mut config = MultiClusterConfig::new(Zones::from_args(&["clusterset.local"]));
    if let Some(zones) = fallthrough {
        config.fallthrough.set_zones_from_args(zones);
    }

    let cache = Arc::new(ClusterStateCache::new(WatchScope::default()));
    cache.apply(ClusterEvent::Restarted(sample_state()));
    let binding = NameserverBinding::new();
    let lookup = Arc::new(LookupServicesUseCase::new(cache.clone(), binding.clone()));
    let terminal = Arc::new(TerminalHandler::new());
    let handler =
        MultiCluster::new(&config, lookup).with_next(Some(terminal.clone() as Arc<dyn Handler>));

    Fixture {
        handler,
        terminal,
        cache,
        binding,
        nameservers: Arc::new(CountingNameservers::new(vec![ip("10.96.0.10")])),
    }
}

#[tokio::test]
async fn test_out_of_zone_is_forwarded_unchanged() {
    let f = fixture(None);
    f.bind_nameservers();

    let out_of_zone = [
        ("www.example.org.", RecordType::A),
        ("example.org.", RecordType::NS),
    ];

    for (name, record_type) in out_of_zone {
        let request = query(name, record_type);
        let response = f.handler.serve_dns(&request).await.unwrap();

        assert_eq!(response.response_code(), TerminalHandler::MARKER);
        assert_eq!(response.queries(), request.queries());
    }
    assert_eq!(f.terminal.calls(), 2);
    assert_eq!(f.nameservers.calls(), 0);
}

#[tokio::test]
async fn test_answer_is_authoritative_and_not_forwarded() {
    let f = fixture(Some(&[]));
    f.bind_nameservers();

    let response = f
        .handler
        .serve_dns(&query("web.prod.svc.clusterset.local.", RecordType::A))
        .await
        .unwrap();

    assert_eq!(response.response_code(), ResponseCode::NoError);
    assert!(response.authoritative());
    assert_eq!(response.id(), 4242);
    assert_eq!(response.answers().len(), 1);
    assert_eq!(
        response.answers()[0].data(),
        &RData::A(A("10.0.0.1".parse().unwrap()))
    );
    assert_eq!(response.answers()[0].ttl(), 5);
    assert_eq!(f.terminal.calls(), 0);
    assert_eq!(f.nameservers.calls(), 0);
}

#[tokio::test]
async fn test_headless_srv_has_glue() {
    let f = fixture(None);

    let response = f
        .handler
        .serve_dns(&query(
            "_pg._tcp.db.prod.svc.clusterset.local.",
            RecordType::SRV,
        ))
        .await
        .unwrap();

    assert_eq!(response.answers().len(), 2);
    assert_eq!(response.additionals().len(), 2);
}

#[tokio::test]
async fn test_name_error_without_fallthrough_is_nxdomain_with_soa() {
    let f = fixture(None);

    let response = f
        .handler
        .serve_dns(&query("nope.prod.svc.clusterset.local.", RecordType::A))
        .await
        .unwrap();

    assert_eq!(response.response_code(), ResponseCode::NXDomain);
    assert!(response.answers().is_empty());
    assert_eq!(response.name_servers().len(), 1);
    assert_eq!(response.name_servers()[0].record_type(), RecordType::SOA);
    assert_eq!(f.terminal.calls(), 0);
}

#[tokio::test]
async fn test_name_error_with_fallthrough_is_forwarded_once() {
    let f = fixture(Some(&["clusterset.local"]));

    let response = f
        .handler
        .serve_dns(&query("nope.prod.svc.clusterset.local.", RecordType::A))
        .await
        .unwrap();

    assert_eq!(response.response_code(), TerminalHandler::MARKER);
    assert_eq!(f.terminal.calls(), 1);
}

#[tokio::test]
async fn test_fallthrough_limited_to_listed_zones() {
    let f = fixture(Some(&["other.local"]));

    let response = f
        .handler
        .serve_dns(&query("nope.prod.svc.clusterset.local.", RecordType::A))
        .await
        .unwrap();

    assert_eq!(response.response_code(), ResponseCode::NXDomain);
    assert_eq!(f.terminal.calls(), 0);
}

#[tokio::test]
async fn test_malformed_name_is_nxdomain() {
    let f = fixture(None);

    let response = f
        .handler
        .serve_dns(&query("a.b.c.web.prod.svc.clusterset.local.", RecordType::A))
        .await
        .unwrap();

    assert_eq!(response.response_code(), ResponseCode::NXDomain);
}

#[tokio::test]
async fn test_existing_name_without_data_is_nodata() {
    let f = fixture(None);

    let response = f
        .handler
        .serve_dns(&query("web.prod.svc.clusterset.local.", RecordType::TXT))
        .await
        .unwrap();

    assert_eq!(response.response_code(), ResponseCode::NoError);
    assert!(response.answers().is_empty());
    assert_eq!(response.name_servers().len(), 1);
}

#[tokio::test]
async fn test_zone_transfer_refused() {
    let f = fixture(Some(&[]));

    for record_type in [RecordType::AXFR, RecordType::IXFR] {
        let response = f
            .handler
            .serve_dns(&query("clusterset.local.", record_type))
            .await
            .unwrap();
        assert_eq!(response.response_code(), ResponseCode::Refused);
    }
    assert_eq!(f.terminal.calls(), 0);
}

#[tokio::test]
async fn test_apex_ns_unbound_is_servfail() {
    let f = fixture(None);

    let response = f
        .handler
        .serve_dns(&query("clusterset.local.", RecordType::NS))
        .await
        .unwrap();

    assert_eq!(response.response_code(), ResponseCode::ServFail);
}

#[tokio::test]
async fn test_apex_ns_unbound_with_fallthrough_is_forwarded() {
    let f = fixture(Some(&[]));

    let response = f
        .handler
        .serve_dns(&query("clusterset.local.", RecordType::NS))
        .await
        .unwrap();

    assert_eq!(response.response_code(), TerminalHandler::MARKER);
}

#[tokio::test]
async fn test_apex_ns_after_binding() {
    let f = fixture(None);
    f.bind_nameservers();

    let response = f
        .handler
        .serve_dns(&query("clusterset.local.", RecordType::NS))
        .await
        .unwrap();

    assert_eq!(response.response_code(), ResponseCode::NoError);
    assert_eq!(response.answers()[0].record_type(), RecordType::NS);
    assert_eq!(
        response.additionals()[0].data(),
        &RData::A(A("10.96.0.10".parse().unwrap()))
    );
    assert_eq!(f.nameservers.calls(), 1);
}

#[tokio::test]
async fn test_name_error_before_sync_is_servfail() {
    let config = MultiClusterConfig::new(Zones::from_args(&["clusterset.local"]));
    let cache = Arc::new(ClusterStateCache::new(WatchScope::default()));
    let lookup = Arc::new(LookupServicesUseCase::new(
        cache.clone(),
        NameserverBinding::new(),
    ));
    let handler = MultiCluster::new(&config, lookup);

    let response = handler
        .serve_dns(&query("web.prod.svc.clusterset.local.", RecordType::A))
        .await
        .unwrap();

    assert!(!cache.has_synced());
    assert_eq!(response.response_code(), ResponseCode::ServFail);
}

#[tokio::test]
async fn test_forward_without_next_fails() {
    let config = MultiClusterConfig::new(Zones::from_args(&["clusterset.local"]));
    let cache = Arc::new(ClusterStateCache::new(WatchScope::default()));
    let lookup = Arc::new(LookupServicesUseCase::new(cache, NameserverBinding::new()));
    let handler = MultiCluster::new(&config, lookup);

    let result = handler
        .serve_dns(&query("example.org.", RecordType::A))
        .await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::NoNextHandler("multicluster".to_string())
    );
}

#[tokio::test]
async fn test_queries_see_updates_from_cache() {
    let f = fixture(None);
    f.cache.apply(ClusterEvent::ServiceImportDeleted(
        clusterset_dns_domain::ObjectKey::new("prod", "web"),
    ));

    let response = f
        .handler
        .serve_dns(&query("web.prod.svc.clusterset.local.", RecordType::A))
        .await
        .unwrap();

    assert_eq!(response.response_code(), ResponseCode::NXDomain);
}
