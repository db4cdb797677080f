//! ClusterSet DNS Domain Layer
pub mod cluster_access;
pub mod cluster_snapshot;
pub mod cluster_state;
pub mod config;
pub mod dns_record;
pub mod endpoint_slice;
pub mod errors;
pub mod fallthrough;
pub mod multicluster_config;
pub mod query_name;
pub mod service_import;
pub mod zones;

pub use cluster_access::ClusterAccess;
pub use cluster_snapshot::ClusterSnapshot;
pub use cluster_state::{ClusterEvent, ClusterState, ObjectKey, WatchScope};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::{LookupResult, RecordData, RecordType, ServiceRecord};
pub use endpoint_slice::{Endpoint, EndpointSlice};
pub use errors::DomainError;
pub use fallthrough::Fallthrough;
pub use multicluster_config::MultiClusterConfig;
pub use query_name::{parse_query_name, QueryTarget};
pub use service_import::{Protocol, ServiceImport, ServiceImportKind, ServicePort};
pub use zones::{normalize_zone, Zones};
