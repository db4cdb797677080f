mod cluster_client;
mod cluster_connector;
mod cluster_state;
mod handler;
mod nameserver_lookup;

pub use cluster_client::{ClusterClient, ClusterEventStream};
pub use cluster_connector::ClusterConnector;
pub use cluster_state::{ClusterStateReader, ClusterStateWriter};
pub use handler::{next_or_failure, Handler};
pub use nameserver_lookup::NameserverLookup;
