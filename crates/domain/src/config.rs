pub mod cluster;
pub mod errors;
pub mod kubernetes;
pub mod logging;
pub mod multicluster;
pub mod root;
pub mod server;

pub use cluster::ClusterConfig;
pub use errors::ConfigError;
pub use kubernetes::KubernetesConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use multicluster::MultiClusterSection;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
