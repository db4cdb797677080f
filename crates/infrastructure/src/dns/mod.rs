pub mod handler;
pub mod kubernetes_stub;
pub mod record_type_map;
pub mod response;
pub mod server;

pub use handler::MultiCluster;
pub use kubernetes_stub::KubernetesStub;
pub use record_type_map::RecordTypeMapper;
pub use response::ResponseBuilder;
pub use server::DnsServer;
