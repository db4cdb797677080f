pub mod record_type;
pub mod service_record;

pub use record_type::RecordType;
pub use service_record::{LookupResult, RecordData, ServiceRecord};
