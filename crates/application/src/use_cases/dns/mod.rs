mod lookup_services;

pub use lookup_services::{LookupServicesUseCase, RECORD_TTL};
