pub mod dns;

pub use dns::LookupServicesUseCase;
