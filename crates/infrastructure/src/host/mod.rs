//! Minimal server-block host: directive tokens, the handler chain and
//! startup/shutdown hooks.
pub mod dispenser;
pub mod lifecycle;
pub mod registry;

pub use dispenser::Dispenser;
pub use lifecycle::Lifecycle;
pub use registry::{HandlerRegistry, ServerBlock, ServerInstance};
