pub mod connector;
pub mod controller;
pub mod snapshot_file;
pub mod state_cache;

pub use connector::SnapshotFileConnector;
pub use controller::{init_controller, Controller, ControllerState, ControllerTimeouts};
pub use snapshot_file::{SnapshotDocument, SnapshotFileClient};
pub use state_cache::ClusterStateCache;
