//! ClusterSet DNS Infrastructure Layer
pub mod cluster;
pub mod dns;
pub mod host;
pub mod jobs;
pub mod plugin;
