mod cluster_watch_job;

pub use cluster_watch_job::{Backoff, ClusterWatchJob};
