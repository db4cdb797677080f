use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClusterConfig {
    /// Cluster state document used for in-cluster access.
    #[serde(default = "default_state_file")]
    pub state_file: String,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_startup_timeout_secs")]
    pub startup_timeout_secs: u64,

    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            poll_interval_secs: default_poll_interval_secs(),
            startup_timeout_secs: default_startup_timeout_secs(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
        }
    }
}

fn default_state_file() -> String {
    "/var/run/clusterset-dns/state.json".to_string()
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_startup_timeout_secs() -> u64 {
    5
}

fn default_shutdown_timeout_secs() -> u64 {
    5
}
