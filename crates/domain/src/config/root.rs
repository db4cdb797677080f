use serde::{Deserialize, Serialize};

use super::cluster::ClusterConfig;
use super::errors::ConfigError;
use super::kubernetes::KubernetesConfig;
use super::logging::LoggingConfig;
use super::multicluster::MultiClusterSection;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "clusterset-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/clusterset-dns/config.toml";

/// Main configuration structure for ClusterSet DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener and server block settings
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// The `multicluster` plugin stanza
    #[serde(default)]
    pub multicluster: MultiClusterSection,

    #[serde(default)]
    pub kubernetes: KubernetesConfig,

    /// Cluster state source and controller timeouts
    #[serde(default)]
    pub cluster: ClusterConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. clusterset-dns.toml in current directory
    /// 3. /etc/clusterset-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(state_file) = overrides.state_file {
            self.cluster.state_file = state_file;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::invalid("server.dns_port", "must not be 0"));
        }
        if self.multicluster.stanza.trim().is_empty() {
            return Err(ConfigError::invalid("multicluster.stanza", "is empty"));
        }
        if self.cluster.poll_interval_secs == 0 {
            return Err(ConfigError::invalid(
                "cluster.poll_interval_secs",
                "must not be 0",
            ));
        }
        if !self.logging.has_known_level() {
            return Err(ConfigError::invalid(
                "logging.level",
                format!("unknown level '{}'", self.logging.level),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub state_file: Option<String>,
    pub log_level: Option<String>,
}
