use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("plugin/{plugin}: {source}")]
    Plugin {
        plugin: String,
        source: Box<DomainError>,
    },

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("line {line}: Wrong argument count or unexpected line ending after '{directive}'")]
    ArgumentCount { directive: String, line: usize },

    #[error("line {line}: unknown property '{property}'")]
    UnknownProperty { property: String, line: usize },

    #[error("line {line}: {message}")]
    Parse { message: String, line: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0} plugin not loaded")]
    DependencyNotLoaded(String),

    #[error("{plugin} plugin does not provide {capability}")]
    DependencyMissingCapability { plugin: String, capability: String },

    #[error("Cluster access error: {0}")]
    ClusterAccess(String),

    #[error("Cluster watch error: {0}")]
    WatchFailed(String),

    #[error("Initial cluster sync did not complete within {0}s")]
    StartupTimeout(u64),

    #[error("Controller lifecycle error: {0}")]
    Lifecycle(String),

    #[error("Nameserver lookup is not bound")]
    NameserverLookupUnbound,

    #[error("Nameserver lookup is already bound")]
    NameserverLookupAlreadyBound,

    #[error("Domain not found (NXDOMAIN)")]
    NxDomain,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Resolution failed: {0}")]
    ResolutionFailed(String),

    #[error("No next plugin found after {0}")]
    NoNextHandler(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl DomainError {
    /// Wraps an error with the name of the plugin that produced it.
    pub fn plugin(plugin: &str, source: DomainError) -> Self {
        DomainError::Plugin {
            plugin: plugin.to_string(),
            source: Box::new(source),
        }
    }

    /// True for outcomes that mean "this name does not exist here".
    pub fn is_name_error(&self) -> bool {
        match self {
            DomainError::NxDomain | DomainError::InvalidRequest(_) => true,
            DomainError::Plugin { source, .. } => source.is_name_error(),
            _ => false,
        }
    }

    pub fn is_config_error(&self) -> bool {
        match self {
            DomainError::ArgumentCount { .. }
            | DomainError::UnknownProperty { .. }
            | DomainError::Parse { .. }
            | DomainError::ConfigError(_) => true,
            DomainError::Plugin { source, .. } => source.is_config_error(),
            _ => false,
        }
    }

    /// Strips any plugin wrapping and returns the underlying error.
    pub fn root(&self) -> &DomainError {
        match self {
            DomainError::Plugin { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::IoError(e.to_string())
    }
}
