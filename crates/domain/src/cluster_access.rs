use super::errors::DomainError;
use std::fmt;
use std::path::{Path, PathBuf};

/// How the controller reaches a cluster's control plane.
///
/// Loading is deferred: building the descriptor never touches the file
/// system, the connector reads it when the controller starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClusterAccess {
    #[default]
    InCluster,
    Kubeconfig {
        path: PathBuf,
        context: Option<String>,
    },
}

impl ClusterAccess {
    pub fn kubeconfig(path: impl Into<PathBuf>, context: Option<String>) -> Self {
        ClusterAccess::Kubeconfig {
            path: path.into(),
            context,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            ClusterAccess::InCluster => None,
            ClusterAccess::Kubeconfig { path, .. } => Some(path),
        }
    }

    pub fn context(&self) -> Option<&str> {
        match self {
            ClusterAccess::InCluster => None,
            ClusterAccess::Kubeconfig { context, .. } => context.as_deref(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            ClusterAccess::InCluster => Ok(()),
            ClusterAccess::Kubeconfig { path, context } => {
                if path.as_os_str().is_empty() {
                    return Err(DomainError::ClusterAccess(
                        "kubeconfig path is empty".to_string(),
                    ));
                }
                if context.as_deref().is_some_and(|c| c.trim().is_empty()) {
                    return Err(DomainError::ClusterAccess(
                        "kubeconfig context is empty".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ClusterAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterAccess::InCluster => write!(f, "in-cluster"),
            ClusterAccess::Kubeconfig {
                path,
                context: Some(context),
            } => write!(f, "kubeconfig {} (context {})", path.display(), context),
            ClusterAccess::Kubeconfig {
                path,
                context: None,
            } => write!(f, "kubeconfig {}", path.display()),
        }
    }
}
