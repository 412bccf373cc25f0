use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum KubeConfigError {
    #[error("Context {0} not found")]
    ContextNotFound(String),
    #[error("Cluster {0} not found")]
    ClusterNotFound(String),
    #[error("User {0} not found")]
    UserNotFound(String),
    #[error("Kubeconfig {} has not been loaded", path.display())]
    NotLoaded { path: PathBuf },
    #[error("A kubeconfig set needs at least one kubeconfig")]
    EmptyConfigSet,
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Failed to serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl KubeConfigError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ContextNotFound(_) | Self::ClusterNotFound(_) | Self::UserNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, KubeConfigError>;
