pub mod config_set;
pub mod document;
pub mod error;
pub mod kubeconfig;
pub mod merge;

pub use config_set::{KubeConfigSet, KubeConfigSource};
pub use document::{ContextSpec, KubeconfigDocument, NamedCluster, NamedContext, NamedUser, DEFAULT_NAMESPACE};
pub use error::{KubeConfigError, Result};
pub use kubeconfig::KubeConfig;
pub use merge::{merge_by_name, merge_entries, NamedEntry};
