use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};

use crate::merge::NamedEntry;

pub const DEFAULT_NAMESPACE: &str = "default";

/// A single kubeconfig file.
///
/// Cluster and user specs, preferences, extensions and any unknown keys are
/// carried as raw YAML so a load/save cycle never drops data this crate does
/// not understand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubeconfigDocument {
    #[serde(rename = "apiVersion", default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferences: Mapping,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clusters: Vec<NamedCluster>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<NamedUser>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contexts: Vec<NamedContext>,
    /// Empty when the file names no current context.
    #[serde(rename = "current-context", default, deserialize_with = "null_as_default")]
    pub current_context: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<Value>,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Default for KubeconfigDocument {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            preferences: Mapping::new(),
            clusters: Vec::new(),
            users: Vec::new(),
            contexts: Vec::new(),
            current_context: String::new(),
            extensions: Vec::new(),
            extra: Mapping::new(),
        }
    }
}

impl KubeconfigDocument {
    pub fn from_yaml(data: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(data)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn has_context(&self, name: &str) -> bool {
        self.contexts.iter().any(|c| c.name == name)
    }

    pub fn find_context(&self, name: &str) -> Option<&NamedContext> {
        self.contexts.iter().find(|c| c.name == name)
    }

    pub fn find_context_mut(&mut self, name: &str) -> Option<&mut NamedContext> {
        self.contexts.iter_mut().find(|c| c.name == name)
    }

    pub fn find_cluster(&self, name: &str) -> Option<&NamedCluster> {
        self.clusters.iter().find(|c| c.name == name)
    }

    pub fn find_user(&self, name: &str) -> Option<&NamedUser> {
        self.users.iter().find(|u| u.name == name)
    }

    /// Sets the namespace on every context called `context`. Returns whether any matched.
    pub(crate) fn set_context_namespace(&mut self, context: &str, namespace: &str) -> bool {
        let mut matched = false;
        for entry in self.contexts.iter_mut().filter(|c| c.name == context) {
            entry.context.namespace = Some(namespace.to_string());
            matched = true;
        }
        matched
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCluster {
    pub name: String,
    #[serde(default)]
    pub cluster: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedUser {
    pub name: String,
    #[serde(default)]
    pub user: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedContext {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub context: ContextSpec,
}

/// Binding of a cluster, a user and an optional namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl ContextSpec {
    pub fn namespace_or_default(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }
}

impl NamedEntry for NamedCluster {
    type Spec = Value;

    fn name(&self) -> &str {
        &self.name
    }

    fn into_parts(self) -> (String, Value) {
        (self.name, self.cluster)
    }

    fn from_parts(name: String, cluster: Value) -> Self {
        Self { name, cluster }
    }
}

impl NamedEntry for NamedUser {
    type Spec = Value;

    fn name(&self) -> &str {
        &self.name
    }

    fn into_parts(self) -> (String, Value) {
        (self.name, self.user)
    }

    fn from_parts(name: String, user: Value) -> Self {
        Self { name, user }
    }
}

impl NamedEntry for NamedContext {
    type Spec = ContextSpec;

    fn name(&self) -> &str {
        &self.name
    }

    fn into_parts(self) -> (String, ContextSpec) {
        (self.name, self.context)
    }

    fn from_parts(name: String, context: ContextSpec) -> Self {
        Self { name, context }
    }
}

fn default_api_version() -> String {
    "v1".into()
}

fn default_kind() -> String {
    "Config".into()
}

// kubectl writes `clusters: null` and friends for empty configs.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
