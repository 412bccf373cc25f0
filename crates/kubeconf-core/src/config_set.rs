use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::{debug, info};

use crate::document::{ContextSpec, KubeconfigDocument, NamedCluster, NamedContext, NamedUser};
use crate::error::{KubeConfigError, Result};
use crate::kubeconfig::KubeConfig;
use crate::merge::{merge_entries, NamedEntry};

/// A kubeconfig path, optionally with its already parsed document.
#[derive(Debug, Clone)]
pub struct KubeConfigSource {
    pub path: PathBuf,
    pub document: Option<KubeconfigDocument>,
}

impl KubeConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), document: None }
    }

    pub fn with_document(path: impl Into<PathBuf>, document: KubeconfigDocument) -> Self {
        Self { path: path.into(), document: Some(document) }
    }
}

impl From<PathBuf> for KubeConfigSource {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for KubeConfigSource {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<KubeConfigSource> for KubeConfig {
    fn from(source: KubeConfigSource) -> Self {
        match source.document {
            Some(document) => KubeConfig::with_document(source.path, document),
            None => KubeConfig::new(source.path),
        }
    }
}

/// Several kubeconfig files seen as one.
///
/// Clusters, users and contexts are merged by name with later files winning.
/// The current context always comes from the first file, and mutations are
/// written to the file that owns the context they touch.
#[derive(Debug)]
pub struct KubeConfigSet {
    configs: Vec<KubeConfig>,
}

impl KubeConfigSet {
    pub fn new<I, S>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<KubeConfigSource>,
    {
        let configs = sources
            .into_iter()
            .map(|source| {
                let source: KubeConfigSource = source.into();
                KubeConfig::from(source)
            })
            .collect();
        Self::from_configs(configs)
    }

    pub fn from_configs(configs: Vec<KubeConfig>) -> Result<Self> {
        if configs.is_empty() {
            return Err(KubeConfigError::EmptyConfigSet);
        }
        Ok(Self { configs })
    }

    pub fn configs(&self) -> &[KubeConfig] {
        &self.configs
    }

    fn first(&self) -> &KubeConfig {
        &self.configs[0]
    }

    /// Loads every member, one after another.
    pub async fn ensure_loaded(&mut self) -> Result<&mut Self> {
        for config in &mut self.configs {
            config.ensure_loaded().await?;
        }
        debug!(files = self.configs.len(), "kubeconfig set loaded");
        Ok(self)
    }

    pub async fn save(&self) -> Result<()> {
        for config in &self.configs {
            config.save().await?;
        }
        Ok(())
    }

    pub fn path(&self) -> Result<&Path> {
        self.get_path(None)
    }

    /// Path of the file defining `context` (default: the current context), else the first file.
    pub fn get_path(&self, context: Option<&str>) -> Result<&Path> {
        let context = match context {
            Some(name) if !name.is_empty() => name,
            _ => self.current_context()?,
        };
        if !context.is_empty() {
            if let Some(index) = self.owner_of(context)? {
                return Ok(self.configs[index].path());
            }
        }
        Ok(self.first().path())
    }

    fn owner_of(&self, context: &str) -> Result<Option<usize>> {
        for (index, config) in self.configs.iter().enumerate() {
            if config.has_context(context)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// The merged view as a single document. Built on every call.
    pub fn raw(&self) -> Result<KubeconfigDocument> {
        Ok(KubeconfigDocument {
            api_version: "v1".into(),
            kind: "Config".into(),
            preferences: self.preferences()?.clone(),
            clusters: self.clusters()?,
            users: self.users()?,
            contexts: self.contexts()?,
            current_context: self.current_context()?.to_string(),
            extensions: self.extensions()?,
            extra: Mapping::new(),
        })
    }

    /// Only the first file decides the current context.
    pub fn current_context(&self) -> Result<&str> {
        self.first().current_context()
    }

    pub fn current_namespace(&self) -> Result<String> {
        let context = self.get_context(self.current_context()?)?;
        Ok(context.namespace_or_default().to_string())
    }

    pub fn preferences(&self) -> Result<&Mapping> {
        self.first().preferences()
    }

    pub fn clusters(&self) -> Result<Vec<NamedCluster>> {
        self.merged(KubeConfig::clusters)
    }

    pub fn users(&self) -> Result<Vec<NamedUser>> {
        self.merged(KubeConfig::users)
    }

    pub fn contexts(&self) -> Result<Vec<NamedContext>> {
        self.merged(KubeConfig::contexts)
    }

    fn merged<E>(&self, list: impl Fn(&KubeConfig) -> Result<&[E]>) -> Result<Vec<E>>
    where
        E: NamedEntry + Clone,
    {
        let mut entries = Vec::new();
        for config in &self.configs {
            entries.extend_from_slice(list(config)?);
        }
        Ok(merge_entries(entries))
    }

    pub fn extensions(&self) -> Result<Vec<Value>> {
        let mut extensions = Vec::new();
        for config in &self.configs {
            extensions.extend_from_slice(config.extensions()?);
        }
        Ok(extensions)
    }

    /// Sets the namespace on the current context in every file that defines it, then saves every file.
    pub async fn use_namespace(&mut self, namespace: &str) -> Result<()> {
        let current = self.current_context()?.to_string();
        for config in &mut self.configs {
            config.document_mut()?.set_context_namespace(&current, namespace);
            config.save().await?;
        }
        info!(context = %current, namespace, "switched namespace");
        Ok(())
    }

    pub async fn use_context(&mut self, name: &str) -> Result<()> {
        if self.owner_of(name)?.is_none() {
            return Err(KubeConfigError::ContextNotFound(name.to_string()));
        }
        self.configs[0].use_context(name, true).await
    }

    /// Renames `old` in the first file that defines it.
    pub async fn rename_context(&mut self, old: &str, new: &str) -> Result<()> {
        let Some(index) = self.owner_of(old)? else {
            return Err(KubeConfigError::ContextNotFound(old.to_string()));
        };
        self.configs[index].rename_context(old, new).await?;
        if self.current_context()? == old {
            self.use_context(new).await?;
        }
        Ok(())
    }

    pub fn get_context(&self, name: &str) -> Result<ContextSpec> {
        self.contexts()?
            .into_iter()
            .find(|c| c.name() == name)
            .map(|c| c.context)
            .ok_or_else(|| KubeConfigError::ContextNotFound(name.to_string()))
    }

    pub fn get_cluster(&self, name: &str) -> Result<Value> {
        self.clusters()?
            .into_iter()
            .find(|c| c.name() == name)
            .map(|c| c.cluster)
            .ok_or_else(|| KubeConfigError::ClusterNotFound(name.to_string()))
    }

    pub fn get_user(&self, name: &str) -> Result<Value> {
        self.users()?
            .into_iter()
            .find(|u| u.name() == name)
            .map(|u| u.user)
            .ok_or_else(|| KubeConfigError::UserNotFound(name.to_string()))
    }
}
