use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::document::{ContextSpec, KubeconfigDocument, NamedCluster, NamedContext, NamedUser};
use crate::error::{KubeConfigError, Result};

/// One kubeconfig file: its path plus the parsed document, loaded on demand.
#[derive(Debug)]
pub struct KubeConfig {
    path: PathBuf,
    document: Option<KubeconfigDocument>,
    write_lock: Mutex<()>,
}

impl KubeConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), document: None, write_lock: Mutex::new(()) }
    }

    pub fn with_document(path: impl Into<PathBuf>, document: KubeconfigDocument) -> Self {
        Self { path: path.into(), document: Some(document), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// Reads and parses the file unless a document is already present.
    pub async fn ensure_loaded(&mut self) -> Result<&mut Self> {
        if self.document.is_none() {
            let data = tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| KubeConfigError::Read { path: self.path.clone(), source })?;
            let document = KubeconfigDocument::from_yaml(&data)
                .map_err(|source| KubeConfigError::Parse { path: self.path.clone(), source })?;
            debug!(path = %self.path.display(), contexts = document.contexts.len(), "loaded kubeconfig");
            self.document = Some(document);
        }
        Ok(self)
    }

    /// Writes the in-memory document back to `path`. A no-op while unloaded.
    pub async fn save(&self) -> Result<()> {
        let Some(document) = &self.document else {
            return Ok(());
        };
        let _guard = self.write_lock.lock().await;
        let data = document
            .to_yaml()
            .map_err(|source| KubeConfigError::Serialize { path: self.path.clone(), source })?;
        tokio::fs::write(&self.path, data)
            .await
            .map_err(|source| KubeConfigError::Write { path: self.path.clone(), source })?;
        debug!(path = %self.path.display(), "saved kubeconfig");
        Ok(())
    }

    pub fn document(&self) -> Result<&KubeconfigDocument> {
        self.document.as_ref().ok_or_else(|| KubeConfigError::NotLoaded { path: self.path.clone() })
    }

    pub(crate) fn document_mut(&mut self) -> Result<&mut KubeconfigDocument> {
        match self.document.as_mut() {
            Some(document) => Ok(document),
            None => Err(KubeConfigError::NotLoaded { path: self.path.clone() }),
        }
    }

    pub fn current_context(&self) -> Result<&str> {
        Ok(&self.document()?.current_context)
    }

    pub fn current_namespace(&self) -> Result<&str> {
        let context = self.get_context(self.current_context()?)?;
        Ok(context.namespace_or_default())
    }

    pub fn preferences(&self) -> Result<&Mapping> {
        Ok(&self.document()?.preferences)
    }

    pub fn clusters(&self) -> Result<&[NamedCluster]> {
        Ok(&self.document()?.clusters)
    }

    pub fn users(&self) -> Result<&[NamedUser]> {
        Ok(&self.document()?.users)
    }

    pub fn contexts(&self) -> Result<&[NamedContext]> {
        Ok(&self.document()?.contexts)
    }

    pub fn extensions(&self) -> Result<&[Value]> {
        Ok(&self.document()?.extensions)
    }

    pub fn has_context(&self, name: &str) -> Result<bool> {
        Ok(self.document()?.has_context(name))
    }

    pub fn get_context(&self, name: &str) -> Result<&ContextSpec> {
        self.document()?
            .find_context(name)
            .map(|c| &c.context)
            .ok_or_else(|| KubeConfigError::ContextNotFound(name.to_string()))
    }

    pub fn get_cluster(&self, name: &str) -> Result<&Value> {
        self.document()?
            .find_cluster(name)
            .map(|c| &c.cluster)
            .ok_or_else(|| KubeConfigError::ClusterNotFound(name.to_string()))
    }

    pub fn get_user(&self, name: &str) -> Result<&Value> {
        self.document()?
            .find_user(name)
            .map(|u| &u.user)
            .ok_or_else(|| KubeConfigError::UserNotFound(name.to_string()))
    }

    /// Sets the namespace of the current context. Missing contexts are skipped, the file is still saved.
    pub async fn use_namespace(&mut self, namespace: &str) -> Result<()> {
        let document = self.document_mut()?;
        let current = document.current_context.clone();
        if document.set_context_namespace(&current, namespace) {
            info!(path = %self.path.display(), context = %current, namespace, "switched namespace");
        } else {
            debug!(path = %self.path.display(), context = %current, "current context not defined here");
        }
        self.save().await
    }

    pub async fn use_context(&mut self, name: &str, allow_unknown: bool) -> Result<()> {
        let document = self.document_mut()?;
        if !allow_unknown && !document.has_context(name) {
            return Err(KubeConfigError::ContextNotFound(name.to_string()));
        }
        document.current_context = name.to_string();
        info!(path = %self.path.display(), context = name, "switched context");
        self.save().await
    }

    pub async fn rename_context(&mut self, old: &str, new: &str) -> Result<()> {
        let document = self.document_mut()?;
        let entry = document.find_context_mut(old).ok_or_else(|| KubeConfigError::ContextNotFound(old.to_string()))?;
        entry.name = new.to_string();
        if document.current_context == old {
            document.current_context = new.to_string();
        }
        info!(path = %self.path.display(), old, new, "renamed context");
        self.save().await
    }
}
