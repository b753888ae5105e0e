//! Persistence for the backlog document.
//!
//! The backlog lives in a single YAML file (`project-backlog.yml` by
//! default). The store loads the whole document into memory, hands an
//! exclusively owned [`ProjectBacklog`] to the callers, and writes the
//! updated document back on save. Last writer wins; the CLI is single-shot
//! (load, mutate, persist, exit) so no locking is needed.

use crate::domain::ProjectBacklog;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default backlog file name, resolved against the working directory
pub const DEFAULT_BACKLOG_FILE: &str = "project-backlog.yml";

/// Owns the backlog document and its file path.
#[derive(Debug)]
pub struct BacklogStore {
    path: PathBuf,
    backlog: ProjectBacklog,
}

impl BacklogStore {
    /// Load the backlog document from `path`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotInitialized`] if the file does not exist
    /// - [`Error::Yaml`] if the document cannot be parsed
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(Error::NotInitialized(path));
        }
        let content = fs::read_to_string(&path).await?;
        let backlog: ProjectBacklog = serde_yaml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded backlog");
        Ok(Self { path, backlog })
    }

    /// Wrap an already-built backlog, to be saved at `path`.
    pub fn new(path: impl Into<PathBuf>, backlog: ProjectBacklog) -> Self {
        Self {
            path: path.into(),
            backlog,
        }
    }

    /// Serialize the document and overwrite the backlog file.
    pub async fn save(&self) -> Result<()> {
        let content = serde_yaml::to_string(&self.backlog)?;
        fs::write(&self.path, content).await?;
        tracing::debug!(path = %self.path.display(), "saved backlog");
        Ok(())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Shared access to the document.
    pub fn backlog(&self) -> &ProjectBacklog {
        &self.backlog
    }

    /// Exclusive access to the document, for mutation operations.
    pub fn backlog_mut(&mut self) -> &mut ProjectBacklog {
        &mut self.backlog
    }
}
