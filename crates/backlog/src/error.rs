//! Error types for backlog operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for backlog storage and process-level failures.
///
/// Expected user-level conditions (missing task, duplicate id, cycle, ...)
/// are *not* represented here; those live in [`crate::ops::OpError`] and are
/// reported without failing the process.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The backlog file does not exist yet.
    #[error(
        "Backlog file not found: {}\n\n\
         To get started:\n\
         1. Run `backlog init` to scaffold a starter project-backlog.yml\n\
         2. Edit the project metadata and tasks for your project\n\
         3. Re-run backlog commands to manage the backlog\n\n\
         Alternatively pass --backlog <path> to point at an existing file.",
        .0.display()
    )]
    NotInitialized(PathBuf),

    /// `init` was asked to scaffold over an existing backlog file.
    #[error(
        "Backlog file already exists: {}\n\
         Pass --existing to keep it, or point --backlog at another path.",
        .0.display()
    )]
    AlreadyInitialized(PathBuf),

    /// The backlog document could not be parsed or serialized.
    #[error("Invalid backlog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A specialized Result type for backlog operations.
pub type Result<T> = std::result::Result<T, Error>;
