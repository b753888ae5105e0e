//! Implementation of the `init` command.
//!
//! Scaffolds a starter backlog file so a new project can start tracking
//! immediately, plus a README stub describing the day-to-day commands. The
//! template is built as a real [`ProjectBacklog`] and serialized, so the
//! scaffold always parses back.

use crate::domain::{Phase, ProjectBacklog, ProjectMetadata, Task, TaskId, TaskPriority};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the README stub written next to the backlog file
pub const README_FILE_NAME: &str = "BACKLOG.md";

/// Result of the init command
#[derive(Debug)]
pub enum InitOutcome {
    /// A fresh backlog file was written
    Created {
        /// Path of the new backlog file
        backlog_file: PathBuf,
        /// Path of the README stub, if one was written
        readme_file: Option<PathBuf>,
    },
    /// `--existing` was given and the file was left alone
    KeptExisting {
        /// Path of the untouched backlog file
        backlog_file: PathBuf,
    },
}

/// Build the starter backlog document for a new project.
pub fn starter_backlog(name: &str) -> ProjectBacklog {
    let mut setup = Task::new(
        TaskId::new("SETUP-001"),
        "Project scaffolding",
        TaskPriority::High,
        4.0,
    );
    setup.requirements.push("Repository builds and tests run".to_string());
    setup.push_note("Task created by backlog init");

    let mut phases = IndexMap::new();
    phases.insert(
        "phase-1".to_string(),
        Phase {
            title: "Phase 1: Foundation".to_string(),
            description: "Initial setup and core groundwork".to_string(),
            status: "planned".to_string(),
            estimated_duration: "1 week".to_string(),
            tasks: vec![setup],
        },
    );

    ProjectBacklog {
        metadata: ProjectMetadata {
            project: name.to_string(),
            version: "0.1.0".to_string(),
            extra: BTreeMap::new(),
        },
        phases,
        epic_summary: None,
        risks: None,
    }
}

fn readme_stub(name: &str, backlog_file: &Path) -> String {
    format!(
        "# {name} backlog\n\n\
         Tasks live in `{}`. Common commands:\n\n\
         ```bash\n\
         backlog list                      # tasks grouped by phase\n\
         backlog create <id> <title> <phase>\n\
         backlog update <id> <status> [note]\n\
         backlog dep add <id> <dep-id>     # <id> waits on <dep-id>\n\
         backlog validate                  # check references and cycles\n\
         backlog critical-path             # longest hours-weighted chain\n\
         ```\n\n\
         Statuses: ready, in_progress, testing, completed, blocked.\n",
        backlog_file.display(),
    )
}

/// Initialize a starter backlog at `backlog_file`.
///
/// # Errors
///
/// Returns [`Error::AlreadyInitialized`] if the file exists and
/// `keep_existing` is false. File system failures propagate as
/// [`Error::Io`].
pub async fn init(backlog_file: &Path, name: &str, keep_existing: bool) -> Result<InitOutcome> {
    if backlog_file.exists() {
        if keep_existing {
            tracing::debug!(path = %backlog_file.display(), "keeping existing backlog");
            return Ok(InitOutcome::KeptExisting {
                backlog_file: backlog_file.to_path_buf(),
            });
        }
        return Err(Error::AlreadyInitialized(backlog_file.to_path_buf()));
    }

    let content = serde_yaml::to_string(&starter_backlog(name))?;
    fs::write(backlog_file, content).await?;

    // README lands next to the backlog file; never overwrite one the
    // project already has.
    let readme_path = backlog_file
        .parent()
        .map_or_else(|| PathBuf::from(README_FILE_NAME), |dir| dir.join(README_FILE_NAME));
    let readme_file = if readme_path.exists() {
        None
    } else {
        fs::write(&readme_path, readme_stub(name, backlog_file)).await?;
        Some(readme_path)
    };

    tracing::info!(path = %backlog_file.display(), name, "initialized backlog");
    Ok(InitOutcome::Created {
        backlog_file: backlog_file.to_path_buf(),
        readme_file,
    })
}
