//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for backlog using clap's
//! derive API. Each command has its own argument struct with validation and
//! helpful error messages.
//!
//! # Global Flags
//!
//! - `--backlog <path>`: Backlog file to operate on (default: `project-backlog.yml`)
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! backlog create API-003 "Wire up auth" phase-1 --priority high --hours 12
//! backlog update API-003 in_progress "picked up"
//! backlog dep add API-003 API-001
//! backlog critical-path
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Re-export argument structs
pub use args::{
    BulkPhaseArgs, CreateArgs, DepAction, DepArgs, InitArgs, ListArgs, MoveArgs, NoteArgs, SetArgs,
    UpdateArgs,
};

// Re-export types
pub use types::{AttributeArg, PriorityArg, StatusArg};

// Re-export validators for external use
pub use validators::{validate_phase_name, validate_task_id, validate_title};

use crate::storage::DEFAULT_BACKLOG_FILE;

/// Backlog - a YAML project-backlog tracker
///
/// Track phased tasks, dependencies, and critical paths in a single
/// `project-backlog.yml` that lives next to your code.
#[derive(Parser, Debug)]
#[command(name = "backlog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the backlog file
    #[arg(long, global = true, default_value = DEFAULT_BACKLOG_FILE)]
    pub backlog: PathBuf,

    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scaffold a starter backlog file
    ///
    /// Writes a template `project-backlog.yml` (and a README stub) so a new
    /// project can start tracking immediately. Refuses to overwrite an
    /// existing file unless `--existing` is given.
    Init(InitArgs),

    /// List tasks grouped by phase, with optional filters
    List(ListArgs),

    /// List phases with their status and task counts
    Phases,

    /// Create a new task in a phase
    ///
    /// The new task starts `ready` with empty dependency lists. IDs are
    /// globally unique across all phases.
    Create(CreateArgs),

    /// Update a task's status
    ///
    /// Any transition is allowed; the change is recorded in the task's notes.
    Update(UpdateArgs),

    /// Append a timestamped note to a task
    Note(NoteArgs),

    /// Set a task attribute (priority, hours, title, ...)
    Set(SetArgs),

    /// Move a task to another phase
    Move(MoveArgs),

    /// Manage dependency edges between tasks
    ///
    /// Additions are checked against the existing graph; an edge that would
    /// create a circular dependency is rejected.
    Dep(DepArgs),

    /// Check the backlog for dangling references and cycles
    Validate,

    /// Show the hours-weighted critical path
    CriticalPath,

    /// Set the status of every task in a phase
    BulkPhase(BulkPhaseArgs),

    /// Print the full viewer data feed as JSON
    UiData,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;
        use crate::storage::BacklogStore;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(&self.backlog, args).await,
            Some(Commands::List(args)) => {
                let store = BacklogStore::load(&self.backlog).await?;
                execute::execute_list(&store, args, output_mode)
            }
            Some(Commands::Phases) => {
                let store = BacklogStore::load(&self.backlog).await?;
                execute::execute_phases(&store, output_mode)
            }
            Some(Commands::Create(args)) => {
                let mut store = BacklogStore::load(&self.backlog).await?;
                execute::execute_create(&mut store, args).await
            }
            Some(Commands::Update(args)) => {
                let mut store = BacklogStore::load(&self.backlog).await?;
                execute::execute_update(&mut store, args).await
            }
            Some(Commands::Note(args)) => {
                let mut store = BacklogStore::load(&self.backlog).await?;
                execute::execute_note(&mut store, args).await
            }
            Some(Commands::Set(args)) => {
                let mut store = BacklogStore::load(&self.backlog).await?;
                execute::execute_set(&mut store, args).await
            }
            Some(Commands::Move(args)) => {
                let mut store = BacklogStore::load(&self.backlog).await?;
                execute::execute_move(&mut store, args).await
            }
            Some(Commands::Dep(args)) => {
                let mut store = BacklogStore::load(&self.backlog).await?;
                execute::execute_dep(&mut store, args).await
            }
            Some(Commands::Validate) => {
                let store = BacklogStore::load(&self.backlog).await?;
                execute::execute_validate(&store, output_mode)
            }
            Some(Commands::CriticalPath) => {
                let store = BacklogStore::load(&self.backlog).await?;
                execute::execute_critical_path(&store, output_mode)
            }
            Some(Commands::BulkPhase(args)) => {
                let mut store = BacklogStore::load(&self.backlog).await?;
                execute::execute_bulk_phase(&mut store, args).await
            }
            Some(Commands::UiData) => {
                let store = BacklogStore::load(&self.backlog).await?;
                execute::execute_ui_data(&store)
            }
            None => {
                println!("Backlog project tracker");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== CLI Parsing Tests ==========

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["backlog"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
        assert_eq!(cli.backlog, PathBuf::from("project-backlog.yml"));
    }

    #[test]
    fn test_parse_global_flags() {
        let cli =
            Cli::try_parse_from(["backlog", "--json", "--backlog", "other.yml", "phases"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.backlog, PathBuf::from("other.yml"));
        assert!(matches!(cli.command, Some(Commands::Phases)));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["backlog", "validate", "--backlog", "x.yml"]).unwrap();
        assert_eq!(cli.backlog, PathBuf::from("x.yml"));
    }

    #[test]
    fn test_parse_init_defaults() {
        let cli = Cli::try_parse_from(["backlog", "init"]).unwrap();
        match cli.command {
            Some(Commands::Init(args)) => {
                assert_eq!(args.name, "New Project");
                assert!(!args.existing);
                assert!(!args.quiet);
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_parse_init_with_name_and_existing() {
        let cli = Cli::try_parse_from(["backlog", "init", "My App", "--existing"]).unwrap();
        match cli.command {
            Some(Commands::Init(args)) => {
                assert_eq!(args.name, "My App");
                assert!(args.existing);
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_parse_create_minimal() {
        let cli = Cli::try_parse_from(["backlog", "create", "API-001", "Set up auth", "phase-1"])
            .unwrap();
        match cli.command {
            Some(Commands::Create(args)) => {
                assert_eq!(args.id, "API-001");
                assert_eq!(args.title, "Set up auth");
                assert_eq!(args.phase, "phase-1");
                assert_eq!(args.priority, PriorityArg::Medium); // default
                assert!((args.hours - 8.0).abs() < f64::EPSILON); // default
            }
            _ => panic!("Expected Create command"),
        }
    }

    #[test]
    fn test_parse_create_full() {
        let cli = Cli::try_parse_from([
            "backlog", "create", "API-002", "Harden auth", "phase-1", "--priority", "critical",
            "--hours", "12.5",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Create(args)) => {
                assert_eq!(args.priority, PriorityArg::Critical);
                assert!((args.hours - 12.5).abs() < f64::EPSILON);
            }
            _ => panic!("Expected Create command"),
        }
    }

    #[test]
    fn test_parse_create_rejects_empty_id() {
        let result = Cli::try_parse_from(["backlog", "create", "  ", "Title", "phase-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "backlog",
            "list",
            "--status",
            "in_progress",
            "--priority",
            "high",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.status, Some(StatusArg::InProgress));
                assert_eq!(args.priority, Some(PriorityArg::High));
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_parse_list_status_kebab_alias() {
        let cli = Cli::try_parse_from(["backlog", "list", "--status", "in-progress"]).unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.status, Some(StatusArg::InProgress));
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_parse_update_with_note() {
        let cli =
            Cli::try_parse_from(["backlog", "update", "API-001", "completed", "shipped"]).unwrap();
        match cli.command {
            Some(Commands::Update(args)) => {
                assert_eq!(args.id, "API-001");
                assert_eq!(args.status, StatusArg::Completed);
                assert_eq!(args.note, Some("shipped".to_string()));
            }
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn test_parse_update_rejects_unknown_status() {
        let result = Cli::try_parse_from(["backlog", "update", "API-001", "done"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_note_joins_words() {
        let cli =
            Cli::try_parse_from(["backlog", "note", "API-001", "waiting", "on", "review"]).unwrap();
        match cli.command {
            Some(Commands::Note(args)) => {
                assert_eq!(args.text, vec!["waiting", "on", "review"]);
            }
            _ => panic!("Expected Note command"),
        }
    }

    #[test]
    fn test_parse_note_requires_text() {
        let result = Cli::try_parse_from(["backlog", "note", "API-001"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_set_attribute() {
        let cli = Cli::try_parse_from(["backlog", "set", "API-001", "estimated-hours", "16"])
            .unwrap();
        match cli.command {
            Some(Commands::Set(args)) => {
                assert_eq!(args.attribute, AttributeArg::EstimatedHours);
                assert_eq!(args.value, "16");
            }
            _ => panic!("Expected Set command"),
        }
    }

    #[test]
    fn test_parse_move_with_position() {
        let cli = Cli::try_parse_from(["backlog", "move", "API-001", "phase-2", "0"]).unwrap();
        match cli.command {
            Some(Commands::Move(args)) => {
                assert_eq!(args.phase, "phase-2");
                assert_eq!(args.position, Some(0));
            }
            _ => panic!("Expected Move command"),
        }
    }

    #[test]
    fn test_parse_dep_add_and_remove() {
        let cli = Cli::try_parse_from(["backlog", "dep", "add", "API-002", "API-001"]).unwrap();
        match cli.command {
            Some(Commands::Dep(args)) => match args.action {
                DepAction::Add { id, dep_id } => {
                    assert_eq!(id, "API-002");
                    assert_eq!(dep_id, "API-001");
                }
                DepAction::Remove { .. } => panic!("Expected Add action"),
            },
            _ => panic!("Expected Dep command"),
        }

        let cli = Cli::try_parse_from(["backlog", "dep", "remove", "API-002", "API-001"]).unwrap();
        match cli.command {
            Some(Commands::Dep(args)) => {
                assert!(matches!(args.action, DepAction::Remove { .. }));
            }
            _ => panic!("Expected Dep command"),
        }
    }

    #[test]
    fn test_parse_bulk_phase() {
        let cli = Cli::try_parse_from(["backlog", "bulk-phase", "phase-1", "completed"]).unwrap();
        match cli.command {
            Some(Commands::BulkPhase(args)) => {
                assert_eq!(args.phase, "phase-1");
                assert_eq!(args.status, StatusArg::Completed);
            }
            _ => panic!("Expected BulkPhase command"),
        }
    }

    #[test]
    fn test_parse_analysis_commands() {
        assert!(matches!(
            Cli::try_parse_from(["backlog", "validate"]).unwrap().command,
            Some(Commands::Validate)
        ));
        assert!(matches!(
            Cli::try_parse_from(["backlog", "critical-path"]).unwrap().command,
            Some(Commands::CriticalPath)
        ));
        assert!(matches!(
            Cli::try_parse_from(["backlog", "ui-data"]).unwrap().command,
            Some(Commands::UiData)
        ));
    }
}
