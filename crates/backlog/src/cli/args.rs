//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::{Parser, Subcommand};

use super::types::{AttributeArg, PriorityArg, StatusArg};
use super::validators::{validate_phase_name, validate_task_id, validate_title};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Project name recorded in the backlog metadata
    #[arg(default_value = "New Project")]
    pub name: String,

    /// Keep an existing backlog file instead of failing
    #[arg(long)]
    pub existing: bool,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `list` command
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Filter by stored status
    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,

    /// Filter by priority
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,
}

/// Arguments for the `create` command
#[derive(Parser, Debug, Clone)]
pub struct CreateArgs {
    /// Task ID (globally unique)
    #[arg(value_parser = validate_task_id)]
    pub id: String,

    /// Task title
    #[arg(value_parser = validate_title)]
    pub title: String,

    /// Phase to create the task in
    #[arg(value_parser = validate_phase_name)]
    pub phase: String,

    /// Priority level
    #[arg(short, long, value_enum, default_value = "medium")]
    pub priority: PriorityArg,

    /// Estimated hours
    #[arg(long, default_value = "8")]
    pub hours: f64,
}

/// Arguments for the `update` command
#[derive(Parser, Debug, Clone)]
pub struct UpdateArgs {
    /// Task ID to update
    #[arg(value_parser = validate_task_id)]
    pub id: String,

    /// New status
    #[arg(value_enum)]
    pub status: StatusArg,

    /// Optional note recorded alongside the transition
    pub note: Option<String>,
}

/// Arguments for the `note` command
#[derive(Parser, Debug, Clone)]
pub struct NoteArgs {
    /// Task ID to annotate
    #[arg(value_parser = validate_task_id)]
    pub id: String,

    /// Note text (remaining words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

/// Arguments for the `set` command
#[derive(Parser, Debug, Clone)]
pub struct SetArgs {
    /// Task ID to modify
    #[arg(value_parser = validate_task_id)]
    pub id: String,

    /// Which attribute to set
    #[arg(value_enum)]
    pub attribute: AttributeArg,

    /// New value (lists are comma-separated)
    pub value: String,
}

/// Arguments for the `move` command
#[derive(Parser, Debug, Clone)]
pub struct MoveArgs {
    /// Task ID to move
    #[arg(value_parser = validate_task_id)]
    pub id: String,

    /// Target phase
    #[arg(value_parser = validate_phase_name)]
    pub phase: String,

    /// Position within the target phase (clamped; omitted means append)
    pub position: Option<usize>,
}

/// Arguments for the `dep` command
#[derive(Parser, Debug, Clone)]
pub struct DepArgs {
    /// Dependency action to perform
    #[command(subcommand)]
    pub action: DepAction,
}

/// Dependency subcommand actions
#[derive(Subcommand, Debug, Clone)]
pub enum DepAction {
    /// Add a dependency edge (the task will wait on the dependency)
    Add {
        /// Dependent task ID
        #[arg(value_parser = validate_task_id)]
        id: String,

        /// Task it must wait for
        #[arg(value_parser = validate_task_id)]
        dep_id: String,
    },

    /// Remove a dependency edge
    Remove {
        /// Dependent task ID
        #[arg(value_parser = validate_task_id)]
        id: String,

        /// Dependency to drop
        #[arg(value_parser = validate_task_id)]
        dep_id: String,
    },
}

/// Arguments for the `bulk-phase` command
#[derive(Parser, Debug, Clone)]
pub struct BulkPhaseArgs {
    /// Phase whose tasks get the new status
    #[arg(value_parser = validate_phase_name)]
    pub phase: String,

    /// Status to apply to every task in the phase
    #[arg(value_enum)]
    pub status: StatusArg,
}
