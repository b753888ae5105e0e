//! CLI-specific type conversions.
//!
//! Clap value enums mirror the domain enums so parsing and help text stay at
//! the CLI boundary; domain types never derive clap traits. The raw `set`
//! value string is parsed into a typed [`TaskAttribute`] here too, before
//! anything touches the model.

use crate::domain::{TaskId, TaskPriority, TaskStatus};
use crate::ops::TaskAttribute;
use clap::ValueEnum;

/// Task status argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Ready to be picked up
    Ready,
    /// Actively being worked on
    #[value(name = "in_progress", alias = "in-progress")]
    InProgress,
    /// Implementation done, verification pending
    Testing,
    /// Done
    Completed,
    /// Explicitly held
    Blocked,
}

impl From<StatusArg> for TaskStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Ready => TaskStatus::Ready,
            StatusArg::InProgress => TaskStatus::InProgress,
            StatusArg::Testing => TaskStatus::Testing,
            StatusArg::Completed => TaskStatus::Completed,
            StatusArg::Blocked => TaskStatus::Blocked,
        }
    }
}

/// Task priority argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    /// Must be done first
    Critical,
    /// Important
    High,
    /// Default
    Medium,
    /// Nice to have
    Low,
}

impl From<PriorityArg> for TaskPriority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Critical => TaskPriority::Critical,
            PriorityArg::High => TaskPriority::High,
            PriorityArg::Medium => TaskPriority::Medium,
            PriorityArg::Low => TaskPriority::Low,
        }
    }
}

/// Which task attribute a `set` command targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AttributeArg {
    /// Priority level
    Priority,
    /// Hour estimate
    EstimatedHours,
    /// Task title
    Title,
    /// Assignee name
    Assignee,
    /// Dependencies list (comma-separated IDs)
    Dependencies,
    /// Blocks list (comma-separated IDs)
    Blocks,
    /// Requirements list (comma-separated)
    Requirements,
}

impl AttributeArg {
    /// Parse the raw value string into a typed attribute.
    ///
    /// List attributes split on commas; an empty string clears the list.
    pub fn parse_value(self, value: &str) -> Result<TaskAttribute, String> {
        match self {
            Self::Priority => {
                let arg = PriorityArg::from_str(value, true)
                    .map_err(|_| format!("Invalid priority: {value} (expected critical, high, medium, or low)"))?;
                Ok(TaskAttribute::Priority(arg.into()))
            }
            Self::EstimatedHours => {
                let hours: f64 = value
                    .parse()
                    .map_err(|_| format!("Invalid hours value: {value}"))?;
                Ok(TaskAttribute::EstimatedHours(hours))
            }
            Self::Title => Ok(TaskAttribute::Title(value.to_string())),
            Self::Assignee => Ok(TaskAttribute::Assignee(value.to_string())),
            Self::Dependencies => Ok(TaskAttribute::Dependencies(split_ids(value))),
            Self::Blocks => Ok(TaskAttribute::Blocks(split_ids(value))),
            Self::Requirements => Ok(TaskAttribute::Requirements(split_list(value))),
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_ids(value: &str) -> Vec<TaskId> {
    split_list(value).into_iter().map(TaskId::from).collect()
}
