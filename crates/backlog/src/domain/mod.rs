//! Domain types for the project backlog.
//!
//! This module contains the core types that mirror the on-disk
//! `project-backlog.yml` schema: tasks, phases, and the backlog root.

use chrono::Local;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Unique identifier for a task.
///
/// Uniqueness is global across the whole backlog, not per phase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub String);

impl TaskId {
    /// Create a new task ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Stored status of a task.
///
/// `Blocked` can appear here as a manually set state; the read-side overlay
/// in [`crate::graph::status`] derives a *displayed* blocked state from
/// incomplete dependencies without touching this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Ready to be picked up
    Ready,

    /// Currently being worked on
    InProgress,

    /// Implementation done, under test
    Testing,

    /// Finished
    Completed,

    /// Manually marked as blocked
    Blocked,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ready => "ready",
            Self::InProgress => "in_progress",
            Self::Testing => "testing",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
        };
        write!(f, "{s}")
    }
}

/// Priority of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Must be done first
    Critical,

    /// High priority
    High,

    /// Default priority
    Medium,

    /// Low priority
    Low,
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        write!(f, "{s}")
    }
}

/// A unit of work tracked in the backlog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Globally unique identifier
    pub id: TaskId,

    /// Human-readable label
    pub title: String,

    /// Stored status
    pub status: TaskStatus,

    /// Priority level
    pub priority: TaskPriority,

    /// Estimate in hours; drives the critical-path weight
    pub estimated_hours: f64,

    /// Hours actually spent (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,

    /// Assignee (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Requirement statements, append-only
    #[serde(default)]
    pub requirements: Vec<String>,

    /// Acceptance criteria (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceptance_criteria: Option<Vec<String>>,

    /// IDs of tasks that must complete before this one (edges point in).
    ///
    /// Independent of `blocks`; the two lists are never auto-mirrored.
    #[serde(default)]
    pub dependencies: Vec<TaskId>,

    /// IDs of tasks this task's completion unblocks (edges point out)
    #[serde(default)]
    pub blocks: Vec<TaskId>,

    /// Timestamped audit log, append-only
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Task {
    /// Create a fresh task with empty collections and status `Ready`.
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        priority: TaskPriority,
        estimated_hours: f64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            status: TaskStatus::Ready,
            priority,
            estimated_hours,
            actual_hours: None,
            assignee: None,
            requirements: Vec::new(),
            acceptance_criteria: None,
            dependencies: Vec::new(),
            blocks: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Append an audit note, prefixed with the current local timestamp.
    ///
    /// Every mutation that touches a task records itself through this
    /// helper so the note format stays uniform across operations.
    pub fn push_note(&mut self, text: impl AsRef<str>) {
        let timestamp = Local::now().format(NOTE_TIMESTAMP_FORMAT);
        self.notes.push(format!("{timestamp}: {}", text.as_ref()));
    }
}

/// Format for the timestamp prefix on audit notes
pub const NOTE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// A named, ordered grouping of tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    /// Phase label
    pub title: String,

    /// Longer description
    #[serde(default)]
    pub description: String,

    /// Free-form phase status (not the task status enum)
    #[serde(default)]
    pub status: String,

    /// Free-form duration estimate, never computed
    #[serde(default)]
    pub estimated_duration: String,

    /// Tasks in display order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Project metadata carried at the root of the backlog document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Project name
    pub project: String,

    /// Document version
    pub version: String,

    /// Any further free-form metadata fields, preserved on round-trip
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Root of the backlog document.
///
/// Phase insertion order is display order, hence the `IndexMap`.
/// `epic_summary` and `risks` are pass-through sections the core never
/// computes or inspects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectBacklog {
    /// Project metadata
    pub metadata: ProjectMetadata,

    /// Phases keyed by name, in display order
    pub phases: IndexMap<String, Phase>,

    /// Pass-through epic summary section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_summary: Option<serde_yaml::Value>,

    /// Pass-through risks section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risks: Option<serde_yaml::Value>,
}
