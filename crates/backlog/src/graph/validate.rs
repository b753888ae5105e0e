//! Whole-graph integrity validation.
//!
//! Read-only: collects every problem in one pass instead of stopping at the
//! first, so a report lists all dangling references and every task sitting on
//! a dependency cycle.

use crate::domain::{ProjectBacklog, TaskId};
use crate::graph::{all_task_ids, cycle, tasks_with_phase};
use serde::Serialize;
use std::fmt;

/// A single integrity problem found in the backlog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// A task lists a dependency that does not exist
    DanglingDependency {
        /// The task carrying the reference
        task: TaskId,
        /// The missing dependency ID
        dependency: TaskId,
    },

    /// A task lists a blocks target that does not exist
    DanglingBlock {
        /// The task carrying the reference
        task: TaskId,
        /// The missing blocked-task ID
        blocked: TaskId,
    },

    /// A dependency cycle is reachable from this task
    CircularDependency {
        /// The task the cycle was detected from
        task: TaskId,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingDependency { task, dependency } => {
                write!(f, "task {task} depends on unknown task {dependency}")
            }
            Self::DanglingBlock { task, blocked } => {
                write!(f, "task {task} blocks unknown task {blocked}")
            }
            Self::CircularDependency { task } => {
                write!(f, "circular dependency detected involving task {task}")
            }
        }
    }
}

/// Scan the whole backlog for dangling references and dependency cycles.
///
/// Issues come out in backlog order, references before cycles per task. An
/// empty result means the graph is sound. Every task on a cycle is reported
/// individually so the user sees the full membership.
pub fn validate(backlog: &ProjectBacklog) -> Vec<ValidationIssue> {
    let known = all_task_ids(backlog);
    let mut issues = Vec::new();

    for (_, task) in tasks_with_phase(backlog) {
        for dep in &task.dependencies {
            if !known.contains(dep) {
                issues.push(ValidationIssue::DanglingDependency {
                    task: task.id.clone(),
                    dependency: dep.clone(),
                });
            }
        }
        for blocked in &task.blocks {
            if !known.contains(blocked) {
                issues.push(ValidationIssue::DanglingBlock {
                    task: task.id.clone(),
                    blocked: blocked.clone(),
                });
            }
        }
        if cycle::has_circular_dependency(backlog, &task.id) {
            issues.push(ValidationIssue::CircularDependency {
                task: task.id.clone(),
            });
        }
    }
    issues
}
