//! Mutation operations over the backlog document.
//!
//! Every operation here follows validate-then-mutate: all checks run against
//! the untouched document, and only a fully accepted operation writes
//! anything. A returned [`OpError`] therefore guarantees the backlog is
//! byte-identical to before the call.
//!
//! These are expected user-level conditions, not process failures. The CLI
//! prints them and exits 0; [`crate::error::Error`] covers the cases that
//! should actually fail the process.

use crate::domain::{ProjectBacklog, Task, TaskId, TaskPriority, TaskStatus};
use crate::graph::{self, cycle};
use thiserror::Error;

/// Rejection of a mutation operation. The document is unchanged.
#[derive(Debug, Error, PartialEq)]
pub enum OpError {
    /// No task with this ID exists
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// The named phase does not exist
    #[error("Phase not found: {name}. Available phases: {}", .available.join(", "))]
    PhaseNotFound {
        /// The phase that was asked for
        name: String,
        /// Phases that do exist, in backlog order
        available: Vec<String>,
    },

    /// A task with this ID already exists
    #[error(
        "Task ID {id} already exists in phase {phase}. Try one of: {}",
        .suggestions.iter().map(TaskId::as_str).collect::<Vec<_>>().join(", ")
    )]
    DuplicateTaskId {
        /// The contested ID
        id: TaskId,
        /// Phase that owns the existing task
        phase: String,
        /// Free alternative IDs derived from the contested one
        suggestions: Vec<TaskId>,
    },

    /// The dependency edge already exists
    #[error("Task {task} already depends on {dependency}")]
    AlreadyDepends {
        /// The dependent task
        task: TaskId,
        /// The existing dependency
        dependency: TaskId,
    },

    /// Adding the edge would close a dependency cycle
    #[error("Adding dependency {dependency} to {task} would create a circular dependency")]
    CircularDependency {
        /// The dependent task
        task: TaskId,
        /// The rejected dependency
        dependency: TaskId,
    },

    /// The dependency edge to remove is not present
    #[error("Task {task} does not depend on {dependency}")]
    DependencyNotFound {
        /// The task inspected
        task: TaskId,
        /// The absent dependency
        dependency: TaskId,
    },

    /// Move target is the phase the task is already in
    #[error("Task {task} is already in phase {phase}")]
    SamePhase {
        /// The task asked to move
        task: TaskId,
        /// Its current (and requested) phase
        phase: String,
    },

    /// Hour estimates must be positive
    #[error("Estimated hours must be positive, got {0}")]
    InvalidHours(f64),
}

/// Result of a mutation operation.
pub type OpResult<T> = Result<T, OpError>;

/// A settable task attribute paired with its new value.
///
/// Parsing raw CLI text into the right variant happens at the edge (clap
/// value enums in [`crate::cli`]); by the time an attribute reaches
/// [`set_attribute`] it is already typed.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskAttribute {
    /// Replace the priority
    Priority(TaskPriority),
    /// Replace the hour estimate; must be positive
    EstimatedHours(f64),
    /// Replace the title
    Title(String),
    /// Replace the assignee
    Assignee(String),
    /// Replace the whole dependencies list
    Dependencies(Vec<TaskId>),
    /// Replace the whole blocks list
    Blocks(Vec<TaskId>),
    /// Replace the requirements list
    Requirements(Vec<String>),
}

fn phase_names(backlog: &ProjectBacklog) -> Vec<String> {
    backlog.phases.keys().cloned().collect()
}

fn task_mut<'a>(backlog: &'a mut ProjectBacklog, id: &TaskId) -> OpResult<&'a mut Task> {
    backlog
        .phases
        .values_mut()
        .flat_map(|phase| phase.tasks.iter_mut())
        .find(|task| &task.id == id)
        .ok_or_else(|| OpError::TaskNotFound(id.clone()))
}

/// First few free IDs of the form `<id>-2`, `<id>-3`, ... for the duplicate
/// suggestion. Counting starts at 2 so `FOO-2` reads as the second `FOO`.
fn suggest_ids(backlog: &ProjectBacklog, id: &TaskId, count: usize) -> Vec<TaskId> {
    let known = graph::all_task_ids(backlog);
    (2..)
        .map(|n| TaskId::new(format!("{}-{n}", id.as_str())))
        .filter(|candidate| !known.contains(candidate))
        .take(count)
        .collect()
}

/// Create a task in `phase` with status `Ready` and a creation note.
pub fn create_task(
    backlog: &mut ProjectBacklog,
    id: TaskId,
    title: String,
    phase: &str,
    priority: TaskPriority,
    estimated_hours: f64,
) -> OpResult<()> {
    if estimated_hours.is_nan() || estimated_hours <= 0.0 {
        return Err(OpError::InvalidHours(estimated_hours));
    }
    if let Some(existing) = graph::find_task(backlog, &id) {
        let suggestions = suggest_ids(backlog, &id, 3);
        return Err(OpError::DuplicateTaskId {
            id,
            phase: existing.phase,
            suggestions,
        });
    }
    if !backlog.phases.contains_key(phase) {
        return Err(OpError::PhaseNotFound {
            name: phase.to_string(),
            available: phase_names(backlog),
        });
    }

    let mut task = Task::new(id, title, priority, estimated_hours);
    task.push_note(format!("Task created in phase {phase}"));
    tracing::info!(id = %task.id, phase, "created task");
    backlog.phases[phase].tasks.push(task);
    Ok(())
}

/// Set the stored status. Any transition is allowed; this is a tracker,
/// not a workflow enforcer. An optional extra note is appended after the
/// transition note.
pub fn update_status(
    backlog: &mut ProjectBacklog,
    id: &TaskId,
    status: TaskStatus,
    note: Option<&str>,
) -> OpResult<TaskStatus> {
    let task = task_mut(backlog, id)?;
    let previous = task.status;
    task.status = status;
    task.push_note(format!("Status changed from {previous} to {status}"));
    if let Some(note) = note {
        task.push_note(note);
    }
    tracing::info!(id = %id, %previous, %status, "updated status");
    Ok(previous)
}

/// Overwrite one task attribute, recording the old and new value in a note.
pub fn set_attribute(
    backlog: &mut ProjectBacklog,
    id: &TaskId,
    attribute: TaskAttribute,
) -> OpResult<()> {
    if let TaskAttribute::EstimatedHours(hours) = attribute
        && (hours.is_nan() || hours <= 0.0)
    {
        return Err(OpError::InvalidHours(hours));
    }
    let task = task_mut(backlog, id)?;
    let note = match attribute {
        TaskAttribute::Priority(priority) => {
            let old = task.priority;
            task.priority = priority;
            format!("Priority changed from {old} to {priority}")
        }
        TaskAttribute::EstimatedHours(hours) => {
            let old = task.estimated_hours;
            task.estimated_hours = hours;
            format!("Estimated hours changed from {old} to {hours}")
        }
        TaskAttribute::Title(title) => {
            let old = std::mem::replace(&mut task.title, title);
            format!("Title changed from \"{old}\" to \"{}\"", task.title)
        }
        TaskAttribute::Assignee(assignee) => {
            let old = task.assignee.replace(assignee);
            format!(
                "Assignee changed from {} to {}",
                old.as_deref().unwrap_or("(none)"),
                task.assignee.as_deref().unwrap_or("(none)"),
            )
        }
        TaskAttribute::Dependencies(deps) => {
            let old = std::mem::replace(&mut task.dependencies, deps);
            format!(
                "Dependencies changed from [{}] to [{}]",
                join_ids(&old),
                join_ids(&task.dependencies),
            )
        }
        TaskAttribute::Blocks(blocks) => {
            let old = std::mem::replace(&mut task.blocks, blocks);
            format!(
                "Blocks changed from [{}] to [{}]",
                join_ids(&old),
                join_ids(&task.blocks),
            )
        }
        TaskAttribute::Requirements(requirements) => {
            let old_len = task.requirements.len();
            task.requirements = requirements;
            format!(
                "Requirements replaced ({old_len} -> {} entries)",
                task.requirements.len(),
            )
        }
    };
    task.push_note(&note);
    tracing::info!(id = %id, "set attribute: {note}");
    Ok(())
}

fn join_ids(ids: &[TaskId]) -> String {
    ids.iter()
        .map(TaskId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Add the dependency edge `id -> dep_id`.
///
/// Both tasks must exist, the edge must not already be present, and the
/// insertion must not close a cycle. All three checks pass before anything
/// is written.
pub fn add_dependency(backlog: &mut ProjectBacklog, id: &TaskId, dep_id: &TaskId) -> OpResult<()> {
    let task = graph::get_task(backlog, id).ok_or_else(|| OpError::TaskNotFound(id.clone()))?;
    if graph::find_task(backlog, dep_id).is_none() {
        return Err(OpError::TaskNotFound(dep_id.clone()));
    }
    if task.dependencies.contains(dep_id) {
        return Err(OpError::AlreadyDepends {
            task: id.clone(),
            dependency: dep_id.clone(),
        });
    }
    if cycle::would_create_cycle(backlog, id, dep_id) {
        return Err(OpError::CircularDependency {
            task: id.clone(),
            dependency: dep_id.clone(),
        });
    }

    let task = task_mut(backlog, id)?;
    task.dependencies.push(dep_id.clone());
    task.push_note(format!("Added dependency on {dep_id}"));
    tracing::info!(id = %id, dependency = %dep_id, "added dependency");
    Ok(())
}

/// Remove the dependency edge `id -> dep_id`.
pub fn remove_dependency(
    backlog: &mut ProjectBacklog,
    id: &TaskId,
    dep_id: &TaskId,
) -> OpResult<()> {
    let task = task_mut(backlog, id)?;
    let Some(position) = task.dependencies.iter().position(|dep| dep == dep_id) else {
        return Err(OpError::DependencyNotFound {
            task: id.clone(),
            dependency: dep_id.clone(),
        });
    };
    task.dependencies.remove(position);
    task.push_note(format!("Removed dependency on {dep_id}"));
    tracing::info!(id = %id, dependency = %dep_id, "removed dependency");
    Ok(())
}

/// Move a task to another phase, optionally at a given position.
///
/// The position is clamped to the target's task count; omitted means
/// append. Remove and insert happen together, so the task is in exactly one
/// phase afterwards.
pub fn move_task(
    backlog: &mut ProjectBacklog,
    id: &TaskId,
    target_phase: &str,
    position: Option<usize>,
) -> OpResult<()> {
    let location = graph::find_task(backlog, id).ok_or_else(|| OpError::TaskNotFound(id.clone()))?;
    if !backlog.phases.contains_key(target_phase) {
        return Err(OpError::PhaseNotFound {
            name: target_phase.to_string(),
            available: phase_names(backlog),
        });
    }
    if location.phase == target_phase {
        return Err(OpError::SamePhase {
            task: id.clone(),
            phase: location.phase,
        });
    }

    // Checks done; the remove and insert below cannot fail.
    let mut task = backlog.phases[&location.phase].tasks.remove(location.index);
    let target = &mut backlog.phases[target_phase].tasks;
    let index = position.map_or(target.len(), |p| p.min(target.len()));
    task.push_note(format!(
        "Moved from phase {} to phase {target_phase}",
        location.phase
    ));
    target.insert(index, task);
    tracing::info!(id = %id, from = %location.phase, to = target_phase, index, "moved task");
    Ok(())
}

/// Set the stored status of every task in `phase`, one note per task.
///
/// Returns the number of tasks updated.
pub fn bulk_update_phase(
    backlog: &mut ProjectBacklog,
    phase: &str,
    status: TaskStatus,
) -> OpResult<usize> {
    let Some(phase_entry) = backlog.phases.get_mut(phase) else {
        return Err(OpError::PhaseNotFound {
            name: phase.to_string(),
            available: phase_names(backlog),
        });
    };
    for task in &mut phase_entry.tasks {
        let previous = task.status;
        task.status = status;
        task.push_note(format!(
            "Status changed from {previous} to {status} (bulk phase update)"
        ));
    }
    let count = phase_entry.tasks.len();
    tracing::info!(phase, %status, count, "bulk updated phase");
    Ok(count)
}

/// Append a timestamped note to a task.
pub fn add_note(backlog: &mut ProjectBacklog, id: &TaskId, text: &str) -> OpResult<()> {
    let task = task_mut(backlog, id)?;
    task.push_note(text);
    tracing::debug!(id = %id, "added note");
    Ok(())
}
