//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands. Rejected
//! operations ([`OpError`]) are printed as plain messages and do not fail
//! the process; only storage and parse errors propagate.

use anyhow::Result;

use super::args::{
    BulkPhaseArgs, CreateArgs, DepAction, DepArgs, InitArgs, ListArgs, MoveArgs, NoteArgs, SetArgs,
    UpdateArgs,
};
use crate::domain::TaskId;
use crate::graph::{critical_path, task_map, validate};
use crate::ops::{self, OpError};
use crate::output::{self, OutputConfig, OutputMode};
use crate::storage::BacklogStore;
use crate::viewer;
use std::path::Path;

/// Execute the init command
pub async fn execute_init(path: &Path, args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    let result = init::init(path, &args.name, args.existing).await?;

    if !args.quiet {
        match result {
            init::InitOutcome::Created { backlog_file, readme_file } => {
                println!("Initialized backlog for '{}'", args.name);
                println!("  Backlog: {}", backlog_file.display());
                if let Some(readme) = readme_file {
                    println!("  README:  {}", readme.display());
                }
            }
            init::InitOutcome::KeptExisting { backlog_file } => {
                println!("Keeping existing backlog at {}", backlog_file.display());
            }
        }
    }

    Ok(())
}

/// Save the store and report the outcome of a mutation.
///
/// An `Err` here is an expected user-level rejection: nothing was mutated,
/// so nothing is saved, and the process still exits 0.
async fn commit(store: &BacklogStore, outcome: Result<String, OpError>) -> Result<()> {
    let config = OutputConfig::from_env();
    match outcome {
        Ok(message) => {
            store.save().await?;
            output::print_message(&output::success(&message, &config))?;
        }
        Err(err) => {
            output::print_message(&output::warning(&err.to_string(), &config))?;
        }
    }
    Ok(())
}

/// Execute the list command
pub fn execute_list(store: &BacklogStore, args: &ListArgs, output_mode: OutputMode) -> Result<()> {
    let backlog = store.backlog();
    let model = viewer::transform_for_ui(backlog);

    let status_filter = args.status.map(crate::domain::TaskStatus::from);
    let priority_filter = args.priority.map(crate::domain::TaskPriority::from);
    let tasks: Vec<_> = model
        .tasks_with_phase
        .into_iter()
        .filter(|t| status_filter.is_none_or(|s| t.task.status == s))
        .filter(|t| priority_filter.is_none_or(|p| t.task.priority == p))
        .collect();

    match output_mode {
        OutputMode::Json => output::print_json(&tasks)?,
        OutputMode::Text => {
            if tasks.is_empty() {
                println!("No tasks found.");
                return Ok(());
            }
            let config = OutputConfig::from_env();
            let mut current_phase: Option<&str> = None;
            for entry in &tasks {
                if current_phase != Some(entry.phase.as_str()) {
                    if current_phase.is_some() {
                        println!();
                    }
                    println!(
                        "{}",
                        output::bold(&format!("{}: {}", entry.phase, entry.phase_title), &config)
                    );
                    current_phase = Some(entry.phase.as_str());
                }
                let task = &entry.task;
                println!(
                    "  {} {} [{}] {} ({}h)",
                    output::colored_status_icon(entry.effective_status, &config),
                    output::colorize_id(task.id.as_str(), &config),
                    output::colorize_priority(task.priority, &config),
                    task.title,
                    task.estimated_hours,
                );
                if !task.dependencies.is_empty() {
                    println!(
                        "      {} {}",
                        output::dimmed("depends on:", &config),
                        join(&task.dependencies),
                    );
                }
                if !task.blocks.is_empty() {
                    println!(
                        "      {} {}",
                        output::dimmed("blocks:", &config),
                        join(&task.blocks),
                    );
                }
            }
        }
    }
    Ok(())
}

fn join(ids: &[TaskId]) -> String {
    ids.iter()
        .map(TaskId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Execute the phases command
pub fn execute_phases(store: &BacklogStore, output_mode: OutputMode) -> Result<()> {
    let backlog = store.backlog();

    match output_mode {
        OutputMode::Json => {
            let phases: Vec<_> = backlog
                .phases
                .iter()
                .map(|(name, phase)| {
                    serde_json::json!({
                        "name": name,
                        "title": phase.title,
                        "description": phase.description,
                        "status": phase.status,
                        "estimated_duration": phase.estimated_duration,
                        "task_count": phase.tasks.len(),
                    })
                })
                .collect();
            output::print_json(&phases)?;
        }
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            for (name, phase) in &backlog.phases {
                println!(
                    "{} [{}] {} tasks, {}",
                    output::bold(&format!("{name}: {}", phase.title), &config),
                    phase.status,
                    phase.tasks.len(),
                    if phase.estimated_duration.is_empty() {
                        "no estimate"
                    } else {
                        phase.estimated_duration.as_str()
                    },
                );
                if !phase.description.is_empty() {
                    for line in output::wrap_text(&phase.description, config.wrap_width().saturating_sub(2)) {
                        println!("  {}", output::dimmed(&line, &config));
                    }
                }
            }
        }
    }
    Ok(())
}

/// Execute the create command
pub async fn execute_create(store: &mut BacklogStore, args: &CreateArgs) -> Result<()> {
    let id = TaskId::new(args.id.as_str());
    let outcome = ops::create_task(
        store.backlog_mut(),
        id.clone(),
        args.title.clone(),
        &args.phase,
        args.priority.into(),
        args.hours,
    )
    .map(|()| format!("Created task {id} in phase {}", args.phase));
    commit(store, outcome).await
}

/// Execute the update command
pub async fn execute_update(store: &mut BacklogStore, args: &UpdateArgs) -> Result<()> {
    let id = TaskId::new(args.id.as_str());
    let status = args.status.into();
    let outcome = ops::update_status(store.backlog_mut(), &id, status, args.note.as_deref())
        .map(|previous| format!("Task {id}: {previous} -> {status}"));
    commit(store, outcome).await
}

/// Execute the note command
pub async fn execute_note(store: &mut BacklogStore, args: &NoteArgs) -> Result<()> {
    let id = TaskId::new(args.id.as_str());
    let text = args.text.join(" ");
    let outcome =
        ops::add_note(store.backlog_mut(), &id, &text).map(|()| format!("Added note to {id}"));
    commit(store, outcome).await
}

/// Execute the set command
pub async fn execute_set(store: &mut BacklogStore, args: &SetArgs) -> Result<()> {
    let config = OutputConfig::from_env();
    let attribute = match args.attribute.parse_value(&args.value) {
        Ok(attribute) => attribute,
        Err(message) => {
            // Bad value text is an expected condition, same as an OpError.
            output::print_message(&output::warning(&message, &config))?;
            return Ok(());
        }
    };

    let id = TaskId::new(args.id.as_str());
    let outcome = ops::set_attribute(store.backlog_mut(), &id, attribute)
        .map(|()| format!("Updated task {id}"));
    commit(store, outcome).await
}

/// Execute the move command
pub async fn execute_move(store: &mut BacklogStore, args: &MoveArgs) -> Result<()> {
    let id = TaskId::new(args.id.as_str());
    let outcome = ops::move_task(store.backlog_mut(), &id, &args.phase, args.position)
        .map(|()| format!("Moved task {id} to phase {}", args.phase));
    commit(store, outcome).await
}

/// Execute the dep command
pub async fn execute_dep(store: &mut BacklogStore, args: &DepArgs) -> Result<()> {
    let outcome = match &args.action {
        DepAction::Add { id, dep_id } => {
            let id = TaskId::new(id.as_str());
            let dep_id = TaskId::new(dep_id.as_str());
            ops::add_dependency(store.backlog_mut(), &id, &dep_id)
                .map(|()| format!("Task {id} now depends on {dep_id}"))
        }
        DepAction::Remove { id, dep_id } => {
            let id = TaskId::new(id.as_str());
            let dep_id = TaskId::new(dep_id.as_str());
            ops::remove_dependency(store.backlog_mut(), &id, &dep_id)
                .map(|()| format!("Removed dependency on {dep_id} from {id}"))
        }
    };
    commit(store, outcome).await
}

/// Execute the validate command
pub fn execute_validate(store: &BacklogStore, output_mode: OutputMode) -> Result<()> {
    let issues = validate::validate(store.backlog());

    match output_mode {
        OutputMode::Json => output::print_json(&issues)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            if issues.is_empty() {
                output::print_message(&output::success("All dependencies are valid.", &config))?;
            } else {
                for issue in &issues {
                    output::print_message(&output::warning(&issue.to_string(), &config))?;
                }
                output::print_message(&format!("{} issue(s) found.", issues.len()))?;
            }
        }
    }
    Ok(())
}

/// Execute the critical-path command
pub fn execute_critical_path(store: &BacklogStore, output_mode: OutputMode) -> Result<()> {
    let report = critical_path::critical_path(store.backlog());

    match output_mode {
        OutputMode::Json => output::print_json(&report)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            if report.entry_points.is_empty() {
                println!("No entry points: every task has dependencies.");
                return Ok(());
            }
            println!(
                "{} {}",
                output::dimmed("Entry points:", &config),
                join(&report.entry_points),
            );
            let tasks = task_map(store.backlog());
            println!("{}", output::bold("Critical path:", &config));
            for id in &report.path.tasks {
                let hours = tasks.get(id).map_or(0.0, |t| t.estimated_hours);
                println!("  {} ({hours}h)", output::colorize_id(id.as_str(), &config));
            }
            println!("Total: {}h", report.path.total_hours);
        }
    }
    Ok(())
}

/// Execute the bulk-phase command
pub async fn execute_bulk_phase(store: &mut BacklogStore, args: &BulkPhaseArgs) -> Result<()> {
    let status = args.status.into();
    let outcome = ops::bulk_update_phase(store.backlog_mut(), &args.phase, status)
        .map(|count| format!("Set {count} task(s) in phase {} to {status}", args.phase));
    commit(store, outcome).await
}

/// Execute the ui-data command
pub fn execute_ui_data(store: &BacklogStore) -> Result<()> {
    let model = viewer::transform_for_ui(store.backlog());
    output::print_json(&model)?;
    Ok(())
}
