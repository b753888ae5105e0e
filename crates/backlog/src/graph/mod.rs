//! Dependency graph engine.
//!
//! The backlog's tasks form a directed graph along two independent edge
//! sets: `dependencies` (pointing into a task) and `blocks` (pointing out of
//! it). This module holds the queries over that graph and the submodules for
//! cycle detection, critical-path analysis, effective status, and whole-graph
//! validation.

pub mod critical_path;
pub mod cycle;
pub mod status;
pub mod validate;

use crate::domain::{ProjectBacklog, Task, TaskId};
use std::collections::{HashMap, HashSet};

/// Where a task lives inside the backlog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLocation {
    /// Name of the owning phase
    pub phase: String,

    /// Index within the phase's task list
    pub index: usize,
}

/// Locate a task by ID.
///
/// Linear scan over all phases, first match wins; IDs are globally unique so
/// this is well-defined. Not finding the task is a normal outcome for every
/// caller, hence `Option` rather than an error.
pub fn find_task(backlog: &ProjectBacklog, id: &TaskId) -> Option<TaskLocation> {
    for (phase_name, phase) in &backlog.phases {
        if let Some(index) = phase.tasks.iter().position(|task| &task.id == id) {
            return Some(TaskLocation {
                phase: phase_name.clone(),
                index,
            });
        }
    }
    None
}

/// Shared reference to a task by ID.
pub fn get_task<'a>(backlog: &'a ProjectBacklog, id: &TaskId) -> Option<&'a Task> {
    backlog
        .phases
        .values()
        .flat_map(|phase| phase.tasks.iter())
        .find(|task| &task.id == id)
}

/// All task IDs across every phase, for referential-integrity checks.
pub fn all_task_ids(backlog: &ProjectBacklog) -> HashSet<TaskId> {
    backlog
        .phases
        .values()
        .flat_map(|phase| phase.tasks.iter())
        .map(|task| task.id.clone())
        .collect()
}

/// Every task paired with its owning phase name, in phase-then-within-phase
/// order. The flattened view the analysis engines operate on.
pub fn tasks_with_phase(backlog: &ProjectBacklog) -> Vec<(&str, &Task)> {
    backlog
        .phases
        .iter()
        .flat_map(|(name, phase)| phase.tasks.iter().map(move |task| (name.as_str(), task)))
        .collect()
}

/// Index of every task by ID.
pub fn task_map(backlog: &ProjectBacklog) -> HashMap<&TaskId, &Task> {
    backlog
        .phases
        .values()
        .flat_map(|phase| phase.tasks.iter())
        .map(|task| (&task.id, task))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::backlog_with;
    use super::*;

    #[test]
    fn test_find_task_reports_phase_and_index() {
        let backlog = backlog_with(&[
            ("alpha", vec![("A-1", 1.0, vec![], vec![]), ("A-2", 1.0, vec![], vec![])]),
            ("beta", vec![("B-1", 1.0, vec![], vec![])]),
        ]);

        let loc = find_task(&backlog, &TaskId::new("A-2")).unwrap();
        assert_eq!(loc.phase, "alpha");
        assert_eq!(loc.index, 1);

        let loc = find_task(&backlog, &TaskId::new("B-1")).unwrap();
        assert_eq!(loc.phase, "beta");
        assert_eq!(loc.index, 0);
    }

    #[test]
    fn test_find_task_missing_is_none() {
        let backlog = backlog_with(&[("alpha", vec![])]);
        assert!(find_task(&backlog, &TaskId::new("nope")).is_none());
    }

    #[test]
    fn test_all_task_ids_spans_phases() {
        let backlog = backlog_with(&[
            ("alpha", vec![("A-1", 1.0, vec![], vec![])]),
            ("beta", vec![("B-1", 1.0, vec![], vec![])]),
        ]);
        let ids = all_task_ids(&backlog);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&TaskId::new("A-1")));
        assert!(ids.contains(&TaskId::new("B-1")));
    }

    #[test]
    fn test_tasks_with_phase_preserves_order() {
        let backlog = backlog_with(&[
            ("beta", vec![("B-1", 1.0, vec![], vec![])]),
            ("alpha", vec![("A-1", 1.0, vec![], vec![]), ("A-2", 1.0, vec![], vec![])]),
        ]);
        let flattened: Vec<_> = tasks_with_phase(&backlog)
            .into_iter()
            .map(|(phase, task)| (phase.to_string(), task.id.as_str().to_string()))
            .collect();
        assert_eq!(
            flattened,
            vec![
                ("beta".to_string(), "B-1".to_string()),
                ("alpha".to_string(), "A-1".to_string()),
                ("alpha".to_string(), "A-2".to_string()),
            ]
        );
    }
}
