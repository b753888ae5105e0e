//! Effective status derivation.
//!
//! The stored status records what someone set; the effective status is what
//! the dependency graph says right now. Only `ready` is derived: every other
//! stored status is authoritative, including an explicit `blocked`, which
//! stays blocked even after all dependencies complete until someone moves it.

use crate::domain::{Task, TaskId, TaskStatus};
use std::collections::HashMap;

/// Status of `task` once its dependencies are taken into account.
///
/// A `ready` task is effectively blocked while any dependency is incomplete.
/// A dangling dependency also blocks: a reference to a task that does not
/// exist can never complete.
pub fn effective_status(task: &Task, tasks: &HashMap<&TaskId, &Task>) -> TaskStatus {
    if task.status != TaskStatus::Ready {
        return task.status;
    }
    let gated = task.dependencies.iter().any(|dep| {
        tasks
            .get(dep)
            .is_none_or(|dep_task| dep_task.status != TaskStatus::Completed)
    });
    if gated {
        TaskStatus::Blocked
    } else {
        TaskStatus::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures::{backlog_with, set_status};
    use crate::graph::{get_task, task_map};

    #[test]
    fn test_ready_with_no_dependencies_stays_ready() {
        let backlog = backlog_with(&[("p", vec![("A", 1.0, vec![], vec![])])]);
        let tasks = task_map(&backlog);
        let task = get_task(&backlog, &TaskId::new("A")).unwrap();
        assert_eq!(effective_status(task, &tasks), TaskStatus::Ready);
    }

    #[test]
    fn test_ready_with_incomplete_dependency_is_blocked() {
        let backlog = backlog_with(&[(
            "p",
            vec![("A", 1.0, vec![], vec![]), ("B", 1.0, vec!["A"], vec![])],
        )]);
        let tasks = task_map(&backlog);
        let b = get_task(&backlog, &TaskId::new("B")).unwrap();
        assert_eq!(effective_status(b, &tasks), TaskStatus::Blocked);
    }

    #[test]
    fn test_ready_unblocks_when_all_dependencies_complete() {
        let mut backlog = backlog_with(&[(
            "p",
            vec![
                ("A", 1.0, vec![], vec![]),
                ("B", 1.0, vec![], vec![]),
                ("C", 1.0, vec!["A", "B"], vec![]),
            ],
        )]);
        set_status(&mut backlog, "A", TaskStatus::Completed);

        // One of two complete: still blocked.
        let tasks = task_map(&backlog);
        let c = get_task(&backlog, &TaskId::new("C")).unwrap();
        assert_eq!(effective_status(c, &tasks), TaskStatus::Blocked);

        set_status(&mut backlog, "B", TaskStatus::Completed);
        let tasks = task_map(&backlog);
        let c = get_task(&backlog, &TaskId::new("C")).unwrap();
        assert_eq!(effective_status(c, &tasks), TaskStatus::Ready);
    }

    #[test]
    fn test_dangling_dependency_blocks() {
        let backlog = backlog_with(&[("p", vec![("A", 1.0, vec!["ghost"], vec![])])]);
        let tasks = task_map(&backlog);
        let a = get_task(&backlog, &TaskId::new("A")).unwrap();
        assert_eq!(effective_status(a, &tasks), TaskStatus::Blocked);
    }

    #[test]
    fn test_non_ready_statuses_are_authoritative() {
        let mut backlog = backlog_with(&[(
            "p",
            vec![("A", 1.0, vec![], vec![]), ("B", 1.0, vec!["A"], vec![])],
        )]);
        for status in [
            TaskStatus::InProgress,
            TaskStatus::Testing,
            TaskStatus::Completed,
            TaskStatus::Blocked,
        ] {
            set_status(&mut backlog, "B", status);
            let tasks = task_map(&backlog);
            let b = get_task(&backlog, &TaskId::new("B")).unwrap();
            assert_eq!(effective_status(b, &tasks), status);
        }
    }

    #[test]
    fn test_explicit_blocked_survives_completed_dependencies() {
        let mut backlog = backlog_with(&[(
            "p",
            vec![("A", 1.0, vec![], vec![]), ("B", 1.0, vec!["A"], vec![])],
        )]);
        set_status(&mut backlog, "A", TaskStatus::Completed);
        set_status(&mut backlog, "B", TaskStatus::Blocked);
        let tasks = task_map(&backlog);
        let b = get_task(&backlog, &TaskId::new("B")).unwrap();
        assert_eq!(effective_status(b, &tasks), TaskStatus::Blocked);
    }
}
