//! Critical-path analysis over the `blocks` relation.
//!
//! Two distinct metrics share the "critical path" name and are kept as
//! distinctly named functions on purpose:
//!
//! - [`critical_path`] / [`find_longest_path`]: the hours-weighted chain the
//!   CLI reports — the maximum sum of `estimated_hours` along any `blocks`
//!   chain starting from an entry point (a task with no dependencies).
//! - [`longest_node_chain`]: the node-count depth the viewer uses to flag
//!   structurally critical tasks, counting tasks rather than hours.
//!
//! Both walks carry a path-local visited set so corrupt cyclic `blocks`
//! data terminates: a repeated node is treated as a dead end.

use crate::domain::{ProjectBacklog, Task, TaskId};
use crate::graph::task_map;
use serde::Serialize;
use std::collections::HashMap;

/// A chain of tasks through the `blocks` relation and its summed hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongestPath {
    /// Task IDs along the chain, in order
    pub tasks: Vec<TaskId>,

    /// Sum of `estimated_hours` along the chain
    pub total_hours: f64,
}

impl LongestPath {
    fn empty() -> Self {
        Self {
            tasks: Vec::new(),
            total_hours: 0.0,
        }
    }
}

/// Result of the whole-graph critical-path analysis.
#[derive(Debug, Clone, Serialize)]
pub struct CriticalPathReport {
    /// Tasks with no dependencies, in backlog order
    pub entry_points: Vec<TaskId>,

    /// The maximum-hours chain over all entry points
    pub path: LongestPath,
}

/// Longest hours-weighted chain starting at `id`.
///
/// The chain is `id` followed by whichever of its `blocks` targets yields
/// the longest sub-chain; a task with no outgoing `blocks` contributes just
/// its own hours. Ties go to the first-encountered target (list order).
/// Unknown IDs contribute an empty path.
pub fn find_longest_path(tasks: &HashMap<&TaskId, &Task>, id: &TaskId) -> LongestPath {
    let mut path = Vec::new();
    longest_from(tasks, id, &mut path)
}

fn longest_from<'a>(
    tasks: &HashMap<&TaskId, &'a Task>,
    id: &'a TaskId,
    active: &mut Vec<&'a TaskId>,
) -> LongestPath {
    let Some(task) = tasks.get(id) else {
        return LongestPath::empty();
    };
    if active.contains(&id) {
        // Cyclic blocks data: treat the repeated node as a dead end.
        return LongestPath::empty();
    }
    active.push(id);

    let mut best = LongestPath::empty();
    for blocked in &task.blocks {
        let sub = longest_from(tasks, blocked, active);
        if sub.total_hours > best.total_hours {
            best = sub;
        }
    }
    active.pop();

    let mut chain = Vec::with_capacity(best.tasks.len() + 1);
    chain.push(id.clone());
    chain.extend(best.tasks);
    LongestPath {
        tasks: chain,
        total_hours: task.estimated_hours + best.total_hours,
    }
}

/// Hours-weighted critical path over the whole backlog.
///
/// Entry points are the tasks with no dependencies; the critical path is the
/// maximum-hours [`find_longest_path`] over all of them.
pub fn critical_path(backlog: &ProjectBacklog) -> CriticalPathReport {
    let tasks = task_map(backlog);

    let entry_points: Vec<TaskId> = backlog
        .phases
        .values()
        .flat_map(|phase| phase.tasks.iter())
        .filter(|task| task.dependencies.is_empty())
        .map(|task| task.id.clone())
        .collect();

    let mut path = LongestPath::empty();
    for entry in &entry_points {
        let candidate = find_longest_path(&tasks, entry);
        if candidate.total_hours > path.total_hours {
            path = candidate;
        }
    }

    CriticalPathReport { entry_points, path }
}

/// Longest downstream chain from `id` counted in nodes, not hours.
///
/// The viewer's structural-depth metric: a task with no outgoing `blocks`
/// has length 1. A repeated node within the active walk contributes no
/// further depth, so cyclic data yields a finite result.
pub fn longest_node_chain(tasks: &HashMap<&TaskId, &Task>, id: &TaskId) -> usize {
    let mut active = Vec::new();
    node_chain_from(tasks, id, &mut active)
}

fn node_chain_from<'a>(
    tasks: &HashMap<&TaskId, &'a Task>,
    id: &'a TaskId,
    active: &mut Vec<&'a TaskId>,
) -> usize {
    if active.contains(&id) {
        return 0;
    }
    let Some(task) = tasks.get(id) else {
        return 0;
    };
    active.push(id);
    let mut max = 1;
    for blocked in &task.blocks {
        max = max.max(1 + node_chain_from(tasks, blocked, active));
    }
    active.pop();
    max
}
