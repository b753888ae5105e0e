//! Circular-dependency detection.
//!
//! Two deliberately different strategies live here:
//!
//! - [`has_circular_dependency`] is the diagnostic scan used by validation.
//!   It walks `dependencies` edges depth-first carrying only the *active
//!   path*, so distinct branches may revisit the same node, and a revisit
//!   within the path signals a cycle.
//! - [`would_create_cycle`] is the pre-commit guard for edge insertion. It
//!   is a plain reachability check over the existing graph (petgraph
//!   `has_path_connecting`) and never mutates state to test the hypothetical
//!   edge: if the new dependency can already reach the task, adding the edge
//!   would close a cycle.

use crate::domain::{ProjectBacklog, TaskId};
use crate::graph::task_map;
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Whether a cycle in the `dependencies` relation is reachable from `id`.
///
/// Dangling references are a validation concern, not a cycle signal; they
/// terminate the branch.
pub fn has_circular_dependency(backlog: &ProjectBacklog, id: &TaskId) -> bool {
    let tasks = task_map(backlog);
    let mut path = Vec::new();
    walk(&tasks, id, &mut path)
}

fn walk<'a>(
    tasks: &HashMap<&TaskId, &'a crate::domain::Task>,
    id: &'a TaskId,
    path: &mut Vec<&'a TaskId>,
) -> bool {
    if path.contains(&id) {
        return true;
    }
    let Some(task) = tasks.get(id) else {
        // Broken reference: dead end for this branch.
        return false;
    };
    path.push(id);
    for dep in &task.dependencies {
        if walk(tasks, dep, path) {
            return true;
        }
    }
    path.pop();
    false
}

/// Whether adding the edge `task -> new_dependency` would close a cycle.
///
/// Builds the current `dependencies` digraph (dangling references skipped)
/// and checks whether `new_dependency` already reaches `task`.
pub fn would_create_cycle(backlog: &ProjectBacklog, task: &TaskId, new_dependency: &TaskId) -> bool {
    let (graph, node_map) = dependency_graph(backlog);
    let (Some(&task_node), Some(&dep_node)) = (node_map.get(task), node_map.get(new_dependency))
    else {
        return false;
    };
    algo::has_path_connecting(&graph, dep_node, task_node, None)
}

/// Build a petgraph digraph over the existing `dependencies` edges.
///
/// Edge direction follows the dependent -> dependency convention: source
/// depends on target. Edges to dangling IDs are skipped.
pub(crate) fn dependency_graph(
    backlog: &ProjectBacklog,
) -> (DiGraph<TaskId, ()>, HashMap<TaskId, NodeIndex>) {
    let mut graph = DiGraph::new();
    let mut node_map: HashMap<TaskId, NodeIndex> = HashMap::new();

    for phase in backlog.phases.values() {
        for task in &phase.tasks {
            node_map
                .entry(task.id.clone())
                .or_insert_with(|| graph.add_node(task.id.clone()));
        }
    }
    for phase in backlog.phases.values() {
        for task in &phase.tasks {
            let from = node_map[&task.id];
            for dep in &task.dependencies {
                if let Some(&to) = node_map.get(dep) {
                    graph.add_edge(from, to, ());
                }
            }
        }
    }
    (graph, node_map)
}
