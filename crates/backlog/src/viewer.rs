//! Read-only projection of the backlog for the web viewer.
//!
//! The viewer itself is a separate service; this module only shapes the
//! data it consumes. Everything here is a pure function of the document,
//! serialized as JSON by the `ui-data` command.
//!
//! Stats bucket by *stored* status so the dashboard reflects what people
//! set; the per-task `effective_status` field carries the graph-derived
//! view alongside it.

use crate::domain::{ProjectBacklog, Task, TaskId, TaskStatus};
use crate::graph::{critical_path, status, task_map, tasks_with_phase};
use indexmap::IndexMap;
use serde::Serialize;

/// A task flattened together with its phase context.
#[derive(Debug, Clone, Serialize)]
pub struct TaskWithPhase {
    /// The task record itself, fields inlined
    #[serde(flatten)]
    pub task: Task,

    /// Owning phase key
    pub phase: String,

    /// Owning phase title
    pub phase_title: String,

    /// Status once dependencies are taken into account
    pub effective_status: TaskStatus,
}

/// Stored-status counts for one phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseStats {
    /// Tasks marked completed
    pub completed: usize,

    /// Tasks in progress or testing
    pub in_progress: usize,

    /// Tasks explicitly marked blocked
    pub blocked: usize,

    /// Everything else (ready)
    pub pending: usize,
}

impl PhaseStats {
    fn record(&mut self, status: TaskStatus) {
        match status {
            TaskStatus::Completed => self.completed += 1,
            TaskStatus::InProgress | TaskStatus::Testing => self.in_progress += 1,
            TaskStatus::Blocked => self.blocked += 1,
            TaskStatus::Ready => self.pending += 1,
        }
    }

    fn total(self) -> usize {
        self.completed + self.in_progress + self.blocked + self.pending
    }
}

/// Whole-project rollup of the per-phase stats.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectStats {
    /// Total task count
    pub total_tasks: usize,

    /// Project-wide stored-status buckets
    #[serde(flatten)]
    pub totals: PhaseStats,

    /// Completed over total, 0..=100; 0 for an empty backlog
    pub completion_percentage: f64,

    /// Per-phase buckets in backlog order
    pub phases: IndexMap<String, PhaseStats>,
}

/// A task as a node in the dependency graph view.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyNode {
    /// Task ID
    pub id: TaskId,

    /// Task title
    pub title: String,

    /// Stored status
    pub status: TaskStatus,

    /// Owning phase key
    pub phase: String,

    /// Estimate in hours
    pub estimated_hours: f64,
}

/// Direction of a rendered graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// `from` must complete before `to`
    Dependency,
    /// `from` blocks `to`
    Blocking,
}

/// One edge in the dependency graph view.
///
/// Both edge sets render with the arrow pointing at the downstream task:
/// a `dependencies` entry becomes `dep -> task`, a `blocks` entry becomes
/// `task -> blocked`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    /// Upstream task
    pub from: TaskId,

    /// Downstream task
    pub to: TaskId,

    /// Which list the edge came from
    pub kind: EdgeKind,
}

/// A dependency node annotated with its structural depth.
#[derive(Debug, Clone, Serialize)]
pub struct CriticalPathNode {
    /// The underlying node, fields inlined
    #[serde(flatten)]
    pub node: DependencyNode,

    /// Longest downstream chain in nodes (see
    /// [`critical_path::longest_node_chain`])
    pub longest_path_length: usize,

    /// Whether this node sits at the global maximum depth
    pub is_critical: bool,
}

/// Everything the viewer needs, in one document.
#[derive(Debug, Clone, Serialize)]
pub struct UiModel {
    /// All tasks with phase context and effective status
    pub tasks_with_phase: Vec<TaskWithPhase>,

    /// Project and per-phase rollups
    pub stats: ProjectStats,

    /// Graph nodes
    pub dependency_nodes: Vec<DependencyNode>,

    /// Graph edges from both relations
    pub dependency_edges: Vec<DependencyEdge>,
}

/// Project the backlog into the viewer model.
pub fn transform_for_ui(backlog: &ProjectBacklog) -> UiModel {
    let tasks = task_map(backlog);

    let mut tasks_with_phase = Vec::new();
    let mut dependency_nodes = Vec::new();
    let mut dependency_edges = Vec::new();
    let mut phase_stats: IndexMap<String, PhaseStats> = IndexMap::new();

    for (phase_name, phase) in &backlog.phases {
        let stats = phase_stats.entry(phase_name.clone()).or_default();
        for task in &phase.tasks {
            stats.record(task.status);
            tasks_with_phase.push(TaskWithPhase {
                task: task.clone(),
                phase: phase_name.clone(),
                phase_title: phase.title.clone(),
                effective_status: status::effective_status(task, &tasks),
            });
            dependency_nodes.push(DependencyNode {
                id: task.id.clone(),
                title: task.title.clone(),
                status: task.status,
                phase: phase_name.clone(),
                estimated_hours: task.estimated_hours,
            });
            for dep in &task.dependencies {
                dependency_edges.push(DependencyEdge {
                    from: dep.clone(),
                    to: task.id.clone(),
                    kind: EdgeKind::Dependency,
                });
            }
            for blocked in &task.blocks {
                dependency_edges.push(DependencyEdge {
                    from: task.id.clone(),
                    to: blocked.clone(),
                    kind: EdgeKind::Blocking,
                });
            }
        }
    }

    let mut totals = PhaseStats::default();
    for stats in phase_stats.values() {
        totals.completed += stats.completed;
        totals.in_progress += stats.in_progress;
        totals.blocked += stats.blocked;
        totals.pending += stats.pending;
    }
    let total_tasks = totals.total();
    let completion_percentage = if total_tasks == 0 {
        0.0
    } else {
        totals.completed as f64 / total_tasks as f64 * 100.0
    };

    UiModel {
        tasks_with_phase,
        stats: ProjectStats {
            total_tasks,
            totals,
            completion_percentage,
            phases: phase_stats,
        },
        dependency_nodes,
        dependency_edges,
    }
}

/// Annotate every graph node with its structural depth and flag the nodes
/// sitting at the global maximum.
pub fn calculate_critical_path(backlog: &ProjectBacklog) -> Vec<CriticalPathNode> {
    let tasks = task_map(backlog);
    let lengths: Vec<usize> = tasks_with_phase(backlog)
        .iter()
        .map(|(_, task)| critical_path::longest_node_chain(&tasks, &task.id))
        .collect();
    let max_length = lengths.iter().copied().max().unwrap_or(0);

    transform_for_ui(backlog)
        .dependency_nodes
        .into_iter()
        .zip(lengths)
        .map(|(node, longest_path_length)| CriticalPathNode {
            node,
            longest_path_length,
            is_critical: longest_path_length == max_length && max_length > 0,
        })
        .collect()
}
