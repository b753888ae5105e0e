//! End-to-end mutation tests: scaffold a backlog on disk, mutate it through
//! the ops layer, persist, and reload.

use backlog::commands::init;
use backlog::domain::{TaskId, TaskPriority, TaskStatus};
use backlog::graph;
use backlog::ops::{self, OpError, TaskAttribute};
use backlog::storage::BacklogStore;
use rstest::rstest;
use tempfile::TempDir;

async fn scaffolded_store() -> (TempDir, BacklogStore) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("project-backlog.yml");
    init::init(&path, "Integration", false).await.unwrap();
    let store = BacklogStore::load(&path).await.unwrap();
    (dir, store)
}

#[tokio::test]
async fn test_full_task_lifecycle_survives_reload() {
    let (_dir, mut store) = scaffolded_store().await;

    ops::create_task(
        store.backlog_mut(),
        TaskId::new("API-001"),
        "Build the API".to_string(),
        "phase-1",
        TaskPriority::High,
        10.0,
    )
    .unwrap();
    ops::create_task(
        store.backlog_mut(),
        TaskId::new("API-002"),
        "Document the API".to_string(),
        "phase-1",
        TaskPriority::Low,
        3.0,
    )
    .unwrap();
    ops::add_dependency(store.backlog_mut(), &TaskId::new("API-002"), &TaskId::new("API-001"))
        .unwrap();
    ops::update_status(
        store.backlog_mut(),
        &TaskId::new("API-001"),
        TaskStatus::InProgress,
        Some("started"),
    )
    .unwrap();
    ops::set_attribute(
        store.backlog_mut(),
        &TaskId::new("API-002"),
        TaskAttribute::EstimatedHours(5.0),
    )
    .unwrap();
    store.save().await.unwrap();

    let reloaded = BacklogStore::load(store.path()).await.unwrap();
    let backlog = reloaded.backlog();

    let api1 = graph::get_task(backlog, &TaskId::new("API-001")).unwrap();
    assert_eq!(api1.status, TaskStatus::InProgress);
    assert!(api1.notes.iter().any(|n| n.contains("started")));

    let api2 = graph::get_task(backlog, &TaskId::new("API-002")).unwrap();
    assert_eq!(api2.dependencies, vec![TaskId::new("API-001")]);
    assert!((api2.estimated_hours - 5.0).abs() < f64::EPSILON);
    assert!(graph::validate::validate(backlog).is_empty());
}

#[tokio::test]
async fn test_duplicate_id_rejected_across_phases() {
    let (_dir, mut store) = scaffolded_store().await;

    // SETUP-001 comes from the scaffold; a second one must be rejected with
    // the owning phase and free alternatives.
    let err = ops::create_task(
        store.backlog_mut(),
        TaskId::new("SETUP-001"),
        "Clash".to_string(),
        "phase-1",
        TaskPriority::Medium,
        1.0,
    )
    .unwrap_err();

    let OpError::DuplicateTaskId { phase, suggestions, .. } = err else {
        panic!("expected DuplicateTaskId");
    };
    assert_eq!(phase, "phase-1");
    assert_eq!(suggestions[0], TaskId::new("SETUP-001-2"));
    assert_eq!(graph::all_task_ids(store.backlog()).len(), 1);
}

#[tokio::test]
async fn test_cycle_rejection_leaves_file_unchanged() {
    let (_dir, mut store) = scaffolded_store().await;

    for id in ["A", "B"] {
        ops::create_task(
            store.backlog_mut(),
            TaskId::new(id),
            format!("Task {id}"),
            "phase-1",
            TaskPriority::Medium,
            2.0,
        )
        .unwrap();
    }
    ops::add_dependency(store.backlog_mut(), &TaskId::new("B"), &TaskId::new("A")).unwrap();
    store.save().await.unwrap();
    let on_disk = std::fs::read_to_string(store.path()).unwrap();

    // A -> B would close the loop; the document must not change.
    let err =
        ops::add_dependency(store.backlog_mut(), &TaskId::new("A"), &TaskId::new("B")).unwrap_err();
    assert!(matches!(err, OpError::CircularDependency { .. }));
    store.save().await.unwrap();
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), on_disk);
}

#[tokio::test]
async fn test_move_keeps_task_in_exactly_one_phase() {
    let (_dir, mut store) = scaffolded_store().await;

    // A second phase to move into.
    store.backlog_mut().phases.insert(
        "phase-2".to_string(),
        backlog::domain::Phase {
            title: "Phase 2".to_string(),
            description: String::new(),
            status: "planned".to_string(),
            estimated_duration: String::new(),
            tasks: Vec::new(),
        },
    );

    ops::move_task(store.backlog_mut(), &TaskId::new("SETUP-001"), "phase-2", Some(0)).unwrap();
    store.save().await.unwrap();

    let reloaded = BacklogStore::load(store.path()).await.unwrap();
    let backlog = reloaded.backlog();
    assert!(backlog.phases["phase-1"].tasks.is_empty());
    assert_eq!(backlog.phases["phase-2"].tasks[0].id, TaskId::new("SETUP-001"));

    let occurrences: usize = backlog
        .phases
        .values()
        .map(|p| p.tasks.iter().filter(|t| t.id.as_str() == "SETUP-001").count())
        .sum();
    assert_eq!(occurrences, 1);
}

#[rstest]
#[case::forward(TaskStatus::Ready, TaskStatus::Completed)]
#[case::backward(TaskStatus::Completed, TaskStatus::Ready)]
#[case::sideways(TaskStatus::Blocked, TaskStatus::Testing)]
#[tokio::test]
async fn test_any_status_transition_is_allowed(
    #[case] from: TaskStatus,
    #[case] to: TaskStatus,
) {
    let (_dir, mut store) = scaffolded_store().await;
    let id = TaskId::new("SETUP-001");

    ops::update_status(store.backlog_mut(), &id, from, None).unwrap();
    let previous = ops::update_status(store.backlog_mut(), &id, to, None).unwrap();
    assert_eq!(previous, from);
    assert_eq!(graph::get_task(store.backlog(), &id).unwrap().status, to);
}

#[tokio::test]
async fn test_bulk_phase_update_persists() {
    let (_dir, mut store) = scaffolded_store().await;

    let count =
        ops::bulk_update_phase(store.backlog_mut(), "phase-1", TaskStatus::Completed).unwrap();
    assert_eq!(count, 1);
    store.save().await.unwrap();

    let reloaded = BacklogStore::load(store.path()).await.unwrap();
    assert!(reloaded.backlog().phases["phase-1"]
        .tasks
        .iter()
        .all(|t| t.status == TaskStatus::Completed));
}

#[tokio::test]
async fn test_unknown_phase_reported_with_alternatives() {
    let (_dir, mut store) = scaffolded_store().await;
    let err = ops::bulk_update_phase(store.backlog_mut(), "phase-9", TaskStatus::Ready).unwrap_err();
    assert_eq!(
        err,
        OpError::PhaseNotFound {
            name: "phase-9".to_string(),
            available: vec!["phase-1".to_string()],
        }
    );
}
