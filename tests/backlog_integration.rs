use tempfile::tempdir;

use wiggum::error::WiggumError;
use wiggum::manager::{TaskManager, TaskUpdate};
use wiggum::model::{Category, CompletedBy, Status};
use wiggum::store::PrdStore;

fn manager_in(dir: &std::path::Path) -> TaskManager {
    let store = PrdStore::new(dir.join("plans").join("prd.json"));
    store.init("integration").unwrap();
    TaskManager::new(store)
}

#[test]
fn test_full_workflow() {
    let dir = tempdir().unwrap();
    let manager = manager_in(dir.path());

    // Build a small dependency chain: 1 <- 2 <- 3, plus a free task 4.
    let t1 = manager
        .add_task(
            "Set up project scaffolding".into(),
            1,
            Category::Infrastructure,
            vec![],
            None,
        )
        .unwrap();
    assert_eq!(t1.id, "1");

    manager
        .add_task(
            "Implement export".into(),
            2,
            Category::Feature,
            vec!["1".into()],
            None,
        )
        .unwrap();
    manager
        .add_task(
            "Document export".into(),
            3,
            Category::Docs,
            vec!["2".into()],
            Some("cover the CSV flavour too".into()),
        )
        .unwrap();
    manager
        .add_task("Unrelated chore".into(), 5, Category::Refactor, vec![], None)
        .unwrap();

    // Only the chain head and the free task are ready.
    let ready: Vec<String> = manager
        .ready_tasks()
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ready, vec!["1", "4"]);

    // Completing out of order is rejected and leaves nothing mutated.
    let err = manager.complete_task("3").unwrap_err();
    assert!(matches!(
        err,
        WiggumError::DependencyUnsatisfied { ref dependency, .. } if dependency == "2"
    ));
    assert_eq!(
        manager.list_tasks(Some(Status::Completed), None).unwrap().len(),
        0
    );

    // Walk the chain.
    manager.complete_task("1").unwrap();
    let ready: Vec<String> = manager
        .ready_tasks()
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ready, vec!["2", "4"]);

    manager.complete_task("2").unwrap();
    manager.complete_task("3").unwrap();

    let summary = manager.status_summary().unwrap();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.completed, 3);
    assert_eq!(summary.pending, 1);
    assert_eq!(summary.recently_completed[0].id, "3");

    // The document on disk round-trips through a fresh manager.
    let reopened = TaskManager::new(PrdStore::new(dir.path().join("plans").join("prd.json")));
    let all = reopened.list_tasks(None, None).unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].id, "1");
    assert_eq!(all[0].completed_by, Some(CompletedBy::Manual));
}

#[test]
fn test_reopening_a_completed_task_clears_provenance() {
    let dir = tempdir().unwrap();
    let manager = manager_in(dir.path());
    manager
        .add_task("Flaky feature".into(), 1, Category::Feature, vec![], None)
        .unwrap();
    manager.complete_task("1").unwrap();

    manager
        .update_task(
            "1",
            TaskUpdate {
                status: Some(Status::InProgress),
                ..TaskUpdate::default()
            },
        )
        .unwrap();

    let tasks = manager.list_tasks(None, None).unwrap();
    let task = &tasks[0];
    assert_eq!(task.status, Status::InProgress);
    assert_eq!(task.completed_at, None);
    assert_eq!(task.completed_by, None);

    // Completing again stamps fresh metadata.
    let done = manager.complete_task("1").unwrap();
    assert!(done.completed_at.is_some());
}

#[test]
fn test_delete_permanently_blocks_dependents() {
    let dir = tempdir().unwrap();
    let manager = manager_in(dir.path());
    manager
        .add_task("Base".into(), 1, Category::Feature, vec![], None)
        .unwrap();
    manager
        .add_task("Needs base".into(), 1, Category::Feature, vec!["1".into()], None)
        .unwrap();

    manager.delete_task("1").unwrap();

    assert!(manager.ready_tasks().unwrap().is_empty());
    assert!(matches!(
        manager.complete_task("2").unwrap_err(),
        WiggumError::DependencyUnsatisfied { .. }
    ));
    assert!(matches!(
        manager.complete_task("1").unwrap_err(),
        WiggumError::TaskNotFound(_)
    ));
}

#[test]
fn test_engine_tolerates_externally_edited_ids() {
    let dir = tempdir().unwrap();
    let manager = manager_in(dir.path());
    manager
        .add_task("First".into(), 1, Category::Feature, vec![], None)
        .unwrap();

    // Hand-edit the document with a non-numeric id; the engine keeps
    // assigning from the numeric maximum.
    let path = dir.path().join("plans").join("prd.json");
    let mut prd: wiggum::model::Prd =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    prd.backlog[0].id = "weird".into();
    std::fs::write(&path, serde_json::to_string_pretty(&prd).unwrap()).unwrap();

    let task = manager
        .add_task("Second".into(), 1, Category::Feature, vec![], None)
        .unwrap();
    assert_eq!(task.id, "1");
}
