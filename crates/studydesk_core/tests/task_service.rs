use studydesk_core::db::open_db_in_memory;
use studydesk_core::model::task::{Priority, TaskDraft, TaskPatch};
use studydesk_core::model::ValidationError;
use studydesk_core::service::task_service::TaskService;
use studydesk_core::{KvStore, ServiceError, SqliteKvStore, Storage};

fn raw_tasks(store: &SqliteKvStore<'_>) -> Option<String> {
    store.get_value("tasks").unwrap()
}

#[test]
fn create_persists_and_reloads() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);

    let mut service = TaskService::open(Storage::new(store)).unwrap();
    let mut draft = TaskDraft::new("Physics worksheet");
    draft.priority = Priority::High;
    draft.due_date = "2026-10-20".to_string();
    let created = service.create(draft).unwrap();
    assert!(!created.is_completed);

    let reopened = TaskService::open(Storage::new(store)).unwrap();
    assert_eq!(reopened.tasks(), &[created]);
}

#[test]
fn deleting_unknown_id_leaves_stored_bytes_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    let mut service = TaskService::open(Storage::new(store)).unwrap();
    service.create(TaskDraft::new("Read chapter 4")).unwrap();
    service.create(TaskDraft::new("Revise formulas")).unwrap();
    let before = raw_tasks(&store);

    service.delete("no-such-id").unwrap();

    assert_eq!(raw_tasks(&store), before);
    assert_eq!(service.tasks().len(), 2);
}

#[test]
fn blank_title_is_rejected_without_touching_storage() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    let mut service = TaskService::open(Storage::new(store)).unwrap();

    let err = service.create(TaskDraft::new("   ")).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::EmptyField("title"))
    ));
    assert!(service.tasks().is_empty());
    assert_eq!(raw_tasks(&store), None);
}

#[test]
fn update_and_toggle_of_unknown_id_are_no_ops() {
    let conn = open_db_in_memory().unwrap();
    let mut service = TaskService::open(Storage::new(SqliteKvStore::new(&conn))).unwrap();

    let patch = TaskPatch {
        title: Some("ghost".to_string()),
        ..TaskPatch::default()
    };
    assert_eq!(service.update("missing", patch).unwrap(), None);
    assert_eq!(service.toggle_completed("missing").unwrap(), None);
    assert!(service.tasks().is_empty());
}

#[test]
fn toggle_moves_task_between_pending_and_completed() {
    let conn = open_db_in_memory().unwrap();
    let mut service = TaskService::open(Storage::new(SqliteKvStore::new(&conn))).unwrap();
    let task = service.create(TaskDraft::new("Lab report")).unwrap();

    assert_eq!(service.toggle_completed(&task.id).unwrap(), Some(true));
    assert!(service.pending().is_empty());
    assert_eq!(service.completed().len(), 1);

    assert_eq!(service.toggle_completed(&task.id).unwrap(), Some(false));
    assert_eq!(service.pending().len(), 1);
}

#[test]
fn update_rejects_blanking_the_title() {
    let conn = open_db_in_memory().unwrap();
    let mut service = TaskService::open(Storage::new(SqliteKvStore::new(&conn))).unwrap();
    let task = service.create(TaskDraft::new("Essay outline")).unwrap();

    let patch = TaskPatch {
        title: Some(String::new()),
        ..TaskPatch::default()
    };
    assert!(service.update(&task.id, patch).unwrap_err().is_validation());
    assert_eq!(service.get(&task.id).unwrap().title, "Essay outline");
}

#[test]
fn failed_write_keeps_change_in_memory_until_flush() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    let mut service = TaskService::open(Storage::new(store)).unwrap();

    conn.execute_batch("PRAGMA query_only = ON;").unwrap();
    let err = service.create(TaskDraft::new("Offline task")).unwrap_err();
    assert!(matches!(err, ServiceError::NotSaved(_)));
    assert!(service.is_dirty());
    assert_eq!(service.tasks().len(), 1);
    assert!(service.flush().is_err());

    conn.execute_batch("PRAGMA query_only = OFF;").unwrap();
    service.flush().unwrap();
    assert!(!service.is_dirty());

    let reopened = TaskService::open(Storage::new(store)).unwrap();
    assert_eq!(reopened.tasks()[0].title, "Offline task");
}
