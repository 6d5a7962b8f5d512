//! Tests for the file-backed stores

use tempfile::TempDir;

use trackr::models::{Job, Task};
use trackr::storage::{FileJobStore, FileTaskStore, JobStore, TaskStore};

fn job(id: &str, title: &str) -> Job {
    Job {
        id: id.to_string(),
        title: title.to_string(),
        module: "Math".to_string(),
        due_at: Some("2026-03-09T12:00:00Z".to_string()),
        due_at_is_synthetic: true,
        module_weight_percent: 47,
        estimated_hours: 3,
        notes: "Parsed from page content".to_string(),
    }
}

fn task(id: &str, title: &str, priority: i64) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        subject: "Math".to_string(),
        deadline: "2026-03-09T12:00:00Z".to_string(),
        priority,
    }
}

mod jobs {
    use super::*;

    #[test]
    fn upsert_then_list_round_trips_fields() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileJobStore::new(dir.path());

        let count = store.upsert(&[job("job-1", "Math Coursework")]).expect("upsert");
        assert_eq!(count, 1);

        let records = store.list(10).expect("list");
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.id, "job-1");
        assert_eq!(record.title, "Math Coursework");
        assert_eq!(record.module, "Math");
        assert_eq!(record.due_at.as_deref(), Some("2026-03-09T12:00:00Z"));
        assert!(record.due_at_is_synthetic);
        assert_eq!(record.module_weight_percent, 47);
        assert_eq!(record.estimated_hours, 3);
        assert!(!record.created_at.is_empty());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn reupsert_overwrites_without_duplicating() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileJobStore::new(dir.path());

        store.upsert(&[job("job-1", "First Title")]).expect("first upsert");
        let first = store.list(10).expect("list")[0].clone();

        store.upsert(&[job("job-1", "Second Title")]).expect("second upsert");
        let records = store.list(10).expect("list");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Second Title");
        assert_eq!(records[0].created_at, first.created_at);
    }

    #[test]
    fn missing_due_date_round_trips_as_none() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileJobStore::new(dir.path());

        let mut dateless = job("job-1", "Dateless");
        dateless.due_at = None;
        dateless.due_at_is_synthetic = false;

        store.upsert(&[dateless]).expect("upsert");
        let records = store.list(10).expect("list");
        assert_eq!(records[0].due_at, None);
        assert!(!records[0].due_at_is_synthetic);
    }

    #[test]
    fn list_respects_limit_with_floor_of_one() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileJobStore::new(dir.path());

        let batch: Vec<Job> =
            (1..=5).map(|i| job(&format!("job-{i}"), "Title")).collect();
        store.upsert(&batch).expect("upsert");

        assert_eq!(store.list(3).expect("list").len(), 3);
        assert_eq!(store.list(0).expect("list").len(), 1);
        assert_eq!(store.list(100).expect("list").len(), 5);
    }

    #[test]
    fn list_on_empty_store_is_empty() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileJobStore::new(dir.path());
        assert!(store.list(10).expect("list").is_empty());
    }

    #[test]
    fn ids_with_path_hostile_characters_are_stored_safely() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileJobStore::new(dir.path());

        store.upsert(&[job("job/../1", "Hostile Id")]).expect("upsert");
        let records = store.list(10).expect("list");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "job/../1");
    }
}

mod tasks {
    use super::*;

    #[test]
    fn upsert_then_list_round_trips_fields() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileTaskStore::new(dir.path());

        store.upsert(&[task("task-1", "Math Coursework", 79)]).expect("upsert");
        let records = store.list(10).expect("list");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "task-1");
        assert_eq!(records[0].subject, "Math");
        assert_eq!(records[0].priority, 79);
    }

    #[test]
    fn reupsert_takes_latest_priority() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileTaskStore::new(dir.path());

        store.upsert(&[task("task-1", "Essay", 40)]).expect("first upsert");
        store.upsert(&[task("task-1", "Essay", 88)]).expect("second upsert");

        let records = store.list(10).expect("list");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].priority, 88);
    }

    #[test]
    fn list_orders_by_priority_descending() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileTaskStore::new(dir.path());

        store
            .upsert(&[
                task("task-1", "Low", 20),
                task("task-2", "High", 95),
                task("task-3", "Mid", 55),
            ])
            .expect("upsert");

        let records = store.list(10).expect("list");
        let priorities: Vec<i64> = records.iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![95, 55, 20]);
    }

    #[test]
    fn equal_priorities_order_by_id() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileTaskStore::new(dir.path());

        store
            .upsert(&[task("task-b", "B", 50), task("task-a", "A", 50)])
            .expect("upsert");

        let records = store.list(10).expect("list");
        assert_eq!(records[0].id, "task-a");
        assert_eq!(records[1].id, "task-b");
    }
}
