//! Ranked-task storage
//!
//! Persisted form of rated tasks. Overwritten on every pipeline run keyed
//! by task id; there is no deletion path.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::Task;

use super::file::{read_doc, read_all_docs, utc_now_iso, write_doc};
use super::{StoreError, TaskStore};

/// Stored task document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Upsert key
    pub id: String,
    /// Task title
    pub title: String,
    /// Subject (module of the originating assignment)
    #[serde(default)]
    pub subject: String,
    /// Deadline string, empty when unknown
    #[serde(default)]
    pub deadline: String,
    /// Priority in [1, 100]
    pub priority: i64,
    /// First-insert timestamp
    pub created_at: String,
    /// Last-write timestamp
    pub updated_at: String,
}

impl TaskRecord {
    fn from_task(task: &Task, created_at: String, updated_at: String) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            subject: task.subject.clone(),
            deadline: task.deadline.clone(),
            priority: task.priority,
            created_at,
            updated_at,
        }
    }
}

/// File-backed task store (one TOML document per task)
#[derive(Debug, Clone)]
pub struct FileTaskStore {
    dir: PathBuf,
}

impl FileTaskStore {
    /// Create a store rooted at `data_dir/tasks`
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join("tasks"),
        }
    }
}

impl TaskStore for FileTaskStore {
    fn upsert(&self, tasks: &[Task]) -> Result<usize, StoreError> {
        let now = utc_now_iso();

        for task in tasks {
            let created_at = read_doc(&self.dir, &task.id)?
                .and_then(|content| toml::from_str::<TaskRecord>(&content).ok())
                .map_or_else(|| now.clone(), |existing| existing.created_at);

            let record = TaskRecord::from_task(task, created_at, now.clone());
            let content = toml::to_string_pretty(&record)?;
            write_doc(&self.dir, &task.id, &content)?;
        }

        log::debug!("upserted {} task(s)", tasks.len());
        Ok(tasks.len())
    }

    fn list(&self, limit: usize) -> Result<Vec<TaskRecord>, StoreError> {
        let mut records = Vec::new();
        for content in read_all_docs(&self.dir)? {
            records.push(toml::from_str::<TaskRecord>(&content)?);
        }

        // Highest priority first; id breaks ties.
        records.sort_by(|a, b| {
            b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id))
        });
        records.truncate(limit.max(1));
        Ok(records)
    }
}
