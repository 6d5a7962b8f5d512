//! Job storage
//!
//! Persisted form of parsed assignments. `created_at` is set once on first
//! insert and preserved across upserts; `updated_at` moves on every write.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::Job;

use super::file::{read_doc, read_all_docs, utc_now_iso, write_doc};
use super::{JobStore, StoreError};

/// Stored job document (job fields plus store-owned timestamps)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    /// Upsert key
    pub id: String,
    /// Assignment title
    pub title: String,
    /// Category tag
    #[serde(default)]
    pub module: String,
    /// Due date (ISO-8601 UTC), if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<String>,
    /// Whether `due_at` is a synthesized placeholder
    #[serde(default)]
    pub due_at_is_synthetic: bool,
    /// Module weight percent
    #[serde(default)]
    pub module_weight_percent: i64,
    /// Effort estimate in hours
    #[serde(default)]
    pub estimated_hours: i64,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
    /// First-insert timestamp, never changed afterwards
    pub created_at: String,
    /// Last-write timestamp
    pub updated_at: String,
}

impl JobRecord {
    fn from_job(job: &Job, created_at: String, updated_at: String) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            module: job.module.clone(),
            due_at: job.due_at.clone(),
            due_at_is_synthetic: job.due_at_is_synthetic,
            module_weight_percent: job.module_weight_percent,
            estimated_hours: job.estimated_hours,
            notes: job.notes.clone(),
            created_at,
            updated_at,
        }
    }
}

/// File-backed job store (one TOML document per job)
#[derive(Debug, Clone)]
pub struct FileJobStore {
    dir: PathBuf,
}

impl FileJobStore {
    /// Create a store rooted at `data_dir/jobs`
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join("jobs"),
        }
    }
}

impl JobStore for FileJobStore {
    fn upsert(&self, jobs: &[Job]) -> Result<usize, StoreError> {
        let now = utc_now_iso();

        for job in jobs {
            let created_at = read_doc(&self.dir, &job.id)?
                .and_then(|content| toml::from_str::<JobRecord>(&content).ok())
                .map_or_else(|| now.clone(), |existing| existing.created_at);

            let record = JobRecord::from_job(job, created_at, now.clone());
            let content = toml::to_string_pretty(&record)?;
            write_doc(&self.dir, &job.id, &content)?;
        }

        log::debug!("upserted {} job(s)", jobs.len());
        Ok(jobs.len())
    }

    fn list(&self, limit: usize) -> Result<Vec<JobRecord>, StoreError> {
        let mut records = Vec::new();
        for content in read_all_docs(&self.dir)? {
            records.push(toml::from_str::<JobRecord>(&content)?);
        }

        // Creation time descending; id breaks ties from same-run inserts.
        records.sort_by(|a, b| {
            b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id))
        });
        records.truncate(limit.max(1));
        Ok(records)
    }
}
