//! Persistence layer
//!
//! Narrow store interfaces for the two persisted entity kinds plus the
//! file-backed implementations: one TOML document per record, written
//! atomically (temp file + rename) so concurrent upserts of the same id
//! serialize to last-write-wins with no torn document.

mod file;
mod job;
mod task;

pub use job::{FileJobStore, JobRecord};
pub use task::{FileTaskStore, TaskRecord};

use thiserror::Error;

use crate::models::{Job, Task};

/// Errors from the persistence boundary
///
/// These are fatal from the pipeline's point of view: they propagate to the
/// caller unchanged, with no compensating rollback.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO failure reading or writing a record
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    /// Record failed to serialize
    #[error("store serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Stored record is not valid TOML
    #[error("store deserialize error: {0}")]
    Deserialize(#[from] toml::de::Error),
}

/// Store for persisted jobs
pub trait JobStore: Send + Sync {
    /// Idempotently upsert jobs by id; returns the number written
    fn upsert(&self, jobs: &[Job]) -> Result<usize, StoreError>;

    /// List stored jobs, ordered by creation time descending
    fn list(&self, limit: usize) -> Result<Vec<JobRecord>, StoreError>;
}

/// Store for persisted ranked tasks
pub trait TaskStore: Send + Sync {
    /// Idempotently upsert tasks by id; returns the number written
    fn upsert(&self, tasks: &[Task]) -> Result<usize, StoreError>;

    /// List stored tasks
    fn list(&self, limit: usize) -> Result<Vec<TaskRecord>, StoreError>;
}
