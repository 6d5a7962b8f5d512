//! Persisted models
//!
//! `Job` is the persisted form of an assignment, `Task` the persisted form
//! of a rated task. Both are desired-state values: the pipeline builds
//! them, the stores own timestamps and durability.

use serde::{Deserialize, Serialize};

use crate::models::Assignment;

/// Persisted assignment, keyed by a run-scoped positional id (`job-{i}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Stable upsert key
    pub id: String,

    /// Assignment title
    pub title: String,

    /// Category tag
    #[serde(default)]
    pub module: String,

    /// Due date (ISO-8601 UTC), if known
    #[serde(default)]
    pub due_at: Option<String>,

    /// Whether `due_at` is a synthesized placeholder
    #[serde(default)]
    pub due_at_is_synthetic: bool,

    /// Module weight percent in [0, 100]
    #[serde(default)]
    pub module_weight_percent: i64,

    /// Effort estimate in hours
    #[serde(default)]
    pub estimated_hours: i64,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,
}

impl Job {
    /// Build the persisted form of an assignment
    #[must_use]
    pub fn from_assignment(id: String, assignment: &Assignment) -> Self {
        Self {
            id,
            title: assignment.title.clone(),
            module: assignment.module.clone(),
            due_at: assignment.due_at.clone(),
            due_at_is_synthetic: assignment.due_at_is_synthetic,
            module_weight_percent: assignment.module_weight_percent,
            estimated_hours: assignment.estimated_hours,
            notes: assignment.notes.clone(),
        }
    }
}

/// Persisted ranked task, overwritten on every pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Stable upsert key (same as the rankable task id)
    pub id: String,

    /// Task title
    pub title: String,

    /// Subject, denormalized from the originating assignment's module
    #[serde(default)]
    pub subject: String,

    /// Deadline as a string, empty when the due date is unknown
    #[serde(default)]
    pub deadline: String,

    /// Priority in [1, 100]; 1 means "ranked but low", never 0
    pub priority: i64,
}
