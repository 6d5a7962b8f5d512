//! Assignment model
//!
//! An assignment is a candidate task record extracted from raw page markup.
//! It is transient: the parser produces it, the workflow turns it into
//! persisted jobs and rankable tasks.

use serde::{Deserialize, Serialize};

/// A candidate task extracted from raw markup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    /// Extracted title (never empty)
    pub title: String,

    /// Category tag derived from the title (e.g. "Math", "General")
    pub module: String,

    /// Due date as ISO-8601 UTC with a trailing `Z`, if known
    #[serde(default)]
    pub due_at: Option<String>,

    /// Whether `due_at` is a synthesized placeholder rather than a fact
    /// extracted from the source page
    #[serde(default)]
    pub due_at_is_synthetic: bool,

    /// Weight of the owning module, percent in [0, 100]
    #[serde(default)]
    pub module_weight_percent: i64,

    /// Rough effort estimate in hours
    #[serde(default)]
    pub estimated_hours: i64,

    /// Free-form provenance notes
    #[serde(default)]
    pub notes: String,
}
