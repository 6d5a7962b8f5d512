//! Ranking task models
//!
//! `RankableTask` is the unit handed to the ranking oracle; `RatedTask` is
//! what comes back. Ids are stable within one pipeline run (`task-1`,
//! `task-2`, ...) and align positionally with persisted jobs.

use serde::{Deserialize, Serialize};

use crate::models::Assignment;

/// A task submitted for priority ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankableTask {
    /// Run-scoped id, `task-{1-based index}`
    pub id: String,

    /// Task title
    pub title: String,

    /// Category tag
    #[serde(default)]
    pub module: String,

    /// Due date (ISO-8601 UTC), if known
    #[serde(default)]
    pub due_at: Option<String>,

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

/// A task with a priority assigned by the oracle or the heuristic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatedTask {
    /// Id of the originating `RankableTask`
    pub id: String,

    /// Task title
    pub title: String,

    /// Priority score in [0, 100]
    pub priority_score: i64,

    /// Score band
    pub priority_band: PriorityBand,

    /// Short diagnostic explaining the score
    pub reason: String,
}

/// Priority band derived from a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityBand {
    /// Score >= 85
    Critical,
    /// Score >= 70
    High,
    /// Score >= 45
    Medium,
    /// Everything below
    Low,
}

impl PriorityBand {
    /// Derive the band for a score
    #[must_use]
    pub const fn from_score(score: i64) -> Self {
        if score >= 85 {
            Self::Critical
        } else if score >= 70 {
            Self::High
        } else if score >= 45 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for PriorityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for PriorityBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Invalid priority band: {s}. Use: critical, high, medium, low")),
        }
    }
}

/// Build the rankable task list for one run
///
/// Ids are assigned positionally (`task-1`, `task-2`, ...) so they line up
/// 1:1 with the jobs persisted from the same assignment list.
#[must_use]
pub fn build_rankable_tasks(assignments: &[Assignment]) -> Vec<RankableTask> {
    assignments
        .iter()
        .enumerate()
        .map(|(idx, a)| RankableTask {
            id: format!("task-{}", idx + 1),
            title: a.title.clone(),
            module: a.module.clone(),
            due_at: a.due_at.clone(),
            module_weight_percent: a.module_weight_percent,
            estimated_hours: a.estimated_hours,
            notes: a.notes.clone(),
        })
        .collect()
}
