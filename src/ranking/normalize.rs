//! Oracle output normalization
//!
//! All distrust of the oracle is concentrated here: a pure function that
//! takes whatever JSON the oracle produced plus the known-complete input
//! task set, and always emits a schema-valid result with exactly one rated
//! task per input task. Missing ids are healed with heuristic scores;
//! repeated ids keep their first occurrence; malformed fields are coerced
//! or defaulted, never propagated as errors.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::models::{PriorityBand, RankableTask, RatedTask};

use super::heuristic::heuristic_rate_at;

/// Reason attached to items the oracle scored without explaining
const DEFAULT_REASON: &str = "Gemini prioritization";

/// Normalized, complete ranking output
#[derive(Debug, Clone)]
pub struct NormalizedRanking {
    /// Oracle-provided summary, or a generated one
    pub summary: String,
    /// One rated task per input task, score-descending
    pub rated_tasks: Vec<RatedTask>,
}

/// Normalize untrusted oracle output against the input task set
#[must_use]
pub fn normalize_rated(payload: &Value, tasks: &[RankableTask]) -> NormalizedRanking {
    normalize_rated_at(payload, tasks, Utc::now())
}

/// Normalize with a fixed "now" for the heuristic healing pass
#[must_use]
pub fn normalize_rated_at(
    payload: &Value,
    tasks: &[RankableTask],
    now: DateTime<Utc>,
) -> NormalizedRanking {
    let items = ranked_items(payload);

    let source_tasks: HashMap<&str, &RankableTask> =
        tasks.iter().map(|t| (t.id.as_str(), t)).collect();

    let mut normalized: Vec<RatedTask> = Vec::with_capacity(tasks.len());
    let mut used_ids: Vec<String> = Vec::new();

    for (idx, item) in items.iter().enumerate() {
        let Some(obj) = item.as_object() else {
            continue;
        };
        let position = idx + 1;

        let id = first_string(obj, &["id", "task_id", "taskId"])
            .unwrap_or_else(|| format!("task-{position}"));
        // One rated task per id; if the oracle repeats an id, the first
        // occurrence wins.
        if used_ids.contains(&id) {
            continue;
        }
        let source = source_tasks.get(id.as_str());

        let title = first_string(obj, &["title"])
            .or_else(|| source.map(|t| t.title.clone()))
            .unwrap_or_else(|| format!("Task {position}"));

        let score = first_score(obj, &["priority_score", "priorityScore", "score"]);

        let band = first_string(obj, &["priority_band", "priorityBand"])
            .and_then(|raw| raw.parse::<PriorityBand>().ok())
            .unwrap_or_else(|| PriorityBand::from_score(score));

        let reason =
            first_string(obj, &["reason"]).unwrap_or_else(|| DEFAULT_REASON.to_string());

        used_ids.push(id.clone());
        normalized.push(RatedTask {
            id,
            title,
            priority_score: score,
            priority_band: band,
            reason,
        });
    }

    // Completeness guarantee: any input id the oracle dropped gets the
    // heuristic's score for that task.
    for row in heuristic_rate_at(tasks, now) {
        if !used_ids.contains(&row.id) {
            normalized.push(row);
        }
    }

    normalized.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));

    let summary = payload
        .as_object()
        .and_then(|obj| first_string(obj, &["summary", "message"]))
        .unwrap_or_else(|| format!("Prioritized {} tasks", normalized.len()));

    NormalizedRanking {
        summary,
        rated_tasks: normalized,
    }
}

/// Pull the ranked item list out of the payload
///
/// Accepts a bare array, an object carrying the list under any accepted
/// key, or a single object coerced into a one-element list.
fn ranked_items(payload: &Value) -> Vec<Value> {
    if let Some(array) = payload.as_array() {
        return array.clone();
    }

    let Some(obj) = payload.as_object() else {
        return Vec::new();
    };

    for key in ["rated_tasks", "ratedTasks", "tasks"] {
        match obj.get(key) {
            Some(Value::Array(array)) => return array.clone(),
            Some(single @ Value::Object(_)) => return vec![single.clone()],
            _ => {},
        }
    }
    Vec::new()
}

/// First non-blank string (or stringified number) under any of the keys
fn first_string(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    for key in keys {
        match obj.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {},
        }
    }
    None
}

/// First coercible score under any of the keys, clamped to [0, 100]
///
/// Numbers and numeric strings both count; anything else defaults to 0.
fn first_score(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> i64 {
    for key in keys {
        let coerced = match obj.get(*key) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        if let Some(value) = coerced {
            #[allow(clippy::cast_possible_truncation)]
            return (value.round() as i64).clamp(0, 100);
        }
    }
    0
}
