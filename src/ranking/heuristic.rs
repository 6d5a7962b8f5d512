//! Heuristic ranker
//!
//! Deterministic scoring used as the oracle's fallback and as a baseline in
//! its own right. Score blends urgency (due-date distance), module weight
//! and effort: `0.55*urgency + 0.35*module + 0.10*effort`.

use chrono::{DateTime, Utc};

use crate::models::{PriorityBand, RankableTask, RatedTask};

use super::{RankingResult, TaskRanker, HEURISTIC_SUMMARY};

/// Days-left assigned to tasks with no parseable due date
///
/// Deliberately large so an unknown deadline reads as "not urgent" rather
/// than "overdue".
const UNKNOWN_DUE_DAYS: i64 = 365;

/// Whole days until `due_at`, relative to `now`
fn days_until(due_at: Option<&str>, now: DateTime<Utc>) -> i64 {
    due_at
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map_or(UNKNOWN_DUE_DAYS, |due| (due.with_timezone(&Utc) - now).num_days())
}

fn clamp_component(value: i64) -> i64 {
    value.clamp(0, 100)
}

/// Rate tasks deterministically, relative to the current time
#[must_use]
pub fn heuristic_rate(tasks: &[RankableTask]) -> Vec<RatedTask> {
    heuristic_rate_at(tasks, Utc::now())
}

/// Rate tasks deterministically with a fixed "now"
///
/// Output is sorted by score descending; ties keep input order (the sort is
/// stable).
#[must_use]
pub fn heuristic_rate_at(tasks: &[RankableTask], now: DateTime<Utc>) -> Vec<RatedTask> {
    let mut rated: Vec<RatedTask> = tasks
        .iter()
        .map(|task| {
            let days_left = days_until(task.due_at.as_deref(), now);
            let urgency = clamp_component(100 - days_left * 8);
            let module_score = clamp_component(task.module_weight_percent * 2);
            let effort_score = clamp_component(task.estimated_hours * 9);

            #[allow(clippy::cast_precision_loss)]
            let score = (urgency as f64).mul_add(
                0.55,
                (module_score as f64).mul_add(0.35, effort_score as f64 * 0.10),
            );
            #[allow(clippy::cast_possible_truncation)]
            let score = score.round() as i64;

            RatedTask {
                id: task.id.clone(),
                title: task.title.clone(),
                priority_score: score,
                priority_band: PriorityBand::from_score(score),
                reason: format!(
                    "Urgency={urgency}, Module={module_score}, Effort={effort_score}"
                ),
            }
        })
        .collect();

    rated.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));
    rated
}

/// Heuristic-only ranking backend
///
/// Used when live ranking is disabled or unconfigured. Always reports
/// `fallback = true` so callers can tell heuristic scores from oracle
/// scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicRanker;

impl HeuristicRanker {
    const PROVIDER: &'static str = "heuristic";
    const MODEL: &'static str = "urgency-weight-effort";
}

impl TaskRanker for HeuristicRanker {
    fn rate_tasks(
        &self,
        tasks: &[RankableTask],
        custom_prompt: &str,
        temperature: f64,
    ) -> RankingResult {
        if tasks.is_empty() {
            return RankingResult::no_tasks(Self::PROVIDER, Self::MODEL, custom_prompt, temperature);
        }

        RankingResult {
            provider: Self::PROVIDER.to_string(),
            model: Self::MODEL.to_string(),
            fallback: true,
            summary: HEURISTIC_SUMMARY.to_string(),
            fallback_reason: Some("Live LLM is disabled or unconfigured".to_string()),
            rated_tasks: heuristic_rate(tasks),
            prompt_used: custom_prompt.to_string(),
            temperature,
        }
    }
}
